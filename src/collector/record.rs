//! A record is one equivalence class of result objects.

use std::sync::Arc;

/// One equivalence class of result objects: derived summary data plus the
/// member instances in arrival order.
///
/// Owned exclusively by the collector that created it. `data` is computed
/// once from the first admitted instance and never changes afterwards.
#[derive(Debug)]
pub struct Record<T, D> {
    data: D,
    instances: Vec<Arc<T>>,
}

impl<T, D> Record<T, D> {
    pub(crate) fn new(data: D) -> Self {
        Self {
            data,
            instances: Vec::new(),
        }
    }

    /// The caller-derived summary for this class.
    pub fn data(&self) -> &D {
        &self.data
    }

    /// Member instances, in arrival order.
    pub fn instances(&self) -> &[Arc<T>] {
        &self.instances
    }

    /// Number of instances in this record.
    pub fn count(&self) -> usize {
        self.instances.len()
    }

    /// Append an instance unless the same allocation is already a member.
    ///
    /// Pointer identity guards against the same API object being ingested
    /// twice, e.g. across overlapping pages. Returns whether it was added.
    pub(crate) fn insert(&mut self, instance: Arc<T>) -> bool {
        if self
            .instances
            .iter()
            .any(|present| Arc::ptr_eq(present, &instance))
        {
            return false;
        }
        self.instances.push(instance);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_keeps_arrival_order() {
        let mut record = Record::new(());
        let first = Arc::new("a");
        let second = Arc::new("b");

        assert!(record.insert(first.clone()));
        assert!(record.insert(second.clone()));

        assert_eq!(record.count(), 2);
        assert!(Arc::ptr_eq(&record.instances()[0], &first));
        assert!(Arc::ptr_eq(&record.instances()[1], &second));
    }

    #[test]
    fn insert_suppresses_same_allocation() {
        let mut record = Record::new(());
        let instance = Arc::new(42);

        assert!(record.insert(instance.clone()));
        assert!(!record.insert(instance.clone()));
        assert_eq!(record.count(), 1);
    }

    #[test]
    fn equal_but_distinct_allocations_both_kept() {
        let mut record = Record::new(());

        // Identity is by pointer, not by value.
        assert!(record.insert(Arc::new(42)));
        assert!(record.insert(Arc::new(42)));
        assert_eq!(record.count(), 2);
    }

    #[test]
    fn data_is_readable() {
        let record: Record<i32, &str> = Record::new("summary");
        assert_eq!(*record.data(), "summary");
        assert_eq!(record.count(), 0);
    }
}
