//! Collector core: a single-pass multiset-partition builder.
//!
//! Ingests result objects, groups them into records by the configured
//! classifier, and exposes aggregate counts and flattened instance views.
//! No I/O, no internal locking — suspension only ever happens inside the
//! classifier's own futures.

use std::sync::Arc;

use crate::classify::common::Unclassified;
use crate::classify::{Classify, ClassifyAsync};

use super::record::Record;

/// Groups an incoming sequence of result objects into [`Record`]s by the
/// caller-defined equivalence, counting instances per record.
///
/// Records appear in first-seen order of each equivalence class and are
/// never re-sorted internally; display ordering is the caller's job.
/// Instances are shared `Arc<T>`; re-ingesting the same allocation is a
/// no-op, so overlapping pages cannot double-count.
#[derive(Debug)]
pub struct RecordCollector<T, D, C> {
    classifier: C,
    records: Vec<Record<T, D>>,
}

impl<T, D, C> RecordCollector<T, D, C> {
    /// Create an empty collector configured with `classifier`.
    pub fn new(classifier: C) -> Self {
        Self {
            classifier,
            records: Vec::new(),
        }
    }

    /// The configured classifier.
    pub fn classifier(&self) -> &C {
        &self.classifier
    }

    /// The accumulated records, in first-seen order.
    pub fn records(&self) -> &[Record<T, D>] {
        &self.records
    }

    /// Consume the collector, keeping only its records.
    ///
    /// Useful when the classifier borrows from elsewhere (e.g. a sibling
    /// collector) and the records must outlive that borrow.
    pub fn into_records(self) -> Vec<Record<T, D>> {
        self.records
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sum of every record's instance count.
    pub fn total_instance_count(&self) -> usize {
        self.records.iter().map(Record::count).sum()
    }

    /// Every record's instances, flattened in record-then-instance order.
    pub fn all_instances(&self) -> impl Iterator<Item = &Arc<T>> {
        self.records.iter().flat_map(|record| record.instances().iter())
    }

    /// Discard all records, returning the collector for chaining.
    /// Subsequent ingestion behaves as on a fresh collector.
    pub fn clear(&mut self) -> &mut Self {
        self.records.clear();
        self
    }
}

impl<T> RecordCollector<T, (), Unclassified> {
    /// An unconfigured collector: accepts everything into one record.
    pub fn unclassified() -> Self {
        Self::new(Unclassified)
    }
}

impl<T, C> RecordCollector<T, C::Data, C>
where
    C: Classify<T>,
{
    /// Ingest a finite sequence of result objects, in order.
    ///
    /// Per object: admission check, first-match scan over records in
    /// creation order, record creation on miss (summary derived from this
    /// first instance), then idempotent instance append.
    ///
    /// Fail-fast: a classifier error propagates immediately and objects
    /// already folded in stay recorded. There is no rollback.
    pub fn ingest<I>(&mut self, objects: I) -> Result<(), C::Error>
    where
        I: IntoIterator<Item = Arc<T>>,
    {
        for object in objects {
            if !self.classifier.will_accept(&object)? {
                continue;
            }

            let mut matched = None;
            for (index, record) in self.records.iter().enumerate() {
                if self.classifier.encompasses(record, &object)? {
                    matched = Some(index);
                    break;
                }
            }

            let index = match matched {
                Some(index) => index,
                None => {
                    let data = self.classifier.to_data(&object)?;
                    self.records.push(Record::new(data));
                    self.records.len() - 1
                }
            };

            self.records[index].insert(object);
        }

        Ok(())
    }
}

impl<T, C> RecordCollector<T, C::Data, C>
where
    C: ClassifyAsync<T>,
{
    /// Same contract as [`ingest`](RecordCollector::ingest), with each
    /// classifier member awaited.
    ///
    /// One result object's predicate chain completes before the next
    /// begins; the record sequence is never mutated concurrently.
    pub async fn ingest_async<I>(&mut self, objects: I) -> Result<(), C::Error>
    where
        I: IntoIterator<Item = Arc<T>>,
    {
        for object in objects {
            if !self.classifier.will_accept(&object).await? {
                continue;
            }

            let mut matched = None;
            for (index, record) in self.records.iter().enumerate() {
                if self.classifier.encompasses(record, &object).await? {
                    matched = Some(index);
                    break;
                }
            }

            let index = match matched {
                Some(index) => index,
                None => {
                    let data = self.classifier.to_data(&object).await?;
                    self.records.push(Record::new(data));
                    self.records.len() - 1
                }
            };

            self.records[index].insert(object);
        }

        Ok(())
    }
}
