//! Pluggable classification: admission, equivalence, summary derivation.
//!
//! A [`crate::RecordCollector`] is configured at construction with one
//! classifier implementing [`Classify`] (or [`ClassifyAsync`] when a
//! predicate needs to perform its own lookups). The three members are
//! independently defaulted: an implementation providing only `to_data`
//! accepts every object and merges everything into a single record.

pub mod common;

use std::future::Future;

use crate::collector::record::Record;

/// The capability set a collector is configured with.
///
/// All methods take the candidate object by reference and must have no
/// observable side effects beyond their return value.
pub trait Classify<T> {
    /// Summary type derived once per record from its first instance.
    type Data;
    /// Error raised by any member; aborts ingestion mid-sequence.
    type Error;

    /// Admission filter. Rejected objects are dropped silently and touch
    /// no record.
    fn will_accept(&self, object: &T) -> Result<bool, Self::Error> {
        let _ = object;
        Ok(true)
    }

    /// Whether `object` belongs to the equivalence class of `record`.
    ///
    /// Contract: at most one existing record may claim an object. The
    /// collector does not enforce this; violating it makes placement
    /// depend on record creation order.
    fn encompasses(&self, record: &Record<T, Self::Data>, object: &T) -> Result<bool, Self::Error> {
        let _ = (record, object);
        Ok(true)
    }

    /// Derive a record's immutable summary from its first instance.
    fn to_data(&self, object: &T) -> Result<Self::Data, Self::Error>;
}

/// Asynchronous form of [`Classify`] for predicates that perform their own
/// lookups (e.g. "is this award's owning event already finished").
///
/// The collector polls each future to completion before touching the next
/// result object, so evaluation is strictly serialized and the futures do
/// not need to be `Send`: nothing ever leaves the ingesting task.
pub trait ClassifyAsync<T> {
    type Data;
    type Error;

    fn will_accept(&self, object: &T) -> impl Future<Output = Result<bool, Self::Error>> {
        async move {
            let _ = object;
            Ok(true)
        }
    }

    fn encompasses(
        &self,
        record: &Record<T, Self::Data>,
        object: &T,
    ) -> impl Future<Output = Result<bool, Self::Error>> {
        async move {
            let _ = (record, object);
            Ok(true)
        }
    }

    fn to_data(&self, object: &T) -> impl Future<Output = Result<Self::Data, Self::Error>>;
}
