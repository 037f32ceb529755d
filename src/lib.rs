//! Aggregation of paginated competition-results objects into counted records.
//!
//! The core is [`RecordCollector`]: it ingests opaque result objects
//! (events, awards) shared as `Arc<T>`, groups them into [`Record`]s by a
//! caller-supplied equivalence, counts instances per record, and exposes
//! flattened record/instance views. Classification is pluggable through
//! [`Classify`] (synchronous) and [`ClassifyAsync`] (predicates that need
//! their own lookups, e.g. "is this award's owning event already finished").
//!
//! Everything around the core — the paginated [`source`] boundary, the
//! injected [`cache`] collaborator, and the [`stats`] orchestration that
//! runs event and award collectors side by side — exists so the collector
//! can be exercised the way the surrounding application uses it. Rendering
//! and transport are the caller's problem.

pub mod cache;
pub mod classify;
pub mod collector;
pub mod domain;
pub mod model;
pub mod source;
pub mod stats;

pub use classify::{Classify, ClassifyAsync};
pub use collector::core::RecordCollector;
pub use collector::record::Record;
