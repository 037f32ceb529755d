//! The record-collection core: grouping, counting, idempotent insertion.

pub mod core;
pub mod record;
