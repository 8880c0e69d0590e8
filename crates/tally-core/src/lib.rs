//! Core domain logic for the tally event counter.
//!
//! This crate contains the fundamental types and logic for:
//! - Categories: the closed set of event kinds a user can log
//! - Record storage: the [`RecordStore`] seam and an in-memory implementation
//! - Aggregation: per-day filtering, ordering and the newest-pair delta
//! - Tracking: the [`Tracker`] facade driven by user actions

mod aggregate;
pub mod category;
pub mod record;
pub mod store;
mod tracker;

pub use aggregate::{DuplicateTimestamp, View, elapsed_minutes, refresh};
pub use category::{Category, UnknownCategory};
pub use record::{EventRecord, RecordId, minute_precision};
pub use store::{MemoryStore, RecordStore, StoreError};
pub use tracker::Tracker;
