//! Event records and their identifiers.

use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveDate, Timelike};
use serde::{Deserialize, Serialize};

use crate::Category;

/// Store-assigned record identifier.
///
/// Identifiers increase monotonically and are never reused, even after the
/// record they named has been deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(i64);

impl RecordId {
    /// Wraps a raw identifier.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw identifier.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl From<i64> for RecordId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One logged occurrence of a category at a point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Identifier assigned by the store.
    pub id: RecordId,
    /// What kind of event this is.
    pub category: Category,
    /// When the event was logged, with the local offset at creation time.
    pub timestamp: DateTime<FixedOffset>,
    /// Cached minutes since the previous record of the same category.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elapsed_minutes: Option<i64>,
}

impl EventRecord {
    /// Calendar day of the record in the offset it was logged with.
    pub fn calendar_date(&self) -> NaiveDate {
        self.timestamp.date_naive()
    }
}

/// Truncates a timestamp to whole minutes.
pub fn minute_precision(timestamp: DateTime<FixedOffset>) -> DateTime<FixedOffset> {
    timestamp
        .with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(timestamp)
}
