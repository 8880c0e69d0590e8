//! Per-day view derivation.
//!
//! A refresh reads every record, groups them by category, optionally keeps a
//! single calendar day, orders each group newest first and derives the
//! minutes between the two newest records. Each computed delta is written
//! back onto the newest record as its cached `elapsed_minutes`.
//!
//! The cached value is never read back as an input, so a stale value on disk
//! is corrected by the next refresh that covers it. Refreshes scoped to a past
//! day still overwrite the newest record of that day.

use std::collections::BTreeMap;

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::Serialize;

use crate::{Category, EventRecord, RecordId, RecordStore, StoreError};

/// Display state derived by [`refresh`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct View {
    /// The day the view is scoped to, or `None` for every day.
    pub selected_date: Option<NaiveDate>,
    /// Records per category, newest first.
    pub by_category: BTreeMap<Category, Vec<EventRecord>>,
    /// Minutes between the two newest records per category.
    pub deltas: BTreeMap<Category, Option<i64>>,
    /// Categories whose two newest records share a timestamp.
    pub duplicates: Vec<DuplicateTimestamp>,
}

impl View {
    /// Records for a category, newest first.
    pub fn records(&self, category: Category) -> &[EventRecord] {
        self.by_category
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Delta for a category, if one could be computed.
    pub fn delta(&self, category: Category) -> Option<i64> {
        self.deltas.get(&category).copied().flatten()
    }
}

/// Diagnostic for two newest records logged at the same instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateTimestamp {
    pub category: Category,
    pub newest: RecordId,
    pub previous: RecordId,
    pub timestamp: DateTime<FixedOffset>,
}

/// Absolute difference between two timestamps in whole minutes.
pub fn elapsed_minutes(a: DateTime<FixedOffset>, b: DateTime<FixedOffset>) -> i64 {
    (a - b).num_minutes().abs()
}

/// Re-reads the store and derives the view for `selected_date`.
///
/// Persists each computed delta onto the newest record of its category.
/// Duplicate newest timestamps leave the delta absent and skip the write.
pub fn refresh<S>(store: &mut S, selected_date: Option<NaiveDate>) -> Result<View, StoreError>
where
    S: RecordStore + ?Sized,
{
    let records = store.list_all()?;
    tracing::debug!(record_count = records.len(), ?selected_date, "refreshing view");

    let mut view = View {
        selected_date,
        by_category: BTreeMap::new(),
        deltas: BTreeMap::new(),
        duplicates: Vec::new(),
    };

    for category in Category::ALL {
        let mut subset: Vec<EventRecord> = records
            .iter()
            .filter(|record| record.category == category)
            .filter(|record| selected_date.is_none_or(|day| record.calendar_date() == day))
            .cloned()
            .collect();
        // Stable, so equal timestamps keep insertion order.
        subset.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

        let delta = match subset.as_slice() {
            [newest, previous, ..] if newest.timestamp == previous.timestamp => {
                tracing::warn!(
                    %category,
                    newest = %newest.id,
                    previous = %previous.id,
                    timestamp = %newest.timestamp,
                    "two newest records share a timestamp, skipping delta"
                );
                view.duplicates.push(DuplicateTimestamp {
                    category,
                    newest: newest.id,
                    previous: previous.id,
                    timestamp: newest.timestamp,
                });
                None
            }
            [newest, previous, ..] => {
                let minutes = elapsed_minutes(newest.timestamp, previous.timestamp);
                store.update_elapsed(newest.id, minutes)?;
                tracing::debug!(%category, id = %newest.id, minutes, "stored elapsed minutes");
                Some(minutes)
            }
            _ => None,
        };

        if let (Some(minutes), Some(newest)) = (delta, subset.first_mut()) {
            newest.elapsed_minutes = Some(minutes);
        }

        view.deltas.insert(category, delta);
        view.by_category.insert(category, subset);
    }

    Ok(view)
}
