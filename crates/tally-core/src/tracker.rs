//! User-action facade over a [`RecordStore`].

use chrono::{DateTime, FixedOffset, Local, NaiveDate};

use crate::aggregate::{self, View};
use crate::{Category, RecordId, RecordStore, StoreError, minute_precision};

/// Drives the store from user actions and re-derives the view after each one.
///
/// The tracker remembers the selected day so that submissions and removals
/// refresh the same view the user is looking at.
#[derive(Debug)]
pub struct Tracker<S> {
    store: S,
    selected_date: Option<NaiveDate>,
}

impl<S: RecordStore> Tracker<S> {
    /// Creates a tracker scoped to the current local day.
    pub fn new(store: S) -> Self {
        Self::with_selected_date(store, Some(Local::now().date_naive()))
    }

    /// Creates a tracker scoped to `selected_date` (`None` shows every day).
    pub const fn with_selected_date(store: S, selected_date: Option<NaiveDate>) -> Self {
        Self {
            store,
            selected_date,
        }
    }

    pub const fn selected_date(&self) -> Option<NaiveDate> {
        self.selected_date
    }

    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Whether the view is scoped to exactly `day`.
    pub fn shows_day(&self, day: NaiveDate) -> bool {
        self.selected_date == Some(day)
    }

    /// Logs a new record at the current local time.
    pub fn submit(&mut self, category: Category) -> Result<(RecordId, View), StoreError> {
        self.submit_at(category, Local::now().fixed_offset())
    }

    /// Logs a new record at `now`, truncated to the minute.
    pub fn submit_at(
        &mut self,
        category: Category,
        now: DateTime<FixedOffset>,
    ) -> Result<(RecordId, View), StoreError> {
        let id = self.store.create(category, minute_precision(now))?;
        tracing::debug!(%id, %category, "record created");
        let view = self.refresh()?;
        Ok((id, view))
    }

    /// Changes the selected day and refreshes.
    pub fn filter_by_date(&mut self, date: Option<NaiveDate>) -> Result<View, StoreError> {
        self.selected_date = date;
        self.refresh()
    }

    /// Deletes a record and refreshes.
    ///
    /// Missing records are ignored; the returned flag says whether anything
    /// was deleted.
    pub fn remove(&mut self, id: RecordId) -> Result<(bool, View), StoreError> {
        let removed = self.store.delete(id)?;
        tracing::debug!(%id, removed, "record delete requested");
        let view = self.refresh()?;
        Ok((removed, view))
    }

    /// Re-derives the view for the selected day.
    pub fn refresh(&mut self) -> Result<View, StoreError> {
        aggregate::refresh(&mut self.store, self.selected_date)
    }
}
