//! The persistence seam for event records.
//!
//! [`RecordStore`] is implemented by the SQLite database in `tally-db` and by
//! [`MemoryStore`], which keeps everything in a `Vec` and is meant for tests
//! and embedding.

use chrono::{DateTime, FixedOffset};
use thiserror::Error;

use crate::{Category, EventRecord, RecordId};

/// Errors surfaced by a [`RecordStore`].
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing storage could not be opened or accessed.
    #[error("storage unavailable: {0}")]
    Unavailable(#[source] Box<dyn std::error::Error + Send + Sync>),
    /// No record exists with the given ID.
    #[error("record {0} not found")]
    NotFound(RecordId),
    /// A stored record could not be decoded.
    #[error("corrupt record {id}: {message}")]
    Corrupt { id: RecordId, message: String },
}

impl StoreError {
    /// Wraps a backend error as [`StoreError::Unavailable`].
    pub fn unavailable(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Unavailable(err.into())
    }
}

/// Create/read/update/delete access to event records, keyed by [`RecordId`].
pub trait RecordStore {
    /// Persists a new record and returns its freshly assigned ID.
    fn create(
        &mut self,
        category: Category,
        timestamp: DateTime<FixedOffset>,
    ) -> Result<RecordId, StoreError>;

    /// Returns every stored record in insertion order.
    fn list_all(&self) -> Result<Vec<EventRecord>, StoreError>;

    /// Overwrites the cached elapsed minutes of an existing record.
    ///
    /// Every other field is left untouched. Fails with
    /// [`StoreError::NotFound`] when the record does not exist.
    fn update_elapsed(&mut self, id: RecordId, elapsed_minutes: i64) -> Result<(), StoreError>;

    /// Removes a record, returning whether it existed.
    ///
    /// Deleting a missing ID succeeds and returns `false`.
    fn delete(&mut self, id: RecordId) -> Result<bool, StoreError>;
}

impl<S: RecordStore + ?Sized> RecordStore for &mut S {
    fn create(
        &mut self,
        category: Category,
        timestamp: DateTime<FixedOffset>,
    ) -> Result<RecordId, StoreError> {
        (**self).create(category, timestamp)
    }

    fn list_all(&self) -> Result<Vec<EventRecord>, StoreError> {
        (**self).list_all()
    }

    fn update_elapsed(&mut self, id: RecordId, elapsed_minutes: i64) -> Result<(), StoreError> {
        (**self).update_elapsed(id, elapsed_minutes)
    }

    fn delete(&mut self, id: RecordId) -> Result<bool, StoreError> {
        (**self).delete(id)
    }
}

/// In-memory [`RecordStore`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Vec<EventRecord>,
    last_id: i64,
    update_calls: usize,
    unavailable: bool,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of times [`RecordStore::update_elapsed`] has been called.
    pub const fn update_calls(&self) -> usize {
        self.update_calls
    }

    /// Makes every subsequent operation fail with [`StoreError::Unavailable`].
    pub const fn set_unavailable(&mut self, unavailable: bool) {
        self.unavailable = unavailable;
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.unavailable {
            return Err(StoreError::unavailable("memory store marked unavailable"));
        }
        Ok(())
    }
}

impl RecordStore for MemoryStore {
    fn create(
        &mut self,
        category: Category,
        timestamp: DateTime<FixedOffset>,
    ) -> Result<RecordId, StoreError> {
        self.check_available()?;
        self.last_id += 1;
        let id = RecordId::new(self.last_id);
        self.records.push(EventRecord {
            id,
            category,
            timestamp,
            elapsed_minutes: None,
        });
        Ok(id)
    }

    fn list_all(&self) -> Result<Vec<EventRecord>, StoreError> {
        self.check_available()?;
        Ok(self.records.clone())
    }

    fn update_elapsed(&mut self, id: RecordId, elapsed_minutes: i64) -> Result<(), StoreError> {
        self.check_available()?;
        self.update_calls += 1;
        let record = self
            .records
            .iter_mut()
            .find(|record| record.id == id)
            .ok_or(StoreError::NotFound(id))?;
        record.elapsed_minutes = Some(elapsed_minutes);
        Ok(())
    }

    fn delete(&mut self, id: RecordId) -> Result<bool, StoreError> {
        self.check_available()?;
        let before = self.records.len();
        self.records.retain(|record| record.id != id);
        Ok(self.records.len() < before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(s: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(s).unwrap()
    }

    #[test]
    fn create_assigns_unique_ids() {
        let mut store = MemoryStore::new();
        let a = store.create(Category::Water, at("2025-03-04T10:00:00Z")).unwrap();
        let b = store.create(Category::Water, at("2025-03-04T10:00:00Z")).unwrap();
        let c = store.create(Category::Restroom, at("2025-03-04T11:00:00Z")).unwrap();
        assert!(a < b && b < c);

        let ids: Vec<_> = store.list_all().unwrap().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![a, b, c]);
    }

    #[test]
    fn ids_are_not_reused_after_delete() {
        let mut store = MemoryStore::new();
        let a = store.create(Category::Water, at("2025-03-04T10:00:00Z")).unwrap();
        store.delete(a).unwrap();
        let b = store.create(Category::Water, at("2025-03-04T10:05:00Z")).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn update_preserves_other_fields() {
        let mut store = MemoryStore::new();
        let id = store.create(Category::Restroom, at("2025-03-04T10:00:00Z")).unwrap();
        let before = store.list_all().unwrap()[0].clone();

        store.update_elapsed(id, 12).unwrap();

        let after = store.list_all().unwrap()[0].clone();
        assert_eq!(after.elapsed_minutes, Some(12));
        assert_eq!(after.id, before.id);
        assert_eq!(after.category, before.category);
        assert_eq!(after.timestamp, before.timestamp);
    }

    #[test]
    fn update_missing_record_is_not_found() {
        let mut store = MemoryStore::new();
        let err = store.update_elapsed(RecordId::new(9), 1).unwrap_err();
        assert!(matches!(err, StoreError::NotFound(id) if id == RecordId::new(9)));
    }

    #[test]
    fn delete_is_idempotent() {
        let mut store = MemoryStore::new();
        let id = store.create(Category::Water, at("2025-03-04T10:00:00Z")).unwrap();
        assert!(store.delete(id).unwrap());
        assert!(!store.delete(id).unwrap());
        assert!(store.list_all().unwrap().is_empty());
    }

    #[test]
    fn unavailable_store_fails_every_operation() {
        let mut store = MemoryStore::new();
        store.set_unavailable(true);
        assert!(matches!(
            store.create(Category::Water, at("2025-03-04T10:00:00Z")),
            Err(StoreError::Unavailable(_))
        ));
        assert!(matches!(store.list_all(), Err(StoreError::Unavailable(_))));
        assert!(matches!(
            store.delete(RecordId::new(1)),
            Err(StoreError::Unavailable(_))
        ));
    }
}
