//! Storage layer for the tally event counter.
//!
//! Provides persistence for event records using `rusqlite`.
//!
//! # Thread Safety
//!
//! The [`Database`] type wraps a `rusqlite::Connection`, which is `Send` but not `Sync`.
//! A `Database` is opened once per process and handed to whoever needs it; it can be
//! moved between threads but not shared without external synchronization.
//!
//! # Schema
//!
//! A single `records` table keyed by an `INTEGER PRIMARY KEY AUTOINCREMENT` id, so
//! ids grow monotonically and are never handed out twice, even after deletion.
//!
//! ## Timestamp Format
//!
//! Timestamps are stored as TEXT in RFC 3339 format with the offset that was local
//! when the record was logged (e.g., `2025-03-04T10:07:00-05:00`). Keeping the
//! offset means the calendar day a record belongs to never shifts when the machine
//! changes timezone.

use std::path::Path;

use chrono::{DateTime, FixedOffset, SecondsFormat};
use rusqlite::{Connection, OptionalExtension, params};
use tally_core::{Category, EventRecord, RecordId, RecordStore, StoreError};
use thiserror::Error;

/// Database errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// An error from the underlying database.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    /// No record exists with the given ID.
    #[error("record {0} not found")]
    NotFound(RecordId),
    /// Failed to parse a record timestamp.
    #[error("invalid timestamp for record {record_id}: {timestamp}")]
    TimestampParse {
        record_id: RecordId,
        timestamp: String,
        #[source]
        source: chrono::ParseError,
    },
    /// A stored column could not be decoded.
    #[error("invalid record data for {record_id}: {message}")]
    InvalidRecordData { record_id: RecordId, message: String },
}

impl From<DbError> for StoreError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound(id) => Self::NotFound(id),
            DbError::TimestampParse { record_id, .. }
            | DbError::InvalidRecordData { record_id, .. } => Self::Corrupt {
                id: record_id,
                message: err.to_string(),
            },
            DbError::Sqlite(_) => Self::unavailable(err),
        }
    }
}

/// Database connection wrapper.
///
/// See the [module documentation](self) for thread safety considerations.
pub struct Database {
    conn: Connection,
}

const SELECT_RECORDS: &str = "SELECT id, category, timestamp, elapsed_minutes FROM records";

impl Database {
    /// Opens a database at the given path, creating it if necessary.
    ///
    /// The database schema is automatically initialized on first open.
    pub fn open(path: &Path) -> Result<Self, DbError> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.init()?;
        tracing::debug!(path = %path.display(), "opened database");
        Ok(db)
    }

    /// Opens an in-memory database.
    ///
    /// Useful for testing. The database is destroyed when the connection closes.
    pub fn open_in_memory() -> Result<Self, DbError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Initializes the database schema.
    ///
    /// This is idempotent - safe to call on an already-initialized database.
    fn init(&self) -> Result<(), DbError> {
        self.conn.execute_batch(
            "
            -- timestamp: RFC 3339 with local offset (e.g., '2025-03-04T10:07:00-05:00')
            -- elapsed_minutes: cached delta to the previous record, NULL until computed
            CREATE TABLE IF NOT EXISTS records (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                category TEXT NOT NULL,
                timestamp TEXT NOT NULL,
                elapsed_minutes INTEGER
            );

            CREATE INDEX IF NOT EXISTS idx_records_timestamp ON records(timestamp);
            ",
        )?;
        Ok(())
    }

    /// Inserts a record and returns its assigned ID.
    pub fn insert_record(
        &mut self,
        category: Category,
        timestamp: DateTime<FixedOffset>,
    ) -> Result<RecordId, DbError> {
        self.conn.execute(
            "INSERT INTO records (category, timestamp) VALUES (?, ?)",
            params![category.as_str(), format_timestamp(timestamp)],
        )?;
        Ok(RecordId::new(self.conn.last_insert_rowid()))
    }

    /// Lists all records ordered by ID.
    ///
    /// Rows whose category is not one of [`Category::ALL`] are skipped with a
    /// warning so that one foreign row cannot hide the rest of the store.
    pub fn list_records(&self) -> Result<Vec<EventRecord>, DbError> {
        let mut stmt = self
            .conn
            .prepare(&format!("{SELECT_RECORDS} ORDER BY id ASC"))?;
        let rows = stmt.query_map([], |row| {
            Ok(RawRecord {
                id: row.get(0)?,
                category: row.get(1)?,
                timestamp: row.get(2)?,
                elapsed_minutes: row.get(3)?,
            })
        })?;
        let mut records = Vec::new();
        for row in rows {
            let raw = row?;
            if raw.category.parse::<Category>().is_err() {
                tracing::warn!(
                    id = raw.id,
                    category = %raw.category,
                    "skipping record with unrecognized category"
                );
                continue;
            }
            records.push(raw.decode()?);
        }
        Ok(records)
    }

    #[cfg(test)]
    fn get_record(&self, id: RecordId) -> Result<Option<EventRecord>, DbError> {
        fetch_record(&self.conn, id)
    }

    /// Overwrites the cached elapsed minutes of an existing record.
    ///
    /// The existing row is read and written back whole inside one transaction,
    /// so no other column can be lost.
    pub fn set_elapsed(&mut self, id: RecordId, elapsed_minutes: i64) -> Result<(), DbError> {
        let tx = self.conn.transaction()?;
        let existing = fetch_record(&tx, id)?.ok_or(DbError::NotFound(id))?;
        let merged = EventRecord {
            elapsed_minutes: Some(elapsed_minutes),
            ..existing
        };
        tx.execute(
            "UPDATE records SET category = ?, timestamp = ?, elapsed_minutes = ? WHERE id = ?",
            params![
                merged.category.as_str(),
                format_timestamp(merged.timestamp),
                merged.elapsed_minutes,
                merged.id.get(),
            ],
        )?;
        tx.commit()?;
        Ok(())
    }

    /// Deletes a record, returning whether a row was removed.
    pub fn delete_record(&mut self, id: RecordId) -> Result<bool, DbError> {
        let deleted = self
            .conn
            .execute("DELETE FROM records WHERE id = ?", params![id.get()])?;
        Ok(deleted > 0)
    }

    /// Counts stored records.
    pub fn count_records(&self) -> Result<usize, DbError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM records", [], |row| row.get(0))?;
        Ok(usize::try_from(count).unwrap_or_default())
    }
}

impl RecordStore for Database {
    fn create(
        &mut self,
        category: Category,
        timestamp: DateTime<FixedOffset>,
    ) -> Result<RecordId, StoreError> {
        Ok(self.insert_record(category, timestamp)?)
    }

    fn list_all(&self) -> Result<Vec<EventRecord>, StoreError> {
        Ok(self.list_records()?)
    }

    fn update_elapsed(&mut self, id: RecordId, elapsed_minutes: i64) -> Result<(), StoreError> {
        Ok(self.set_elapsed(id, elapsed_minutes)?)
    }

    fn delete(&mut self, id: RecordId) -> Result<bool, StoreError> {
        let removed = self.delete_record(id)?;
        if !removed {
            tracing::debug!(%id, "delete of missing record ignored");
        }
        Ok(removed)
    }
}

/// A row as stored, before column decoding.
struct RawRecord {
    id: i64,
    category: String,
    timestamp: String,
    elapsed_minutes: Option<i64>,
}

impl RawRecord {
    fn decode(self) -> Result<EventRecord, DbError> {
        let record_id = RecordId::new(self.id);
        let category = self
            .category
            .parse::<Category>()
            .map_err(|err| DbError::InvalidRecordData {
                record_id,
                message: err.to_string(),
            })?;
        let timestamp = DateTime::parse_from_rfc3339(&self.timestamp).map_err(|source| {
            DbError::TimestampParse {
                record_id,
                timestamp: self.timestamp.clone(),
                source,
            }
        })?;
        Ok(EventRecord {
            id: record_id,
            category,
            timestamp,
            elapsed_minutes: self.elapsed_minutes,
        })
    }
}

fn fetch_record(conn: &Connection, id: RecordId) -> Result<Option<EventRecord>, DbError> {
    let raw = conn
        .query_row(
            &format!("{SELECT_RECORDS} WHERE id = ?"),
            params![id.get()],
            |row| {
                Ok(RawRecord {
                    id: row.get(0)?,
                    category: row.get(1)?,
                    timestamp: row.get(2)?,
                    elapsed_minutes: row.get(3)?,
                })
            },
        )
        .optional()?;
    raw.map(RawRecord::decode).transpose()
}

fn format_timestamp(timestamp: DateTime<FixedOffset>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Secs, false)
}
