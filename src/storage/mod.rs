//! `SQLite` storage handle.
//!
//! A [`Database`] owns one connection behind a mutex. Every logical
//! operation acquires it, runs inside its own transaction and releases it
//! on return, so a reader never observes a half-written row.

mod schema;

use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use rusqlite::{Connection, Transaction, TransactionBehavior, ffi};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tracing::{debug, info};

pub use schema::SCHEMA_VERSION;

/// Shared handle to the detection database.
///
/// Cloning is cheap; clones share the same connection.
#[derive(Debug, Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
    location: Option<PathBuf>,
}

impl Database {
    /// Open (or create) the database at `path` and make sure the schema exists.
    pub fn open(path: &Path, busy_timeout: Duration) -> Result<Self> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        conn.busy_timeout(busy_timeout)?;
        info!("Opened database: {}", path.display());
        Self::from_connection(conn, Some(path.to_path_buf()))
    }

    /// Open a private in-memory database.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        debug!("Opened in-memory database");
        Self::from_connection(conn, None)
    }

    fn from_connection(conn: Connection, location: Option<PathBuf>) -> Result<Self> {
        conn.pragma_update(None, "foreign_keys", true)?;
        schema::init(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            location,
        })
    }

    /// Filesystem location, or `None` for in-memory databases.
    pub fn location(&self) -> Option<&Path> {
        self.location.as_deref()
    }

    /// Run `f` inside a read transaction.
    pub(crate) fn read<T>(&self, f: impl FnOnce(&Transaction<'_>) -> Result<T>) -> Result<T> {
        self.transact(TransactionBehavior::Deferred, f)
    }

    /// Run `f` inside a write transaction that takes the write lock up front.
    pub(crate) fn write<T>(&self, f: impl FnOnce(&Transaction<'_>) -> Result<T>) -> Result<T> {
        self.transact(TransactionBehavior::Immediate, f)
    }

    fn transact<T>(
        &self,
        behavior: TransactionBehavior,
        f: impl FnOnce(&Transaction<'_>) -> Result<T>,
    ) -> Result<T> {
        let mut conn = self.lock()?;
        let tx = conn.transaction_with_behavior(behavior)?;
        // Dropping `tx` on the error path rolls back.
        let value = f(&tx)?;
        tx.commit()?;
        Ok(value)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| Error::Internal {
            message: "database connection lock poisoned".to_string(),
        })
    }
}

/// Encode a timestamp as stored (microseconds since the Unix epoch).
pub(crate) const fn encode_timestamp(ts: DateTime<Utc>) -> i64 {
    ts.timestamp_micros()
}

/// Decode a stored timestamp.
pub(crate) fn decode_timestamp(micros: i64) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::from_timestamp_micros(micros).ok_or(rusqlite::Error::IntegralValueOutOfRange(
        0, micros,
    ))
}

/// True if `err` is a UNIQUE constraint violation.
pub(crate) fn is_unique_violation(err: &rusqlite::Error) -> bool {
    extended_code(err) == Some(ffi::SQLITE_CONSTRAINT_UNIQUE)
}

/// True if `err` is a FOREIGN KEY constraint violation.
pub(crate) fn is_foreign_key_violation(err: &rusqlite::Error) -> bool {
    extended_code(err) == Some(ffi::SQLITE_CONSTRAINT_FOREIGNKEY)
}

fn extended_code(err: &rusqlite::Error) -> Option<i32> {
    match err {
        rusqlite::Error::SqliteFailure(e, _) => Some(e.extended_code),
        _ => None,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("deeper").join("pests.db");

        let db = Database::open(&path, Duration::from_millis(100)).unwrap();

        assert!(path.exists());
        assert_eq!(db.location(), Some(path.as_path()));
    }

    #[test]
    fn test_reopen_keeps_schema() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("pests.db");

        drop(Database::open(&path, Duration::from_millis(100)).unwrap());
        let db = Database::open(&path, Duration::from_millis(100)).unwrap();

        let version: i64 = db
            .read(|tx| Ok(tx.query_row("PRAGMA user_version", [], |row| row.get(0))?))
            .unwrap();
        assert_eq!(version, SCHEMA_VERSION);
    }

    #[test]
    fn test_failed_write_rolls_back() {
        let db = Database::open_in_memory().unwrap();

        let result: Result<()> = db.write(|tx| {
            tx.execute(
                "INSERT INTO districts (name, latitude, longitude) VALUES ('Gulu', 2.7747, 32.2990)",
                [],
            )?;
            Err(Error::Internal {
                message: "abort".to_string(),
            })
        });
        assert!(result.is_err());

        let count: i64 = db
            .read(|tx| Ok(tx.query_row("SELECT COUNT(*) FROM districts", [], |row| row.get(0))?))
            .unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn test_foreign_keys_enforced() {
        let db = Database::open_in_memory().unwrap();

        let err = db
            .write(|tx| {
                tx.execute(
                    "INSERT INTO detections (district_id, detection_type, confidence, timestamp_us)
                     VALUES (42, 'unknown', 0.0, 0)",
                    [],
                )?;
                Ok(())
            })
            .unwrap_err();

        assert!(matches!(err, Error::Storage(ref e) if is_foreign_key_violation(e)));
    }

    #[test]
    fn test_timestamp_encoding_preserves_micros() {
        let ts = DateTime::from_timestamp_micros(1_717_171_717_123_456).unwrap();
        assert_eq!(decode_timestamp(encode_timestamp(ts)).unwrap(), ts);
    }
}
