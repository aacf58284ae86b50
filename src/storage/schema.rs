//! Database schema.

use rusqlite::Connection;
use tracing::{debug, info};

/// Current schema version, recorded in `PRAGMA user_version`.
pub const SCHEMA_VERSION: i64 = 1;

const SCHEMA: &str = r"
CREATE TABLE IF NOT EXISTS districts (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT UNIQUE NOT NULL,
    latitude REAL NOT NULL,
    longitude REAL NOT NULL
);

CREATE TABLE IF NOT EXISTS detections (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    district_id INTEGER NOT NULL REFERENCES districts (id),
    detection_type TEXT NOT NULL,
    confidence REAL NOT NULL,
    timestamp_us INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_detections_district_latest
    ON detections (district_id, timestamp_us, id);
";

/// Create tables if they don't exist.
pub(super) fn init(conn: &Connection) -> rusqlite::Result<()> {
    let version: i64 = conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;
    conn.execute_batch(SCHEMA)?;

    if version < SCHEMA_VERSION {
        conn.pragma_update(None, "user_version", SCHEMA_VERSION)?;
        info!("Initialized database schema v{SCHEMA_VERSION}");
    } else {
        debug!("Database schema v{version} present");
    }
    Ok(())
}
