//! Append-only detection ledger.
//!
//! There is no update or delete. Each append runs in its own write
//! transaction, and timestamps never go backwards in insertion order even
//! if the wall clock does.

mod types;

pub use types::{Detection, DetectionId, DistrictDetection};

use crate::classifier::DetectionType;
use crate::error::{Error, Result};
use crate::registry::DistrictId;
use crate::storage::{Database, decode_timestamp, encode_timestamp, is_foreign_key_violation};
use chrono::{DateTime, Utc};
use rusqlite::params;
use tracing::info;

const SELECT_JOINED: &str = "
    SELECT det.id AS detection_id, det.district_id, det.detection_type,
           det.confidence, det.timestamp_us,
           dis.id AS id, dis.name AS name, dis.latitude AS latitude,
           dis.longitude AS longitude
    FROM detections det
    JOIN districts dis ON dis.id = det.district_id";

const SELECT_DETECTIONS: &str = "
    SELECT id AS detection_id, district_id, detection_type, confidence, timestamp_us
    FROM detections";

/// Source of wall-clock time for new detections.
pub type Clock = fn() -> DateTime<Utc>;

/// Store of [`Detection`]s.
#[derive(Debug, Clone)]
pub struct DetectionLedger {
    db: Database,
    clock: Clock,
}

impl DetectionLedger {
    /// Create a ledger over `db` stamped by the system clock.
    pub fn new(db: Database) -> Self {
        Self::with_clock(db, Utc::now)
    }

    /// Create a ledger with a custom clock.
    pub fn with_clock(db: Database, clock: Clock) -> Self {
        Self { db, clock }
    }

    /// Record a detection for `district_id`.
    ///
    /// Fails with [`Error::UnknownDistrict`] if the district does not exist.
    pub fn append(
        &self,
        district_id: DistrictId,
        detection_type: DetectionType,
        confidence: f64,
    ) -> Result<Detection> {
        if !confidence.is_finite() {
            return Err(Error::malformed(format!(
                "confidence must be a finite number, got {confidence}"
            )));
        }

        let detection = self.db.write(|tx| {
            let last: Option<i64> =
                tx.query_row("SELECT MAX(timestamp_us) FROM detections", [], |row| {
                    row.get(0)
                })?;
            let now = encode_timestamp((self.clock)());
            let timestamp_us = last.map_or(now, |last| now.max(last));

            tx.execute(
                "INSERT INTO detections (district_id, detection_type, confidence, timestamp_us)
                 VALUES (?1, ?2, ?3, ?4)",
                params![district_id.0, detection_type.as_str(), confidence, timestamp_us],
            )
            .map_err(|e| {
                if is_foreign_key_violation(&e) {
                    Error::UnknownDistrict {
                        district: district_id.to_string(),
                    }
                } else {
                    Error::Storage(e)
                }
            })?;

            Ok(Detection {
                id: DetectionId(tx.last_insert_rowid()),
                district_id,
                detection_type,
                confidence,
                timestamp: decode_timestamp(timestamp_us)?,
            })
        })?;

        info!(
            "Recorded detection {} in district {}: {} ({:.4})",
            detection.id, district_id, detection_type, confidence
        );
        Ok(detection)
    }

    /// Every detection with its district, newest first.
    pub fn list_all(&self) -> Result<Vec<DistrictDetection>> {
        self.db.read(|tx| {
            let mut stmt = tx.prepare(&format!(
                "{SELECT_JOINED} ORDER BY det.timestamp_us DESC, det.id DESC"
            ))?;
            let rows = stmt.query_map([], DistrictDetection::from_row)?;
            Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
        })
    }

    /// Detections of one district, newest first.
    pub fn list_for_district(&self, district_id: DistrictId) -> Result<Vec<Detection>> {
        self.db.read(|tx| {
            let mut stmt = tx.prepare(&format!(
                "{SELECT_DETECTIONS} WHERE district_id = ?1 ORDER BY timestamp_us DESC, id DESC"
            ))?;
            let rows = stmt.query_map(params![district_id.0], Detection::from_row)?;
            Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
        })
    }

    /// The most recent detection of every district that has one.
    ///
    /// "Most recent" is the greatest `(timestamp, id)`, so among equal
    /// timestamps the last appended wins. Districts without detections are
    /// omitted. Rows are ordered by district id.
    pub fn latest_per_district(&self) -> Result<Vec<DistrictDetection>> {
        self.db.read(|tx| {
            let mut stmt = tx.prepare(&format!(
                "{SELECT_JOINED}
                 WHERE det.id = (
                     SELECT latest.id FROM detections latest
                     WHERE latest.district_id = det.district_id
                     ORDER BY latest.timestamp_us DESC, latest.id DESC
                     LIMIT 1
                 )
                 ORDER BY dis.id"
            ))?;
            let rows = stmt.query_map([], DistrictDetection::from_row)?;
            Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
        })
    }

    /// Total number of detections.
    pub fn count(&self) -> Result<usize> {
        self.db.read(|tx| {
            let n: i64 = tx.query_row("SELECT COUNT(*) FROM detections", [], |row| row.get(0))?;
            Ok(usize::try_from(n).unwrap_or(0))
        })
    }

    /// Number of detections filed under `district_id`.
    pub fn count_for_district(&self, district_id: DistrictId) -> Result<usize> {
        self.db.read(|tx| {
            let n: i64 = tx.query_row(
                "SELECT COUNT(*) FROM detections WHERE district_id = ?1",
                params![district_id.0],
                |row| row.get(0),
            )?;
            Ok(usize::try_from(n).unwrap_or(0))
        })
    }
}
