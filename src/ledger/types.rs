//! Detection type definitions.

use crate::classifier::DetectionType;
use crate::registry::{District, DistrictId};
use crate::storage::decode_timestamp;
use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use serde::Serialize;
use std::fmt;

/// Surrogate key of a detection, increasing in insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct DetectionId(pub i64);

impl fmt::Display for DetectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One immutable classification event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Detection {
    /// Storage-assigned identifier.
    pub id: DetectionId,
    /// District the detection belongs to.
    pub district_id: DistrictId,
    /// Classified type.
    pub detection_type: DetectionType,
    /// Confidence, nominally `0.0..=1.0`.
    pub confidence: f64,
    /// When the ledger accepted the detection.
    pub timestamp: DateTime<Utc>,
}

impl Detection {
    pub(crate) fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        let tag: String = row.get("detection_type")?;
        let detection_type = tag.parse::<DetectionType>().map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(2, Type::Text, e.into())
        })?;

        Ok(Self {
            id: DetectionId(row.get("detection_id")?),
            district_id: DistrictId(row.get("district_id")?),
            detection_type,
            confidence: row.get("confidence")?,
            timestamp: decode_timestamp(row.get("timestamp_us")?)?,
        })
    }
}

/// A detection joined with the district it references.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistrictDetection {
    /// The referenced district.
    pub district: District,
    /// The detection.
    pub detection: Detection,
}

impl DistrictDetection {
    pub(crate) fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            district: District::from_row(row)?,
            detection: Detection::from_row(row)?,
        })
    }
}
