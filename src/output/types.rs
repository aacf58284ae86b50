//! Output row definitions.

use crate::constants::{confidence, coordinates};
use crate::ledger::DistrictDetection;
use crate::registry::District;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

/// A row that can be rendered as a table or CSV line.
pub trait Row: Serialize {
    /// Column headers, in cell order.
    const HEADERS: &'static [&'static str];

    /// Human-readable cell values, in header order.
    fn cells(&self) -> Vec<String>;
}

/// Entry of the district list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistrictRow {
    /// District name.
    pub name: String,
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
}

impl From<&District> for DistrictRow {
    fn from(district: &District) -> Self {
        Self {
            name: district.name.clone(),
            latitude: district.latitude,
            longitude: district.longitude,
        }
    }
}

impl Row for DistrictRow {
    const HEADERS: &'static [&'static str] = &["name", "latitude", "longitude"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            format!("{:.prec$}", self.latitude, prec = coordinates::DECIMAL_PLACES),
            format!("{:.prec$}", self.longitude, prec = coordinates::DECIMAL_PLACES),
        ]
    }
}

/// Entry of the detection feed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedRow {
    /// District name.
    pub district: String,
    /// District latitude.
    pub latitude: f64,
    /// District longitude.
    pub longitude: f64,
    /// Detection type tag.
    pub detection_type: String,
    /// Confidence in `0.0..=1.0`.
    pub confidence: f64,
    /// When the detection was recorded.
    pub timestamp: DateTime<Utc>,
}

impl From<&DistrictDetection> for FeedRow {
    fn from(row: &DistrictDetection) -> Self {
        Self {
            district: row.district.name.clone(),
            latitude: row.district.latitude,
            longitude: row.district.longitude,
            detection_type: row.detection.detection_type.to_string(),
            confidence: row.detection.confidence,
            timestamp: row.detection.timestamp,
        }
    }
}

impl Row for FeedRow {
    const HEADERS: &'static [&'static str] = &[
        "district",
        "latitude",
        "longitude",
        "detection_type",
        "confidence",
        "timestamp",
    ];

    fn cells(&self) -> Vec<String> {
        vec![
            self.district.clone(),
            format!("{:.prec$}", self.latitude, prec = coordinates::DECIMAL_PLACES),
            format!("{:.prec$}", self.longitude, prec = coordinates::DECIMAL_PLACES),
            self.detection_type.clone(),
            format!("{:.prec$}", self.confidence, prec = confidence::DECIMAL_PLACES),
            self.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true),
        ]
    }
}
