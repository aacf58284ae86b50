//! District type definitions.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Surrogate key of a district. Assigned by storage, never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DistrictId(pub i64);

impl fmt::Display for DistrictId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A named region with a fixed representative coordinate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct District {
    /// Storage-assigned identifier.
    pub id: DistrictId,
    /// Unique, case-sensitive name.
    pub name: String,
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
}

impl District {
    pub(crate) fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: DistrictId(row.get("id")?),
            name: row.get("name")?,
            latitude: row.get("latitude")?,
            longitude: row.get("longitude")?,
        })
    }
}

/// A district that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistrictSeed {
    /// District name.
    pub name: String,
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
}

impl DistrictSeed {
    /// Create a seed entry.
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.into(),
            latitude,
            longitude,
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::malformed("district name must not be empty"));
        }
        check_coordinates(self.latitude, self.longitude)
    }
}

/// Result of a seeding call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// The registry was empty and this many districts were inserted.
    Inserted(usize),
    /// The registry already held this many districts; nothing changed.
    AlreadyPopulated(usize),
}

/// Reject coordinates that are not numbers.
///
/// Range is not checked: any finite pair is an ordinary coordinate.
pub fn check_coordinates(latitude: f64, longitude: f64) -> Result<()> {
    if !latitude.is_finite() {
        return Err(Error::malformed(format!(
            "latitude must be a finite number, got {latitude}"
        )));
    }
    if !longitude.is_finite() {
        return Err(Error::malformed(format!(
            "longitude must be a finite number, got {longitude}"
        )));
    }
    Ok(())
}
