//! Recording service.
//!
//! Joins the classifier, the registry, the resolver and the ledger. Lookup,
//! resolution and classification all happen before the single ledger
//! append, so a failed call leaves nothing behind.

use crate::classifier::{Classification, ClassificationOutcome};
use crate::error::{Error, Result};
use crate::ledger::{DetectionLedger, DistrictDetection};
use crate::registry::{District, DistrictRegistry, DistrictSeed, SeedOutcome};
use crate::resolver::NearestDistrictResolver;
use crate::storage::Database;
use std::sync::Arc;
use tracing::debug;

/// Records collaborator results and answers map queries.
///
/// `Send + Sync`; share one instance across request handlers.
#[derive(Debug)]
pub struct RecordingService {
    registry: DistrictRegistry,
    ledger: DetectionLedger,
}

impl RecordingService {
    /// Build a service over `db`.
    pub fn new(db: Database) -> Self {
        Self::from_parts(DistrictRegistry::new(db.clone()), DetectionLedger::new(db))
    }

    /// Build a service from already constructed components.
    pub fn from_parts(registry: DistrictRegistry, ledger: DetectionLedger) -> Self {
        Self { registry, ledger }
    }

    /// The district registry.
    pub const fn registry(&self) -> &DistrictRegistry {
        &self.registry
    }

    /// The detection ledger.
    pub const fn ledger(&self) -> &DetectionLedger {
        &self.ledger
    }

    /// Record a result for the district called `district_name`.
    pub fn record_by_district_name(
        &self,
        outcome: &ClassificationOutcome,
        district_name: &str,
    ) -> Result<DistrictDetection> {
        let district =
            self.registry
                .find_by_name(district_name)?
                .ok_or_else(|| Error::UnknownDistrict {
                    district: district_name.to_string(),
                })?;
        let classification = outcome.classify()?;
        self.append(district, classification)
    }

    /// Record a result for the district nearest to the coordinates.
    pub fn record_by_coordinates(
        &self,
        outcome: &ClassificationOutcome,
        latitude: f64,
        longitude: f64,
    ) -> Result<DistrictDetection> {
        let district = self.nearest_district(latitude, longitude)?;
        let classification = outcome.classify()?;
        self.append(district, classification)
    }

    /// The district nearest to the coordinates.
    ///
    /// Fails with [`Error::NoDistrictsAvailable`] if the registry is empty.
    pub fn nearest_district(&self, latitude: f64, longitude: f64) -> Result<District> {
        NearestDistrictResolver::new(&self.registry)
            .resolve(latitude, longitude)?
            .ok_or(Error::NoDistrictsAvailable)
    }

    /// Latest detection of each district that has any.
    pub fn latest_per_district(&self) -> Result<Vec<DistrictDetection>> {
        self.ledger.latest_per_district()
    }

    /// Every detection, newest first.
    pub fn list_detections(&self) -> Result<Vec<DistrictDetection>> {
        self.ledger.list_all()
    }

    /// Detection history of one district, newest first.
    pub fn district_history(&self, district_name: &str) -> Result<Vec<DistrictDetection>> {
        let district =
            self.registry
                .find_by_name(district_name)?
                .ok_or_else(|| Error::UnknownDistrict {
                    district: district_name.to_string(),
                })?;

        Ok(self
            .ledger
            .list_for_district(district.id)?
            .into_iter()
            .map(|detection| DistrictDetection {
                district: district.clone(),
                detection,
            })
            .collect())
    }

    /// All districts.
    pub fn list_districts(&self) -> Result<Arc<[District]>> {
        self.registry.list_all()
    }

    /// Add a single district.
    pub fn add_district(&self, name: &str, latitude: f64, longitude: f64) -> Result<District> {
        self.registry.create(name, latitude, longitude)
    }

    /// Seed an empty registry; a populated one is left as is.
    pub fn seed_districts(&self, entries: &[DistrictSeed]) -> Result<SeedOutcome> {
        self.registry.seed(entries)
    }

    fn append(
        &self,
        district: District,
        classification: Classification,
    ) -> Result<DistrictDetection> {
        debug!(
            "Filing {} ({:.4}) under {}",
            classification.detection_type, classification.confidence, district.name
        );
        let detection = self.ledger.append(
            district.id,
            classification.detection_type,
            classification.confidence,
        )?;
        Ok(DistrictDetection {
            district,
            detection,
        })
    }
}
