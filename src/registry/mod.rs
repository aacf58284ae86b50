//! District registry.
//!
//! Districts are written rarely and read on every coordinate lookup, so the
//! registry keeps a snapshot of the table in memory. Rows are never updated
//! or deleted, which makes `(COUNT(*), MAX(id))` a complete fingerprint of
//! the table: every read checks it and reloads when any connection has
//! inserted since the snapshot was taken.

pub mod seed;
mod types;

pub use seed::{SeedSource, load_seed_file, reference_districts};
pub use types::{District, DistrictId, DistrictSeed, SeedOutcome, check_coordinates};

use crate::error::{Error, Result};
use crate::storage::{Database, is_unique_violation};
use rusqlite::{Transaction, params};
use std::sync::{Arc, RwLock};
use tracing::{debug, info};

/// Row count and highest id of the districts table.
type Fingerprint = (i64, i64);

/// Named districts with fixed coordinates.
#[derive(Debug)]
pub struct DistrictRegistry {
    db: Database,
    cache: RwLock<Option<Snapshot>>,
}

/// Cached copy of the districts table.
#[derive(Debug, Clone)]
struct Snapshot {
    fingerprint: Fingerprint,
    districts: Arc<[District]>,
}

impl DistrictRegistry {
    /// Create a registry over `db`.
    pub fn new(db: Database) -> Self {
        Self {
            db,
            cache: RwLock::new(None),
        }
    }

    /// Insert a new district.
    ///
    /// Fails with [`Error::DuplicateName`] if the name is taken.
    pub fn create(&self, name: &str, latitude: f64, longitude: f64) -> Result<District> {
        let seed = DistrictSeed::new(name, latitude, longitude);
        seed.validate()?;

        let district = self.db.write(|tx| insert(tx, &seed))?;

        info!(
            "Created district {} {} at ({}, {})",
            district.id, district.name, district.latitude, district.longitude
        );
        Ok(district)
    }

    /// All districts in insertion order.
    ///
    /// Callers must not rely on the order for correctness.
    pub fn list_all(&self) -> Result<Arc<[District]>> {
        let cached = self.cache.read().ok().and_then(|cache| cache.clone());

        let snapshot = self.db.read(|tx| {
            let fingerprint = fingerprint(tx)?;
            if let Some(snapshot) = cached
                && snapshot.fingerprint == fingerprint
            {
                return Ok(snapshot);
            }

            let mut stmt =
                tx.prepare("SELECT id, name, latitude, longitude FROM districts ORDER BY id")?;
            let rows = stmt.query_map([], District::from_row)?;
            let districts: Arc<[District]> = rows.collect::<rusqlite::Result<Vec<_>>>()?.into();
            debug!("Loaded {} district(s) into registry cache", districts.len());
            Ok(Snapshot {
                fingerprint,
                districts,
            })
        })?;

        let districts = Arc::clone(&snapshot.districts);
        if let Ok(mut cache) = self.cache.write() {
            *cache = Some(snapshot);
        }
        Ok(districts)
    }

    /// Look up a district by its exact name.
    pub fn find_by_name(&self, name: &str) -> Result<Option<District>> {
        Ok(self.list_all()?.iter().find(|d| d.name == name).cloned())
    }

    /// Number of districts.
    pub fn count(&self) -> Result<usize> {
        Ok(self.list_all()?.len())
    }

    /// Bulk-populate an empty registry.
    ///
    /// A registry that already holds districts is left untouched and
    /// [`SeedOutcome::AlreadyPopulated`] is returned. Otherwise every entry
    /// is inserted in one transaction, or none is.
    pub fn seed(&self, entries: &[DistrictSeed]) -> Result<SeedOutcome> {
        if entries.is_empty() {
            return Err(Error::NoDistrictsAvailable);
        }
        for entry in entries {
            entry.validate()?;
        }

        let outcome = self.db.write(|tx| {
            let (existing, _) = fingerprint(tx)?;
            if existing > 0 {
                return Ok(SeedOutcome::AlreadyPopulated(usize::try_from(existing).unwrap_or(0)));
            }

            for entry in entries {
                insert(tx, entry)?;
            }
            Ok(SeedOutcome::Inserted(entries.len()))
        })?;

        match outcome {
            SeedOutcome::Inserted(n) => info!("Seeded registry with {n} district(s)"),
            SeedOutcome::AlreadyPopulated(n) => {
                info!("Registry already holds {n} district(s), seeding skipped");
            }
        }
        Ok(outcome)
    }
}

fn fingerprint(tx: &Transaction<'_>) -> rusqlite::Result<Fingerprint> {
    tx.query_row(
        "SELECT COUNT(*), COALESCE(MAX(id), 0) FROM districts",
        [],
        |row| Ok((row.get(0)?, row.get(1)?)),
    )
}

fn insert(tx: &Transaction<'_>, seed: &DistrictSeed) -> Result<District> {
    tx.execute(
        "INSERT INTO districts (name, latitude, longitude) VALUES (?1, ?2, ?3)",
        params![seed.name, seed.latitude, seed.longitude],
    )
    .map_err(|e| {
        if is_unique_violation(&e) {
            Error::DuplicateName {
                name: seed.name.clone(),
            }
        } else {
            Error::Storage(e)
        }
    })?;

    Ok(District {
        id: DistrictId(tx.last_insert_rowid()),
        name: seed.name.clone(),
        latitude: seed.latitude,
        longitude: seed.longitude,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    fn registry() -> DistrictRegistry {
        DistrictRegistry::new(Database::open_in_memory().unwrap())
    }

    #[test]
    fn test_create_and_find_by_name() {
        let registry = registry();
        let created = registry.create("Kampala", 0.3476, 32.5825).unwrap();

        let found = registry.find_by_name("Kampala").unwrap().unwrap();
        assert_eq!(found, created);
        assert_eq!(found.latitude, 0.3476);
    }

    #[test]
    fn test_find_by_name_is_case_sensitive() {
        let registry = registry();
        registry.create("Kampala", 0.3476, 32.5825).unwrap();

        assert!(registry.find_by_name("kampala").unwrap().is_none());
        assert!(registry.find_by_name("Atlantis").unwrap().is_none());
    }

    #[test]
    fn test_create_duplicate_name_fails() {
        let registry = registry();
        registry.create("Gulu", 2.7747, 32.2990).unwrap();

        let err = registry.create("Gulu", 0.0, 0.0).unwrap_err();
        assert!(matches!(err, Error::DuplicateName { ref name } if name == "Gulu"));
        assert_eq!(registry.count().unwrap(), 1);
    }

    #[test]
    fn test_ids_are_not_reused() {
        let registry = registry();
        let first = registry.create("Gulu", 2.7747, 32.2990).unwrap();
        let _ = registry.create("Gulu", 0.0, 0.0);
        let second = registry.create("Lira", 2.2499, 32.9000).unwrap();

        assert!(second.id > first.id);
    }

    #[test]
    fn test_list_all_returns_insertion_order() {
        let registry = registry();
        registry.create("Wakiso", 0.4033, 32.4708).unwrap();
        registry.create("Abim", 2.7061, 33.6667).unwrap();

        let names: Vec<_> = registry
            .list_all()
            .unwrap()
            .iter()
            .map(|d| d.name.clone())
            .collect();
        assert_eq!(names, ["Wakiso", "Abim"]);
    }

    #[test]
    fn test_cache_refreshes_after_create() {
        let registry = registry();
        registry.create("Gulu", 2.7747, 32.2990).unwrap();
        assert_eq!(registry.list_all().unwrap().len(), 1);

        registry.create("Lira", 2.2499, 32.9000).unwrap();
        assert_eq!(registry.list_all().unwrap().len(), 2);
        assert!(registry.find_by_name("Lira").unwrap().is_some());
    }

    #[test]
    fn test_list_all_twice_is_identical() {
        let registry = registry();
        registry.seed(&reference_districts()).unwrap();

        let first = registry.list_all().unwrap();
        let second = registry.list_all().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_seed_empty_registry() {
        let registry = registry();
        let entries = reference_districts();

        let outcome = registry.seed(&entries).unwrap();

        assert_eq!(outcome, SeedOutcome::Inserted(entries.len()));
        assert_eq!(registry.count().unwrap(), entries.len());
    }

    #[test]
    fn test_reseed_is_noop() {
        let registry = registry();
        registry.create("Kampala", 0.3476, 32.5825).unwrap();

        let outcome = registry.seed(&reference_districts()).unwrap();

        assert_eq!(outcome, SeedOutcome::AlreadyPopulated(1));
        assert_eq!(registry.count().unwrap(), 1);
    }

    #[test]
    fn test_seed_with_duplicate_inserts_nothing() {
        let registry = registry();
        let entries = vec![
            DistrictSeed::new("Gulu", 2.7747, 32.2990),
            DistrictSeed::new("Lira", 2.2499, 32.9000),
            DistrictSeed::new("Gulu", 2.0, 32.0),
        ];

        let err = registry.seed(&entries).unwrap_err();

        assert!(matches!(err, Error::DuplicateName { .. }));
        assert_eq!(registry.count().unwrap(), 0);
    }

    #[test]
    fn test_seed_with_no_entries_fails() {
        let registry = registry();
        assert!(matches!(
            registry.seed(&[]),
            Err(Error::NoDistrictsAvailable)
        ));
    }

    #[test]
    fn test_sees_districts_added_through_another_connection() {
        use std::time::Duration;

        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("districts.db");
        let server =
            DistrictRegistry::new(Database::open(&path, Duration::from_secs(1)).unwrap());
        let admin =
            DistrictRegistry::new(Database::open(&path, Duration::from_secs(1)).unwrap());

        server.create("Kampala", 0.3476, 32.5825).unwrap();
        assert_eq!(server.list_all().unwrap().len(), 1);

        admin.create("Gulu", 2.7747, 32.2990).unwrap();

        assert_eq!(server.count().unwrap(), 2);
        assert!(server.find_by_name("Gulu").unwrap().is_some());
    }

    #[test]
    fn test_sees_districts_added_through_shared_connection() {
        let db = Database::open_in_memory().unwrap();
        let first = DistrictRegistry::new(db.clone());
        let second = DistrictRegistry::new(db);

        first.create("Lira", 2.2499, 32.9000).unwrap();
        assert!(first.find_by_name("Lira").unwrap().is_some());

        second.create("Arua", 3.0200, 30.9100).unwrap();

        let names: Vec<_> = first
            .list_all()
            .unwrap()
            .iter()
            .map(|d| d.name.clone())
            .collect();
        assert_eq!(names, ["Lira", "Arua"]);
    }
}
