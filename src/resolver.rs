//! Nearest-district resolution.
//!
//! Distance is planar Euclidean over raw degrees, not great-circle.

use crate::error::Result;
use crate::registry::{District, DistrictRegistry, check_coordinates};
use tracing::debug;

/// Planar distance in degrees between a point and a district's coordinate.
pub fn planar_distance(latitude: f64, longitude: f64, district: &District) -> f64 {
    (district.latitude - latitude).hypot(district.longitude - longitude)
}

/// The district closest to `(latitude, longitude)`.
///
/// Linear scan; on equal distance the district seen first wins. Returns
/// `None` only for an empty slice. There is no maximum distance.
pub fn nearest(districts: &[District], latitude: f64, longitude: f64) -> Option<&District> {
    let mut best: Option<(&District, f64)> = None;
    for district in districts {
        let distance = planar_distance(latitude, longitude, district);
        if best.is_none_or(|(_, min)| distance < min) {
            best = Some((district, distance));
        }
    }
    best.map(|(district, _)| district)
}

/// Resolves coordinates against a [`DistrictRegistry`].
#[derive(Debug, Clone, Copy)]
pub struct NearestDistrictResolver<'a> {
    registry: &'a DistrictRegistry,
}

impl<'a> NearestDistrictResolver<'a> {
    /// Create a resolver over `registry`.
    pub const fn new(registry: &'a DistrictRegistry) -> Self {
        Self { registry }
    }

    /// The registry district nearest to the point, or `None` if the registry is empty.
    pub fn resolve(&self, latitude: f64, longitude: f64) -> Result<Option<District>> {
        check_coordinates(latitude, longitude)?;

        let districts = self.registry.list_all()?;
        let found = nearest(&districts, latitude, longitude).cloned();

        if let Some(ref district) = found {
            debug!(
                "Resolved ({latitude}, {longitude}) to {} at distance {:.4}",
                district.name,
                planar_distance(latitude, longitude, district)
            );
        }
        Ok(found)
    }
}
