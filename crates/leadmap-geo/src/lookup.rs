//! Seam between the fetch loop and whatever answers nearby-city queries.

use std::future::Future;

use leadmap_core::EngineConfig;

use crate::error::GeoError;
use crate::types::{CityCandidate, ClusterSeed};

/// Parameters of one nearby-cities query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearbyQuery {
    pub lat: f64,
    pub lng: f64,
    pub limit: u32,
    pub radius_km: u32,
    pub min_population: u64,
}

impl NearbyQuery {
    /// Query around `seed` with the configured limit, radius and population floor.
    #[must_use]
    pub fn for_seed(seed: &ClusterSeed, config: &EngineConfig) -> Self {
        Self {
            lat: seed.lat,
            lng: seed.lon,
            limit: config.lookup_limit,
            radius_km: config.lookup_radius_km,
            min_population: config.lookup_min_population,
        }
    }
}

/// Anything that can list cities near a coordinate.
///
/// [`NearbyCitiesClient`](crate::NearbyCitiesClient) talks to the HTTP
/// service; tests substitute in-memory fakes.
pub trait NearbyCityLookup {
    fn nearby_cities(
        &self,
        query: &NearbyQuery,
    ) -> impl Future<Output = Result<Vec<CityCandidate>, GeoError>> + Send;
}
