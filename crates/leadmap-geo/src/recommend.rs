//! Filtering and ranking of nearby-city candidates.
//!
//! A candidate is rejected when its name or rounded coordinates are already
//! explored, or when it sits within the exclusion radius of any saturated
//! point. Survivors are deduplicated, ordered by the service's reported
//! distance and capped.

use std::collections::HashSet;

use leadmap_core::EngineConfig;

use crate::explored::{normalize_name, ExploredAreas};
use crate::geometry::{approx_km, coord_key};
use crate::types::{CityCandidate, DensePoint, Recommendation, SourcedCandidate};

/// Why a candidate was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    ExploredName,
    ExploredArea,
    NearSaturated,
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rejection::ExploredName => write!(f, "explored_name"),
            Rejection::ExploredArea => write!(f, "explored_area"),
            Rejection::NearSaturated => write!(f, "near_saturated"),
        }
    }
}

/// Exclusion rules derived from one point set.
#[derive(Debug, Clone)]
pub struct RecommendationFilter {
    explored: ExploredAreas,
    /// `(lat, lon)` of every point at or above the saturation threshold.
    saturated: Vec<(f64, f64)>,
    area_decimals: u32,
    exclusion_radius_km: f64,
    km_per_degree: f64,
}

impl RecommendationFilter {
    #[must_use]
    pub fn new(points: &[DensePoint], config: &EngineConfig) -> Self {
        let explored = ExploredAreas::from_points(
            points.iter().map(|p| &p.point),
            config.explored_round_decimals,
        );
        let saturated = points
            .iter()
            .filter(|p| p.density >= config.high_density_threshold)
            .map(|p| (p.point.lat, p.point.lon))
            .collect();

        Self {
            explored,
            saturated,
            area_decimals: config.explored_round_decimals,
            exclusion_radius_km: config.exclusion_radius_km,
            km_per_degree: config.km_per_degree,
        }
    }

    #[must_use]
    pub fn explored(&self) -> &ExploredAreas {
        &self.explored
    }

    #[must_use]
    pub fn saturated_count(&self) -> usize {
        self.saturated.len()
    }

    /// Check one candidate against the exclusion rules.
    ///
    /// # Errors
    ///
    /// Returns the first [`Rejection`] rule the candidate trips.
    pub fn check(&self, candidate: &CityCandidate) -> Result<(), Rejection> {
        let name = normalize_name(&candidate.city);
        let ascii = candidate.city_ascii.as_deref().map(normalize_name);
        if self.explored.has_city(&name) || ascii.is_some_and(|a| self.explored.has_city(&a)) {
            return Err(Rejection::ExploredName);
        }

        let key = coord_key(candidate.lat, candidate.lng, self.area_decimals);
        if self.explored.has_area(&key) {
            return Err(Rejection::ExploredArea);
        }

        let near_saturated = self.saturated.iter().any(|&(lat, lon)| {
            approx_km(candidate.lat, candidate.lng, lat, lon, self.km_per_degree)
                < self.exclusion_radius_km
        });
        if near_saturated {
            return Err(Rejection::NearSaturated);
        }

        Ok(())
    }

    /// Keep the candidates that pass [`check`](Self::check), preserving order.
    #[must_use]
    pub fn retain(&self, candidates: Vec<SourcedCandidate>) -> Vec<SourcedCandidate> {
        candidates
            .into_iter()
            .filter(|c| match self.check(&c.candidate) {
                Ok(()) => true,
                Err(reason) => {
                    tracing::debug!(
                        city = %c.candidate.city,
                        source_city = %c.source_city,
                        %reason,
                        "candidate rejected"
                    );
                    false
                }
            })
            .collect()
    }
}

/// Dedup key: the service id when present, otherwise city name plus rounded
/// latitude.
fn dedup_key(candidate: &CityCandidate) -> String {
    match &candidate.id {
        Some(id) => format!("id:{id}"),
        None => format!("city:{}{:.2}", candidate.city, candidate.lat),
    }
}

/// Deduplicate (first occurrence wins), sort ascending by `distance_km` and
/// keep at most `max`.
#[must_use]
pub fn rank_recommendations(candidates: Vec<SourcedCandidate>, max: usize) -> Vec<Recommendation> {
    let mut seen = HashSet::new();
    let mut ranked: Vec<Recommendation> = candidates
        .into_iter()
        .filter(|c| seen.insert(dedup_key(&c.candidate)))
        .collect();
    ranked.sort_by(|a, b| a.candidate.distance_km.total_cmp(&b.candidate.distance_km));
    ranked.truncate(max);
    ranked
}
