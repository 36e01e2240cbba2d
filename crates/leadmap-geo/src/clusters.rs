//! Cluster seed sampling.
//!
//! Seeds are plain coordinate buckets: the first point seen in each rounded
//! bucket stands in for the whole bucket. Sparse buckets are queried first on
//! the assumption that dense ones are already well covered.

use std::collections::HashSet;

use crate::geometry::coord_key;
use crate::types::{ClusterSeed, DensePoint};

/// One seed per rounded-coordinate bucket, in first-seen order.
#[must_use]
pub fn bucket_seeds(points: &[DensePoint], decimals: u32) -> Vec<ClusterSeed> {
    let mut seen = HashSet::new();
    points
        .iter()
        .filter_map(|p| {
            let key = coord_key(p.point.lat, p.point.lon, decimals);
            seen.insert(key.clone()).then(|| ClusterSeed {
                key,
                lat: p.point.lat,
                lon: p.point.lon,
                city: p.point.city.clone(),
                density: p.density,
            })
        })
        .collect()
}

/// Bucket the points, order by ascending density and keep at most `max_seeds`.
#[must_use]
pub fn sample_seeds(points: &[DensePoint], decimals: u32, max_seeds: usize) -> Vec<ClusterSeed> {
    let mut seeds = bucket_seeds(points, decimals);
    let buckets = seeds.len();
    seeds.sort_by_key(|s| s.density);
    seeds.truncate(max_seeds);
    tracing::debug!(buckets, kept = seeds.len(), "sampled cluster seeds");
    seeds
}
