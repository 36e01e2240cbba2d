//! Per-point density scoring.
//!
//! A point's density is the number of points, itself included, whose
//! degree-space distance to it is strictly below the configured radius. Two
//! strategies compute the same value: a pairwise scan for small inputs and a
//! uniform grid with cells one radius wide for large ones.

use std::collections::HashMap;

use leadmap_core::EngineConfig;
use serde::Serialize;

use crate::geometry::degree_distance;
use crate::types::{DensePoint, Point};

/// Annotate every point with its density, picking the strategy by input size.
#[must_use]
pub fn annotate_density(points: Vec<Point>, config: &EngineConfig) -> Vec<DensePoint> {
    let radius = config.density_radius_deg;
    let densities = if points.len() > config.grid_threshold {
        grid_densities(&points, radius)
    } else {
        pairwise_densities(&points, radius)
    };

    points
        .into_iter()
        .zip(densities)
        .map(|(point, density)| DensePoint { point, density })
        .collect()
}

fn within(a: &Point, b: &Point, radius: f64) -> bool {
    degree_distance(a.lat, a.lon, b.lat, b.lon) < radius
}

fn to_density(neighbours: usize) -> u32 {
    // Self always counts, even when the distance maths degenerates.
    u32::try_from(neighbours + 1).unwrap_or(u32::MAX)
}

pub(crate) fn pairwise_densities(points: &[Point], radius: f64) -> Vec<u32> {
    points
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let neighbours = points
                .iter()
                .enumerate()
                .filter(|&(j, q)| j != i && within(p, q, radius))
                .count();
            to_density(neighbours)
        })
        .collect()
}

#[allow(clippy::cast_possible_truncation)]
fn cell_of(point: &Point, radius: f64) -> (i64, i64) {
    (
        (point.lat / radius).floor() as i64,
        (point.lon / radius).floor() as i64,
    )
}

pub(crate) fn grid_densities(points: &[Point], radius: f64) -> Vec<u32> {
    let mut cells: HashMap<(i64, i64), Vec<usize>> = HashMap::new();
    for (i, p) in points.iter().enumerate() {
        cells.entry(cell_of(p, radius)).or_default().push(i);
    }

    points
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let (row, col) = cell_of(p, radius);
            let mut neighbours = 0usize;
            for d_row in -1..=1 {
                for d_col in -1..=1 {
                    // Extreme coordinates saturate to the i64 bounds; past them there is no cell.
                    let (Some(r), Some(c)) = (row.checked_add(d_row), col.checked_add(d_col))
                    else {
                        continue;
                    };
                    let Some(members) = cells.get(&(r, c)) else {
                        continue;
                    };
                    neighbours += members
                        .iter()
                        .filter(|&&j| j != i && within(p, &points[j], radius))
                        .count();
                }
            }
            to_density(neighbours)
        })
        .collect()
}

/// Heat-map sample: a coordinate and its intensity in `(0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HeatPoint {
    pub lat: f64,
    pub lon: f64,
    pub weight: f64,
}

/// Normalise densities against the densest point for heat-map rendering.
#[must_use]
pub fn heat_points(points: &[DensePoint]) -> Vec<HeatPoint> {
    let max = points.iter().map(|p| p.density).max().unwrap_or(1).max(1);
    points
        .iter()
        .map(|p| HeatPoint {
            lat: p.point.lat,
            lon: p.point.lon,
            weight: f64::from(p.density) / f64::from(max),
        })
        .collect()
}
