//! Fingerprints of what the current point set already covers.

use std::collections::HashSet;

use crate::geometry::coord_key;
use crate::types::Point;

/// Explored city names (lowercased, trimmed) and explored coordinate areas.
#[derive(Debug, Clone, Default)]
pub struct ExploredAreas {
    city_names: HashSet<String>,
    coord_areas: HashSet<String>,
}

impl ExploredAreas {
    /// Collect names and area keys from every point. The `"unknown"` city
    /// placeholder never counts as an explored name.
    pub fn from_points<'a, I>(points: I, decimals: u32) -> Self
    where
        I: IntoIterator<Item = &'a Point>,
    {
        let mut explored = Self::default();
        for p in points {
            let name = normalize_name(&p.city);
            if !name.is_empty() && name != "unknown" {
                explored.city_names.insert(name);
            }
            explored
                .coord_areas
                .insert(coord_key(p.lat, p.lon, decimals));
        }
        explored
    }

    /// `name` is compared after trimming and lowercasing.
    #[must_use]
    pub fn has_city(&self, name: &str) -> bool {
        self.city_names.contains(&normalize_name(name))
    }

    #[must_use]
    pub fn has_area(&self, key: &str) -> bool {
        self.coord_areas.contains(key)
    }

    #[must_use]
    pub fn city_count(&self) -> usize {
        self.city_names.len()
    }

    #[must_use]
    pub fn area_count(&self) -> usize {
        self.coord_areas.len()
    }
}

pub(crate) fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}
