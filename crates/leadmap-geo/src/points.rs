//! Flattening scraped records into map points.

use crate::coords::extract_coordinates;
use crate::types::{Point, ScrapedRecord};

/// City label given to items the store never resolved a city for.
pub const UNKNOWN_CITY: &str = "Unknown";

/// Which records feed a computation pass.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RecordScope {
    #[default]
    All,
    /// Only the record with this id.
    Single(String),
}

impl RecordScope {
    fn includes(&self, record: &ScrapedRecord) -> bool {
        match self {
            RecordScope::All => true,
            RecordScope::Single(id) => record.record_id() == Some(id.as_str()),
        }
    }
}

/// Build the flat point list for every in-scope business item whose map link
/// carries coordinates. Items without a usable link are skipped silently.
#[must_use]
pub fn build_points(records: &[ScrapedRecord], scope: &RecordScope) -> Vec<Point> {
    let mut points = Vec::new();
    let mut skipped = 0usize;

    for record in records.iter().filter(|r| scope.includes(r)) {
        for (index, item) in record.data.iter().enumerate() {
            let Some(coords) = extract_coordinates(item.google_maps_link.as_deref()) else {
                skipped += 1;
                continue;
            };

            let city = record
                .city_data
                .get(&index.to_string())
                .and_then(Option::as_deref)
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .unwrap_or(UNKNOWN_CITY)
                .to_string();

            points.push(Point {
                lat: coords.lat,
                lon: coords.lon,
                title: item.title.clone().unwrap_or_default(),
                rating: item.rating.clone().unwrap_or_default(),
                address: item.address.clone().unwrap_or_default(),
                city,
                phone: item.phone.clone().unwrap_or_default(),
            });
        }
    }

    tracing::debug!(
        points = points.len(),
        skipped,
        scope = ?scope,
        "built points from scraped records"
    );
    points
}
