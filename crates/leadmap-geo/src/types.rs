//! Domain types shared by every pipeline stage.
//!
//! Input types mirror the record-store JSON (`googleMapsLink`, `cityData`);
//! output types serialize in the shape the map layer consumes.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Record store input
// ---------------------------------------------------------------------------

/// One scrape run as stored by the backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScrapedRecord {
    /// Store primary key. Exports with virtuals enabled also carry `id`.
    #[serde(default, rename = "_id", skip_serializing_if = "Option::is_none")]
    pub store_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub data: Vec<BusinessItem>,
    /// City resolved for each item, keyed by the item's index as a string.
    #[serde(default, rename = "cityData")]
    pub city_data: HashMap<String, Option<String>>,
}

impl ScrapedRecord {
    /// The record's identifier, preferring `_id` over the `id` virtual.
    #[must_use]
    pub fn record_id(&self) -> Option<&str> {
        self.store_id.as_deref().or(self.id.as_deref())
    }
}

/// A single business scraped from the maps listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessItem {
    #[serde(default)]
    pub google_maps_link: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub rating: Option<Rating>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Ratings arrive either as text (`"4.5"`, `"N/A"`) or as a bare number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Rating {
    Number(f64),
    Text(String),
}

impl Default for Rating {
    fn default() -> Self {
        Rating::Text(String::new())
    }
}

// ---------------------------------------------------------------------------
// Points
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub lat: f64,
    pub lon: f64,
    pub title: String,
    pub rating: Rating,
    pub address: String,
    pub city: String,
    pub phone: String,
}

/// A [`Point`] annotated with the number of points (itself included) inside
/// the density radius.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DensePoint {
    #[serde(flatten)]
    pub point: Point,
    pub density: u32,
}

/// Representative of one rounded-coordinate bucket, used to anchor a
/// nearby-cities lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterSeed {
    /// Rounded-coordinate bucket key, e.g. `"40.0,-74.0"`.
    pub key: String,
    pub lat: f64,
    pub lon: f64,
    pub city: String,
    pub density: u32,
}

// ---------------------------------------------------------------------------
// Nearby-cities lookup
// ---------------------------------------------------------------------------

/// City identifiers come back as numbers from some datasets and strings from
/// others.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CityId {
    Number(i64),
    Text(String),
}

impl std::fmt::Display for CityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CityId::Number(n) => write!(f, "{n}"),
            CityId::Text(s) => write!(f, "{s}"),
        }
    }
}

/// A city returned by the nearby-cities service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityCandidate {
    pub city: String,
    #[serde(default)]
    pub city_ascii: Option<String>,
    #[serde(default)]
    pub admin_name: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    pub lat: f64,
    pub lng: f64,
    #[serde(default)]
    /// Some datasets export counts as floats (`30681.0`).
    pub population: Option<f64>,
    pub distance_km: f64,
    #[serde(default)]
    pub id: Option<CityId>,
}

/// A [`CityCandidate`] tagged with the city label of the seed it was found near.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourcedCandidate {
    #[serde(flatten)]
    pub candidate: CityCandidate,
    #[serde(rename = "sourceCity")]
    pub source_city: String,
}

/// A candidate that survived filtering and ranking.
pub type Recommendation = SourcedCandidate;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_deserializes_from_store_shape() {
        let json = serde_json::json!({
            "_id": "rec-1",
            "data": [
                {
                    "googleMapsLink": "https://maps.google.com/?q=@40.1,-74.2,15z",
                    "title": "Joe's Pizza",
                    "rating": 4.5,
                    "address": "1 Main St",
                    "phone": "555-0100"
                },
                { "title": "No link", "rating": "N/A" }
            ],
            "cityData": { "0": "Newark", "1": null }
        });
        let record: ScrapedRecord = serde_json::from_value(json).unwrap();
        assert_eq!(record.record_id(), Some("rec-1"));
        assert_eq!(record.data.len(), 2);
        assert_eq!(record.data[0].rating, Some(Rating::Number(4.5)));
        assert_eq!(record.data[1].rating, Some(Rating::Text("N/A".to_string())));
        assert_eq!(record.city_data["0"].as_deref(), Some("Newark"));
        assert!(record.city_data["1"].is_none());
    }

    #[test]
    fn record_without_city_data_defaults_to_empty() {
        let record: ScrapedRecord = serde_json::from_str(r#"{"data": []}"#).unwrap();
        assert!(record.city_data.is_empty());
        assert!(record.record_id().is_none());
    }

    #[test]
    fn record_with_both_id_fields_prefers_store_id() {
        let record: ScrapedRecord = serde_json::from_value(serde_json::json!({
            "_id": "abc", "id": "abc-virtual", "data": []
        }))
        .unwrap();
        assert_eq!(record.record_id(), Some("abc"));
        assert_eq!(record.id.as_deref(), Some("abc-virtual"));
    }

    #[test]
    fn record_with_only_id_virtual_uses_it() {
        let record: ScrapedRecord =
            serde_json::from_str(r#"{"id": "v-1", "data": []}"#).unwrap();
        assert_eq!(record.record_id(), Some("v-1"));
    }

    #[test]
    fn candidate_accepts_numeric_and_string_ids() {
        let numeric: CityCandidate = serde_json::from_value(serde_json::json!({
            "city": "Princeton", "lat": 40.35, "lng": -74.66, "distance_km": 80.0, "id": 1840
        }))
        .unwrap();
        assert_eq!(numeric.id, Some(CityId::Number(1840)));

        let text: CityCandidate = serde_json::from_value(serde_json::json!({
            "city": "Princeton", "lat": 40.35, "lng": -74.66, "distance_km": 80.0, "id": "us-1840"
        }))
        .unwrap();
        assert_eq!(text.id, Some(CityId::Text("us-1840".to_string())));
    }

    #[test]
    fn sourced_candidate_serializes_flat_with_source_city() {
        let sourced = SourcedCandidate {
            candidate: CityCandidate {
                city: "Princeton".to_string(),
                city_ascii: Some("Princeton".to_string()),
                admin_name: Some("New Jersey".to_string()),
                country: Some("United States".to_string()),
                lat: 40.35,
                lng: -74.66,
                population: Some(30_000.0),
                distance_km: 80.0,
                id: Some(CityId::Number(7)),
            },
            source_city: "NYC".to_string(),
        };
        let value = serde_json::to_value(&sourced).unwrap();
        assert_eq!(value["city"], "Princeton");
        assert_eq!(value["sourceCity"], "NYC");
        assert_eq!(value["id"], 7);
    }

    #[test]
    fn dense_point_serializes_flat() {
        let dense = DensePoint {
            point: Point {
                lat: 1.0,
                lon: 2.0,
                title: "A".to_string(),
                rating: Rating::Number(4.0),
                address: String::new(),
                city: "X".to_string(),
                phone: String::new(),
            },
            density: 2,
        };
        let value = serde_json::to_value(&dense).unwrap();
        assert_eq!(value["lat"], 1.0);
        assert_eq!(value["density"], 2);
        assert_eq!(value["rating"], 4.0);
    }
}
