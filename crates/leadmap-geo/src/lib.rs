//! Geospatial density and unexplored-area recommendations for scraped leads.
//!
//! The pipeline runs entirely against records already fetched by the caller:
//! map links become points, points get a local density score, sparse buckets
//! seed nearby-city lookups, and the returned cities are filtered against
//! explored and saturated areas before being ranked by distance.

pub mod client;
pub mod clusters;
pub mod coords;
pub mod density;
pub mod error;
pub mod explored;
pub mod fetch;
pub mod geometry;
pub mod lookup;
pub mod pipeline;
pub mod points;
pub mod recommend;
pub mod run;
pub mod types;

pub use client::NearbyCitiesClient;
pub use clusters::sample_seeds;
pub use coords::{extract_coordinates, Coordinates};
pub use density::{annotate_density, heat_points, HeatPoint};
pub use error::GeoError;
pub use explored::ExploredAreas;
pub use lookup::{NearbyCityLookup, NearbyQuery};
pub use pipeline::{
    compute_recommendations, compute_recommendations_for_run, RecommendationReport,
};
pub use points::{build_points, RecordScope};
pub use recommend::{rank_recommendations, Rejection, RecommendationFilter};
pub use run::{ReportSlot, RunToken, RunTracker};
pub use types::{
    BusinessItem, CityCandidate, CityId, ClusterSeed, DensePoint, Point, Rating, Recommendation,
    ScrapedRecord, SourcedCandidate,
};
