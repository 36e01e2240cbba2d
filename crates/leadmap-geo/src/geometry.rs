//! Flat degree-space helpers.
//!
//! Distances here are unprojected Euclidean distances over raw latitude and
//! longitude. They are good enough for a heat map and nothing more.

/// Euclidean distance between two coordinates, in degrees.
#[must_use]
pub fn degree_distance(lat_a: f64, lon_a: f64, lat_b: f64, lon_b: f64) -> f64 {
    let d_lat = lat_a - lat_b;
    let d_lon = lon_a - lon_b;
    (d_lat * d_lat + d_lon * d_lon).sqrt()
}

/// Flat-degree distance converted to kilometres with a fixed factor.
#[must_use]
pub fn approx_km(lat_a: f64, lon_a: f64, lat_b: f64, lon_b: f64, km_per_degree: f64) -> f64 {
    degree_distance(lat_a, lon_a, lat_b, lon_b) * km_per_degree
}

/// `"lat,lon"` with both values rounded to `decimals` places.
#[must_use]
pub fn coord_key(lat: f64, lon: f64, decimals: u32) -> String {
    let precision = decimals as usize;
    format!("{},{}", fixed(lat, precision), fixed(lon, precision))
}

/// Fixed-precision rendering with a rounded negative zero printed as `0`, so
/// values either side of the equator or prime meridian share a key.
fn fixed(value: f64, precision: usize) -> String {
    let rendered = format!("{value:.precision$}");
    match rendered.strip_prefix('-') {
        Some(unsigned) if unsigned.chars().all(|c| c == '0' || c == '.') => unsigned.to_string(),
        _ => rendered,
    }
}
