//! Map-link coordinate extraction.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// `@40.7128,-74.0060` as found in shared map URLs.
static AT_PAIR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"@(-?\d+(?:\.\d+)?),(-?\d+(?:\.\d+)?)").expect("valid at-pair regex")
});

/// `!3d40.7128!4d-74.0060` embedded data parameters.
static DATA_PARAMS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"!3d(-?\d+(?:\.\d+)?)!4d(-?\d+(?:\.\d+)?)").expect("valid data-param regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// Extract a coordinate pair from a map link.
///
/// Tries the `@lat,lon` form first, then the `!3dlat!4dlon` form. Values are
/// not range-checked, so an out-of-range pair from bad upstream data is
/// returned as-is.
#[must_use]
pub fn extract_coordinates(link: Option<&str>) -> Option<Coordinates> {
    let link = link?;
    [&*AT_PAIR, &*DATA_PARAMS]
        .into_iter()
        .find_map(|re| parse_pair(re, link))
}

fn parse_pair(re: &Regex, link: &str) -> Option<Coordinates> {
    let caps = re.captures(link)?;
    let lat = caps.get(1)?.as_str().parse::<f64>().ok()?;
    let lon = caps.get(2)?.as_str().parse::<f64>().ok()?;
    // Overlong digit runs parse to infinity; those cannot be placed on a map.
    (lat.is_finite() && lon.is_finite()).then_some(Coordinates { lat, lon })
}
