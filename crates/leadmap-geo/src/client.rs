//! HTTP client for the nearby-cities lookup service.
//!
//! Wraps `reqwest` with envelope checking (`{"success": bool, "cities": [...]}`)
//! and per-entry candidate parsing. No retries are issued: the fetch loop
//! treats any error as an empty result for that seed.

use std::time::Duration;

use leadmap_core::AppConfig;
use reqwest::{Client, Url};
use serde::Deserialize;

use crate::error::GeoError;
use crate::lookup::{NearbyCityLookup, NearbyQuery};
use crate::types::CityCandidate;

const NEARBY_CITIES_PATH: &str = "nearby-cities";

#[derive(Debug, Deserialize)]
struct NearbyCitiesEnvelope {
    success: bool,
    #[serde(default)]
    cities: Vec<serde_json::Value>,
    #[serde(default)]
    message: Option<String>,
}

/// Client for `GET /nearby-cities`.
///
/// Use [`NearbyCitiesClient::from_app_config`] in the binary or
/// [`NearbyCitiesClient::with_base_url`] to point at a mock server in tests.
pub struct NearbyCitiesClient {
    client: Client,
    base_url: Url,
    api_token: Option<String>,
}

impl NearbyCitiesClient {
    /// Build a client from the application configuration.
    ///
    /// # Errors
    ///
    /// Returns [`GeoError::Http`] if the `reqwest::Client` cannot be built, or
    /// [`GeoError::InvalidBaseUrl`] if the configured URL does not parse.
    pub fn from_app_config(config: &AppConfig) -> Result<Self, GeoError> {
        Self::with_base_url(
            &config.nearby_cities_url,
            config.request_timeout_secs,
            &config.user_agent,
            config.api_token.as_deref(),
        )
    }

    /// Creates a client rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`GeoError::Http`] if the `reqwest::Client` cannot be built, or
    /// [`GeoError::InvalidBaseUrl`] if `base_url` is not a valid URL.
    pub fn with_base_url(
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
        api_token: Option<&str>,
    ) -> Result<Self, GeoError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash, so joining the endpoint appends to the
        // path instead of replacing its last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| GeoError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            base_url,
            api_token: api_token.map(str::to_owned),
        })
    }

    /// Full request URL for `query`, with encoded query parameters.
    pub(crate) fn build_url(&self, query: &NearbyQuery) -> Result<Url, GeoError> {
        let mut url = self
            .base_url
            .join(NEARBY_CITIES_PATH)
            .map_err(|e| GeoError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;
        url.query_pairs_mut()
            .append_pair("lat", &query.lat.to_string())
            .append_pair("lng", &query.lng.to_string())
            .append_pair("limit", &query.limit.to_string())
            .append_pair("radius", &query.radius_km.to_string())
            .append_pair("minPopulation", &query.min_population.to_string());
        Ok(url)
    }

    /// Fetch cities near `query`.
    ///
    /// Entries that do not match the candidate shape are skipped rather than
    /// failing the whole response.
    ///
    /// # Errors
    ///
    /// - [`GeoError::Http`] on network failure or a non-2xx status.
    /// - [`GeoError::Deserialize`] if the body is not the expected envelope.
    /// - [`GeoError::Api`] if the envelope reports `"success": false`.
    pub async fn fetch_nearby(&self, query: &NearbyQuery) -> Result<Vec<CityCandidate>, GeoError> {
        let url = self.build_url(query)?;
        let mut request = self.client.get(url.clone());
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?.error_for_status()?;
        let body = response.text().await?;
        let envelope: NearbyCitiesEnvelope =
            serde_json::from_str(&body).map_err(|e| GeoError::Deserialize {
                context: url.to_string(),
                source: e,
            })?;

        if !envelope.success {
            return Err(GeoError::Api(
                envelope
                    .message
                    .unwrap_or_else(|| "lookup reported success=false".to_string()),
            ));
        }

        let total = envelope.cities.len();
        let cities: Vec<CityCandidate> = envelope
            .cities
            .into_iter()
            .filter_map(|v| serde_json::from_value::<CityCandidate>(v).ok())
            .collect();
        if cities.len() < total {
            tracing::debug!(
                skipped = total - cities.len(),
                total,
                "skipped malformed nearby-city entries"
            );
        }
        Ok(cities)
    }
}

impl NearbyCityLookup for NearbyCitiesClient {
    async fn nearby_cities(&self, query: &NearbyQuery) -> Result<Vec<CityCandidate>, GeoError> {
        self.fetch_nearby(query).await
    }
}
