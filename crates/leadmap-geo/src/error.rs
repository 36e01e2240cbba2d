use thiserror::Error;

/// Errors returned by the nearby-cities lookup client.
///
/// None of these are fatal to a recommendation run; the fetch loop logs them
/// and treats the affected seed as having produced no candidates.
#[derive(Debug, Error)]
pub enum GeoError {
    /// Network or TLS failure, or a non-2xx status from the lookup service.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with `"success": false`.
    #[error("nearby-cities lookup error: {0}")]
    Api(String),

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL \"{url}\": {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}
