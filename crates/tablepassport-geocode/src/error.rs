use thiserror::Error;

/// Errors returned by the Nominatim client.
#[derive(Debug, Error)]
pub enum GeocodeError {
    /// Network or TLS failure, or a non-2xx HTTP status.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// Nominatim returned a coordinate string that is not a valid number or
    /// lies outside the valid range.
    #[error("invalid coordinate in geocoding response: {0}")]
    InvalidCoordinate(String),

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}
