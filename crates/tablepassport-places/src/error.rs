use thiserror::Error;

/// Errors returned by the Google Places client.
#[derive(Debug, Error)]
pub enum PlacesError {
    /// Network or TLS failure, or a non-2xx HTTP status. The request URL is
    /// stripped because it carries the API key.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a `status` other than the accepted ones, e.g.
    /// `OVER_QUERY_LIMIT` or `REQUEST_DENIED`.
    #[error("Places API status {status}: {}", .message.as_deref().unwrap_or("no message"))]
    ApiStatus {
        status: String,
        message: Option<String>,
    },

    /// A details lookup reported `OK` but carried no `result` object.
    #[error("place details for {place_id} had no result")]
    MissingResult { place_id: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}
