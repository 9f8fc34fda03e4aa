use tablepassport_geocode::GeocodeError;
use tablepassport_places::PlacesError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NearbyError {
    /// The query could not be turned into a search center, or a parameter is
    /// out of range. Raised before the places search is attempted.
    #[error("{0}")]
    Validation(String),

    /// The places search answered with a failure status.
    #[error("{status}")]
    Upstream {
        status: String,
        message: Option<String>,
    },

    #[error("geocoding failed: {0}")]
    Geocode(#[from] GeocodeError),

    #[error("places search failed: {0}")]
    Places(PlacesError),
}

impl From<PlacesError> for NearbyError {
    fn from(err: PlacesError) -> Self {
        match err {
            PlacesError::ApiStatus { status, message } => NearbyError::Upstream { status, message },
            other => NearbyError::Places(other),
        }
    }
}
