//! Nearby-restaurant resolution: geocode, search, filter by true distance,
//! enrich with per-place details.

pub mod error;
pub mod filter;
pub mod resolver;
pub mod types;

pub use error::NearbyError;
pub use resolver::NearbyResolver;
pub use types::{EnrichedPlace, LocationQuery, NearbyResult, ResolvedLocation};
