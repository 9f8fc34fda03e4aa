//! Nominatim response types.
//!
//! Nominatim's `format=json` output encodes `lat`/`lon` as decimal strings,
//! so the wire types keep them as `String` and the client parses them into a
//! [`LatLng`].

use serde::{Deserialize, Serialize};
use tablepassport_core::LatLng;

/// Fallback city label when reverse geocoding finds no settlement name.
pub const UNKNOWN_LOCALITY: &str = "Current Location";

/// One entry of the `/search` result array.
#[derive(Debug, Deserialize)]
pub struct SearchResult {
    pub lat: String,
    pub lon: String,
    #[serde(default)]
    pub display_name: String,
}

/// A forward-geocoding hit with parsed coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodeHit {
    pub point: LatLng,
    pub display_name: String,
}

impl GeocodeHit {
    /// Short human-readable label: the first two comma-separated segments of
    /// the display name, e.g. `"Philadelphia, Philadelphia County"`.
    #[must_use]
    pub fn short_label(&self) -> String {
        self.display_name
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .take(2)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Body of a `/reverse` response. Nominatim answers unresolvable points with
/// `{"error": "..."}` and HTTP 200, so `address` is optional.
#[derive(Debug, Default, Deserialize)]
pub struct ReverseResponse {
    #[serde(default)]
    pub address: Option<Address>,
    #[serde(default)]
    pub error: Option<String>,
}

/// The subset of Nominatim's address breakdown used for locality labels.
#[derive(Debug, Default, Deserialize)]
pub struct Address {
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub town: Option<String>,
    #[serde(default)]
    pub village: Option<String>,
    #[serde(default)]
    pub suburb: Option<String>,
    #[serde(default)]
    pub neighbourhood: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
}

/// City/state/neighborhood triple returned to callers of reverse geocoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocalitySummary {
    pub city: String,
    pub state: String,
    pub neighborhood: String,
}

impl ReverseResponse {
    #[must_use]
    pub fn summarize(&self) -> LocalitySummary {
        let address = self.address.as_ref();
        let field = |pick: fn(&Address) -> Option<&String>| {
            address
                .and_then(pick)
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
        };

        let city = field(|a| a.city.as_ref())
            .or_else(|| field(|a| a.town.as_ref()))
            .or_else(|| field(|a| a.village.as_ref()))
            .or_else(|| field(|a| a.suburb.as_ref()))
            .unwrap_or(UNKNOWN_LOCALITY);
        let state = field(|a| a.state.as_ref()).unwrap_or_default();
        let neighborhood = field(|a| a.neighbourhood.as_ref())
            .or_else(|| field(|a| a.suburb.as_ref()))
            .unwrap_or_default();

        LocalitySummary {
            city: city.to_string(),
            state: state.to_string(),
            neighborhood: neighborhood.to_string(),
        }
    }
}
