//! Google Places (legacy web service) response types.
//!
//! Both endpoints wrap their payload in a `{"status": "...", ...}` envelope.
//! Nearby-search results are decoded one by one so a single odd record does
//! not sink the whole page.

use serde::Deserialize;
use tablepassport_core::LatLng;

/// Outcome of a nearby search the caller should treat as success.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStatus {
    Ok,
    ZeroResults,
}

impl SearchStatus {
    /// Maps the envelope `status` string; any other value is a failure.
    #[must_use]
    pub fn from_api(status: &str) -> Option<Self> {
        match status {
            "OK" => Some(Self::Ok),
            "ZERO_RESULTS" => Some(Self::ZeroResults),
            _ => None,
        }
    }
}

/// Envelope of `nearbysearch/json`.
#[derive(Debug, Deserialize)]
pub struct NearbySearchResponse {
    pub status: String,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub results: Vec<serde_json::Value>,
}

/// A successful nearby search, candidates in provider relevance order.
#[derive(Debug, Clone)]
pub struct NearbySearch {
    pub status: SearchStatus,
    pub candidates: Vec<CandidatePlace>,
}

/// A nearby-search result before detail enrichment.
#[derive(Debug, Clone, Deserialize)]
pub struct CandidatePlace {
    pub place_id: String,
    #[serde(default)]
    pub name: String,
    /// Approximate street address.
    #[serde(default)]
    pub vicinity: Option<String>,
    #[serde(default)]
    pub geometry: Option<Geometry>,
    #[serde(default)]
    pub types: Vec<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub user_ratings_total: Option<u32>,
    #[serde(default)]
    pub price_level: Option<u8>,
    #[serde(default)]
    pub opening_hours: Option<OpeningHours>,
}

impl CandidatePlace {
    #[must_use]
    pub fn location(&self) -> Option<LatLng> {
        self.geometry.as_ref().map(|g| LatLng {
            lat: g.location.lat,
            lng: g.location.lng,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Geometry {
    pub location: GeoPoint,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OpeningHours {
    #[serde(default)]
    pub open_now: Option<bool>,
    /// Human-readable weekly schedule, one line per day.
    #[serde(default)]
    pub weekday_text: Vec<String>,
}

/// Envelope of `details/json`.
#[derive(Debug, Deserialize)]
pub struct DetailsResponse {
    pub status: String,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub result: Option<PlaceDetails>,
}

/// The requested subset of a place's details. Every field is optional because
/// the caller chooses the field mask.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlaceDetails {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub formatted_address: Option<String>,
    #[serde(default)]
    pub formatted_phone_number: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub opening_hours: Option<OpeningHours>,
    #[serde(default)]
    pub price_level: Option<u8>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub user_ratings_total: Option<u32>,
    #[serde(default)]
    pub geometry: Option<Geometry>,
}
