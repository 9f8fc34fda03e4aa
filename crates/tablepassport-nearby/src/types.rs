use serde::Serialize;
use tablepassport_core::LatLng;

/// Caller input. Blank strings are treated the same as absent values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocationQuery {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub zipcode: Option<String>,
    pub city: Option<String>,
    pub radius_meters: Option<f64>,
    pub keyword: Option<String>,
}

/// Search center and the label shown to the user for it.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedLocation {
    pub point: LatLng,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedPlace {
    pub name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub rating: Option<f64>,
    pub review_count: Option<u32>,
    pub price_level: Option<u8>,
    pub open_now: Option<bool>,
    pub types: Vec<String>,
    pub place_id: String,
    /// Great-circle distance from the search center.
    pub distance_meters: f64,
    /// Weekly schedule lines from the details lookup; empty when unknown.
    pub hours: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NearbyResult {
    pub places: Vec<EnrichedPlace>,
    pub resolved_location: String,
    pub lat: f64,
    pub lng: f64,
    /// Candidates inside the radius before truncation.
    pub total: usize,
    /// Places whose details lookup failed and carry blank detail fields.
    pub detail_failures: usize,
}
