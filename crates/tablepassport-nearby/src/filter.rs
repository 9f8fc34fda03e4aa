//! Hard radius filtering and detail merging.
//!
//! The provider's `radius` parameter only biases ranking, so candidates are
//! re-checked here against the haversine distance from the search center.

use tablepassport_core::{haversine_meters, LatLng};
use tablepassport_places::{CandidatePlace, PlaceDetails};

use crate::types::EnrichedPlace;

/// A candidate that passed the radius check, with its distance in meters.
#[derive(Debug, Clone)]
pub struct InRange {
    pub candidate: CandidatePlace,
    pub distance_meters: f64,
}

/// Keeps candidates with geometry whose distance from `center` is at most
/// `radius_meters`, preserving input order.
#[must_use]
pub fn within_radius(
    center: LatLng,
    candidates: Vec<CandidatePlace>,
    radius_meters: f64,
) -> Vec<InRange> {
    candidates
        .into_iter()
        .filter_map(|candidate| {
            let location = candidate.location()?;
            let distance_meters = haversine_meters(center, location);
            (distance_meters <= radius_meters).then_some(InRange {
                candidate,
                distance_meters,
            })
        })
        .collect()
}

/// Overlays detail fields on the candidate's own. Address falls back to the
/// candidate's `vicinity`; phone, website and hours exist only in details.
#[must_use]
pub fn merge(in_range: InRange, details: Option<PlaceDetails>) -> EnrichedPlace {
    let InRange {
        candidate,
        distance_meters,
    } = in_range;
    let details = details.unwrap_or_default();
    let detail_hours = details.opening_hours.unwrap_or_default();

    let name = if candidate.name.is_empty() {
        details.name.unwrap_or_default()
    } else {
        candidate.name
    };

    EnrichedPlace {
        name,
        address: details.formatted_address.or(candidate.vicinity),
        phone: details.formatted_phone_number,
        website: details.website,
        rating: details.rating.or(candidate.rating),
        review_count: details.user_ratings_total.or(candidate.user_ratings_total),
        price_level: details.price_level.or(candidate.price_level),
        open_now: detail_hours
            .open_now
            .or_else(|| candidate.opening_hours.and_then(|h| h.open_now)),
        types: candidate.types,
        place_id: candidate.place_id,
        distance_meters,
        hours: detail_hours.weekday_text,
    }
}
