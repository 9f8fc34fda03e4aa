use futures::future::join_all;
use tablepassport_core::LatLng;
use tablepassport_geocode::{NominatimClient, UNKNOWN_LOCALITY};
use tablepassport_places::PlacesClient;

use crate::error::NearbyError;
use crate::filter::{merge, within_radius};
use crate::types::{LocationQuery, NearbyResult, ResolvedLocation};

/// Roughly a five-minute walk.
pub const DEFAULT_RADIUS_METERS: f64 = 400.0;
/// Largest radius the places provider accepts.
pub const MAX_RADIUS_METERS: f64 = 50_000.0;
/// Number of places enriched and returned.
pub const MAX_PLACES: usize = 10;

const PLACE_TYPE: &str = "restaurant";
const DETAIL_FIELDS: &[&str] = &[
    "name",
    "formatted_address",
    "formatted_phone_number",
    "website",
    "opening_hours",
    "price_level",
    "rating",
    "user_ratings_total",
    "geometry",
];

/// Turns a [`LocationQuery`] into a ranked, radius-checked, enriched list of
/// nearby restaurants.
#[derive(Debug, Clone)]
pub struct NearbyResolver {
    geocoder: NominatimClient,
    places: PlacesClient,
}

impl NearbyResolver {
    #[must_use]
    pub fn new(geocoder: NominatimClient, places: PlacesClient) -> Self {
        Self { geocoder, places }
    }

    /// Runs the full pipeline: resolve the center, search, filter by true
    /// distance, keep the top [`MAX_PLACES`], enrich them concurrently.
    ///
    /// A failed details lookup does not fail the request; the place keeps its
    /// search-result fields and is counted in `detail_failures`.
    ///
    /// # Errors
    ///
    /// - [`NearbyError::Validation`] when no center can be determined or a
    ///   parameter is out of range. No search is made in that case.
    /// - [`NearbyError::Upstream`] when the search reports a failure status.
    /// - [`NearbyError::Geocode`] / [`NearbyError::Places`] on transport or
    ///   decoding failures.
    pub async fn resolve(&self, query: &LocationQuery) -> Result<NearbyResult, NearbyError> {
        let radius = validate_radius(query.radius_meters)?;
        let location = self.resolve_location(query).await?;
        let keyword = non_blank(query.keyword.as_deref());

        let search = self
            .places
            .nearby_search(location.point, radius, PLACE_TYPE, keyword)
            .await?;
        let returned = search.candidates.len();

        let mut in_range = within_radius(location.point, search.candidates, radius);
        let total = in_range.len();
        in_range.truncate(MAX_PLACES);

        let lookups = in_range.iter().map(|r| {
            self.places
                .place_details(&r.candidate.place_id, DETAIL_FIELDS)
        });
        let details = join_all(lookups).await;

        let mut detail_failures = 0;
        let places: Vec<_> = in_range
            .into_iter()
            .zip(details)
            .map(|(r, details)| match details {
                Ok(details) => merge(r, Some(details)),
                Err(e) => {
                    detail_failures += 1;
                    tracing::warn!(
                        place_id = %r.candidate.place_id,
                        error = %e,
                        "place details lookup failed; returning search fields only"
                    );
                    merge(r, None)
                }
            })
            .collect();

        tracing::info!(
            lat = location.point.lat,
            lng = location.point.lng,
            radius,
            returned,
            total,
            detail_failures,
            "nearby search resolved"
        );

        Ok(NearbyResult {
            places,
            resolved_location: location.label,
            lat: location.point.lat,
            lng: location.point.lng,
            total,
            detail_failures,
        })
    }

    /// Picks the search center. Explicit coordinates always win and skip
    /// geocoding; otherwise the postal code is tried first, then the city.
    ///
    /// # Errors
    ///
    /// [`NearbyError::Validation`] if nothing resolves, [`NearbyError::Geocode`]
    /// if the geocoder fails.
    pub async fn resolve_location(
        &self,
        query: &LocationQuery,
    ) -> Result<ResolvedLocation, NearbyError> {
        let zipcode = non_blank(query.zipcode.as_deref());
        let city = non_blank(query.city.as_deref());

        if let (Some(lat), Some(lng)) = (query.lat, query.lng) {
            let point = LatLng::new(lat, lng)
                .map_err(|e| NearbyError::Validation(format!("invalid coordinates: {e}")))?;
            let label = city.or(zipcode).unwrap_or(UNKNOWN_LOCALITY).to_string();
            return Ok(ResolvedLocation { point, label });
        }

        if zipcode.is_none() && city.is_none() {
            return Err(NearbyError::Validation(
                "location required: provide lat and lng, a zipcode, or a city".to_string(),
            ));
        }

        let mut hit = None;
        if let Some(zip) = zipcode {
            hit = self.geocoder.search_postal_code(zip).await?;
            if hit.is_none() {
                tracing::debug!(zipcode = zip, "postal code did not geocode");
            }
        }
        if hit.is_none() {
            if let Some(city) = city {
                hit = self.geocoder.search_text(city).await?;
            }
        }

        let Some(hit) = hit else {
            let asked = zipcode.or(city).unwrap_or_default();
            return Err(NearbyError::Validation(format!(
                "could not find a location for '{asked}'"
            )));
        };

        let label = hit.short_label();
        Ok(ResolvedLocation {
            point: hit.point,
            label,
        })
    }
}

fn validate_radius(radius: Option<f64>) -> Result<f64, NearbyError> {
    let radius = radius.unwrap_or(DEFAULT_RADIUS_METERS);
    if !radius.is_finite() || radius <= 0.0 || radius > MAX_RADIUS_METERS {
        return Err(NearbyError::Validation(format!(
            "radius must be greater than 0 and at most {MAX_RADIUS_METERS} meters"
        )));
    }
    Ok(radius)
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}
