use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::Deserialize;
use tablepassport_core::LatLng;
use tablepassport_geocode::LocalitySummary;

use super::{ApiError, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct ReverseRequest {
    lat: f64,
    lng: f64,
}

pub(super) async fn reverse_geocode(
    State(state): State<AppState>,
    payload: Result<Json<ReverseRequest>, JsonRejection>,
) -> Result<Json<LocalitySummary>, ApiError> {
    let Json(body) = payload?;
    let point = LatLng::new(body.lat, body.lng)
        .map_err(|e| ApiError::bad_request(format!("invalid coordinates: {e}")))?;

    let summary = state.geocoder.reverse(point).await.map_err(|e| {
        tracing::error!(error = %e, lat = point.lat, lng = point.lng, "reverse geocode failed");
        ApiError::internal(e.to_string())
    })?;
    Ok(Json(summary))
}
