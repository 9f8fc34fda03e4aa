use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use serde::{Deserialize, Deserializer};
use tablepassport_nearby::{LocationQuery, NearbyResult};

use super::{ApiError, AppState};
use crate::middleware::RequestId;

/// Body of `POST /api/places`.
#[derive(Debug, Default, Deserialize)]
pub(super) struct PlacesRequest {
    lat: Option<f64>,
    lng: Option<f64>,
    radius: Option<f64>,
    keyword: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    zipcode: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    city: Option<String>,
}

impl From<PlacesRequest> for LocationQuery {
    fn from(req: PlacesRequest) -> Self {
        LocationQuery {
            lat: req.lat,
            lng: req.lng,
            zipcode: req.zipcode,
            city: req.city,
            radius_meters: req.radius,
            keyword: req.keyword,
        }
    }
}

/// Form fields such as a ZIP code arrive as either `"19103"` or `19103`.
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Text(s) => s,
        Raw::Number(n) => n.to_string(),
    }))
}

pub(super) async fn nearby_places(
    State(state): State<AppState>,
    Extension(RequestId(request_id)): Extension<RequestId>,
    payload: Result<Json<PlacesRequest>, JsonRejection>,
) -> Result<Json<NearbyResult>, ApiError> {
    let Json(body) = payload?;
    let Some(resolver) = state.nearby.as_ref() else {
        return Err(ApiError::internal("GOOGLE_PLACES_KEY is not configured"));
    };

    let query = LocationQuery::from(body);
    tracing::debug!(
        request_id = %request_id,
        lat = ?query.lat,
        lng = ?query.lng,
        zipcode = ?query.zipcode,
        city = ?query.city,
        radius = ?query.radius_meters,
        "nearby places request"
    );

    match resolver.resolve(&query).await {
        Ok(result) => Ok(Json(result)),
        Err(e) => {
            tracing::error!(request_id = %request_id, error = %e, "nearby places request failed");
            Err(ApiError::from(e))
        }
    }
}
