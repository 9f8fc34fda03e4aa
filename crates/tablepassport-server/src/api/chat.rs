use axum::{
    body::Body,
    extract::{rejection::JsonRejection, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};

use super::{ApiError, AppState};

/// Forwards the body to the messages API and mirrors its status and body.
/// Local failures answer 500 with the failure class and whether a key is set.
pub(super) async fn relay_chat(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(body) = payload?;

    match state.chat.relay(&body).await {
        Ok(relayed) => {
            let status =
                StatusCode::from_u16(relayed.status).unwrap_or(StatusCode::BAD_GATEWAY);
            Ok((
                status,
                [(header::CONTENT_TYPE, "application/json")],
                Body::from(relayed.body),
            )
                .into_response())
        }
        Err(e) => {
            tracing::error!(error = %e, kind = e.kind(), "chat relay failed");
            Ok((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": e.to_string(),
                    "type": e.kind(),
                    "hasApiKey": state.chat.has_api_key(),
                })),
            )
                .into_response())
        }
    }
}
