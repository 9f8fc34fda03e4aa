mod chat;
mod geocode;
mod places;

use axum::{
    extract::rejection::JsonRejection,
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tablepassport_chat::ChatClient;
use tablepassport_core::AppConfig;
use tablepassport_geocode::NominatimClient;
use tablepassport_nearby::{NearbyError, NearbyResolver};
use tablepassport_places::PlacesClient;
use tower::ServiceBuilder;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{request_id, REQUEST_ID_HEADER};

#[derive(Clone)]
pub struct AppState {
    /// `None` when no Places credential is configured.
    pub nearby: Option<NearbyResolver>,
    pub geocoder: NominatimClient,
    pub chat: ChatClient,
}

impl AppState {
    /// Builds every outbound client from configuration.
    pub fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let geocoder = NominatimClient::with_base_url(
            &config.user_agent,
            config.request_timeout_secs,
            &config.geocode_country,
            &config.nominatim_base_url,
        )?;

        let nearby = match config.google_places_key.as_deref() {
            Some(key) => {
                let places = PlacesClient::with_base_url(
                    key,
                    &config.user_agent,
                    config.request_timeout_secs,
                    &config.places_base_url,
                )?;
                Some(NearbyResolver::new(geocoder.clone(), places))
            }
            None => None,
        };

        let chat = ChatClient::with_base_url(
            config.anthropic_api_key.as_deref(),
            config.chat_timeout_secs,
            &config.anthropic_base_url,
        )?;

        Ok(Self {
            nearby,
            geocoder,
            chat,
        })
    }
}

/// JSON error body: `{"error": "...", "message": "..."}`, `message` omitted
/// when absent.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: ErrorBody,
}

impl ApiError {
    pub fn new(status: StatusCode, error: impl Into<String>) -> Self {
        Self {
            status,
            body: ErrorBody {
                error: error.into(),
                message: None,
            },
        }
    }

    pub fn bad_request(error: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, error)
    }

    pub fn internal(error: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, error)
    }

    #[must_use]
    pub fn with_message(mut self, message: Option<String>) -> Self {
        self.body.message = message;
        self
    }
}

impl From<NearbyError> for ApiError {
    fn from(err: NearbyError) -> Self {
        match err {
            NearbyError::Validation(msg) => ApiError::bad_request(msg),
            NearbyError::Upstream { status, message } => {
                ApiError::bad_request(status).with_message(message)
            }
            other => ApiError::internal(other.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::bad_request(format!("invalid request body: {}", rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status, Json(self.body)).into_response()
    }
}

async fn method_not_allowed() -> ApiError {
    ApiError::new(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
}

async fn health() -> Json<HealthData> {
    Json(HealthData { status: "ok" })
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static(REQUEST_ID_HEADER),
        ])
        .expose_headers([HeaderName::from_static(REQUEST_ID_HEADER)])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route(
            "/api/places",
            post(places::nearby_places).fallback(method_not_allowed),
        )
        .route(
            "/api/geocode",
            post(geocode::reverse_geocode).fallback(method_not_allowed),
        )
        .route(
            "/api/chat",
            post(chat::relay_chat).fallback(method_not_allowed),
        )
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}
