//! HTTP client for the Google Places web service.
//!
//! Wraps `reqwest` with API key management, envelope `status` checking and
//! typed response decoding. Transport errors have their URL stripped before
//! they leave this module because the key travels in the query string.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use tablepassport_core::LatLng;

use crate::error::PlacesError;
use crate::types::{
    CandidatePlace, DetailsResponse, NearbySearch, NearbySearchResponse, PlaceDetails,
    SearchStatus,
};

const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api/place/";

/// Client for the Places `nearbysearch` and `details` endpoints.
#[derive(Clone)]
pub struct PlacesClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl std::fmt::Debug for PlacesClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlacesClient")
            .field("api_key", &"[redacted]")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl PlacesClient {
    /// Creates a client pointed at the production Places API.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(api_key: &str, user_agent: &str, timeout_secs: u64) -> Result<Self, PlacesError> {
        Self::with_base_url(api_key, user_agent, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the `reqwest::Client` cannot be built,
    /// or [`PlacesError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn with_base_url(
        api_key: &str,
        user_agent: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, PlacesError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| PlacesError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
        })
    }

    /// Searches for places of `place_type` around `center`.
    ///
    /// `radius_m` only biases the provider's ranking; results outside it are
    /// common and callers that need a hard bound must filter themselves.
    /// Records that fail to decode are skipped.
    ///
    /// # Errors
    ///
    /// - [`PlacesError::ApiStatus`] for any status other than `OK` / `ZERO_RESULTS`.
    /// - [`PlacesError::Http`] on network failure or non-2xx HTTP status.
    /// - [`PlacesError::Deserialize`] if the envelope does not match.
    pub async fn nearby_search(
        &self,
        center: LatLng,
        radius_m: f64,
        place_type: &str,
        keyword: Option<&str>,
    ) -> Result<NearbySearch, PlacesError> {
        let location = format!("{},{}", center.lat, center.lng);
        let radius = radius_m.to_string();
        let mut params = vec![
            ("location", location.as_str()),
            ("radius", radius.as_str()),
            ("type", place_type),
        ];
        if let Some(keyword) = keyword {
            params.push(("keyword", keyword));
        }

        let url = self.build_url("nearbysearch/json", &params)?;
        let body: NearbySearchResponse = self.request_json(&url).await?;

        let Some(status) = SearchStatus::from_api(&body.status) else {
            return Err(PlacesError::ApiStatus {
                status: body.status,
                message: body.error_message,
            });
        };

        let candidates = body
            .results
            .into_iter()
            .filter_map(|raw| match serde_json::from_value::<CandidatePlace>(raw) {
                Ok(place) => Some(place),
                Err(e) => {
                    tracing::debug!(error = %e, "skipping undecodable nearby-search result");
                    None
                }
            })
            .collect();

        Ok(NearbySearch { status, candidates })
    }

    /// Fetches the requested `fields` for one place.
    ///
    /// # Errors
    ///
    /// - [`PlacesError::ApiStatus`] if the status is not `OK`.
    /// - [`PlacesError::MissingResult`] if `OK` came without a `result`.
    /// - [`PlacesError::Http`] on network failure or non-2xx HTTP status.
    /// - [`PlacesError::Deserialize`] if the body does not match.
    pub async fn place_details(
        &self,
        place_id: &str,
        fields: &[&str],
    ) -> Result<PlaceDetails, PlacesError> {
        let fields = fields.join(",");
        let url = self.build_url(
            "details/json",
            &[("place_id", place_id), ("fields", fields.as_str())],
        )?;
        let body: DetailsResponse = self.request_json(&url).await?;

        if body.status != "OK" {
            return Err(PlacesError::ApiStatus {
                status: body.status,
                message: body.error_message,
            });
        }

        body.result.ok_or_else(|| PlacesError::MissingResult {
            place_id: place_id.to_owned(),
        })
    }

    /// Builds the endpoint URL with the given pairs followed by `key`.
    fn build_url(&self, endpoint: &str, extra: &[(&str, &str)]) -> Result<Url, PlacesError> {
        let mut url = self
            .base_url
            .join(endpoint)
            .map_err(|e| PlacesError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;
        {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in extra {
                pairs.append_pair(k, v);
            }
            pairs.append_pair("key", &self.api_key);
        }
        Ok(url)
    }

    async fn request_json<T: DeserializeOwned>(&self, url: &Url) -> Result<T, PlacesError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(reqwest::Error::without_url)?;
        let response = response
            .error_for_status()
            .map_err(reqwest::Error::without_url)?;
        let body = response.text().await.map_err(reqwest::Error::without_url)?;
        serde_json::from_str(&body).map_err(|e| PlacesError::Deserialize {
            context: url.path().to_string(),
            source: e,
        })
    }
}
