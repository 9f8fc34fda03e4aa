//! HTTP client for the OpenStreetMap Nominatim API.
//!
//! Nominatim's usage policy requires a distinguishing `User-Agent`; the client
//! sets it once at construction so every request carries it.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use tablepassport_core::LatLng;

use crate::error::GeocodeError;
use crate::types::{GeocodeHit, LocalitySummary, ReverseResponse, SearchResult};

const DEFAULT_BASE_URL: &str = "https://nominatim.openstreetmap.org/";

/// Client for Nominatim forward (`/search`) and reverse (`/reverse`) lookups.
///
/// Use [`NominatimClient::new`] for production or
/// [`NominatimClient::with_base_url`] to point at a mock server in tests.
#[derive(Debug, Clone)]
pub struct NominatimClient {
    client: Client,
    base_url: Url,
    /// Country restriction applied to postal-code searches.
    country: String,
}

impl NominatimClient {
    /// Creates a new client pointed at the public Nominatim instance.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(user_agent: &str, timeout_secs: u64, country: &str) -> Result<Self, GeocodeError> {
        Self::with_base_url(user_agent, timeout_secs, country, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::Http`] if the `reqwest::Client` cannot be built,
    /// or [`GeocodeError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn with_base_url(
        user_agent: &str,
        timeout_secs: u64,
        country: &str,
        base_url: &str,
    ) -> Result<Self, GeocodeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash so `join("search")` appends rather than
        // replacing the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| GeocodeError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            base_url,
            country: country.to_lowercase(),
        })
    }

    /// Looks up a postal code within the configured country and returns the
    /// best match, if any.
    ///
    /// # Errors
    ///
    /// - [`GeocodeError::Http`] on network failure or non-2xx status.
    /// - [`GeocodeError::Deserialize`] if the body is not a result array.
    /// - [`GeocodeError::InvalidCoordinate`] if the hit carries unparsable coordinates.
    pub async fn search_postal_code(
        &self,
        postal_code: &str,
    ) -> Result<Option<GeocodeHit>, GeocodeError> {
        let url = self.build_url(
            "search",
            &[
                ("postalcode", postal_code),
                ("countrycodes", &self.country),
                ("limit", "1"),
            ],
        )?;
        self.first_hit(&url).await
    }

    /// Free-text place search (city, neighborhood, landmark).
    ///
    /// # Errors
    ///
    /// Same as [`NominatimClient::search_postal_code`].
    pub async fn search_text(&self, query: &str) -> Result<Option<GeocodeHit>, GeocodeError> {
        let url = self.build_url("search", &[("q", query), ("limit", "1")])?;
        self.first_hit(&url).await
    }

    /// Resolves a coordinate to a city/state/neighborhood summary.
    ///
    /// Points Nominatim cannot resolve produce the fallback summary rather
    /// than an error.
    ///
    /// # Errors
    ///
    /// - [`GeocodeError::Http`] on network failure or non-2xx status.
    /// - [`GeocodeError::Deserialize`] if the body is not a JSON object.
    pub async fn reverse(&self, point: LatLng) -> Result<LocalitySummary, GeocodeError> {
        let lat = point.lat.to_string();
        let lon = point.lng.to_string();
        let url = self.build_url("reverse", &[("lat", &lat), ("lon", &lon)])?;
        let body: ReverseResponse = self.request_json(&url).await?;
        if let Some(error) = &body.error {
            tracing::debug!(lat = point.lat, lng = point.lng, %error, "reverse geocoding found no address");
        }
        Ok(body.summarize())
    }

    async fn first_hit(&self, url: &Url) -> Result<Option<GeocodeHit>, GeocodeError> {
        let results: Vec<SearchResult> = self.request_json(url).await?;
        let Some(first) = results.into_iter().next() else {
            return Ok(None);
        };

        let lat = parse_coordinate(&first.lat)?;
        let lng = parse_coordinate(&first.lon)?;
        let point = LatLng::new(lat, lng)
            .map_err(|e| GeocodeError::InvalidCoordinate(e.to_string()))?;

        Ok(Some(GeocodeHit {
            point,
            display_name: first.display_name,
        }))
    }

    /// Builds the endpoint URL with `format=json` plus the given query pairs,
    /// percent-encoded via [`Url::query_pairs_mut`].
    fn build_url(&self, endpoint: &str, extra: &[(&str, &str)]) -> Result<Url, GeocodeError> {
        let mut url = self
            .base_url
            .join(endpoint)
            .map_err(|e| GeocodeError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("format", "json");
            for (k, v) in extra {
                pairs.append_pair(k, v);
            }
        }
        Ok(url)
    }

    /// Sends a GET request, asserts a 2xx status, and decodes the JSON body.
    async fn request_json<T: DeserializeOwned>(&self, url: &Url) -> Result<T, GeocodeError> {
        let response = self.client.get(url.clone()).send().await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| GeocodeError::Deserialize {
            context: url.path().to_string(),
            source: e,
        })
    }
}

fn parse_coordinate(raw: &str) -> Result<f64, GeocodeError> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| GeocodeError::InvalidCoordinate(raw.to_string()))
}
