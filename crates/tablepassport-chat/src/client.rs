//! Relay client for the Anthropic Messages API.
//!
//! The request body is forwarded untouched; only the credential and version
//! headers are added. The upstream status and body come back verbatim so the
//! caller sees exactly what the provider said, errors included.

use std::time::Duration;

use reqwest::{header::CONTENT_TYPE, Client, Url};

use crate::error::ChatError;

const DEFAULT_BASE_URL: &str = "https://api.anthropic.com/";

/// Value of the `anthropic-version` header sent with every request.
pub const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Upstream status code and raw body text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayResponse {
    pub status: u16,
    pub body: String,
}

#[derive(Clone)]
pub struct ChatClient {
    client: Client,
    api_key: Option<String>,
    messages_url: Url,
    timeout_secs: u64,
}

impl std::fmt::Debug for ChatClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatClient")
            .field("has_api_key", &self.api_key.is_some())
            .field("messages_url", &self.messages_url.as_str())
            .field("timeout_secs", &self.timeout_secs)
            .finish_non_exhaustive()
    }
}

impl ChatClient {
    /// Creates a relay pointed at the production Anthropic API.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(api_key: Option<&str>, timeout_secs: u64) -> Result<Self, ChatError> {
        Self::with_base_url(api_key, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a relay with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::Http`] if the `reqwest::Client` cannot be built,
    /// or [`ChatError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn with_base_url(
        api_key: Option<&str>,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, ChatError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        let invalid = |reason: String| ChatError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason,
        };
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let messages_url = Url::parse(&normalised)
            .and_then(|u| u.join("v1/messages"))
            .map_err(|e| invalid(e.to_string()))?;

        Ok(Self {
            client,
            api_key: api_key.map(ToOwned::to_owned),
            messages_url,
            timeout_secs,
        })
    }

    #[must_use]
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Forwards `body` to `POST /v1/messages` and returns the upstream reply.
    ///
    /// The whole exchange (send plus body read) is abandoned once the
    /// configured deadline passes.
    ///
    /// # Errors
    ///
    /// - [`ChatError::MissingApiKey`] if no credential was configured.
    /// - [`ChatError::Timeout`] if the deadline elapsed.
    /// - [`ChatError::Http`] on network failure.
    pub async fn relay(&self, body: &serde_json::Value) -> Result<RelayResponse, ChatError> {
        let api_key = self.api_key.as_deref().ok_or(ChatError::MissingApiKey)?;

        let exchange = async {
            let response = self
                .client
                .post(self.messages_url.clone())
                .header(CONTENT_TYPE, "application/json")
                .header("x-api-key", api_key)
                .header("anthropic-version", ANTHROPIC_VERSION)
                .json(body)
                .send()
                .await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok::<_, ChatError>(RelayResponse { status, body })
        };

        let relayed = tokio::time::timeout(Duration::from_secs(self.timeout_secs), exchange)
            .await
            .map_err(|_| ChatError::Timeout {
                secs: self.timeout_secs,
            })??;

        tracing::debug!(status = relayed.status, "chat relay completed");
        Ok(relayed)
    }
}
