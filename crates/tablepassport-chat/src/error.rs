use thiserror::Error;

/// Errors returned by the chat relay client.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The upstream call was aborted by the relay's own deadline.
    #[error("chat request aborted after {secs}s")]
    Timeout { secs: u64 },

    #[error("ANTHROPIC_API_KEY is not configured")]
    MissingApiKey,

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

impl ChatError {
    /// Short machine-readable failure class reported to relay callers.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            ChatError::Timeout { .. } => "timeout",
            ChatError::Http(e) if e.is_timeout() => "timeout",
            ChatError::Http(e) if e.is_connect() => "connect",
            ChatError::Http(_) => "request",
            ChatError::MissingApiKey | ChatError::InvalidBaseUrl { .. } => "config",
        }
    }
}
