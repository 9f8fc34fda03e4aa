use std::net::SocketAddr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub google_places_key: Option<String>,
    pub anthropic_api_key: Option<String>,
    pub nominatim_base_url: String,
    pub places_base_url: String,
    pub anthropic_base_url: String,
    pub user_agent: String,
    /// ISO 3166-1 alpha-2 code used to restrict postal-code geocoding.
    pub geocode_country: String,
    pub request_timeout_secs: u64,
    pub chat_timeout_secs: u64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field(
                "google_places_key",
                &self.google_places_key.as_ref().map(|_| "[redacted]"),
            )
            .field(
                "anthropic_api_key",
                &self.anthropic_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("nominatim_base_url", &self.nominatim_base_url)
            .field("places_base_url", &self.places_base_url)
            .field("anthropic_base_url", &self.anthropic_base_url)
            .field("user_agent", &self.user_agent)
            .field("geocode_country", &self.geocode_country)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("chat_timeout_secs", &self.chat_timeout_secs)
            .finish()
    }
}
