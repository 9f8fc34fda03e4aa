use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

const DEFAULT_NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org/";
const DEFAULT_PLACES_URL: &str = "https://maps.googleapis.com/maps/api/place/";
const DEFAULT_ANTHROPIC_URL: &str = "https://api.anthropic.com/";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    // Empty values are treated as unset so `.env` templates with blank keys work.
    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        let value = raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })?;
        if value == 0 {
            return Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(value)
    };

    let env = parse_environment(&or_default("TABLEPASSPORT_ENV", "development"))?;

    let bind_addr = or_default("TABLEPASSPORT_BIND_ADDR", "0.0.0.0:3000")
        .parse::<SocketAddr>()
        .map_err(|e| ConfigError::InvalidEnvVar {
            var: "TABLEPASSPORT_BIND_ADDR".to_string(),
            reason: e.to_string(),
        })?;
    let log_level = or_default("TABLEPASSPORT_LOG_LEVEL", "info");

    let google_places_key = optional("GOOGLE_PLACES_KEY");
    if google_places_key.is_none() && env == Environment::Production {
        return Err(ConfigError::MissingEnvVar("GOOGLE_PLACES_KEY".to_string()));
    }
    let anthropic_api_key = optional("ANTHROPIC_API_KEY");

    let nominatim_base_url = or_default("TABLEPASSPORT_NOMINATIM_URL", DEFAULT_NOMINATIM_URL);
    let places_base_url = or_default("TABLEPASSPORT_PLACES_URL", DEFAULT_PLACES_URL);
    let anthropic_base_url = or_default("TABLEPASSPORT_ANTHROPIC_URL", DEFAULT_ANTHROPIC_URL);
    let user_agent = or_default("TABLEPASSPORT_USER_AGENT", "TablePassport/1.0");

    let geocode_country = or_default("TABLEPASSPORT_GEOCODE_COUNTRY", "us").to_lowercase();
    if geocode_country.len() != 2 || !geocode_country.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(ConfigError::InvalidEnvVar {
            var: "TABLEPASSPORT_GEOCODE_COUNTRY".to_string(),
            reason: format!("expected a two-letter country code, got '{geocode_country}'"),
        });
    }

    let request_timeout_secs = parse_u64("TABLEPASSPORT_REQUEST_TIMEOUT_SECS", "30")?;
    let chat_timeout_secs = parse_u64("TABLEPASSPORT_CHAT_TIMEOUT_SECS", "20")?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        google_places_key,
        anthropic_api_key,
        nominatim_base_url,
        places_base_url,
        anthropic_base_url,
        user_agent,
        geocode_country,
        request_timeout_secs,
        chat_timeout_secs,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "TABLEPASSPORT_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}
