//! API configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `SMARTDEAL_DATABASE_URL` - Store URL, `postgres://...` or `memory://`
//!   (falls back to `DATABASE_URL`, then `MONGO_URL`)
//!
//! ## Optional
//! - `SMARTDEAL_DB_NAME` - Database name overriding the one in the URL
//!   (falls back to `DB_NAME`)
//! - `SMARTDEAL_HOST` - Bind address (default: 127.0.0.1)
//! - `SMARTDEAL_PORT` - Listen port (default: 8001)
//! - `CORS_ORIGINS` - Comma-separated allowed origins, or `*` (default: `*`)
//! - `LOG_FORMAT` - `json` for JSON log lines (default: text)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Traces sample rate (default: 1.0)

use std::net::{IpAddr, SocketAddr};

use secrecy::SecretString;
use thiserror::Error;

/// Store URL variables, in lookup order.
const DATABASE_URL_KEYS: [&str; 3] = ["SMARTDEAL_DATABASE_URL", "DATABASE_URL", "MONGO_URL"];

/// Database name variables, in lookup order.
const DATABASE_NAME_KEYS: [&str; 2] = ["SMARTDEAL_DB_NAME", "DB_NAME"];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Origins allowed by the CORS layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsOrigins {
    /// `*`: any origin, without credentials.
    Any,
    /// An explicit list; credentials are allowed.
    List(Vec<String>),
}

impl CorsOrigins {
    /// Parse a comma-separated origin list. `*` anywhere in the list means
    /// any origin.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let origins: Vec<String> = raw
            .split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .map(String::from)
            .collect();

        if origins.is_empty() || origins.iter().any(|o| o == "*") {
            Self::Any
        } else {
            Self::List(origins)
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl LogFormat {
    fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some(v) if v.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Text,
        }
    }
}

/// API application configuration.
///
/// Implements `Debug` manually to redact the store URL, which may carry a
/// password.
#[derive(Clone)]
pub struct ApiConfig {
    /// Store URL (`postgres://...` or `memory://`)
    pub database_url: SecretString,
    /// Database name overriding the one in the URL
    pub database_name: Option<String>,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Allowed CORS origins
    pub cors_origins: CorsOrigins,
    /// Log output format
    pub log_format: LogFormat,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "development", "staging", "production")
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate (0.0 to 1.0)
    pub sentry_sample_rate: f32,
    /// Sentry traces sample rate for performance monitoring (0.0 to 1.0)
    pub sentry_traces_sample_rate: f32,
}

impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("database_url", &"[REDACTED]")
            .field("database_name", &self.database_name)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("cors_origins", &self.cors_origins)
            .field("log_format", &self.log_format)
            .field("sentry_dsn", &self.sentry_dsn.as_ref().map(|_| "[REDACTED]"))
            .field("sentry_environment", &self.sentry_environment)
            .field("sentry_sample_rate", &self.sentry_sample_rate)
            .field("sentry_traces_sample_rate", &self.sentry_traces_sample_rate)
            .finish()
    }
}

impl ApiConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the store URL is missing or a variable fails
    /// to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let database_url = get_database_url()?;
        let database_name = get_first_env(&DATABASE_NAME_KEYS);
        let host = get_env_or_default("SMARTDEAL_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("SMARTDEAL_HOST".to_string(), e.to_string())
            })?;
        let port = get_env_or_default("SMARTDEAL_PORT", "8001")
            .parse::<u16>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("SMARTDEAL_PORT".to_string(), e.to_string())
            })?;
        let cors_origins = CorsOrigins::parse(&get_env_or_default("CORS_ORIGINS", "*"));
        let log_format = LogFormat::parse(get_optional_env("LOG_FORMAT").as_deref());

        let sentry_dsn = get_optional_env("SENTRY_DSN");
        let sentry_environment = get_optional_env("SENTRY_ENVIRONMENT");
        let sentry_sample_rate = parse_rate(get_optional_env("SENTRY_SAMPLE_RATE").as_deref());
        let sentry_traces_sample_rate =
            parse_rate(get_optional_env("SENTRY_TRACES_SAMPLE_RATE").as_deref());

        Ok(Self {
            database_url,
            database_name,
            host,
            port,
            cors_origins,
            log_format,
            sentry_dsn,
            sentry_environment,
            sentry_sample_rate,
            sentry_traces_sample_rate,
        })
    }

    /// Configuration for a process-local store with every optional setting
    /// at its default. Used by tests and demo runs.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            database_url: SecretString::from("memory://"),
            database_name: None,
            host: IpAddr::from([127, 0, 0, 1]),
            port: 8001,
            cors_origins: CorsOrigins::Any,
            log_format: LogFormat::Text,
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 1.0,
        }
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get the store URL, trying each key in [`DATABASE_URL_KEYS`].
fn get_database_url() -> Result<SecretString, ConfigError> {
    get_first_env(&DATABASE_URL_KEYS)
        .map(SecretString::from)
        .ok_or_else(|| ConfigError::MissingEnvVar(DATABASE_URL_KEYS[0].to_string()))
}

/// Get the first set, non-empty variable among `keys`.
fn get_first_env(keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| get_optional_env(key))
        .find(|value| !value.is_empty())
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse a sample rate, defaulting to 1.0 when absent or invalid.
fn parse_rate(raw: Option<&str>) -> f32 {
    raw.and_then(|s| s.parse().ok()).unwrap_or(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cors_origins_wildcard() {
        assert_eq!(CorsOrigins::parse("*"), CorsOrigins::Any);
        assert_eq!(CorsOrigins::parse(""), CorsOrigins::Any);
        assert_eq!(
            CorsOrigins::parse("https://a.example, *"),
            CorsOrigins::Any
        );
    }

    #[test]
    fn test_cors_origins_list() {
        assert_eq!(
            CorsOrigins::parse("https://a.example, https://b.example,"),
            CorsOrigins::List(vec![
                "https://a.example".to_string(),
                "https://b.example".to_string(),
            ])
        );
    }

    #[test]
    fn test_log_format_parse() {
        assert_eq!(LogFormat::parse(Some("json")), LogFormat::Json);
        assert_eq!(LogFormat::parse(Some("JSON")), LogFormat::Json);
        assert_eq!(LogFormat::parse(Some("pretty")), LogFormat::Text);
        assert_eq!(LogFormat::parse(None), LogFormat::Text);
    }

    #[test]
    fn test_parse_rate() {
        assert!((parse_rate(Some("0.25")) - 0.25).abs() < f32::EPSILON);
        assert!((parse_rate(Some("nope")) - 1.0).abs() < f32::EPSILON);
        assert!((parse_rate(None) - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_socket_addr() {
        let addr = ApiConfig::in_memory().socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 8001);
    }

    #[test]
    fn test_debug_redacts_database_url() {
        let mut config = ApiConfig::in_memory();
        config.database_url = SecretString::from("postgres://user:hunter2@db/smartdeal");
        config.sentry_dsn = Some("https://key@sentry.example/1".to_string());

        let debug = format!("{config:?}");
        assert!(!debug.contains("hunter2"));
        assert!(!debug.contains("key@sentry"));
        assert!(debug.contains("[REDACTED]"));
    }
}
