//! Environment-backed server configuration.
//!
//! Every knob is an environment variable; nothing is hard-coded. The Twelve
//! Data API key has no default and missing it is a startup error; the
//! server refuses to boot half-configured rather than failing on the first
//! quote request.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

const BIND_ADDR_VAR: &str = "FOLIOTRACK_BIND_ADDR";
const DB_PATH_VAR: &str = "FOLIOTRACK_DB_PATH";
const API_KEY_VAR: &str = "FOLIOTRACK_TWELVEDATA_API_KEY";
const QUOTE_TTL_VAR: &str = "FOLIOTRACK_QUOTE_TTL_SECS";
const HTTP_TIMEOUT_VAR: &str = "FOLIOTRACK_HTTP_TIMEOUT_MS";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
const DEFAULT_DB_PATH: &str = "data/portfolio.duckdb";
const DEFAULT_QUOTE_TTL_SECS: u64 = 30;
const DEFAULT_HTTP_TIMEOUT_MS: u64 = 10_000;

/// Errors raised while reading configuration from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{API_KEY_VAR} is not set; a Twelve Data API key is required")]
    MissingApiKey,

    #[error("invalid value for {name}: '{value}'")]
    InvalidValue { name: &'static str, value: String },
}

/// Resolved server configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    pub db_path: PathBuf,
    pub twelvedata_api_key: String,
    pub quote_ttl: Duration,
    pub http_timeout: Duration,
}

impl AppConfig {
    /// Read configuration from the process environment.
    ///
    /// # Errors
    ///
    /// [`ConfigError::MissingApiKey`] when the API key variable is unset or
    /// blank; [`ConfigError::InvalidValue`] when a numeric variable does not
    /// parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        let twelvedata_api_key = env::var(API_KEY_VAR)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        let bind_addr =
            env::var(BIND_ADDR_VAR).unwrap_or_else(|_| String::from(DEFAULT_BIND_ADDR));
        let db_path = env::var(DB_PATH_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_DB_PATH));

        let quote_ttl_secs = parse_var(QUOTE_TTL_VAR, DEFAULT_QUOTE_TTL_SECS)?;
        let http_timeout_ms = parse_var(HTTP_TIMEOUT_VAR, DEFAULT_HTTP_TIMEOUT_MS)?;

        Ok(Self {
            bind_addr,
            db_path,
            twelvedata_api_key,
            quote_ttl: Duration::from_secs(quote_ttl_secs),
            http_timeout: Duration::from_millis(http_timeout_ms),
        })
    }
}

fn parse_var(name: &'static str, default: u64) -> Result<u64, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { name, value: raw }),
        Err(_) => Ok(default),
    }
}
