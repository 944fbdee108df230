//! Configuration module for the SmartMine backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;

use axum::http::HeaderValue;

const DEFAULT_DB_PATH: &str = "./data/smartmine.sqlite";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5000";
const DEFAULT_LOG_LEVEL: &str = "info";

/// Output format of the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to SQLite database file
    pub db_path: PathBuf,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Log line format
    pub log_format: LogFormat,
    /// Single allowed CORS origin; any origin when unset
    pub cors_origin: Option<HeaderValue>,
}

/// Invalid configuration value.
#[derive(Debug)]
pub struct ConfigError {
    pub variable: &'static str,
    pub value: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid value for {}: {:?}", self.variable, self.value)
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let db_path = lookup("SMARTMINE_DB_PATH")
            .unwrap_or_else(|| DEFAULT_DB_PATH.to_string())
            .into();

        let raw_addr =
            lookup("SMARTMINE_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = raw_addr.parse::<SocketAddr>().map_err(|_| ConfigError {
            variable: "SMARTMINE_BIND_ADDR",
            value: raw_addr.clone(),
        })?;

        let log_level =
            lookup("SMARTMINE_LOG_LEVEL").unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());

        let log_format = match lookup("SMARTMINE_LOG_FORMAT").as_deref() {
            None | Some("pretty") => LogFormat::Pretty,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(ConfigError {
                    variable: "SMARTMINE_LOG_FORMAT",
                    value: other.to_string(),
                })
            }
        };

        let cors_origin = match lookup("SMARTMINE_CORS_ORIGIN").filter(|o| !o.trim().is_empty()) {
            Some(origin) => Some(HeaderValue::from_str(&origin).map_err(|_| ConfigError {
                variable: "SMARTMINE_CORS_ORIGIN",
                value: origin.clone(),
            })?),
            None => None,
        };

        Ok(Self {
            db_path,
            bind_addr,
            log_level,
            log_format,
            cors_origin,
        })
    }
}
