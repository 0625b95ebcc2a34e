//! Configuration management.
//!
//! This module handles:
//! - Environment variable loading
//! - Configuration validation
//! - Default value handling
//!
//! # Example
//!
//! ```
//! use calc_history::config::{Config, LogFormat, DEFAULT_MAX_EXPRESSION_LENGTH};
//!
//! // Create a config directly (use Config::from_env() in production)
//! let config = Config {
//!     database_path: "./data/calculations.db".to_string(),
//!     log_level: "info".to_string(),
//!     log_format: LogFormat::Text,
//!     bind_address: "127.0.0.1:8080".parse().unwrap(),
//!     max_expression_length: DEFAULT_MAX_EXPRESSION_LENGTH,
//! };
//!
//! assert!(calc_history::config::validate_config(&config).is_ok());
//! ```

mod validation;

pub use validation::{validate_config, MAX_EXPRESSION_LENGTH_LIMIT};

use std::net::SocketAddr;
use std::str::FromStr;

use crate::error::ConfigError;

/// Default database path.
pub const DEFAULT_DATABASE_PATH: &str = "./data/calculations.db";

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Default listen address.
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:8080";

/// Default maximum expression length in characters.
pub const DEFAULT_MAX_EXPRESSION_LENGTH: usize = 100;

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(ConfigError::InvalidValue {
                var: "LOG_FORMAT".into(),
                reason: "must be 'text' or 'json'".into(),
            }),
        }
    }
}

/// Application configuration.
///
/// Use [`Config::from_env`] to load configuration from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Database path.
    pub database_path: String,
    /// Log level (error, warn, info, debug, trace, or any `EnvFilter` directive).
    pub log_level: String,
    /// Log output format.
    pub log_format: LogFormat,
    /// Address the HTTP server listens on.
    pub bind_address: SocketAddr,
    /// Longest accepted expression, in characters.
    pub max_expression_length: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: DEFAULT_DATABASE_PATH.into(),
            log_level: DEFAULT_LOG_LEVEL.into(),
            log_format: LogFormat::Text,
            bind_address: SocketAddr::from(([127, 0, 0, 1], 8080)),
            max_expression_length: DEFAULT_MAX_EXPRESSION_LENGTH,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Optional environment variables (with defaults):
    /// - `DATABASE_PATH`: Path to `SQLite` database (default: `./data/calculations.db`)
    /// - `LOG_LEVEL`: Logging level (default: `info`)
    /// - `LOG_FORMAT`: `text` or `json` (default: `text`)
    /// - `BIND_ADDRESS`: Listen address (default: `127.0.0.1:8080`)
    /// - `MAX_EXPRESSION_LENGTH`: Longest accepted expression (default: `100`)
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a value cannot be parsed or fails
    /// validation (see [`validate_config`]).
    #[must_use = "configuration should be used"]
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors)
        let _ = dotenvy::dotenv();

        let database_path =
            std::env::var("DATABASE_PATH").unwrap_or_else(|_| DEFAULT_DATABASE_PATH.into());

        let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| DEFAULT_LOG_LEVEL.into());

        let log_format = std::env::var("LOG_FORMAT")
            .map_or(Ok(LogFormat::default()), |val| val.parse::<LogFormat>())?;

        let bind_address = std::env::var("BIND_ADDRESS")
            .unwrap_or_else(|_| DEFAULT_BIND_ADDRESS.into())
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidValue {
                var: "BIND_ADDRESS".into(),
                reason: format!("not a socket address: {e}"),
            })?;

        let max_expression_length =
            parse_env_usize("MAX_EXPRESSION_LENGTH", DEFAULT_MAX_EXPRESSION_LENGTH)?;

        let config = Self {
            database_path,
            log_level,
            log_format,
            bind_address,
            max_expression_length,
        };

        validate_config(&config)?;
        Ok(config)
    }
}

/// Parse an environment variable as usize, using a default if not set.
fn parse_env_usize(name: &str, default: usize) -> Result<usize, ConfigError> {
    std::env::var(name).map_or(Ok(default), |val| {
        val.parse().map_err(|_| ConfigError::InvalidValue {
            var: name.into(),
            reason: "must be a positive integer".into(),
        })
    })
}
