//! Configuration validation.
//!
//! This module provides validation logic for configuration values,
//! ensuring they are within acceptable ranges.

use super::Config;
use crate::error::ConfigError;

/// Largest value accepted for `MAX_EXPRESSION_LENGTH`.
pub const MAX_EXPRESSION_LENGTH_LIMIT: usize = 10_000;

/// Validate configuration values.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidValue`] if any value is out of range:
/// - `DATABASE_PATH` must not be empty
/// - `MAX_EXPRESSION_LENGTH` must be between 1 and 10000
#[must_use = "validation result should be checked"]
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.database_path.trim().is_empty() {
        return Err(ConfigError::InvalidValue {
            var: "DATABASE_PATH".into(),
            reason: "must not be empty".into(),
        });
    }

    if config.max_expression_length == 0
        || config.max_expression_length > MAX_EXPRESSION_LENGTH_LIMIT
    {
        return Err(ConfigError::InvalidValue {
            var: "MAX_EXPRESSION_LENGTH".into(),
            reason: format!("must be between 1 and {MAX_EXPRESSION_LENGTH_LIMIT}"),
        });
    }

    Ok(())
}
