//! Error types for the calculation history service.
//!
//! This module defines a hierarchical error system:
//! - [`AppError`]: Top-level application errors
//! - [`ParseError`]: Malformed arithmetic expressions
//! - [`StorageError`]: Database operation errors
//! - [`ServiceError`]: Calculation use-case errors
//! - [`ConfigError`]: Configuration errors
//!
//! All errors implement `Send + Sync` for async compatibility.

use thiserror::Error;

/// Top-level application error.
///
/// Returned by the binary's startup path. It wraps all subsystem errors
/// for unified reporting.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Storage error.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// HTTP server failure (bind or serve).
    #[error("Server error: {message}")]
    Server {
        /// Description of the server failure.
        message: String,
    },
}

/// Expression parse errors.
///
/// Every variant describes why an expression does not match
/// `number (operator number)*`. Positions are byte offsets into the input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The expression contains no tokens at all.
    #[error("Expression is empty")]
    Empty,

    /// An operator appeared where a number was expected.
    #[error("Unexpected operator '{operator}' at position {position}")]
    UnexpectedOperator {
        /// The offending operator character.
        operator: char,
        /// Byte offset of the operator.
        position: usize,
    },

    /// The expression ended right after an operator.
    #[error("Missing operand after operator at position {position}")]
    MissingOperand {
        /// Byte offset of the dangling operator.
        position: usize,
    },

    /// A number followed another number with no operator in between.
    #[error("Unexpected number at position {position}, expected an operator")]
    UnexpectedNumber {
        /// Byte offset of the second number.
        position: usize,
    },

    /// A numeric literal could not be read as a decimal.
    #[error("Malformed number '{literal}' at position {position}")]
    MalformedNumber {
        /// The literal as written.
        literal: String,
        /// Byte offset of the literal.
        position: usize,
    },

    /// A character outside digits, `.`, operators and whitespace.
    #[error("Invalid character '{character}' at position {position}")]
    InvalidCharacter {
        /// The offending character.
        character: char,
        /// Byte offset of the character.
        position: usize,
    },
}

/// Storage errors.
///
/// These errors represent failures in database operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// Failed to connect to the database.
    #[error("Database connection failed: {message}")]
    ConnectionFailed {
        /// Description of the connection failure.
        message: String,
    },

    /// A database query failed.
    #[error("Query failed: {query} - {message}")]
    QueryFailed {
        /// The query that failed (may be truncated).
        query: String,
        /// Description of the failure.
        message: String,
    },

    /// Calculation not found.
    #[error("Calculation not found: {id}")]
    CalculationNotFound {
        /// The calculation ID that was not found.
        id: i64,
    },

    /// Database migration failed.
    #[error("Migration failed: {version} - {message}")]
    MigrationFailed {
        /// The migration version that failed.
        version: String,
        /// Description of the failure.
        message: String,
    },

    /// Internal storage error.
    #[error("Internal storage error: {message}")]
    Internal {
        /// Description of the internal error.
        message: String,
    },
}

/// Calculation use-case errors.
///
/// Raised by [`crate::service::CalculationService`] and translated into
/// HTTP problem responses by the server layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// The expression could not be parsed.
    #[error("Invalid expression: {0}")]
    Parse(#[from] ParseError),

    /// Persistence failed.
    #[error("Storage failure: {0}")]
    Storage(StorageError),

    /// A field of the request failed validation.
    #[error("Invalid value for {field}: {reason}")]
    Validation {
        /// The field name.
        field: String,
        /// Why the value is invalid.
        reason: String,
    },

    /// No calculation has the requested ID.
    #[error("Calculation {id} doesn't exist")]
    NotFound {
        /// The requested ID.
        id: i64,
    },

    /// The ID in the path differs from the ID in the body.
    #[error("Path id {path_id} does not match body id {body_id}")]
    IdMismatch {
        /// ID taken from the request path.
        path_id: i64,
        /// ID taken from the request body.
        body_id: i64,
    },
}

impl From<StorageError> for ServiceError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::CalculationNotFound { id } => Self::NotFound { id },
            other => Self::Storage(other),
        }
    }
}

/// Configuration errors.
///
/// These errors represent failures in configuration loading and validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Configuration value is invalid.
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue {
        /// The variable name.
        var: String,
        /// Why the value is invalid.
        reason: String,
    },
}
