//! Core `SQLite` storage implementation.
//!
//! This module provides the main [`SqliteStorage`] struct and core database operations.

#![allow(clippy::missing_errors_doc)]

use crate::error::StorageError;
use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

/// `SQLite` storage backend.
///
/// Provides persistent storage for the calculation history.
#[derive(Debug, Clone)]
pub struct SqliteStorage {
    pub(crate) pool: SqlitePool,
}

impl SqliteStorage {
    /// Create a new `SQLite` storage instance.
    ///
    /// # Arguments
    ///
    /// * `database_path` - Path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::ConnectionFailed`] if the connection fails.
    pub async fn new(database_path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = database_path.as_ref();

        // Create parent directories if they don't exist
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| StorageError::ConnectionFailed {
                message: format!("Failed to create database directory: {e}"),
            })?;
        }

        let options =
            SqliteConnectOptions::from_str(&format!("sqlite://{}?mode=rwc", path.display()))
                .map_err(|e| StorageError::ConnectionFailed {
                    message: format!("Invalid database path: {e}"),
                })?
                .journal_mode(SqliteJournalMode::Wal)
                .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(|e| StorageError::ConnectionFailed {
                message: format!("Failed to connect to database: {e}"),
            })?;

        let storage = Self { pool };
        storage.run_migrations().await?;
        debug!(path = %path.display(), "database ready");

        Ok(storage)
    }

    /// Create a new in-memory `SQLite` storage instance for testing.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::ConnectionFailed`] if the connection fails.
    pub async fn new_in_memory() -> Result<Self, StorageError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:").map_err(|e| {
            StorageError::ConnectionFailed {
                message: format!("Invalid memory database options: {e}"),
            }
        })?;

        // A single connection keeps every query on the same in-memory database.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .map_err(|e| StorageError::ConnectionFailed {
                message: format!("Failed to create in-memory database: {e}"),
            })?;

        let storage = Self { pool };
        storage.run_migrations().await?;

        Ok(storage)
    }

    /// Run database migrations.
    ///
    /// Each migration is idempotent (uses IF NOT EXISTS).
    pub(crate) async fn run_migrations(&self) -> Result<(), StorageError> {
        let schema_001 = include_str!("../../migrations/001_calculations.sql");
        sqlx::raw_sql(schema_001)
            .execute(&self.pool)
            .await
            .map_err(|e| StorageError::MigrationFailed {
                version: "001".to_string(),
                message: format!("Failed to run migration 001: {e}"),
            })?;

        Ok(())
    }

    /// Format a timestamp for storage.
    ///
    /// Fixed microsecond precision keeps text order equal to time order.
    pub(crate) fn format_datetime(dt: &DateTime<Utc>) -> String {
        dt.to_rfc3339_opts(SecondsFormat::Micros, true)
    }

    /// Parse a datetime string from the database.
    pub(crate) fn parse_datetime(s: &str) -> Result<DateTime<Utc>, StorageError> {
        s.parse::<DateTime<Utc>>()
            .map_err(|e| StorageError::Internal {
                message: format!("Failed to parse datetime '{s}': {e}"),
            })
    }

    /// Create a query error with the given query name and message.
    pub(crate) fn query_error(query: &str, message: String) -> StorageError {
        StorageError::QueryFailed {
            query: query.to_string(),
            message,
        }
    }
}
