//! Trait definitions for mockable dependencies.
//!
//! This module defines traits for:
//! - [`ExpressionEvaluator`]: classification and evaluation of expressions
//! - [`CalculationRepository`]: calculation persistence
//! - [`TimeProvider`]: Time abstraction for testing
//!
//! # Mocking
//!
//! All traits are annotated with `#[cfg_attr(test, mockall::automock)]`
//! which generates mock implementations automatically for testing.
//!
//! # Example
//!
//! ```
//! use calc_history::traits::{TimeProvider, RealTimeProvider};
//!
//! let time_provider = RealTimeProvider;
//! let now = time_provider.now();
//! println!("Current time: {now}");
//! ```

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::{ParseError, StorageError};
use crate::evaluator::Category;
use crate::storage::{Calculation, NewCalculation};

/// Expression evaluator trait for mocking.
///
/// Implementations must be pure: the same input always yields the same output.
#[cfg_attr(test, mockall::automock)]
pub trait ExpressionEvaluator: Send + Sync {
    /// Label the expression with its operator category. Never fails.
    fn classify(&self, expression: &str) -> Category;

    /// Compute the expression's value.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] if the expression is malformed.
    fn evaluate(&self, expression: &str) -> Result<f64, ParseError>;
}

/// Calculation repository trait for mocking.
///
/// This trait abstracts database operations to allow for
/// dependency injection and testing with mock implementations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CalculationRepository: Send + Sync {
    /// Get every calculation, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the database operation fails.
    async fn get_all(&self) -> Result<Vec<Calculation>, StorageError>;

    /// Get a calculation by ID.
    ///
    /// Returns `None` if the calculation doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the database operation fails.
    async fn find_by_id(&self, id: i64) -> Result<Option<Calculation>, StorageError>;

    /// Find calculations whose type, id, expression or creation date contains `predicate`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the database operation fails.
    async fn search(&self, predicate: &str) -> Result<Vec<Calculation>, StorageError>;

    /// Persist a new calculation and return it with its assigned ID.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the database operation fails.
    async fn create(&self, calculation: NewCalculation) -> Result<Calculation, StorageError>;

    /// Overwrite an existing calculation and return it as stored.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::CalculationNotFound`] if no row has that ID.
    async fn update(&self, calculation: Calculation) -> Result<Calculation, StorageError>;

    /// Delete a calculation by ID.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::CalculationNotFound`] if no row has that ID.
    async fn delete(&self, id: i64) -> Result<(), StorageError>;
}

/// Time provider trait for mocking.
///
/// This trait abstracts time operations to allow for
/// deterministic testing.
#[cfg_attr(test, mockall::automock)]
pub trait TimeProvider: Send + Sync {
    /// Get the current time.
    fn now(&self) -> DateTime<Utc>;
}

/// Real time provider using system clock.
///
/// This is the production implementation that returns the actual current time.
#[derive(Debug, Clone, Copy, Default)]
pub struct RealTimeProvider;

impl TimeProvider for RealTimeProvider {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
