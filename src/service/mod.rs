//! Calculation use cases.
//!
//! [`CalculationService`] combines the evaluator, the repository and the clock.
//! It owns validation and the create/update rules, and leaves HTTP concerns to
//! [`crate::server`].

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::error::ServiceError;
use crate::evaluator::Calculator;
use crate::storage::{Calculation, NewCalculation};
use crate::traits::{CalculationRepository, ExpressionEvaluator, RealTimeProvider, TimeProvider};

/// Calculation history service.
#[derive(Clone)]
pub struct CalculationService {
    evaluator: Arc<dyn ExpressionEvaluator>,
    repository: Arc<dyn CalculationRepository>,
    clock: Arc<dyn TimeProvider>,
    max_expression_length: usize,
}

impl std::fmt::Debug for CalculationService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CalculationService")
            .field("max_expression_length", &self.max_expression_length)
            .finish_non_exhaustive()
    }
}

impl CalculationService {
    /// Create a service with explicit collaborators.
    #[must_use]
    pub fn new(
        evaluator: Arc<dyn ExpressionEvaluator>,
        repository: Arc<dyn CalculationRepository>,
        clock: Arc<dyn TimeProvider>,
        max_expression_length: usize,
    ) -> Self {
        Self {
            evaluator,
            repository,
            clock,
            max_expression_length,
        }
    }

    /// Create a service using [`Calculator`] and the system clock.
    #[must_use]
    pub fn with_repository(
        repository: Arc<dyn CalculationRepository>,
        max_expression_length: usize,
    ) -> Self {
        Self::new(
            Arc::new(Calculator::new()),
            repository,
            Arc::new(RealTimeProvider),
            max_expression_length,
        )
    }

    /// All calculations, newest first. May be empty.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Storage`] if the repository fails.
    pub async fn history(&self) -> Result<Vec<Calculation>, ServiceError> {
        Ok(self.repository.get_all().await?)
    }

    /// A single calculation.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::NotFound`] if no calculation has this ID.
    pub async fn get(&self, id: i64) -> Result<Calculation, ServiceError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(ServiceError::NotFound { id })
    }

    /// Calculations whose type, id, expression or creation date contains `predicate`.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Storage`] if the repository fails.
    pub async fn search(&self, predicate: &str) -> Result<Vec<Calculation>, ServiceError> {
        Ok(self.repository.search(predicate).await?)
    }

    /// Classify, evaluate and record an expression.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Validation`] if the expression is too long,
    /// [`ServiceError::Parse`] if it is malformed, or
    /// [`ServiceError::Storage`] if persisting fails.
    pub async fn create(&self, expression: &str) -> Result<Calculation, ServiceError> {
        self.check_length(expression)?;

        // Blank input is reported by the parser as ParseError::Empty.
        let kind = self.evaluator.classify(expression);
        let result = self.evaluator.evaluate(expression).map_err(|e| {
            warn!(expression, error = %e, "rejected expression");
            e
        })?;
        debug!(expression, %kind, result, "evaluated");

        let created = self
            .repository
            .create(NewCalculation::new(
                kind,
                expression,
                self.clock.now(),
                result,
            ))
            .await?;
        info!(id = created.id, %kind, "calculation recorded");
        Ok(created)
    }

    /// Overwrite a stored calculation with the given values.
    ///
    /// The record is stored as given, apart from the creation date being
    /// truncated to microseconds; it is not re-evaluated.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::IdMismatch`] if `id` differs from the body's ID,
    /// [`ServiceError::Validation`] if the expression is blank or too long, or
    /// [`ServiceError::NotFound`] if no calculation has this ID.
    pub async fn update(
        &self,
        id: i64,
        calculation: Calculation,
    ) -> Result<Calculation, ServiceError> {
        if id != calculation.id {
            return Err(ServiceError::IdMismatch {
                path_id: id,
                body_id: calculation.id,
            });
        }
        if calculation.expression.trim().is_empty() {
            return Err(ServiceError::Validation {
                field: "expression".into(),
                reason: "must not be empty".into(),
            });
        }
        self.check_length(&calculation.expression)?;

        let updated = self.repository.update(calculation).await?;
        info!(id, "calculation updated");
        Ok(updated)
    }

    /// Delete a calculation.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::NotFound`] if no calculation has this ID.
    pub async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        self.repository.delete(id).await?;
        info!(id, "calculation deleted");
        Ok(())
    }

    fn check_length(&self, expression: &str) -> Result<(), ServiceError> {
        let length = expression.chars().count();
        if length > self.max_expression_length {
            return Err(ServiceError::Validation {
                field: "expression".into(),
                reason: format!(
                    "must be at most {} characters, got {length}",
                    self.max_expression_length
                ),
            });
        }
        Ok(())
    }
}
