//! Storage types for database operations.
//!
//! - [`Calculation`]: a persisted calculation record
//! - [`NewCalculation`]: a calculation not yet assigned an ID

use chrono::{DateTime, Utc};

use crate::evaluator::Category;

/// Calculation stored in database.
#[derive(Debug, Clone, PartialEq)]
pub struct Calculation {
    /// Row identifier assigned by the database.
    pub id: i64,
    /// Operator category of the expression.
    pub kind: Category,
    /// Expression as submitted.
    pub expression: String,
    /// Creation timestamp.
    pub create_date: DateTime<Utc>,
    /// Evaluated result; may be infinite or NaN.
    pub result: f64,
}

/// Calculation awaiting insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCalculation {
    /// Operator category of the expression.
    pub kind: Category,
    /// Expression as submitted.
    pub expression: String,
    /// Creation timestamp.
    pub create_date: DateTime<Utc>,
    /// Evaluated result.
    pub result: f64,
}

impl NewCalculation {
    /// Create a new calculation record.
    #[must_use]
    pub fn new(
        kind: Category,
        expression: impl Into<String>,
        create_date: DateTime<Utc>,
        result: f64,
    ) -> Self {
        Self {
            kind,
            expression: expression.into(),
            create_date,
            result,
        }
    }

    /// Attach the database-assigned ID.
    #[must_use]
    pub fn with_id(self, id: i64) -> Calculation {
        Calculation {
            id,
            kind: self.kind,
            expression: self.expression,
            create_date: self.create_date,
            result: self.result,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_calculation_with_id() {
        let now = Utc::now();
        let calc = NewCalculation::new(Category::Addition, "1+1", now, 2.0).with_id(9);
        assert_eq!(calc.id, 9);
        assert_eq!(calc.kind, Category::Addition);
        assert_eq!(calc.expression, "1+1");
        assert_eq!(calc.create_date, now);
        assert!((calc.result - 2.0).abs() < f64::EPSILON);
    }
}
