//! Arithmetic expression evaluator.
//!
//! This module provides:
//! - [`classify`]: label an expression with its operator [`Category`]
//! - [`evaluate`]: compute an expression's value by chained reduction
//! - [`tokenize`]: split an expression into literals and operators
//!
//! Evaluation has no operator precedence. Each operator is applied to the
//! running accumulator and the next literal in textual order, so `2+3*4` is
//! `20`, not `14`. Division by zero yields an IEEE 754 infinity or NaN.
//!
//! Both entry points are pure functions of their input and are safe to call
//! from any number of tasks at once.
//!
//! # Example
//!
//! ```
//! use calc_history::evaluator::{classify, evaluate, Category};
//!
//! assert_eq!(classify("3+5"), Category::Addition);
//! assert_eq!(classify("1+2+3"), Category::Combine);
//! assert_eq!(evaluate("2 + 3 * 4"), Ok(20.0));
//! assert!(evaluate("5++5").is_err());
//! ```

mod category;
mod parser;
mod token;

pub use category::{classify, Category};
pub use parser::{parse, tokenize, Chain};
pub use token::{render, Operator, Token};

use tracing::trace;

use crate::error::ParseError;
use crate::traits::ExpressionEvaluator;

/// Evaluate an expression left to right.
///
/// # Errors
///
/// Returns [`ParseError`] if the expression does not match
/// `number (operator number)*`.
pub fn evaluate(expression: &str) -> Result<f64, ParseError> {
    let chain = parse(expression)?;
    let result = chain.reduce();
    trace!(expression, steps = chain.steps.len(), result, "evaluated expression");
    Ok(result)
}

/// Stateless production [`ExpressionEvaluator`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Calculator;

impl Calculator {
    /// Create a new calculator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl ExpressionEvaluator for Calculator {
    fn classify(&self, expression: &str) -> Category {
        classify(expression)
    }

    fn evaluate(&self, expression: &str) -> Result<f64, ParseError> {
        evaluate(expression)
    }
}
