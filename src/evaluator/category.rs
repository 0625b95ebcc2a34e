//! Operator category classification.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::token::Operator;

/// Which operator(s) an expression contains.
///
/// Stored next to the expression and its result. The label never drives
/// evaluation; see [`super::evaluate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Exactly one `+`.
    Addition,
    /// Exactly one `-`.
    Subtract,
    /// Exactly one `*`.
    Multiply,
    /// Exactly one `/`.
    Divide,
    /// Two or more operator characters, same or different.
    Combine,
    /// No operator character at all.
    Other,
}

impl Category {
    /// All categories, in declaration order.
    pub const ALL: [Self; 6] = [
        Self::Addition,
        Self::Subtract,
        Self::Multiply,
        Self::Divide,
        Self::Combine,
        Self::Other,
    ];

    /// The label as stored and serialized.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Addition => "Addition",
            Self::Subtract => "Subtract",
            Self::Multiply => "Multiply",
            Self::Divide => "Divide",
            Self::Combine => "Combine",
            Self::Other => "Other",
        }
    }

    const fn single(op: Operator) -> Self {
        match op {
            Operator::Add => Self::Addition,
            Operator::Subtract => Self::Subtract,
            Operator::Multiply => Self::Multiply,
            Operator::Divide => Self::Divide,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("unknown category '{s}'"))
    }
}

/// Classify an expression by the operator characters it contains.
///
/// Counts raw `+ - * /` characters in one pass, so the minus of a signed
/// literal counts too. Total and never fails: two or more occurrences give
/// [`Category::Combine`], exactly one gives that operator's category, none
/// gives [`Category::Other`].
#[must_use]
pub fn classify(expression: &str) -> Category {
    let mut counts = [0usize; 4];
    for c in expression.chars() {
        if let Some(op) = Operator::from_char(c) {
            counts[op.index()] += 1;
        }
    }

    if counts.iter().sum::<usize>() >= 2 {
        return Category::Combine;
    }

    Operator::ALL
        .into_iter()
        .find(|op| counts[op.index()] > 0)
        .map_or(Category::Other, Category::single)
}
