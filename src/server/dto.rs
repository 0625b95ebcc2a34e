//! REST DTOs for the calculations API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::evaluator::Category;
use crate::storage::Calculation;

/// Request to evaluate and record an expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateCalculationRequest {
    /// Expression to evaluate, e.g. `"2 + 3 * 4"`.
    pub expression: String,
}

/// A calculation as exchanged over HTTP.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationModel {
    /// Calculation ID.
    pub id: i64,
    /// Operator category label.
    #[serde(rename = "type")]
    pub kind: Category,
    /// Expression as submitted.
    pub expression: String,
    /// Creation timestamp.
    pub create_date: DateTime<Utc>,
    /// Result; non-finite values travel as `"Infinity"`, `"-Infinity"` or `"NaN"`.
    #[serde(with = "non_finite")]
    pub result: f64,
}

impl From<Calculation> for CalculationModel {
    fn from(c: Calculation) -> Self {
        Self {
            id: c.id,
            kind: c.kind,
            expression: c.expression,
            create_date: c.create_date,
            result: c.result,
        }
    }
}

impl From<CalculationModel> for Calculation {
    fn from(m: CalculationModel) -> Self {
        Self {
            id: m.id,
            kind: m.kind,
            expression: m.expression,
            create_date: m.create_date,
            result: m.result,
        }
    }
}

/// JSON has no infinity or NaN, so those are written as strings.
mod non_finite {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    const INFINITY: &str = "Infinity";
    const NEG_INFINITY: &str = "-Infinity";
    const NAN: &str = "NaN";

    #[allow(clippy::trivially_copy_pass_by_ref)]
    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_finite() {
            serializer.serialize_f64(*value)
        } else if value.is_nan() {
            serializer.serialize_str(NAN)
        } else if value.is_sign_positive() {
            serializer.serialize_str(INFINITY)
        } else {
            serializer.serialize_str(NEG_INFINITY)
        }
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Number(f64),
        Text(String),
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        match Repr::deserialize(deserializer)? {
            Repr::Number(n) => Ok(n),
            Repr::Text(text) => match text.as_str() {
                INFINITY => Ok(f64::INFINITY),
                NEG_INFINITY => Ok(f64::NEG_INFINITY),
                NAN => Ok(f64::NAN),
                other => Err(D::Error::custom(format!(
                    "expected a number, \"Infinity\", \"-Infinity\" or \"NaN\", got \"{other}\""
                ))),
            },
        }
    }
}
