//! Test utilities and mock factories.
//!
//! This module provides shared testing infrastructure:
//! - Fixed clocks
//! - Calculation fixtures
//! - Service builders over mock repositories
//!
//! Only compiled for tests (`#[cfg(test)]`).

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};

use crate::evaluator::{Calculator, Category};
use crate::service::CalculationService;
use crate::storage::Calculation;
use crate::traits::{MockCalculationRepository, MockTimeProvider};

/// The instant every [`fixed_clock`] reports.
#[must_use]
pub fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap()
}

/// A mock clock frozen at [`fixed_time`].
#[must_use]
pub fn fixed_clock() -> MockTimeProvider {
    let mut mock = MockTimeProvider::new();
    mock.expect_now().returning(fixed_time);
    mock
}

/// A stored `3+5` calculation with the given ID.
#[must_use]
pub fn sample_calculation(id: i64) -> Calculation {
    Calculation {
        id,
        kind: Category::Addition,
        expression: "3+5".to_string(),
        create_date: fixed_time(),
        result: 8.0,
    }
}

/// A service over `repo` with the real evaluator and a fixed clock.
#[must_use]
pub fn service_with(repo: MockCalculationRepository) -> Arc<CalculationService> {
    Arc::new(CalculationService::new(
        Arc::new(Calculator::new()),
        Arc::new(repo),
        Arc::new(fixed_clock()),
        100,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::TimeProvider;

    #[test]
    fn test_fixed_clock_reports_fixed_time() {
        assert_eq!(fixed_clock().now(), fixed_time());
    }

    #[test]
    fn test_sample_calculation() {
        let calc = sample_calculation(3);
        assert_eq!(calc.id, 3);
        assert_eq!(calc.kind, Category::Addition);
    }
}
