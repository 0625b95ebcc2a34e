//! Calculation History Service
//!
//! An HTTP service that evaluates arithmetic expressions, classifies their
//! operators, and keeps a searchable history of every calculation.
//!
//! # Features
//!
//! - Left-to-right chained evaluation of `+ - * /` expressions (no precedence)
//! - Operator category labels (`Addition`, `Subtract`, `Multiply`, `Divide`,
//!   `Combine`, `Other`)
//! - `SQLite` persistence with history, lookup, search, update and delete
//! - JSON REST API with problem-details errors
//!
//! # Quick Start
//!
//! ```bash
//! BIND_ADDRESS=127.0.0.1:8080 ./calc-history
//! curl -X POST localhost:8080/calculations -H 'content-type: application/json' \
//!      -d '{"expression": "2 + 3 * 4"}'
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌────────┐   HTTP   ┌────────────┐   ┌────────────────────┐   ┌───────────┐
//! │ Client │─────────▶│   server   │──▶│ CalculationService │──▶│ evaluator │
//! └────────┘◀─────────│   (axum)   │   └─────────┬──────────┘   └───────────┘
//!                     └────────────┘             │
//!                                                ▼
//!                                             SQLite
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod evaluator;
pub mod server;
pub mod service;
pub mod storage;
pub mod traits;

#[cfg(test)]
mod test_utils;
