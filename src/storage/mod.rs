//! Storage backend.
//!
//! This module provides:
//! - `SQLite` database implementation
//! - Calculation CRUD and search operations
//!
//! # Architecture
//!
//! The storage layer uses `SQLite` with the `sqlx` crate for async operations.
//!
//! The implementation is split across submodules:
//! - `core`: Pool management, migrations, and helper functions
//! - `calculation`: Calculation CRUD and search
//! - `trait_impl`: `CalculationRepository` implementation
//!
//! # Example
//!
//! ```ignore
//! use calc_history::storage::SqliteStorage;
//!
//! let storage = SqliteStorage::new("./data/calculations.db").await?;
//! let history = storage.list_calculations().await?;
//! ```

mod calculation;
mod core;
mod trait_impl;
mod types;

pub use self::core::SqliteStorage;
pub use types::{Calculation, NewCalculation};
