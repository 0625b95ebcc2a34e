//! `CalculationRepository` implementation for `SqliteStorage`.

#![allow(clippy::missing_errors_doc)]

use async_trait::async_trait;

use crate::error::StorageError;
use crate::traits::CalculationRepository;

use super::core::SqliteStorage;
use super::types::{Calculation, NewCalculation};

#[async_trait]
impl CalculationRepository for SqliteStorage {
    async fn get_all(&self) -> Result<Vec<Calculation>, StorageError> {
        self.list_calculations().await
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Calculation>, StorageError> {
        self.get_calculation(id).await
    }

    async fn search(&self, predicate: &str) -> Result<Vec<Calculation>, StorageError> {
        self.search_calculations(predicate).await
    }

    async fn create(&self, calculation: NewCalculation) -> Result<Calculation, StorageError> {
        self.insert_calculation(calculation).await
    }

    async fn update(&self, calculation: Calculation) -> Result<Calculation, StorageError> {
        self.update_calculation(calculation).await
    }

    async fn delete(&self, id: i64) -> Result<(), StorageError> {
        self.delete_calculation(id).await
    }
}
