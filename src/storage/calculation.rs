//! Calculation storage operations.

#![allow(clippy::missing_errors_doc)]

use crate::error::StorageError;
use crate::evaluator::Category;
use chrono::SubsecRound;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use tracing::debug;

use super::core::SqliteStorage;
use super::types::{Calculation, NewCalculation};

const SELECT_COLUMNS: &str = "SELECT id, type, expression, create_date, result FROM calculations";

impl SqliteStorage {
    /// Insert a calculation and return it with its assigned ID.
    ///
    /// The returned creation date is truncated to the stored microsecond precision.
    pub async fn insert_calculation(
        &self,
        mut calculation: NewCalculation,
    ) -> Result<Calculation, StorageError> {
        calculation.create_date = calculation.create_date.trunc_subsecs(6);

        let result = sqlx::query(
            "INSERT INTO calculations (type, expression, create_date, result) VALUES (?, ?, ?, ?)",
        )
        .bind(calculation.kind.as_str())
        .bind(&calculation.expression)
        .bind(Self::format_datetime(&calculation.create_date))
        .bind(calculation.result)
        .execute(&self.pool)
        .await
        .map_err(|e| Self::query_error("INSERT calculations", format!("{e}")))?;

        let id = result.last_insert_rowid();
        debug!(id, "inserted calculation");
        Ok(calculation.with_id(id))
    }

    /// Get a calculation by ID.
    pub async fn get_calculation(&self, id: i64) -> Result<Option<Calculation>, StorageError> {
        let row = sqlx::query(&format!("{SELECT_COLUMNS} WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| Self::query_error("SELECT calculations", format!("{e}")))?;

        row.as_ref().map(Self::row_to_calculation).transpose()
    }

    /// Get all calculations, newest first.
    pub async fn list_calculations(&self) -> Result<Vec<Calculation>, StorageError> {
        let rows = sqlx::query(&format!(
            "{SELECT_COLUMNS} ORDER BY create_date DESC, id DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| Self::query_error("SELECT calculations", format!("{e}")))?;

        rows.iter().map(Self::row_to_calculation).collect()
    }

    /// Find calculations where any of type, id, expression or creation date
    /// contains `predicate` (case-sensitive), newest first.
    pub async fn search_calculations(
        &self,
        predicate: &str,
    ) -> Result<Vec<Calculation>, StorageError> {
        let rows = sqlx::query(&format!(
            "{SELECT_COLUMNS} WHERE instr(type, ?1) > 0 \
             OR instr(CAST(id AS TEXT), ?1) > 0 \
             OR instr(expression, ?1) > 0 \
             OR instr(create_date, ?1) > 0 \
             ORDER BY create_date DESC, id DESC"
        ))
        .bind(predicate)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| Self::query_error("SEARCH calculations", format!("{e}")))?;

        rows.iter().map(Self::row_to_calculation).collect()
    }

    /// Overwrite every column of an existing calculation.
    ///
    /// Returns the calculation as stored, with its creation date truncated to
    /// microseconds.
    pub async fn update_calculation(
        &self,
        mut calculation: Calculation,
    ) -> Result<Calculation, StorageError> {
        calculation.create_date = calculation.create_date.trunc_subsecs(6);

        let result = sqlx::query(
            "UPDATE calculations SET type = ?, expression = ?, create_date = ?, result = ? WHERE id = ?",
        )
        .bind(calculation.kind.as_str())
        .bind(&calculation.expression)
        .bind(Self::format_datetime(&calculation.create_date))
        .bind(calculation.result)
        .bind(calculation.id)
        .execute(&self.pool)
        .await
        .map_err(|e| Self::query_error("UPDATE calculations", format!("{e}")))?;

        if result.rows_affected() == 0 {
            return Err(StorageError::CalculationNotFound { id: calculation.id });
        }

        debug!(id = calculation.id, "updated calculation");
        Ok(calculation)
    }

    /// Delete a calculation.
    pub async fn delete_calculation(&self, id: i64) -> Result<(), StorageError> {
        let result = sqlx::query("DELETE FROM calculations WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| Self::query_error("DELETE calculations", format!("{e}")))?;

        if result.rows_affected() == 0 {
            return Err(StorageError::CalculationNotFound { id });
        }

        Ok(())
    }

    fn row_to_calculation(row: &SqliteRow) -> Result<Calculation, StorageError> {
        let id: i64 = row.get("id");
        let kind_str: String = row.get("type");
        let expression: String = row.get("expression");
        let create_date_str: String = row.get("create_date");
        // SQLite stores NaN as NULL.
        let result: Option<f64> = row.get("result");

        let kind = kind_str
            .parse::<Category>()
            .map_err(|message| StorageError::Internal { message })?;

        Ok(Calculation {
            id,
            kind,
            expression,
            create_date: Self::parse_datetime(&create_date_str)?,
            result: result.unwrap_or(f64::NAN),
        })
    }
}
