use thiserror::Error;

use crate::validation::ValidationError;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Invalid identifier: {0}")]
    Validation(#[from] ValidationError),

    #[error("Not found: {table} with id {id}")]
    NotFound { table: String, id: String },

    #[error("Database error on {table} during {operation}: {source}")]
    Database {
        table: String,
        operation: String,
        #[source]
        source: sqlx::Error,
    },

    #[error("{operation}: expected {expected} affected rows, got {actual}")]
    UnexpectedRows {
        operation: String,
        expected: u64,
        actual: u64,
    },
}

impl StoreError {
    /// Wrap a driver error with the table and operation it happened in
    pub fn database_operation(table: &str, operation: &str, source: sqlx::Error) -> Self {
        Self::Database {
            table: table.to_string(),
            operation: operation.to_string(),
            source,
        }
    }

    pub fn not_found(table: &str, id: impl ToString) -> Self {
        Self::NotFound {
            table: table.to_string(),
            id: id.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
