//! Convenience re-exports for common store-object usage

// Error types
pub use crate::errors::StoreError;

// Query building
pub use crate::query_builder::{
    InsertBuilder, Pagination, QueryBuilder, QueryFilter, SelectField, SortOrder, SqlValue,
    Statement, UpdateSet,
};

// Tables and identifiers
pub use crate::table::TableSpec;
pub use crate::validation::{ValidatedFieldName, ValidatedTableName, ValidationError};

// Common external dependencies that are frequently used
pub use sqlx::{FromRow, PgPool, Row};
pub use uuid::Uuid;
