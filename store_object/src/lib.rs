//! Store Object - SQL statement layer for the subscription service
//!
//! This crate provides validated identifiers, a parameterised query builder
//! and the error type shared by the repositories built on top of it.

pub mod errors;
pub mod prelude;
pub mod query_builder;
pub mod table;
pub mod validation;

pub use errors::StoreError;
pub use query_builder::{
    InsertBuilder, Pagination, QueryBuilder, QueryFilter, QueryOperator, SelectField, SortOrder,
    SqlValue, Statement, UpdateSet,
};
pub use table::TableSpec;
pub use validation::{ValidatedFieldName, ValidatedTableName, ValidationError};

