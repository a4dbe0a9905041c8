//! Query builder utilities
//!
//! This module provides SQL statement construction: filters, ordering,
//! pagination windows, aggregates, inserts and updates.

pub mod aggregation;
pub mod builder;
pub mod filter;
pub mod insert;
pub mod ordering;
pub mod pagination;
pub mod sql_generation;
pub mod statement;
pub mod update;
pub mod value;

#[cfg(test)]
mod tests;

pub use aggregation::{AggregateFunction, SelectField};
pub use builder::QueryBuilder;
pub use filter::{QueryFilter, QueryOperator};
pub use insert::InsertBuilder;
pub use ordering::{ParseSortOrderError, SortOrder};
pub use pagination::Pagination;
pub use statement::Statement;
pub use update::{UpdateOperation, UpdateSet};
pub use value::SqlValue;
