//! WHERE clause building blocks

use crate::query_builder::value::SqlValue;

/// Comparison operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryOperator {
    Eq,   // =
    Gte,  // >=
    Lte,  // <=
    Like, // LIKE
}

impl QueryOperator {
    pub fn to_sql(&self) -> &'static str {
        match self {
            QueryOperator::Eq => "=",
            QueryOperator::Gte => ">=",
            QueryOperator::Lte => "<=",
            QueryOperator::Like => "LIKE",
        }
    }
}

/// Single `field <op> value` condition; conditions are joined with AND
#[derive(Debug, Clone, PartialEq)]
pub struct QueryFilter {
    pub field: String,
    pub operator: QueryOperator,
    pub value: SqlValue,
}

impl QueryFilter {
    pub fn new(field: &str, operator: QueryOperator, value: impl Into<SqlValue>) -> Self {
        Self {
            field: field.to_string(),
            operator,
            value: value.into(),
        }
    }

    pub fn eq(field: &str, value: impl Into<SqlValue>) -> Self {
        Self::new(field, QueryOperator::Eq, value)
    }

    pub fn gte(field: &str, value: impl Into<SqlValue>) -> Self {
        Self::new(field, QueryOperator::Gte, value)
    }

    pub fn lte(field: &str, value: impl Into<SqlValue>) -> Self {
        Self::new(field, QueryOperator::Lte, value)
    }

    /// LIKE condition; the pattern is bound as-is, wildcards included
    pub fn like(field: &str, pattern: &str) -> Self {
        Self::new(field, QueryOperator::Like, pattern)
    }
}
