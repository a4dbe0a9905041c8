//! Rendered statements and their sqlx bindings

use sqlx::postgres::{PgArguments, PgRow};
use sqlx::query::{Query, QueryAs, QueryScalar};
use sqlx::{FromRow, Postgres};

use crate::query_builder::value::SqlValue;

/// Bind a `SqlValue` onto any sqlx query type
macro_rules! bind_value {
    ($query:expr, $value:expr) => {
        match $value {
            SqlValue::Text(s) => $query.bind(s),
            SqlValue::BigInt(i) => $query.bind(i),
            SqlValue::Uuid(uuid) => $query.bind(uuid),
            SqlValue::Date(date) => $query.bind(date),
            SqlValue::Timestamp(ts) => $query.bind(ts),
            SqlValue::Null => $query.bind(Option::<String>::None),
        }
    };
}

/// SQL text with its positional values, `values[0]` binds to `$1`
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub sql: String,
    pub values: Vec<SqlValue>,
}

impl Statement {
    pub fn new(sql: impl Into<String>, values: Vec<SqlValue>) -> Self {
        Self {
            sql: sql.into(),
            values,
        }
    }

    /// Join non-empty clauses with single spaces
    pub(crate) fn from_parts(parts: &[&str], values: Vec<SqlValue>) -> Self {
        let sql = parts
            .iter()
            .filter(|part| !part.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(" ");

        #[cfg(feature = "debug-logging")]
        tracing::trace!(sql = %sql, params = values.len(), "rendered statement");

        Self { sql, values }
    }

    pub fn query(&self) -> Query<'_, Postgres, PgArguments> {
        let mut query = sqlx::query(&self.sql);
        for value in self.values.iter().cloned() {
            query = bind_value!(query, value);
        }
        query
    }

    pub fn query_as<T>(&self) -> QueryAs<'_, Postgres, T, PgArguments>
    where
        T: for<'r> FromRow<'r, PgRow>,
    {
        let mut query = sqlx::query_as::<_, T>(&self.sql);
        for value in self.values.iter().cloned() {
            query = bind_value!(query, value);
        }
        query
    }

    pub fn query_scalar<O>(&self) -> QueryScalar<'_, Postgres, O, PgArguments>
    where
        (O,): for<'r> FromRow<'r, PgRow>,
    {
        let mut query = sqlx::query_scalar::<_, O>(&self.sql);
        for value in self.values.iter().cloned() {
            query = bind_value!(query, value);
        }
        query
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_parts_skips_empty_clauses() {
        let statement = Statement::from_parts(
            &["SELECT * FROM subscription", "", "ORDER BY id ASC", ""],
            Vec::new(),
        );
        assert_eq!(statement.sql, "SELECT * FROM subscription ORDER BY id ASC");
    }

    #[test]
    fn test_values_are_kept_in_order() {
        let statement = Statement::new(
            "SELECT * FROM subscription WHERE id = $1 AND price = $2",
            vec![SqlValue::BigInt(1), SqlValue::BigInt(100)],
        );
        assert_eq!(statement.values[0], SqlValue::BigInt(1));
        assert_eq!(statement.values[1], SqlValue::BigInt(100));
    }
}
