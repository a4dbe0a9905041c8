//! SQL text rendering
//!
//! Identifiers are validated on the way in, values are collected in
//! placeholder order on the way out. Nothing caller-supplied is ever
//! formatted into the SQL string except validated identifiers.

use crate::query_builder::aggregation::SelectField;
use crate::query_builder::filter::{QueryFilter, QueryOperator};
use crate::query_builder::ordering::SortOrder;
use crate::query_builder::pagination::Pagination;
use crate::query_builder::update::UpdateSet;
use crate::query_builder::value::SqlValue;
use crate::validation::{ValidatedFieldName, ValidationError};

pub struct SqlGenerator;

impl SqlGenerator {
    /// Build WHERE clause from conditions joined with AND
    ///
    /// Placeholders are numbered from `first_param`, so statements that bind
    /// values before the WHERE clause (UPDATE ... SET) can continue the count.
    pub fn build_where_clause(
        conditions: &[QueryFilter],
        first_param: usize,
    ) -> Result<(String, Vec<SqlValue>), ValidationError> {
        if conditions.is_empty() {
            return Ok((String::new(), Vec::new()));
        }

        let mut values = Vec::new();
        let mut param_counter = first_param;

        let conditions_sql = conditions
            .iter()
            .map(|condition| Self::build_condition_sql(condition, &mut values, &mut param_counter))
            .collect::<Result<Vec<_>, _>>()?
            .join(" AND ");

        Ok((format!("WHERE {}", conditions_sql), values))
    }

    fn build_condition_sql(
        condition: &QueryFilter,
        values: &mut Vec<SqlValue>,
        param_counter: &mut usize,
    ) -> Result<String, ValidationError> {
        let field = ValidatedFieldName::new(&condition.field)?;

        let sql = match (&condition.operator, &condition.value) {
            (QueryOperator::Eq, SqlValue::Null) => format!("{} IS NULL", field),
            // ordering and pattern comparisons against NULL never match
            (_, SqlValue::Null) => "1=0".to_string(),
            (operator, value) => {
                values.push(value.clone());
                let placeholder = format!("${}", param_counter);
                *param_counter += 1;
                format!("{} {} {}", field, operator.to_sql(), placeholder)
            }
        };

        Ok(sql)
    }

    pub fn build_order_clause(order_by: &[(String, SortOrder)]) -> Result<String, ValidationError> {
        if order_by.is_empty() {
            return Ok(String::new());
        }

        let order_items = order_by
            .iter()
            .map(|(field, order)| {
                let field = ValidatedFieldName::new(field)?;
                Ok(format!("{} {}", field, order.to_sql()))
            })
            .collect::<Result<Vec<_>, ValidationError>>()?;

        Ok(format!("ORDER BY {}", order_items.join(", ")))
    }

    pub fn build_limit_clause(limit: Option<u64>, offset: Option<u64>) -> String {
        Pagination { limit, offset }.to_sql()
    }

    pub fn build_select_clause(fields: &[SelectField]) -> Result<String, ValidationError> {
        if fields.is_empty() {
            return Ok("*".to_string());
        }

        let field_parts = fields
            .iter()
            .map(Self::build_select_field)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(field_parts.join(", "))
    }

    fn build_select_field(field: &SelectField) -> Result<String, ValidationError> {
        let argument = match &field.field {
            Some(f) => ValidatedFieldName::new(f)?.to_string(),
            None => "*".to_string(),
        };

        let mut aggregate = format!("{}({})", field.function.to_sql(), argument);
        if field.or_zero {
            aggregate = format!("COALESCE({}, 0)::BIGINT", aggregate);
        }

        Ok(match &field.alias {
            Some(alias) => format!("{} AS {}", aggregate, ValidatedFieldName::new(alias)?),
            None => aggregate,
        })
    }

    /// Build `SET a = $1, b = $2` and collect the bound values in order
    pub fn build_set_clause(
        set: &UpdateSet,
        values: &mut Vec<SqlValue>,
        param_counter: &mut usize,
    ) -> Result<String, ValidationError> {
        let assignments = set
            .operations
            .iter()
            .map(|(field, operation)| {
                let field = ValidatedFieldName::new(field)?;
                let sql = operation.to_sql(field.as_str(), *param_counter);
                if let Some(value) = operation.value() {
                    values.push(value.clone());
                    *param_counter += 1;
                }
                Ok(sql)
            })
            .collect::<Result<Vec<_>, ValidationError>>()?;

        Ok(format!("SET {}", assignments.join(", ")))
    }
}
