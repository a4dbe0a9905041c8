//! Query builder
//!
//! Collects filters, ordering and a LIMIT/OFFSET window, then renders them
//! into complete statements against a [`TableSpec`].

use crate::query_builder::aggregation::SelectField;
use crate::query_builder::filter::QueryFilter;
use crate::query_builder::ordering::SortOrder;
use crate::query_builder::pagination::Pagination;
use crate::query_builder::sql_generation::SqlGenerator;
use crate::query_builder::statement::Statement;
use crate::query_builder::update::UpdateSet;
use crate::query_builder::value::SqlValue;
use crate::table::TableSpec;
use crate::validation::ValidationError;

/// Query builder for constructing filtered, ordered and paged statements
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryBuilder {
    pub(crate) conditions: Vec<QueryFilter>,
    pub(crate) order_by: Vec<(String, SortOrder)>,
    pub(crate) limit: Option<u64>,
    pub(crate) offset: Option<u64>,
}

impl QueryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a filter condition
    pub fn filter(mut self, filter: QueryFilter) -> Self {
        self.conditions.push(filter);
        self
    }

    /// Add multiple filters (combined with AND)
    pub fn filters(mut self, filters: Vec<QueryFilter>) -> Self {
        self.conditions.extend(filters);
        self
    }

    /// Add ordering
    pub fn order_by(mut self, field: &str, order: SortOrder) -> Self {
        self.order_by.push((field.to_string(), order));
        self
    }

    /// Replace limit and offset with the given window
    pub fn pagination(mut self, pagination: Pagination) -> Self {
        self.limit = pagination.limit;
        self.offset = pagination.offset;
        self
    }

    /// Build WHERE clause
    pub fn build_where_clause(&self) -> Result<(String, Vec<SqlValue>), ValidationError> {
        SqlGenerator::build_where_clause(&self.conditions, 1)
    }

    /// Build ORDER BY clause
    pub fn build_order_clause(&self) -> Result<String, ValidationError> {
        SqlGenerator::build_order_clause(&self.order_by)
    }

    /// Build LIMIT/OFFSET clause
    pub fn build_limit_clause(&self) -> String {
        SqlGenerator::build_limit_clause(self.limit, self.offset)
    }

    /// Build complete query parts (WHERE, ORDER BY, LIMIT, Values)
    pub fn build(&self) -> Result<(String, String, String, Vec<SqlValue>), ValidationError> {
        let (where_clause, values) = self.build_where_clause()?;
        let order_clause = self.build_order_clause()?;
        let limit_clause = self.build_limit_clause();

        Ok((where_clause, order_clause, limit_clause, values))
    }

    /// `SELECT <columns> FROM <table>` with every clause applied
    pub fn select(&self, table: &TableSpec) -> Result<Statement, ValidationError> {
        self.render_select(&table.select_list(), table)
    }

    /// SELECT with an explicit field list, e.g. an aggregate
    pub fn select_fields(
        &self,
        table: &TableSpec,
        fields: &[SelectField],
    ) -> Result<Statement, ValidationError> {
        let select_list = SqlGenerator::build_select_clause(fields)?;
        self.render_select(&select_list, table)
    }

    fn render_select(&self, select_list: &str, table: &TableSpec) -> Result<Statement, ValidationError> {
        let (where_clause, order_clause, limit_clause, values) = self.build()?;
        let select = format!("SELECT {} FROM {}", select_list, table.name());

        Ok(Statement::from_parts(
            &[&select, &where_clause, &order_clause, &limit_clause],
            values,
        ))
    }

    /// `SELECT COUNT(*)` over the filters only; ordering and window are ignored
    pub fn count(&self, table: &TableSpec) -> Result<Statement, ValidationError> {
        let (where_clause, values) = self.build_where_clause()?;
        let count = SqlGenerator::build_select_clause(&[SelectField::count_all()])?;
        let select = format!("SELECT {} FROM {}", count, table.name());

        Ok(Statement::from_parts(&[&select, &where_clause], values))
    }

    /// `UPDATE ... SET ... WHERE ... RETURNING <columns>`
    ///
    /// SET values take the first placeholders, WHERE values follow.
    pub fn update(&self, table: &TableSpec, set: &UpdateSet) -> Result<Statement, ValidationError> {
        if set.is_empty() {
            return Err(ValidationError::NoColumns("UPDATE"));
        }

        let mut values = Vec::new();
        let mut param_counter = 1;
        let set_clause = SqlGenerator::build_set_clause(set, &mut values, &mut param_counter)?;
        let (where_clause, where_values) =
            SqlGenerator::build_where_clause(&self.conditions, param_counter)?;
        values.extend(where_values);

        let update = format!("UPDATE {}", table.name());
        let returning = format!("RETURNING {}", table.select_list());

        Ok(Statement::from_parts(
            &[&update, &set_clause, &where_clause, &returning],
            values,
        ))
    }

    /// `DELETE FROM <table> WHERE ...`
    pub fn delete(&self, table: &TableSpec) -> Result<Statement, ValidationError> {
        let (where_clause, values) = self.build_where_clause()?;
        let delete = format!("DELETE FROM {}", table.name());

        Ok(Statement::from_parts(&[&delete, &where_clause], values))
    }
}
