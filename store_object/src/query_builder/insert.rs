use crate::query_builder::statement::Statement;
use crate::query_builder::value::SqlValue;
use crate::table::TableSpec;
use crate::validation::{ValidatedFieldName, ValidationError};

/// INSERT ... RETURNING builder; column order is insertion order
#[derive(Debug, Clone, Default)]
pub struct InsertBuilder {
    values: Vec<(String, SqlValue)>,
}

impl InsertBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(mut self, field: impl Into<String>, value: impl Into<SqlValue>) -> Self {
        self.values.push((field.into(), value.into()));
        self
    }

    pub fn build(&self, table: &TableSpec) -> Result<Statement, ValidationError> {
        if self.values.is_empty() {
            return Err(ValidationError::NoColumns("INSERT"));
        }

        let mut columns = Vec::with_capacity(self.values.len());
        let mut placeholders = Vec::with_capacity(self.values.len());
        let mut values = Vec::with_capacity(self.values.len());

        for (field, value) in &self.values {
            columns.push(ValidatedFieldName::new(field)?.to_string());
            match value {
                SqlValue::Null => placeholders.push("NULL".to_string()),
                value => {
                    values.push(value.clone());
                    placeholders.push(format!("${}", values.len()));
                }
            }
        }

        let insert = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            table.name(),
            columns.join(", "),
            placeholders.join(", ")
        );
        let returning = format!("RETURNING {}", table.select_list());

        Ok(Statement::from_parts(&[&insert, &returning], values))
    }
}
