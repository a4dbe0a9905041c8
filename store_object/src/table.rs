use crate::validation::{ValidatedFieldName, ValidatedTableName, ValidationError};

/// Validated table name plus the column list used for SELECT and RETURNING
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSpec {
    name: ValidatedTableName,
    columns: Vec<ValidatedFieldName>,
}

impl TableSpec {
    pub fn new(name: &str, columns: &[&str]) -> Result<Self, ValidationError> {
        let name = ValidatedTableName::new(name)?;
        let columns = columns
            .iter()
            .map(|column| ValidatedFieldName::new(column))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { name, columns })
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn columns(&self) -> &[ValidatedFieldName] {
        &self.columns
    }

    /// Comma separated column list, or `*` when no columns were declared
    pub fn select_list(&self) -> String {
        if self.columns.is_empty() {
            return "*".to_string();
        }

        self.columns
            .iter()
            .map(ValidatedFieldName::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}
