use crate::query_builder::value::SqlValue;

/// Right-hand side of a SET assignment
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateOperation {
    /// field = $N
    Set(SqlValue),
    /// field = NOW()
    Now,
}

impl UpdateOperation {
    /// SQL for this assignment; `param_number` is only consumed when `value()` is `Some`
    pub fn to_sql(&self, field_name: &str, param_number: usize) -> String {
        match self {
            UpdateOperation::Set(SqlValue::Null) => format!("{} = NULL", field_name),
            UpdateOperation::Set(_) => format!("{} = ${}", field_name, param_number),
            UpdateOperation::Now => format!("{} = NOW()", field_name),
        }
    }

    /// Value to bind; NULL is written inline so the column type decides
    pub fn value(&self) -> Option<&SqlValue> {
        match self {
            UpdateOperation::Set(SqlValue::Null) | UpdateOperation::Now => None,
            UpdateOperation::Set(v) => Some(v),
        }
    }
}

/// Ordered list of SET assignments; insertion order is the parameter order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateSet {
    pub operations: Vec<(String, UpdateOperation)>,
}

impl UpdateSet {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(mut self, field: impl Into<String>, operation: UpdateOperation) -> Self {
        let field = field.into();
        self.operations.retain(|(existing, _)| *existing != field);
        self.operations.push((field, operation));
        self
    }

    /// Set a field to a specific value; a later call for the same field wins
    pub fn set(self, field: impl Into<String>, value: impl Into<SqlValue>) -> Self {
        self.push(field, UpdateOperation::Set(value.into()))
    }

    /// Set a field only when a value is present
    pub fn set_some<V: Into<SqlValue>>(self, field: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(value) => self.set(field, value),
            None => self,
        }
    }

    pub fn touch(self, field: impl Into<String>) -> Self {
        self.push(field, UpdateOperation::Now)
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}
