/// Represents SQL aggregate functions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregateFunction {
    /// COUNT(*)
    Count,
    /// SUM(field)
    Sum,
}

impl AggregateFunction {
    pub fn to_sql(&self) -> &'static str {
        match self {
            AggregateFunction::Count => "COUNT",
            AggregateFunction::Sum => "SUM",
        }
    }
}

/// Aggregate in a SELECT list, optionally wrapped as COALESCE(..., 0)::BIGINT
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectField {
    pub function: AggregateFunction,
    pub field: Option<String>, // None for COUNT(*)
    pub alias: Option<String>,
    pub or_zero: bool,
}

impl SelectField {
    fn aggregate(function: AggregateFunction, field: Option<String>) -> Self {
        Self {
            function,
            field,
            alias: None,
            or_zero: false,
        }
    }

    pub fn count_all() -> Self {
        Self::aggregate(AggregateFunction::Count, None)
    }

    pub fn sum(field: impl Into<String>) -> Self {
        Self::aggregate(AggregateFunction::Sum, Some(field.into()))
    }

    /// Replace a NULL aggregate over an empty set with 0, as a BIGINT
    pub fn or_zero(mut self) -> Self {
        self.or_zero = true;
        self
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }
}
