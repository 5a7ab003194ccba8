use crate::error::{RestError, RestResult};
use crate::ident::{Ident, IntoIdent};
use crate::operator::Operator;

/// A single `column <operator> value(s)` predicate.
///
/// Values are always carried as bound parameters, never interpolated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectCondition {
    column: Ident,
    operator: Operator,
    values: Vec<String>,
}

impl SelectCondition {
    /// Create a condition, checking the operator's arity against `values`.
    ///
    /// Boolean connectors (`AND`/`OR`) are rejected: they join conditions and
    /// can never be a condition's own operator.
    pub fn new<I>(column: I, operator: Operator, values: Vec<String>) -> RestResult<Self>
    where
        I: IntoIdent,
    {
        if operator.is_boolean() {
            return Err(RestError::invalid_request(format!(
                "Invalid operator {operator} for a condition"
            )));
        }
        let expected = operator.value_count();
        if values.len() != expected {
            return Err(RestError::invalid_request(format!(
                "Operator {operator} takes {expected} value(s), got {}",
                values.len()
            )));
        }
        Ok(Self {
            column: column.into_ident()?,
            operator,
            values,
        })
    }

    /// `column = value`
    pub fn eq(column: impl IntoIdent, value: impl Into<String>) -> RestResult<Self> {
        Self::new(column, Operator::Equals, vec![value.into()])
    }

    /// `column BETWEEN from AND to`
    pub fn between(
        column: impl IntoIdent,
        from: impl Into<String>,
        to: impl Into<String>,
    ) -> RestResult<Self> {
        Self::new(column, Operator::Between, vec![from.into(), to.into()])
    }

    /// `column IS NULL`
    pub fn is_null(column: impl IntoIdent) -> RestResult<Self> {
        Self::new(column, Operator::IsNull, Vec::new())
    }

    /// `column IS NOT NULL`
    pub fn is_not_null(column: impl IntoIdent) -> RestResult<Self> {
        Self::new(column, Operator::IsNotNull, Vec::new())
    }

    pub fn column(&self) -> &Ident {
        &self.column
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }
}
