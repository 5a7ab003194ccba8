use super::{SelectCondition, Table};
use crate::error::RestResult;
use crate::ident::{Ident, IntoIdent};
use crate::params::{LimitParam, OrderParam};

/// A SELECT over a single table.
///
/// Conditions are joined with `AND` in insertion order; the REST read path adds
/// at most one, the dynamic finder adds one per decoded clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Select {
    table: Table,
    conditions: Vec<SelectCondition>,
    columns: Vec<Ident>,
    limit: Option<LimitParam>,
    order: Option<OrderParam>,
}

impl Select {
    pub fn new(table: Table) -> Self {
        Self {
            table,
            conditions: Vec::new(),
            columns: Vec::new(),
            limit: None,
            order: None,
        }
    }

    /// Project only the given columns (empty = `*`).
    pub fn columns<I, C>(mut self, columns: I) -> RestResult<Self>
    where
        I: IntoIterator<Item = C>,
        C: IntoIdent,
    {
        for col in columns {
            self.columns.push(col.into_ident()?);
        }
        Ok(self)
    }

    /// Append a condition (joined to the previous ones with `AND`).
    pub fn and(mut self, condition: SelectCondition) -> Self {
        self.conditions.push(condition);
        self
    }

    pub fn limit(mut self, limit: LimitParam) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn order(mut self, order: OrderParam) -> Self {
        self.order = Some(order);
        self
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn conditions(&self) -> &[SelectCondition] {
        &self.conditions
    }

    pub fn projected_columns(&self) -> &[Ident] {
        &self.columns
    }

    pub fn limit_param(&self) -> Option<&LimitParam> {
        self.limit.as_ref()
    }

    pub fn order_param(&self) -> Option<&OrderParam> {
        self.order.as_ref()
    }

    /// No column list was requested.
    pub fn is_all_columns(&self) -> bool {
        self.columns.is_empty()
    }

    /// No condition restricts the rows.
    pub fn is_all_records(&self) -> bool {
        self.conditions.is_empty()
    }
}
