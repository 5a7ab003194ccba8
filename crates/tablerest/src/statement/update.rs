use super::{ColumnValues, Table};
use crate::error::RestResult;
use crate::ident::IntoIdent;

/// An UPDATE of the row identified by its primary-key value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Update {
    table: Table,
    id: Option<String>,
    values: ColumnValues,
}

impl Update {
    pub fn new(table: Table, id: impl Into<String>) -> Self {
        Self {
            table,
            id: Some(id.into()),
            values: ColumnValues::new(),
        }
    }

    /// An update with no target row yet; rendering it fails until
    /// [`Update::id`] is set.
    pub fn without_id(table: Table) -> Self {
        Self {
            table,
            id: None,
            values: ColumnValues::new(),
        }
    }

    pub fn from_pairs<I, C, V>(table: Table, id: impl Into<String>, pairs: I) -> RestResult<Self>
    where
        I: IntoIterator<Item = (C, V)>,
        C: IntoIdent,
        V: Into<String>,
    {
        let mut update = Self::new(table, id);
        for (c, v) in pairs {
            update.values.set(c, v)?;
        }
        Ok(update)
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn set(mut self, column: impl IntoIdent, value: impl Into<String>) -> RestResult<Self> {
        self.values.set(column, value)?;
        Ok(self)
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    /// The primary-key value, if present and not blank.
    pub fn id_value(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.trim().is_empty())
    }

    pub fn values(&self) -> &ColumnValues {
        &self.values
    }
}
