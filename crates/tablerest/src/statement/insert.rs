use super::Table;
use crate::error::RestResult;
use crate::ident::{Ident, IntoIdent};

/// Ordered `column -> value` pairs.
///
/// Setting a column twice replaces its value but keeps its first position, so
/// placeholder order stays deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnValues {
    entries: Vec<(Ident, String)>,
}

impl ColumnValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, column: impl IntoIdent, value: impl Into<String>) -> RestResult<()> {
        let column = column.into_ident()?;
        let value = value.into();
        match self.entries.iter_mut().find(|(c, _)| *c == column) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((column, value)),
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn columns(&self) -> impl Iterator<Item = &Ident> {
        self.entries.iter().map(|(c, _)| c)
    }

    pub fn values(&self) -> impl Iterator<Item = &String> {
        self.entries.iter().map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Ident, &String)> {
        self.entries.iter().map(|(c, v)| (c, v))
    }
}

/// An INSERT of one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Insert {
    table: Table,
    values: ColumnValues,
}

impl Insert {
    pub fn new(table: Table) -> Self {
        Self {
            table,
            values: ColumnValues::new(),
        }
    }

    /// Build from ordered pairs (e.g. a decoded request body).
    pub fn from_pairs<I, C, V>(table: Table, pairs: I) -> RestResult<Self>
    where
        I: IntoIterator<Item = (C, V)>,
        C: IntoIdent,
        V: Into<String>,
    {
        let mut insert = Self::new(table);
        for (c, v) in pairs {
            insert.values.set(c, v)?;
        }
        Ok(insert)
    }

    pub fn set(mut self, column: impl IntoIdent, value: impl Into<String>) -> RestResult<Self> {
        self.values.set(column, value)?;
        Ok(self)
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn values(&self) -> &ColumnValues {
        &self.values
    }
}
