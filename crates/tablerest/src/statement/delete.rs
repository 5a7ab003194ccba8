use super::Table;

/// A DELETE of the row identified by its primary-key value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delete {
    table: Table,
    id: Option<String>,
}

impl Delete {
    pub fn new(table: Table, id: impl Into<String>) -> Self {
        Self {
            table,
            id: Some(id.into()),
        }
    }

    /// A delete with no target row; rendering it fails.
    pub fn without_id(table: Table) -> Self {
        Self { table, id: None }
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    /// The primary-key value, if present and not blank.
    pub fn id_value(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.trim().is_empty())
    }
}
