use super::{ColumnQualifier, Dialect, DialectKind, MutationStyle};

/// Oracle. No table alias: columns are qualified with the table name, and
/// pagination always goes through the `ROW_NUMBER()` window.
#[derive(Debug, Clone, Copy, Default)]
pub struct OracleDialect;

impl Dialect for OracleDialect {
    fn kind(&self) -> DialectKind {
        DialectKind::Oracle
    }

    fn list_tables_statement(&self) -> &'static str {
        "SELECT TABLE_NAME FROM ALL_ALL_TABLES"
    }

    fn column_qualifier(&self) -> ColumnQualifier {
        ColumnQualifier::TableName
    }

    fn mutation_style(&self) -> MutationStyle {
        MutationStyle::QualifiedTableColumns
    }
}
