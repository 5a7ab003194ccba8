use super::{ColumnQualifier, Dialect, DialectKind, MutationStyle, Paging};

/// H2. Reads use bare names; writes are schema-qualified with `table.col`
/// references in SET and WHERE.
#[derive(Debug, Clone, Copy, Default)]
pub struct H2Dialect;

impl Dialect for H2Dialect {
    fn kind(&self) -> DialectKind {
        DialectKind::H2
    }

    fn list_tables_statement(&self) -> &'static str {
        "SELECT TABLE_NAME FROM INFORMATION_SCHEMA.TABLES WHERE table_type = 'TABLE'"
    }

    fn column_qualifier(&self) -> ColumnQualifier {
        ColumnQualifier::Bare
    }

    fn paging(&self) -> Paging {
        Paging::LimitOffset
    }

    fn mutation_style(&self) -> MutationStyle {
        MutationStyle::QualifiedTableColumns
    }

    fn supports_ilike(&self) -> bool {
        true
    }
}
