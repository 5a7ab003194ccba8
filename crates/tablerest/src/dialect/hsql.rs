use super::{ColumnQualifier, Dialect, DialectKind, Paging};

#[derive(Debug, Clone, Copy, Default)]
pub struct HsqlDialect;

impl Dialect for HsqlDialect {
    fn kind(&self) -> DialectKind {
        DialectKind::Hsql
    }

    fn list_tables_statement(&self) -> &'static str {
        "SELECT * FROM INFORMATION_SCHEMA.SYSTEM_TABLES WHERE table_type = 'TABLE'"
    }

    fn column_qualifier(&self) -> ColumnQualifier {
        ColumnQualifier::Bare
    }

    fn paging(&self) -> Paging {
        Paging::LimitOffset
    }
}
