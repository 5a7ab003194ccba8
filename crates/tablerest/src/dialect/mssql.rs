use super::{Dialect, DialectKind, Paging};

/// SQL Server. The windowed subquery needs a derived-table alias.
#[derive(Debug, Clone, Copy, Default)]
pub struct MsSqlDialect;

impl Dialect for MsSqlDialect {
    fn kind(&self) -> DialectKind {
        DialectKind::MsSql
    }

    fn list_tables_statement(&self) -> &'static str {
        "select * from information_schema.tables where Table_Type = 'BASE TABLE'"
    }

    fn paging(&self) -> Paging {
        Paging::RowNumber {
            derived_alias: Some("paged"),
        }
    }
}
