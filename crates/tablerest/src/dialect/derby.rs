use super::{Dialect, DialectKind, MutationStyle, Paging};

/// Apache Derby: SQL:2008 `OFFSET .. ROWS FETCH NEXT .. ROWS ONLY`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DerbyDialect;

impl Dialect for DerbyDialect {
    fn kind(&self) -> DialectKind {
        DialectKind::Derby
    }

    fn list_tables_statement(&self) -> &'static str {
        "SELECT * FROM SYS.SYSTABLES WHERE tabletype = 'T'"
    }

    fn paging(&self) -> Paging {
        Paging::OffsetFetch
    }

    fn mutation_style(&self) -> MutationStyle {
        MutationStyle::Qualified
    }
}
