use super::{Dialect, DialectKind, MutationStyle, Paging};

/// PostgreSQL: `LIMIT n OFFSET s` and native `ILIKE`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PostgreSqlDialect;

impl Dialect for PostgreSqlDialect {
    fn kind(&self) -> DialectKind {
        DialectKind::PostgreSql
    }

    fn list_tables_statement(&self) -> &'static str {
        "SELECT * FROM information_schema.tables WHERE table_schema = 'public'"
    }

    fn paging(&self) -> Paging {
        Paging::LimitOffset
    }

    fn mutation_style(&self) -> MutationStyle {
        MutationStyle::Qualified
    }

    fn supports_ilike(&self) -> bool {
        true
    }
}
