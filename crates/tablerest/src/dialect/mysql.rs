use super::{Dialect, DialectKind, MutationStyle, Paging};

/// MySQL and MariaDB. Pagination is `LIMIT start,count`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MySqlDialect;

impl Dialect for MySqlDialect {
    fn kind(&self) -> DialectKind {
        DialectKind::MySql
    }

    fn list_tables_statement(&self) -> &'static str {
        "SHOW TABLES"
    }

    fn paging(&self) -> Paging {
        Paging::LimitComma
    }

    fn mutation_style(&self) -> MutationStyle {
        MutationStyle::Qualified
    }
}
