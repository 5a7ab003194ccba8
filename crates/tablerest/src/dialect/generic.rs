use super::{Dialect, DialectKind};

/// ANSI-ish fallback: `t.` qualified columns and `ROW_NUMBER()` pagination.
#[derive(Debug, Clone, Copy, Default)]
pub struct GenericDialect;

impl Dialect for GenericDialect {
    fn kind(&self) -> DialectKind {
        DialectKind::Generic
    }
}
