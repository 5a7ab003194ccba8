//! Dialect engine: renders statements into vendor-correct SQL.
//!
//! Every [`Dialect`] renders `?` positional placeholders and returns a
//! [`Statement`] whose parameters are in placeholder order. The provided trait
//! methods implement the canonical rendering; each RDBMS family overrides only
//! the hooks where it differs (column qualification, pagination idiom, `ILIKE`
//! support, mutation targets and the list-tables query). Stored-procedure calls
//! use the same escape syntax everywhere.
//!
//! ```rust
//! use tablerest::{DialectKind, LimitParam, Select, Table, dialect_for};
//!
//! let select = Select::new(Table::new("users")?).limit(LimitParam::new(10, 20));
//! let stmt = dialect_for(DialectKind::PostgreSql).render_select(&select)?;
//! assert_eq!(stmt.sql, "SELECT t.* FROM users t LIMIT 10 OFFSET 20");
//! # Ok::<(), tablerest::RestError>(())
//! ```

mod derby;
mod generic;
mod h2;
mod hsql;
mod mssql;
mod mysql;
mod oracle;
mod postgres;
mod writer;

#[cfg(test)]
mod tests;

pub use derby::DerbyDialect;
pub use generic::GenericDialect;
pub use h2::H2Dialect;
pub use hsql::HsqlDialect;
pub use mssql::MsSqlDialect;
pub use mysql::MySqlDialect;
pub use oracle::OracleDialect;
pub use postgres::PostgreSqlDialect;

use crate::error::{RestError, RestResult};
use crate::finder::DynamicFinder;
use crate::ident::Ident;
use crate::operator::Operator;
use crate::params::{LimitParam, OrderParam, SortDir};
use crate::statement::{Call, Delete, Insert, Select, SelectCondition, Table, Update};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use writer::SqlWriter;

/// A rendered statement: SQL text plus its parameters in placeholder order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Statement {
    pub sql: String,
    pub params: Vec<String>,
}

impl Statement {
    /// A statement without parameters.
    pub fn raw(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            params: Vec::new(),
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sql)
    }
}

/// RDBMS family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DialectKind {
    Generic,
    PostgreSql,
    MySql,
    Oracle,
    MsSql,
    Hsql,
    H2,
    Derby,
}

impl DialectKind {
    pub const ALL: [DialectKind; 8] = [
        DialectKind::Generic,
        DialectKind::PostgreSql,
        DialectKind::MySql,
        DialectKind::Oracle,
        DialectKind::MsSql,
        DialectKind::Hsql,
        DialectKind::H2,
        DialectKind::Derby,
    ];

    /// Resolve a configured driver tag (case-insensitive).
    pub fn from_driver_tag(tag: &str) -> RestResult<Self> {
        let kind = match tag.trim().to_ascii_lowercase().as_str() {
            "generic" | "ansi" => DialectKind::Generic,
            "postgresql" | "postgres" => DialectKind::PostgreSql,
            "mysql" | "mariadb" => DialectKind::MySql,
            "oracle" => DialectKind::Oracle,
            "mssql" | "mssql_jtds" | "sqlserver" => DialectKind::MsSql,
            "hsqldb" | "hsqldb_mem" | "hsqldb_file" => DialectKind::Hsql,
            "h2" | "h2_mem" | "h2_file" | "h2_remote" => DialectKind::H2,
            "derby" | "derby_mem" => DialectKind::Derby,
            other => {
                return Err(RestError::invalid_configuration(format!(
                    "Unknown driver '{other}'"
                )));
            }
        };
        Ok(kind)
    }

    pub const fn name(self) -> &'static str {
        match self {
            DialectKind::Generic => "generic",
            DialectKind::PostgreSql => "postgresql",
            DialectKind::MySql => "mysql",
            DialectKind::Oracle => "oracle",
            DialectKind::MsSql => "mssql",
            DialectKind::Hsql => "hsqldb",
            DialectKind::H2 => "h2",
            DialectKind::Derby => "derby",
        }
    }
}

impl fmt::Display for DialectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DialectKind {
    type Err = RestError;

    fn from_str(s: &str) -> RestResult<Self> {
        Self::from_driver_tag(s)
    }
}

/// The stateless implementation for `kind`.
pub fn dialect_for(kind: DialectKind) -> &'static dyn Dialect {
    match kind {
        DialectKind::Generic => &GenericDialect,
        DialectKind::PostgreSql => &PostgreSqlDialect,
        DialectKind::MySql => &MySqlDialect,
        DialectKind::Oracle => &OracleDialect,
        DialectKind::MsSql => &MsSqlDialect,
        DialectKind::Hsql => &HsqlDialect,
        DialectKind::H2 => &H2Dialect,
        DialectKind::Derby => &DerbyDialect,
    }
}

/// How column references inside a SELECT are qualified. Also decides the
/// FROM clause: `schema.table t`, `schema.table` or bare `table`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnQualifier {
    /// `t.col` over `FROM schema.table t`
    Alias,
    /// `table.col` over `FROM schema.table`
    TableName,
    /// `col` over `FROM table`
    Bare,
}

/// Pagination idiom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Paging {
    /// `LIMIT n OFFSET s`
    LimitOffset,
    /// `LIMIT s,n`
    LimitComma,
    /// `OFFSET s ROWS FETCH NEXT n ROWS ONLY`
    OffsetFetch,
    /// `ROW_NUMBER()` window wrapped in an outer query, optionally with a
    /// derived-table alias for engines that require one.
    RowNumber { derived_alias: Option<&'static str> },
}

/// Table and column naming in INSERT/UPDATE/DELETE.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationStyle {
    /// `table`, `col`
    Bare,
    /// `schema.table`, `col`
    Qualified,
    /// `schema.table`, `table.col` in SET and WHERE
    QualifiedTableColumns,
}

/// SQL rendering strategy for one RDBMS family.
///
/// Implementations are stateless; share them via [`dialect_for`].
pub trait Dialect: Send + Sync + fmt::Debug {
    fn kind(&self) -> DialectKind;

    /// Query listing the user tables (the metadata endpoint).
    fn list_tables_statement(&self) -> &'static str {
        "SELECT table_name FROM information_schema.tables WHERE table_type = 'BASE TABLE'"
    }

    fn column_qualifier(&self) -> ColumnQualifier {
        ColumnQualifier::Alias
    }

    fn paging(&self) -> Paging {
        Paging::RowNumber {
            derived_alias: None,
        }
    }

    fn mutation_style(&self) -> MutationStyle {
        MutationStyle::Bare
    }

    /// Native `ILIKE`. Without it, `ILIKE` renders as a `LIKE` over
    /// lower-cased operands.
    fn supports_ilike(&self) -> bool {
        false
    }

    fn render_select(&self, select: &Select) -> RestResult<Statement> {
        let mut w = SqlWriter::new();
        match (select.limit_param(), self.paging()) {
            (Some(limit), Paging::RowNumber { derived_alias }) => {
                write_windowed(self, &mut w, select, limit, derived_alias);
            }
            (limit, paging) => {
                write_plain(self, &mut w, select);
                if let Some(order) = select.order_param() {
                    write_order_by(self, &mut w, select.table(), order);
                }
                if let Some(limit) = limit {
                    write_paging(&mut w, limit, paging);
                }
            }
        }
        Ok(finish(self, w))
    }

    /// `SELECT COUNT(*)` over the same rows as `select`, ignoring projection,
    /// ordering and pagination.
    fn render_count(&self, select: &Select) -> RestResult<Statement> {
        let mut w = SqlWriter::new();
        w.push("SELECT COUNT(*) FROM ");
        write_from(self, &mut w, select.table());
        write_where(self, &mut w, select.table(), select.conditions());
        Ok(finish(self, w))
    }

    fn render_insert(&self, insert: &Insert) -> RestResult<Statement> {
        let table = insert.table();
        if insert.values().is_empty() {
            return Err(RestError::invalid_request_on(
                table.name().as_str(),
                "An insert query can't be empty",
            ));
        }

        let mut w = SqlWriter::new();
        w.push("INSERT INTO ");
        write_mutation_target(self, &mut w, table);
        w.push(" (");
        for (i, column) in insert.values().columns().enumerate() {
            if i > 0 {
                w.push(",");
            }
            w.push(column.as_str());
        }
        w.push(") VALUES (");
        for (i, value) in insert.values().values().enumerate() {
            if i > 0 {
                w.push(",");
            }
            w.push_bind(value);
        }
        w.push(")");
        Ok(finish(self, w))
    }

    fn render_update(&self, update: &Update) -> RestResult<Statement> {
        let table = update.table();
        if update.values().is_empty() {
            return Err(RestError::invalid_request_on(
                table.name().as_str(),
                "An update query can't be empty",
            ));
        }
        let id = update.id_value().ok_or_else(|| missing_primary_key(table))?;

        let mut w = SqlWriter::new();
        w.push("UPDATE ");
        write_mutation_target(self, &mut w, table);
        w.push(" SET ");
        for (i, (column, value)) in update.values().iter().enumerate() {
            if i > 0 {
                w.push(",");
            }
            write_mutation_column(self, &mut w, table, column);
            w.push("=").push_bind(value);
        }
        w.push(" WHERE ");
        write_mutation_column(self, &mut w, table, table.primary_key());
        w.push("=").push_bind(id);
        Ok(finish(self, w))
    }

    fn render_delete(&self, delete: &Delete) -> RestResult<Statement> {
        let table = delete.table();
        let id = delete.id_value().ok_or_else(|| missing_primary_key(table))?;

        let mut w = SqlWriter::new();
        w.push("DELETE FROM ");
        write_mutation_target(self, &mut w, table);
        w.push(" WHERE ");
        write_mutation_column(self, &mut w, table, table.primary_key());
        w.push("=").push_bind(id);
        Ok(finish(self, w))
    }

    /// JDBC-style escape `{CALL name(?,?)}`, arguments bound in order.
    fn render_call(&self, call: &Call) -> RestResult<Statement> {
        let mut w = SqlWriter::new();
        w.push("{CALL ").push(call.procedure().as_str()).push("(");
        for (i, arg) in call.args().iter().enumerate() {
            if i > 0 {
                w.push(",");
            }
            w.push_bind(arg);
        }
        w.push(")}");
        Ok(finish(self, w))
    }

    /// Render a decoded finder with explicit pagination and ordering. Uses the
    /// same rules as [`Dialect::render_select`].
    fn render_finder(
        &self,
        finder: &DynamicFinder,
        limit: &LimitParam,
        order: &OrderParam,
    ) -> RestResult<Statement> {
        let select = finder.select().clone().limit(*limit).order(order.clone());
        self.render_select(&select)
    }
}

fn missing_primary_key(table: &Table) -> RestError {
    RestError::invalid_request_on(
        table.name().as_str(),
        format!("Missing value for primary key {}", table.primary_key()),
    )
}

fn finish<D: Dialect + ?Sized>(dialect: &D, w: SqlWriter) -> Statement {
    let stmt = w.finish();
    tracing::debug!(
        target: "tablerest::sql",
        dialect = %dialect.kind(),
        param_count = stmt.params.len(),
        sql = %stmt.sql,
    );
    stmt
}

fn write_plain<D: Dialect + ?Sized>(dialect: &D, w: &mut SqlWriter, select: &Select) {
    w.push("SELECT ");
    write_projection(dialect, w, select);
    w.push(" FROM ");
    write_from(dialect, w, select.table());
    write_where(dialect, w, select.table(), select.conditions());
}

fn write_windowed<D: Dialect + ?Sized>(
    dialect: &D,
    w: &mut SqlWriter,
    select: &Select,
    limit: &LimitParam,
    derived_alias: Option<&str>,
) {
    let table = select.table();
    w.push("SELECT * FROM ( SELECT ROW_NUMBER() OVER ( ORDER BY ");
    match select.order_param() {
        Some(order) => write_order_item(dialect, w, table, order.column(), order.direction()),
        None => write_order_item(dialect, w, table, table.primary_key(), SortDir::Asc),
    }
    w.push(" ) AS ROW_NUMBER, ");
    write_projection(dialect, w, select);
    w.push(" FROM ");
    write_from(dialect, w, table);
    write_where(dialect, w, table, select.conditions());
    w.push(" )");
    if let Some(alias) = derived_alias {
        w.push(" AS ").push(alias);
    }
    w.push(&format!(
        " WHERE ROW_NUMBER BETWEEN {} AND {}",
        u64::from(limit.start()) + 1,
        limit.end()
    ));
}

fn write_paging(w: &mut SqlWriter, limit: &LimitParam, paging: Paging) {
    let sql = match paging {
        Paging::LimitOffset => format!(" LIMIT {} OFFSET {}", limit.limit(), limit.start()),
        Paging::LimitComma => format!(" LIMIT {},{}", limit.start(), limit.limit()),
        Paging::OffsetFetch => format!(
            " OFFSET {} ROWS FETCH NEXT {} ROWS ONLY",
            limit.start(),
            limit.limit()
        ),
        Paging::RowNumber { .. } => return,
    };
    w.push(&sql);
}

fn write_projection<D: Dialect + ?Sized>(dialect: &D, w: &mut SqlWriter, select: &Select) {
    let table = select.table();
    if select.is_all_columns() {
        write_qualifier(dialect, w, table);
        w.push("*");
        return;
    }
    for (i, column) in select.projected_columns().iter().enumerate() {
        if i > 0 {
            w.push(",");
        }
        write_column(dialect, w, table, column);
    }
}

fn write_from<D: Dialect + ?Sized>(dialect: &D, w: &mut SqlWriter, table: &Table) {
    match dialect.column_qualifier() {
        ColumnQualifier::Alias => {
            w.push(&table.qualified_name()).push(" t");
        }
        ColumnQualifier::TableName => {
            w.push(&table.qualified_name());
        }
        ColumnQualifier::Bare => {
            w.push(table.name().as_str());
        }
    }
}

fn write_qualifier<D: Dialect + ?Sized>(dialect: &D, w: &mut SqlWriter, table: &Table) {
    match dialect.column_qualifier() {
        ColumnQualifier::Alias => {
            w.push("t.");
        }
        ColumnQualifier::TableName => {
            w.push(table.name().as_str()).push(".");
        }
        ColumnQualifier::Bare => {}
    }
}

fn write_column<D: Dialect + ?Sized>(dialect: &D, w: &mut SqlWriter, table: &Table, column: &Ident) {
    write_qualifier(dialect, w, table);
    w.push(column.as_str());
}

fn write_where<D: Dialect + ?Sized>(
    dialect: &D,
    w: &mut SqlWriter,
    table: &Table,
    conditions: &[SelectCondition],
) {
    for (i, condition) in conditions.iter().enumerate() {
        w.push(if i == 0 { " WHERE " } else { " AND " });
        write_condition(dialect, w, table, condition);
    }
}

fn write_condition<D: Dialect + ?Sized>(
    dialect: &D,
    w: &mut SqlWriter,
    table: &Table,
    condition: &SelectCondition,
) {
    let op = condition.operator();
    let values = condition.values();

    if op == Operator::ILike && !dialect.supports_ilike() {
        w.push("LOWER(");
        write_column(dialect, w, table, condition.column());
        w.push(") LIKE LOWER(");
        for value in values {
            w.push_bind(value);
        }
        w.push(")");
        return;
    }

    // NOT negates an equality on the column.
    if op == Operator::Not {
        w.push("NOT (");
        write_column(dialect, w, table, condition.column());
        w.push(" = ");
        for value in values {
            w.push_bind(value);
        }
        w.push(")");
        return;
    }

    write_column(dialect, w, table, condition.column());
    w.push(" ").push(op.sql());
    for (i, value) in values.iter().enumerate() {
        w.push(if i == 0 { " " } else { " AND " });
        w.push_bind(value);
    }
}

fn write_order_by<D: Dialect + ?Sized>(
    dialect: &D,
    w: &mut SqlWriter,
    table: &Table,
    order: &OrderParam,
) {
    w.push(" ORDER BY ");
    write_order_item(dialect, w, table, order.column(), order.direction());
}

fn write_order_item<D: Dialect + ?Sized>(
    dialect: &D,
    w: &mut SqlWriter,
    table: &Table,
    column: &Ident,
    dir: SortDir,
) {
    write_column(dialect, w, table, column);
    w.push(" ").push(dir.to_sql());
}

fn write_mutation_target<D: Dialect + ?Sized>(dialect: &D, w: &mut SqlWriter, table: &Table) {
    match dialect.mutation_style() {
        MutationStyle::Bare => {
            w.push(table.name().as_str());
        }
        MutationStyle::Qualified | MutationStyle::QualifiedTableColumns => {
            w.push(&table.qualified_name());
        }
    }
}

fn write_mutation_column<D: Dialect + ?Sized>(
    dialect: &D,
    w: &mut SqlWriter,
    table: &Table,
    column: &Ident,
) {
    if dialect.mutation_style() == MutationStyle::QualifiedTableColumns {
        w.push(table.name().as_str()).push(".");
    }
    w.push(column.as_str());
}
