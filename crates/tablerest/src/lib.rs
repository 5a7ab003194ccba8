//! # tablerest
//!
//! The core of a service that exposes relational tables as generic REST
//! resources.
//!
//! ## Features
//!
//! - **Dialect engine**: one statement model rendered for PostgreSQL, MySQL,
//!   Oracle, SQL Server, HSQLDB, H2, Derby and a generic ANSI fallback
//! - **Dynamic finders**: `findAllByNameAndAgeGreaterThan` decoded into ordered
//!   conditions
//! - **Access control**: alias-wide and per-resource permission rules
//! - **Pagination**: forgiving `limit`/`offset`/`page`/`size` parsing and the
//!   response pagination block
//! - **Safe SQL**: identifiers are validated, values always travel as `?`
//!   parameters
//!
//! Nothing here performs I/O. A [`Planner`] turns a [`Request`] into a
//! [`Statement`] (SQL + parameters) for the data-access layer to execute.
//!
//! ```rust
//! use tablerest::{Action, Config, Lookup, Planner, Request};
//!
//! let config = Config::from_toml_str(r#"
//!     [aliases.demo]
//!     driver = "mysql"
//!     acl = "READ"
//! "#)?;
//! let planner = Planner::new(&config)?;
//!
//! let plan = planner.plan(&Request::new(
//!     "demo",
//!     Some("users"),
//!     Action::Read { by: Some(Lookup::by_column("name", "alice")) },
//! ))?;
//! assert_eq!(plan.statement.sql, "SELECT t.* FROM users t WHERE t.name = ? LIMIT 0,25");
//! assert_eq!(plan.statement.params, ["alice"]);
//! # Ok::<(), tablerest::RestError>(())
//! ```

pub mod acl;
pub mod config;
pub mod dialect;
pub mod error;
pub mod finder;
pub mod ident;
pub mod operator;
pub mod params;
pub mod planner;
pub mod statement;

pub use acl::{AccessControl, AccessControlHandle, Permission, PermissionSet, Rule};
pub use config::{AliasConfig, Config};
pub use dialect::{Dialect, DialectKind, Statement, dialect_for};
pub use error::{RestError, RestResult};
pub use finder::{DynamicFinder, FinderCommand};
pub use ident::{Ident, IntoIdent};
pub use operator::{Arity, Operator};
pub use params::{LimitParam, OrderParam, Pagination, QueryParams, SortDir};
pub use planner::{Action, Lookup, Plan, Planner, Request};
pub use statement::{Call, ColumnValues, Delete, Insert, Select, SelectCondition, Table, Update};
