//! The statement model: value objects describing one single-table statement
//! or a stored-procedure call.
//!
//! Statements are built fresh per request, handed once to a
//! [`Dialect`](crate::Dialect) and then dropped. They hold validated
//! identifiers and raw string values; how the SQL looks is entirely up to the
//! dialect.
//!
//! ```rust
//! use tablerest::{Select, SelectCondition, Table};
//!
//! let select = Select::new(Table::new("users")?)
//!     .columns(["id", "name"])?
//!     .and(SelectCondition::eq("name", "alice")?);
//! assert!(!select.is_all_records());
//! # Ok::<(), tablerest::RestError>(())
//! ```

mod call;
mod condition;
mod delete;
mod insert;
mod select;
mod table;
mod update;

pub use call::Call;
pub use condition::SelectCondition;
pub use delete::Delete;
pub use insert::{ColumnValues, Insert};
pub use select::Select;
pub use table::Table;
pub use update::Update;
