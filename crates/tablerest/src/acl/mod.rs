//! Access control: which permissions an alias, or one of its resources, grants.
//!
//! Resolution for a resource-scoped query:
//! 1. a rule for `(alias, resource)` decides alone, even to deny what the
//!    alias-wide rule grants;
//! 2. otherwise the alias-wide rule decides;
//! 3. otherwise the answer is "deny".
//!
//! The table is built once at startup and never mutated. Reloading swaps the
//! whole table through [`AccessControlHandle`].

mod permission;
mod resolver;
mod rule;

pub use permission::{Permission, PermissionSet};
pub use resolver::{AccessControl, AccessControlHandle};
pub use rule::Rule;
