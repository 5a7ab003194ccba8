use super::PermissionSet;
use crate::error::RestResult;

/// A permission grant for an alias, optionally narrowed to one resource.
///
/// Equality is structural: alias, resource and permission set.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Rule {
    alias: String,
    resource: Option<String>,
    permissions: PermissionSet,
}

impl Rule {
    /// An alias-wide rule.
    pub fn alias(alias: impl Into<String>, permissions: PermissionSet) -> Self {
        Self {
            alias: alias.into(),
            resource: None,
            permissions,
        }
    }

    /// A rule scoped to a single resource.
    pub fn resource(
        alias: impl Into<String>,
        resource: impl Into<String>,
        permissions: PermissionSet,
    ) -> Self {
        Self {
            alias: alias.into(),
            resource: Some(resource.into()),
            permissions,
        }
    }

    /// Parse a rule string such as `"READ, META"` for `alias`/`resource`.
    pub fn parse(alias: &str, resource: Option<&str>, spec: &str) -> RestResult<Self> {
        let permissions = PermissionSet::parse(spec)?;
        Ok(match resource {
            Some(resource) => Self::resource(alias, resource, permissions),
            None => Self::alias(alias, permissions),
        })
    }

    pub fn alias_name(&self) -> &str {
        &self.alias
    }

    pub fn resource_name(&self) -> Option<&str> {
        self.resource.as_deref()
    }

    pub fn permissions(&self) -> PermissionSet {
        self.permissions
    }
}
