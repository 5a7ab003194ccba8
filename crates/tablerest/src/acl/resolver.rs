use super::{Permission, PermissionSet, Rule};
use crate::config::Config;
use crate::error::RestResult;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

#[derive(Debug, Clone, Default)]
struct AliasRules {
    global: Option<Rule>,
    resources: HashMap<String, Rule>,
    read_only: bool,
}

/// The loaded rule table.
///
/// Built once, then only read. Safe to share across threads behind an `Arc`.
#[derive(Debug, Clone, Default)]
pub struct AccessControl {
    aliases: HashMap<String, AliasRules>,
}

impl AccessControl {
    /// An empty table: every query is denied.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the table from configuration. Any unparseable rule string fails
    /// the whole load.
    pub fn from_config(config: &Config) -> RestResult<Self> {
        let mut acl = Self::new();
        for (alias, cfg) in &config.aliases {
            if let Some(spec) = cfg.acl.as_deref() {
                acl.add_rule(Rule::parse(alias, None, spec)?);
            }
            for (resource, spec) in &cfg.resources {
                acl.add_rule(Rule::parse(alias, Some(resource.as_str()), spec)?);
            }
            acl.set_read_only(alias, cfg.read_only);
        }
        tracing::info!(
            aliases = acl.aliases.len(),
            rules = acl.rule_count(),
            "loaded access control rules"
        );
        Ok(acl)
    }

    /// Add (or replace) a rule. A later rule for the same scope wins.
    pub fn add_rule(&mut self, rule: Rule) {
        let entry = self
            .aliases
            .entry(rule.alias_name().to_string())
            .or_default();
        match rule.resource_name() {
            Some(resource) => {
                entry.resources.insert(resource.to_string(), rule);
            }
            None => entry.global = Some(rule),
        }
    }

    /// Deny every write permission on `alias`, whatever its rules say.
    pub fn set_read_only(&mut self, alias: &str, read_only: bool) {
        self.aliases.entry(alias.to_string()).or_default().read_only = read_only;
    }

    pub fn rule_count(&self) -> usize {
        self.aliases
            .values()
            .map(|a| usize::from(a.global.is_some()) + a.resources.len())
            .sum()
    }

    /// Is `permission` granted on `alias` as a whole?
    pub fn validate(&self, alias: &str, permission: Permission) -> bool {
        let allowed = self.effective(alias, None).contains(permission);
        if !allowed {
            tracing::debug!(alias, %permission, "access denied");
        }
        allowed
    }

    /// Is `permission` granted on `resource` under `alias`?
    pub fn validate_resource(&self, alias: &str, resource: &str, permission: Permission) -> bool {
        let allowed = self.effective(alias, Some(resource)).contains(permission);
        if !allowed {
            tracing::debug!(alias, resource, %permission, "access denied");
        }
        allowed
    }

    /// The permissions that apply to `alias` (and `resource`, if given) after
    /// rule layering and the read-only restriction.
    pub fn effective(&self, alias: &str, resource: Option<&str>) -> PermissionSet {
        let Some(rules) = self.aliases.get(alias) else {
            return PermissionSet::empty();
        };

        let scoped = resource.and_then(|r| rules.resources.get(r));
        let mut set = scoped
            .or(rules.global.as_ref())
            .map(Rule::permissions)
            .unwrap_or_default();

        if rules.read_only {
            for p in Permission::ALL.into_iter().filter(|p| p.is_write()) {
                set.remove(p);
            }
        }
        set
    }
}

/// Shared, swappable access to an [`AccessControl`] table.
///
/// Requests take a [`snapshot`](Self::snapshot) and read it without further
/// locking; a reload builds a new table and [`replace`](Self::replace)s the
/// whole thing.
#[derive(Debug)]
pub struct AccessControlHandle {
    current: RwLock<Arc<AccessControl>>,
}

impl AccessControlHandle {
    pub fn new(acl: AccessControl) -> Self {
        Self {
            current: RwLock::new(Arc::new(acl)),
        }
    }

    pub fn snapshot(&self) -> Arc<AccessControl> {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Swap in a new table, returning the previous one.
    pub fn replace(&self, acl: AccessControl) -> Arc<AccessControl> {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *guard, Arc::new(acl))
    }
}

impl From<AccessControl> for AccessControlHandle {
    fn from(acl: AccessControl) -> Self {
        Self::new(acl)
    }
}
