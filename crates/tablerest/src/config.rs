//! Configuration model.
//!
//! Loaded once at startup (reading the file is the caller's job) and passed by
//! reference to [`Planner::new`](crate::Planner::new) and
//! [`AccessControl::from_config`](crate::AccessControl::from_config).
//!
//! ```toml
//! page_size = 25
//!
//! [aliases.demo]
//! driver = "postgresql"
//! schema = "public"
//! read_only = false
//! acl = "ALL"
//!
//! [aliases.demo.resources]
//! users = "READ, META"
//!
//! [aliases.demo.primary_keys]
//! cars = "cid"
//! ```

use crate::acl::PermissionSet;
use crate::dialect::DialectKind;
use crate::error::{RestError, RestResult};
use crate::ident::Ident;
use crate::params::LimitParam;
use crate::statement::Table;
use serde::Deserialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Default size for `page`/`size` pagination.
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    #[serde(default)]
    pub aliases: BTreeMap<String, AliasConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AliasConfig {
    /// Driver tag selecting the dialect, e.g. `postgresql` or `h2_mem`.
    pub driver: String,

    /// Schema (or database) qualifying every table of the alias.
    pub schema: Option<String>,

    #[serde(default)]
    pub read_only: bool,

    /// Alias-wide rule string. Absent means nothing is allowed unless a
    /// resource rule says otherwise.
    pub acl: Option<String>,

    /// Resource-scoped rule strings.
    #[serde(default)]
    pub resources: BTreeMap<String, String>,

    /// Primary-key column per resource (default `id`).
    #[serde(default)]
    pub primary_keys: BTreeMap<String, String>,
}

fn default_page_size() -> u32 {
    LimitParam::DEFAULT_LIMIT
}

impl Default for Config {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            aliases: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(raw: &str) -> RestResult<Self> {
        let config: Config = toml::from_str(raw)
            .map_err(|e| RestError::invalid_configuration(format!("failed to parse: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Check every alias. All failures are [`RestError::InvalidConfiguration`].
    pub fn validate(&self) -> RestResult<()> {
        if !(1..=LimitParam::MAX_LIMIT).contains(&self.page_size) {
            return Err(RestError::invalid_configuration(format!(
                "page_size must be between 1 and {}, got {}",
                LimitParam::MAX_LIMIT,
                self.page_size
            )));
        }

        for (name, alias) in &self.aliases {
            alias
                .validate()
                .map_err(|e| match e {
                    RestError::InvalidConfiguration(msg) => {
                        RestError::InvalidConfiguration(format!("alias '{name}': {msg}"))
                    }
                    other => other,
                })?;
        }
        Ok(())
    }

    pub fn alias(&self, name: &str) -> Option<&AliasConfig> {
        self.aliases.get(name)
    }
}

impl AliasConfig {
    pub fn dialect_kind(&self) -> RestResult<DialectKind> {
        DialectKind::from_driver_tag(&self.driver)
    }

    /// The alias-wide permission set, if a rule is configured.
    pub fn alias_permissions(&self) -> RestResult<Option<PermissionSet>> {
        self.acl.as_deref().map(PermissionSet::parse).transpose()
    }

    /// Build the [`Table`] for `resource` with this alias's schema and the
    /// configured primary key.
    pub fn table(&self, resource: &str) -> RestResult<Table> {
        let mut table = Table::new(resource)?;
        if let Some(schema) = &self.schema {
            table = table.with_schema(Ident::parse_config(schema)?)?;
        }
        if let Some(pk) = self.primary_keys.get(resource) {
            table = table.with_primary_key(Ident::parse_config(pk)?)?;
        }
        Ok(table)
    }

    fn validate(&self) -> RestResult<()> {
        self.dialect_kind()?;
        if let Some(schema) = &self.schema {
            Ident::parse_config(schema)?;
        }
        self.alias_permissions()?;
        for (resource, spec) in &self.resources {
            Ident::parse_config(resource)?;
            PermissionSet::parse(spec).map_err(|e| match e {
                RestError::InvalidConfiguration(msg) => {
                    RestError::InvalidConfiguration(format!("resource '{resource}': {msg}"))
                }
                other => other,
            })?;
        }
        for (resource, pk) in &self.primary_keys {
            Ident::parse_config(resource)?;
            Ident::parse_config(pk)?;
        }
        Ok(())
    }
}
