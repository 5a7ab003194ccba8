use crate::error::RestResult;
use crate::ident::{Ident, IntoIdent};
use std::fmt;

/// A table (or view) exposed as a REST resource.
///
/// Created once per request from the path and the alias configuration, never
/// mutated afterwards.
///
/// # Example
///
/// ```rust
/// use tablerest::Table;
///
/// let cars = Table::new("cars")?.with_schema("demo")?.with_primary_key("cid")?;
/// assert_eq!(cars.qualified_name(), "demo.cars");
/// assert_eq!(cars.primary_key().as_str(), "cid");
/// # Ok::<(), tablerest::RestError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Table {
    schema: Option<Ident>,
    name: Ident,
    primary_key: Ident,
}

impl Table {
    pub const DEFAULT_PRIMARY_KEY: &'static str = "id";

    pub fn new(name: impl IntoIdent) -> RestResult<Self> {
        Ok(Self {
            schema: None,
            name: name.into_ident()?,
            primary_key: Ident::parse(Self::DEFAULT_PRIMARY_KEY)?,
        })
    }

    pub fn with_schema(mut self, schema: impl IntoIdent) -> RestResult<Self> {
        self.schema = Some(schema.into_ident()?);
        Ok(self)
    }

    pub fn with_primary_key(mut self, primary_key: impl IntoIdent) -> RestResult<Self> {
        self.primary_key = primary_key.into_ident()?;
        Ok(self)
    }

    pub fn schema(&self) -> Option<&Ident> {
        self.schema.as_ref()
    }

    pub fn name(&self) -> &Ident {
        &self.name
    }

    pub fn primary_key(&self) -> &Ident {
        &self.primary_key
    }

    /// `schema.name` when a schema is set, otherwise just `name`.
    pub fn qualified_name(&self) -> String {
        match &self.schema {
            Some(schema) => format!("{schema}.{}", self.name),
            None => self.name.to_string(),
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.qualified_name())
    }
}
