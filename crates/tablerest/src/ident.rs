//! SQL identifier validation.
//!
//! Table, schema and column names arrive from URL paths, query strings and
//! finder names, and are written into SQL verbatim (identifiers cannot be bound
//! as parameters). [`Ident`] guarantees they match `[A-Za-z_][A-Za-z0-9_$]*`.
//!
//! Quoting is not supported. The dialects render names exactly as they were
//! configured.

use crate::error::{RestError, RestResult};
use std::fmt;

/// A validated, unquoted SQL identifier (single segment).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ident(String);

impl Ident {
    /// Validate `s` as an identifier.
    pub fn parse(s: &str) -> RestResult<Self> {
        let mut chars = s.chars();
        let Some(first) = chars.next() else {
            return Err(RestError::invalid_request("Identifier cannot be empty"));
        };
        if !(first == '_' || first.is_ascii_alphabetic()) {
            return Err(RestError::invalid_request(format!(
                "Invalid identifier start character '{first}' in '{s}'"
            )));
        }
        if let Some(c) = chars.find(|c| !(*c == '_' || *c == '$' || c.is_ascii_alphanumeric())) {
            return Err(RestError::invalid_request(format!(
                "Invalid character '{c}' in identifier '{s}'"
            )));
        }
        Ok(Self(s.to_string()))
    }

    /// Same as [`Ident::parse`] but reports failures as configuration errors.
    pub fn parse_config(s: &str) -> RestResult<Self> {
        Self::parse(s).map_err(|e| match e {
            RestError::InvalidRequest { message, .. } => RestError::InvalidConfiguration(message),
            other => other,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Ident {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Convert an input into an [`Ident`].
///
/// This is mainly for ergonomics in constructor APIs.
pub trait IntoIdent {
    fn into_ident(self) -> RestResult<Ident>;
}

impl IntoIdent for Ident {
    fn into_ident(self) -> RestResult<Ident> {
        Ok(self)
    }
}

impl IntoIdent for &Ident {
    fn into_ident(self) -> RestResult<Ident> {
        Ok(self.clone())
    }
}

impl IntoIdent for &str {
    fn into_ident(self) -> RestResult<Ident> {
        Ident::parse(self)
    }
}

impl IntoIdent for String {
    fn into_ident(self) -> RestResult<Ident> {
        Ident::parse(&self)
    }
}

impl IntoIdent for &String {
    fn into_ident(self) -> RestResult<Ident> {
        Ident::parse(self)
    }
}
