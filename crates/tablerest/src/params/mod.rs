//! Pagination and ordering parameters parsed from raw request key/value pairs.
//!
//! - [`QueryParams`]: the untyped, multi-valued map handed over by the REST layer
//! - [`LimitParam`]: page size + start offset, never fails to parse
//! - [`OrderParam`]: sort column + direction, fails on a bad direction
//! - [`Pagination`]: the response-envelope pagination block

mod limit;
mod order;
mod pagination;

pub use limit::LimitParam;
pub use order::{OrderParam, SortDir};
pub use pagination::Pagination;

use std::collections::BTreeMap;

/// A multi-valued string map (query string and header parameters).
///
/// Only the first value of a key is ever consulted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    inner: BTreeMap<String, Vec<String>>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a value for `key`.
    pub fn add(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.inner.entry(key.into()).or_default().push(value.into());
        self
    }

    /// Chainable variant of [`QueryParams::add`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.add(key, value);
        self
    }

    pub fn first(&self, key: &str) -> Option<&str> {
        self.inner
            .get(key)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    pub fn get_all(&self, key: &str) -> &[String] {
        self.inner.get(key).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.inner.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// First value of `key` as a non-negative integer.
    ///
    /// Only plain ASCII digit strings qualify: signs, whitespace, and values
    /// that overflow `u32` are treated as absent.
    pub(crate) fn first_numeric(&self, key: &str) -> Option<u32> {
        let raw = self.first(key)?;
        if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        raw.parse().ok()
    }
}

impl<K, V> FromIterator<(K, V)> for QueryParams
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut params = Self::new();
        for (k, v) in iter {
            params.add(k, v);
        }
        params
    }
}
