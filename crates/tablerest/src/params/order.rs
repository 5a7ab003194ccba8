use super::QueryParams;
use crate::error::{RestError, RestResult};
use crate::ident::{Ident, IntoIdent};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortDir {
    #[default]
    Asc,
    Desc,
}

impl SortDir {
    pub const fn to_sql(self) -> &'static str {
        match self {
            SortDir::Asc => "ASC",
            SortDir::Desc => "DESC",
        }
    }
}

impl fmt::Display for SortDir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_sql())
    }
}

impl FromStr for SortDir {
    type Err = RestError;

    fn from_str(s: &str) -> RestResult<Self> {
        if s.eq_ignore_ascii_case("asc") {
            Ok(SortDir::Asc)
        } else if s.eq_ignore_ascii_case("desc") {
            Ok(SortDir::Desc)
        } else {
            Err(RestError::invalid_request(format!(
                "Invalid direction parameter '{s}'"
            )))
        }
    }
}

/// Sort column and direction of a read.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OrderParam {
    column: Ident,
    direction: SortDir,
}

impl OrderParam {
    pub fn new(column: impl IntoIdent, direction: SortDir) -> RestResult<Self> {
        Ok(Self {
            column: column.into_ident()?,
            direction,
        })
    }

    pub fn asc(column: impl IntoIdent) -> RestResult<Self> {
        Self::new(column, SortDir::Asc)
    }

    pub fn desc(column: impl IntoIdent) -> RestResult<Self> {
        Self::new(column, SortDir::Desc)
    }

    /// Read `sort` / `dir`.
    ///
    /// A missing or empty `sort` uses `default_column`; a missing or empty `dir`
    /// is ascending. Any other `dir` value fails, as does a `sort` column that
    /// is not an identifier or is itself a direction keyword.
    pub fn parse(params: &QueryParams, default_column: impl IntoIdent) -> RestResult<Self> {
        let direction = match params.first("dir").filter(|d| !d.is_empty()) {
            Some(dir) => dir.parse()?,
            None => SortDir::Asc,
        };

        let column = match params.first("sort").filter(|s| !s.trim().is_empty()) {
            Some(sort) => {
                let sort: String = sort.chars().filter(|c| !c.is_whitespace()).collect();
                if sort.parse::<SortDir>().is_ok() {
                    return Err(RestError::invalid_request(format!(
                        "Invalid sort column '{sort}'"
                    )));
                }
                Ident::parse(&sort)?
            }
            None => default_column.into_ident()?,
        };

        Ok(Self { column, direction })
    }

    pub fn column(&self) -> &Ident {
        &self.column
    }

    pub fn direction(&self) -> SortDir {
        self.direction
    }
}

impl fmt::Display for OrderParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.column, self.direction)
    }
}
