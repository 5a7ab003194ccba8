//! The closed catalog of comparison and boolean operators.
//!
//! Operators are classified into exactly one arity class:
//! - unary: `IS NULL`, `IS NOT NULL` (no value)
//! - boolean: `AND`, `OR` (connect two conditions)
//! - binary: everything else (one value, two for `BETWEEN`)

use crate::error::{RestError, RestResult};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// SQL operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    And,
    Or,
    Between,
    LessThan,
    LessThanEquals,
    GreaterThan,
    GreaterThanEquals,
    Like,
    ILike,
    IsNotNull,
    IsNull,
    Not,
    Equals,
    NotEquals,
}

/// Arity class of an [`Operator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Unary,
    Binary,
    Boolean,
}

/// Words the finder tokenizer treats as operator vocabulary.
static KEYWORDS: LazyLock<Vec<&'static str>> = LazyLock::new(|| {
    vec![
        "Is", "Not", "Null", "Greater", "Less", "Than", "Between", "Equals", "And", "Or", "Like",
    ]
});

impl Operator {
    /// Every operator, in declaration order.
    pub const ALL: [Operator; 14] = [
        Operator::And,
        Operator::Or,
        Operator::Between,
        Operator::LessThan,
        Operator::LessThanEquals,
        Operator::GreaterThan,
        Operator::GreaterThanEquals,
        Operator::Like,
        Operator::ILike,
        Operator::IsNotNull,
        Operator::IsNull,
        Operator::Not,
        Operator::Equals,
        Operator::NotEquals,
    ];

    /// The literal SQL token for this operator.
    pub const fn sql(self) -> &'static str {
        match self {
            Operator::And => "AND",
            Operator::Or => "OR",
            Operator::Between => "BETWEEN",
            Operator::LessThan => "<",
            Operator::LessThanEquals => "<=",
            Operator::GreaterThan => ">",
            Operator::GreaterThanEquals => ">=",
            Operator::Like => "LIKE",
            Operator::ILike => "ILIKE",
            Operator::IsNotNull => "IS NOT NULL",
            Operator::IsNull => "IS NULL",
            Operator::Not => "NOT",
            Operator::Equals => "=",
            Operator::NotEquals => "<>",
        }
    }

    /// The upper-case catalog name (`GREATERTHANEQUALS`, `ISNULL`, ...).
    pub const fn name(self) -> &'static str {
        match self {
            Operator::And => "AND",
            Operator::Or => "OR",
            Operator::Between => "BETWEEN",
            Operator::LessThan => "LESSTHAN",
            Operator::LessThanEquals => "LESSTHANEQUALS",
            Operator::GreaterThan => "GREATERTHAN",
            Operator::GreaterThanEquals => "GREATERTHANEQUALS",
            Operator::Like => "LIKE",
            Operator::ILike => "ILIKE",
            Operator::IsNotNull => "ISNOTNULL",
            Operator::IsNull => "ISNULL",
            Operator::Not => "NOT",
            Operator::Equals => "EQUALS",
            Operator::NotEquals => "NOTEQUALS",
        }
    }

    pub const fn arity(self) -> Arity {
        match self {
            Operator::IsNull | Operator::IsNotNull => Arity::Unary,
            Operator::And | Operator::Or => Arity::Boolean,
            _ => Arity::Binary,
        }
    }

    pub const fn is_unary(self) -> bool {
        matches!(self.arity(), Arity::Unary)
    }

    pub const fn is_binary(self) -> bool {
        matches!(self.arity(), Arity::Binary)
    }

    pub const fn is_boolean(self) -> bool {
        matches!(self.arity(), Arity::Boolean)
    }

    /// Number of bound values a condition with this operator consumes.
    pub const fn value_count(self) -> usize {
        match self {
            Operator::Between => 2,
            op if op.is_binary() => 1,
            _ => 0,
        }
    }

    /// The fixed keyword vocabulary used by the finder tokenizer.
    pub fn keywords() -> &'static [&'static str] {
        &KEYWORDS
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operator {
    type Err = RestError;

    /// Parse a catalog name, case-insensitively. Unknown names are a
    /// configuration error.
    fn from_str(s: &str) -> RestResult<Self> {
        let upper = s.trim().to_ascii_uppercase();
        Operator::ALL
            .into_iter()
            .find(|op| op.name() == upper)
            .ok_or_else(|| RestError::invalid_configuration(format!("Unknown operator '{s}'")))
    }
}
