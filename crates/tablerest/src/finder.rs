//! Dynamic finders: reads addressed by a method-like name.
//!
//! `findAllByNameAndAgeGreaterThan` with arguments `["bar", "30"]` decodes to
//! `name = ? AND age > ?`. The name is split into camel-case words; `And`
//! separates clauses, and each clause ends with an optional operator suffix
//! taken from a fixed table (no suffix means `EQUALS`). `Or` is not supported.
//!
//! ```rust
//! use tablerest::{DynamicFinder, Operator, Table};
//!
//! let finder = DynamicFinder::parse(
//!     Table::new("users")?,
//!     "findAllByNameAndAgeGreaterThan",
//!     &["bar", "30"],
//! )?;
//! let ops: Vec<Operator> = finder.select().conditions().iter().map(|c| c.operator()).collect();
//! assert_eq!(ops, [Operator::Equals, Operator::GreaterThan]);
//! # Ok::<(), tablerest::RestError>(())
//! ```

use crate::error::{RestError, RestResult};
use crate::operator::Operator;
use crate::statement::{Select, SelectCondition, Table};

/// The finder verb.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FinderCommand {
    FindBy,
    FindAllBy,
}

impl FinderCommand {
    pub const fn prefix(self) -> &'static str {
        match self {
            FinderCommand::FindBy => "findBy",
            FinderCommand::FindAllBy => "findAllBy",
        }
    }
}

// Longest suffixes first so `GreaterThanEquals` wins over `Equals`.
const SUFFIXES: &[(&[&str], Operator)] = &[
    (&["Greater", "Than", "Equals"], Operator::GreaterThanEquals),
    (&["Less", "Than", "Equals"], Operator::LessThanEquals),
    (&["Is", "Not", "Null"], Operator::IsNotNull),
    (&["Greater", "Than"], Operator::GreaterThan),
    (&["Less", "Than"], Operator::LessThan),
    (&["Not", "Equals"], Operator::NotEquals),
    (&["Is", "Null"], Operator::IsNull),
    (&["I", "Like"], Operator::ILike),
    (&["Between"], Operator::Between),
    (&["Like"], Operator::Like),
    (&["Equals"], Operator::Equals),
];

/// A decoded finder: its verb plus the populated [`Select`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DynamicFinder {
    command: FinderCommand,
    select: Select,
}

impl DynamicFinder {
    /// Decode `name` against `table`, consuming `args` positionally.
    ///
    /// Fails with an invalid-request error when the prefix is unknown, a
    /// clause is empty or has no column, the name contains `Or`, or the
    /// argument count does not match the decoded clauses.
    pub fn parse<S: AsRef<str>>(table: Table, name: &str, args: &[S]) -> RestResult<Self> {
        let resource = table.name().as_str().to_string();
        Self::parse_inner(table, name, args).map_err(|e| e.with_resource(&resource))
    }

    fn parse_inner<S: AsRef<str>>(table: Table, name: &str, args: &[S]) -> RestResult<Self> {
        let (command, rest) = split_command(name)?;
        if !rest.starts_with(|c: char| c.is_ascii_uppercase()) {
            return Err(RestError::invalid_request(format!("Invalid finder {name}")));
        }

        let words = camel_words(rest);
        if words.iter().any(|w| *w == "Or") {
            return Err(RestError::invalid_request(format!(
                "Unsupported boolean operator OR in finder {name}"
            )));
        }

        let mut args = args.iter().map(S::as_ref);
        let mut select = Select::new(table);
        let mut clauses = 0usize;

        for clause in words.split(|w| *w == "And") {
            let (column, operator) = decode_clause(clause, name)?;
            let mut values = Vec::with_capacity(operator.value_count());
            for _ in 0..operator.value_count() {
                let Some(value) = args.next() else {
                    return Err(RestError::invalid_request(format!(
                        "Not enough arguments for finder {name}"
                    )));
                };
                values.push(value.to_string());
            }
            select = select.and(SelectCondition::new(column.as_str(), operator, values)?);
            clauses += 1;
        }

        if args.next().is_some() {
            return Err(RestError::invalid_request(format!(
                "Too many arguments for finder {name}"
            )));
        }

        tracing::debug!(finder = name, clauses, "decoded dynamic finder");
        Ok(Self { command, select })
    }

    pub fn command(&self) -> FinderCommand {
        self.command
    }

    pub fn is_find_all(&self) -> bool {
        self.command == FinderCommand::FindAllBy
    }

    pub fn select(&self) -> &Select {
        &self.select
    }

    pub fn into_select(self) -> Select {
        self.select
    }
}

fn split_command(name: &str) -> RestResult<(FinderCommand, &str)> {
    [FinderCommand::FindAllBy, FinderCommand::FindBy]
        .into_iter()
        .find_map(|cmd| name.strip_prefix(cmd.prefix()).map(|rest| (cmd, rest)))
        .ok_or_else(|| RestError::invalid_request(format!("Invalid command {name}")))
}

/// Split at every ASCII uppercase letter: `NameIsNotNull` -> `[Name, Is, Not, Null]`.
fn camel_words(s: &str) -> Vec<&str> {
    let mut words = Vec::new();
    let mut start = 0;
    for (i, c) in s.char_indices() {
        if i > start && c.is_ascii_uppercase() {
            words.push(&s[start..i]);
            start = i;
        }
    }
    if start < s.len() {
        words.push(&s[start..]);
    }
    words
}

fn decode_clause(clause: &[&str], name: &str) -> RestResult<(String, Operator)> {
    if clause.is_empty() {
        return Err(RestError::invalid_request(format!(
            "Empty clause in finder {name}"
        )));
    }

    let (column_words, operator) = SUFFIXES
        .iter()
        .find(|(suffix, _)| clause.ends_with(suffix))
        .map(|(suffix, op)| (&clause[..clause.len() - suffix.len()], *op))
        .unwrap_or((clause, Operator::Equals));

    if column_words.is_empty() {
        return Err(RestError::invalid_request(format!(
            "Missing column before {operator} in finder {name}"
        )));
    }

    Ok((column_words.concat().to_lowercase(), operator))
}
