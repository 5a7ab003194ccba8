use crate::error::{RestError, RestResult};
use std::fmt;
use std::str::FromStr;

/// An operation class that can be granted on an alias or resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Permission {
    Meta,
    Read,
    Insert,
    Update,
    Delete,
    Exec,
}

impl Permission {
    pub const ALL: [Permission; 6] = [
        Permission::Meta,
        Permission::Read,
        Permission::Insert,
        Permission::Update,
        Permission::Delete,
        Permission::Exec,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Permission::Meta => "META",
            Permission::Read => "READ",
            Permission::Insert => "INSERT",
            Permission::Update => "UPDATE",
            Permission::Delete => "DELETE",
            Permission::Exec => "EXEC",
        }
    }

    /// Permissions that modify rows.
    pub const fn is_write(self) -> bool {
        matches!(
            self,
            Permission::Insert | Permission::Update | Permission::Delete
        )
    }

    const fn bit(self) -> u8 {
        1 << self as u8
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Permission {
    type Err = RestError;

    fn from_str(s: &str) -> RestResult<Self> {
        let token = s.trim();
        Permission::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(token))
            .ok_or_else(|| {
                RestError::invalid_configuration(format!("Unknown permission '{token}'"))
            })
    }
}

/// A set of [`Permission`]s.
///
/// Parsed from a comma-separated rule string such as `"READ, META"`. The
/// meta-tokens `ALL` and `NONE` expand to the full and empty set and must
/// appear alone.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PermissionSet(u8);

impl PermissionSet {
    pub const fn empty() -> Self {
        Self(0)
    }

    pub const fn all() -> Self {
        let mut bits = 0;
        let mut i = 0;
        while i < Permission::ALL.len() {
            bits |= Permission::ALL[i].bit();
            i += 1;
        }
        Self(bits)
    }

    /// Parse a rule string. A blank string is the empty set.
    pub fn parse(spec: &str) -> RestResult<Self> {
        if spec.trim().is_empty() {
            return Ok(Self::empty());
        }

        let mut set = Self::empty();
        let (mut saw_all, mut saw_none) = (false, false);

        for token in spec.split(',').map(str::trim) {
            if token.eq_ignore_ascii_case("ALL") {
                saw_all = true;
            } else if token.eq_ignore_ascii_case("NONE") {
                saw_none = true;
            } else if token.is_empty() {
                return Err(RestError::invalid_configuration(format!(
                    "Empty permission in rule '{spec}'"
                )));
            } else {
                set.insert(token.parse()?);
            }
        }

        if saw_all {
            if saw_none || !set.is_empty() {
                return Err(RestError::invalid_configuration(format!(
                    "Invalid rule '{spec}': ALL has to be alone"
                )));
            }
            return Ok(Self::all());
        }
        if saw_none && !set.is_empty() {
            return Err(RestError::invalid_configuration(format!(
                "Invalid rule '{spec}': NONE has to be alone"
            )));
        }
        Ok(set)
    }

    pub fn insert(&mut self, permission: Permission) {
        self.0 |= permission.bit();
    }

    pub fn remove(&mut self, permission: Permission) {
        self.0 &= !permission.bit();
    }

    pub const fn contains(&self, permission: Permission) -> bool {
        self.0 & permission.bit() != 0
    }

    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub const fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn iter(&self) -> impl Iterator<Item = Permission> + '_ {
        Permission::ALL.into_iter().filter(|p| self.contains(*p))
    }
}

impl FromIterator<Permission> for PermissionSet {
    fn from_iter<T: IntoIterator<Item = Permission>>(iter: T) -> Self {
        let mut set = Self::empty();
        for p in iter {
            set.insert(p);
        }
        set
    }
}

impl FromStr for PermissionSet {
    type Err = RestError;

    fn from_str(s: &str) -> RestResult<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for PermissionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == Self::all() {
            return f.write_str("ALL");
        }
        if self.is_empty() {
            return f.write_str("NONE");
        }
        for (i, p) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(p.name())?;
        }
        Ok(())
    }
}

impl fmt::Debug for PermissionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
