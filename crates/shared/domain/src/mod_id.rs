use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

/// Separator between a mod id and a member name in public keys (`alpha.core/Score`).
pub const NAMESPACE_SEPARATOR: char = '/';

/// A mod identifier such as `alpha.core`.
///
/// Ids are lowercase ASCII letters, digits, `-`, `_` and `.`; they may not
/// start or end with `.` and never contain the namespace separator, so
/// `<id>/<name>` keys split unambiguously.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ModId(String);

impl ModId {
    /// Validates and wraps `id`, returning `None` if it breaks the id rules.
    pub fn new(id: impl Into<String>) -> Option<Self> {
        let id = id.into();
        Self::is_valid(&id).then_some(Self(id))
    }

    #[must_use]
    pub fn is_valid(id: &str) -> bool {
        !id.is_empty()
            && !id.starts_with('.')
            && !id.ends_with('.')
            && id.bytes().all(|b| {
                b.is_ascii_lowercase() || b.is_ascii_digit() || matches!(b, b'-' | b'_' | b'.')
            })
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ModId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ModId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ModId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if Self::is_valid(&value) {
            Ok(Self(value))
        } else {
            Err(format!("invalid mod id '{value}'"))
        }
    }
}

impl FromStr for ModId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s.to_owned())
    }
}

impl From<ModId> for String {
    fn from(value: ModId) -> Self {
        value.0
    }
}
