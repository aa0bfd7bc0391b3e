use crate::error::VersionError;
use crate::version::SemVer;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

const OPERATOR_CHARS: &[char] = &['>', '<', '=', '!', '~', '^', '*'];

/// The comparator of a [`VersionConstraint`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Comparator {
    /// `>=`
    AtLeast,
    /// `<=`
    AtMost,
    /// `=`
    Exactly,
}

impl Comparator {
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::AtLeast => ">=",
            Self::AtMost => "<=",
            Self::Exactly => "=",
        }
    }

    fn from_token(token: &str) -> Option<Self> {
        match token {
            ">=" => Some(Self::AtLeast),
            "<=" => Some(Self::AtMost),
            "=" => Some(Self::Exactly),
            _ => None,
        }
    }
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A comparator applied to a target version, as written in a manifest.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VersionConstraint {
    comparator: Comparator,
    target: SemVer,
}

impl VersionConstraint {
    #[must_use]
    pub const fn new(comparator: Comparator, target: SemVer) -> Self {
        Self { comparator, target }
    }

    #[must_use]
    pub const fn at_least(target: SemVer) -> Self {
        Self::new(Comparator::AtLeast, target)
    }

    #[must_use]
    pub const fn at_most(target: SemVer) -> Self {
        Self::new(Comparator::AtMost, target)
    }

    #[must_use]
    pub const fn exactly(target: SemVer) -> Self {
        Self::new(Comparator::Exactly, target)
    }

    /// Parses `>=X.Y.Z`, `<=X.Y.Z` or `=X.Y.Z`.
    ///
    /// Whitespace around the text and between comparator and version is
    /// ignored. A bare version is rejected rather than given a default
    /// comparator.
    ///
    /// # Errors
    /// * [`VersionError::Empty`] for blank input.
    /// * [`VersionError::MissingOperator`] for a bare version.
    /// * [`VersionError::UnknownOperator`] for `>`, `<`, `==`, `^`, `~` and friends.
    /// * [`VersionError::InvalidVersion`] when the version part is malformed.
    pub fn parse(text: &str) -> Result<Self, VersionError> {
        let input = text.trim();
        if input.is_empty() {
            return Err(VersionError::Empty { context: None });
        }

        let split = input.find(|c: char| !OPERATOR_CHARS.contains(&c)).unwrap_or(input.len());
        let (token, rest) = input.split_at(split);

        if token.is_empty() {
            // Only flag a missing comparator when the remainder looks like a version.
            return match SemVer::parse(input) {
                Ok(_) => Err(VersionError::MissingOperator { input: input.to_owned(), context: None }),
                Err(err) => Err(err),
            };
        }

        let comparator = Comparator::from_token(token).ok_or_else(|| VersionError::UnknownOperator {
            token: token.to_owned(),
            input: input.to_owned(),
            context: None,
        })?;
        let target = SemVer::parse(rest)?;

        Ok(Self { comparator, target })
    }

    #[must_use]
    pub const fn comparator(&self) -> Comparator {
        self.comparator
    }

    #[must_use]
    pub const fn target(&self) -> &SemVer {
        &self.target
    }

    /// Whether `candidate` satisfies the constraint.
    ///
    /// A different major version never matches. Within the same major,
    /// versions compare by precedence (minor, patch, then prerelease).
    #[must_use]
    pub fn matches(&self, candidate: &SemVer) -> bool {
        if candidate.major() != self.target.major() {
            return false;
        }
        let ordering = candidate.cmp(&self.target);
        match self.comparator {
            Comparator::AtLeast => ordering != Ordering::Less,
            Comparator::AtMost => ordering != Ordering::Greater,
            Comparator::Exactly => ordering == Ordering::Equal,
        }
    }
}

impl fmt::Display for VersionConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.comparator, self.target)
    }
}

impl FromStr for VersionConstraint {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for VersionConstraint {
    type Error = VersionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<VersionConstraint> for String {
    fn from(value: VersionConstraint) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(text: &str) -> VersionConstraint {
        VersionConstraint::parse(text).unwrap()
    }

    fn v(text: &str) -> SemVer {
        SemVer::parse(text).unwrap()
    }

    #[test]
    fn parses_every_comparator() {
        assert_eq!(c(">=1.2.5").comparator(), Comparator::AtLeast);
        assert_eq!(c("<=1.2.5").comparator(), Comparator::AtMost);
        assert_eq!(c("=1.2.5").comparator(), Comparator::Exactly);
        assert_eq!(c(">= v1.2.5 ").target(), &SemVer::new(1, 2, 5));
    }

    #[test]
    fn bare_versions_need_a_comparator() {
        let err = VersionConstraint::parse("1.2.5").unwrap_err();
        assert!(matches!(err, VersionError::MissingOperator { .. }));
        assert_eq!(err.offending_token(), "1.2.5");
    }

    #[test]
    fn unsupported_comparators_name_the_token() {
        for (input, token) in [(">1.0.0", ">"), ("<1.0.0", "<"), ("==1.0.0", "=="), ("^1.0.0", "^"), ("~1.0.0", "~")] {
            let err = VersionConstraint::parse(input).unwrap_err();
            assert!(matches!(err, VersionError::UnknownOperator { .. }), "{input}");
            assert_eq!(err.offending_token(), token);
        }
    }

    #[test]
    fn malformed_versions_name_the_token() {
        let err = VersionConstraint::parse(">=1.x").unwrap_err();
        assert!(matches!(err, VersionError::InvalidVersion { .. }));
        assert_eq!(err.offending_token(), "1.x");

        assert!(matches!(VersionConstraint::parse("  "), Err(VersionError::Empty { .. })));
        assert!(matches!(VersionConstraint::parse("latest"), Err(VersionError::InvalidVersion { .. })));
    }

    #[test]
    fn at_least_stays_within_major() {
        let constraint = c(">=1.2.5");
        assert!(constraint.matches(&v("1.8.0")));
        assert!(constraint.matches(&v("1.2.5")));
        assert!(!constraint.matches(&v("1.2.4")));
        assert!(!constraint.matches(&v("2.0.0")));
        assert!(!constraint.matches(&v("0.9.0")));
    }

    #[test]
    fn at_most_stays_within_major() {
        let constraint = c("<=1.4.0");
        assert!(constraint.matches(&v("1.0.0")));
        assert!(constraint.matches(&v("1.4.0")));
        assert!(!constraint.matches(&v("1.4.1")));
        assert!(!constraint.matches(&v("0.1.0")));
    }

    #[test]
    fn exactly_requires_equal_precedence() {
        let constraint = c("=1.4.0");
        assert!(constraint.matches(&v("1.4.0")));
        assert!(constraint.matches(&v("1.4.0+build.7")));
        assert!(!constraint.matches(&v("1.4.0-beta")));
        assert!(!constraint.matches(&v("1.4.1")));
    }

    #[test]
    fn prereleases_rank_below_their_release() {
        assert!(!c(">=2.0.0").matches(&v("2.0.0-beta.1")));
        assert!(c(">=2.0.0-alpha").matches(&v("2.0.0-beta.1")));
        assert!(c("<=2.0.0").matches(&v("2.0.0-rc.1")));
    }

    #[test]
    fn display_round_trips() {
        for text in [">=1.2.5", "<=0.3.0", "=2.0.0-beta.1"] {
            assert_eq!(c(text).to_string(), text);
        }
    }
}
