use crate::error::VersionError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// A semantic version: `major.minor.patch` with an optional prerelease tag.
///
/// Ordering and equality follow semver precedence: numeric components first,
/// then prerelease identifiers, where a release outranks any of its
/// prereleases. Build metadata is kept for display but never compared.
#[derive(Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SemVer(semver::Version);

impl SemVer {
    #[must_use]
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self(semver::Version::new(major, minor, patch))
    }

    /// Parses `X.Y.Z[-pre][+build]`, tolerating a leading `v`.
    ///
    /// # Errors
    /// [`VersionError::InvalidVersion`] naming the rejected text.
    pub fn parse(text: &str) -> Result<Self, VersionError> {
        let token = text.trim();
        let digits = token
            .strip_prefix(['v', 'V'])
            .filter(|rest| rest.starts_with(|c: char| c.is_ascii_digit()))
            .unwrap_or(token);

        semver::Version::parse(digits).map(Self).map_err(|source| VersionError::InvalidVersion {
            token: token.to_owned(),
            source,
            context: None,
        })
    }

    #[must_use]
    pub const fn major(&self) -> u64 {
        self.0.major
    }

    #[must_use]
    pub const fn minor(&self) -> u64 {
        self.0.minor
    }

    #[must_use]
    pub const fn patch(&self) -> u64 {
        self.0.patch
    }

    /// The prerelease tag, e.g. `beta.2`, if any.
    #[must_use]
    pub fn prerelease(&self) -> Option<&str> {
        (!self.0.pre.is_empty()).then(|| self.0.pre.as_str())
    }

    #[must_use]
    pub fn is_prerelease(&self) -> bool {
        !self.0.pre.is_empty()
    }

    /// Same numbers with a prerelease tag attached.
    ///
    /// # Errors
    /// [`VersionError::InvalidVersion`] if `tag` is not a valid prerelease.
    pub fn with_prerelease(&self, tag: &str) -> Result<Self, VersionError> {
        let pre = semver::Prerelease::new(tag).map_err(|source| VersionError::InvalidVersion {
            token: tag.to_owned(),
            source,
            context: Some("prerelease tag".into()),
        })?;
        let mut inner = self.0.clone();
        inner.pre = pre;
        Ok(Self(inner))
    }

    #[must_use]
    pub const fn as_semver(&self) -> &semver::Version {
        &self.0
    }
}

impl Ord for SemVer {
    fn cmp(&self, other: &Self) -> Ordering {
        let (a, b) = (&self.0, &other.0);
        (a.major, a.minor, a.patch).cmp(&(b.major, b.minor, b.patch)).then_with(|| a.pre.cmp(&b.pre))
    }
}

impl PartialOrd for SemVer {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for SemVer {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SemVer {}

impl Hash for SemVer {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let v = &self.0;
        (v.major, v.minor, v.patch, v.pre.as_str()).hash(state);
    }
}

impl fmt::Debug for SemVer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SemVer({})", self.0)
    }
}

impl fmt::Display for SemVer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for SemVer {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for SemVer {
    type Error = VersionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<SemVer> for String {
    fn from(value: SemVer) -> Self {
        value.to_string()
    }
}

impl From<semver::Version> for SemVer {
    fn from(value: semver::Version) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(text: &str) -> SemVer {
        SemVer::parse(text).unwrap()
    }

    #[test]
    fn parses_plain_and_prefixed_versions() {
        assert_eq!(v("1.2.3"), SemVer::new(1, 2, 3));
        assert_eq!(v("v1.2.3"), SemVer::new(1, 2, 3));
        assert_eq!(v(" 0.4.0 ").to_string(), "0.4.0");
        assert_eq!(v("2.0.0-beta.1").prerelease(), Some("beta.1"));
    }

    #[test]
    fn rejects_partial_versions() {
        for bad in ["1.2", "", "vv1.0.0", "1.2.x", "latest"] {
            let err = SemVer::parse(bad).unwrap_err();
            assert!(matches!(err, VersionError::InvalidVersion { .. }), "{bad} should fail");
        }
    }

    #[test]
    fn ordering_follows_precedence() {
        assert!(v("1.2.10") > v("1.2.9"));
        assert!(v("1.10.0") > v("1.9.99"));
        assert!(v("2.0.0-alpha") < v("2.0.0"));
        assert!(v("2.0.0-alpha") < v("2.0.0-beta"));
        assert!(v("1.0.0-rc.2") < v("1.0.0-rc.10"));
    }

    #[test]
    fn build_metadata_is_ignored_for_equality() {
        assert_eq!(v("1.0.0+linux"), v("1.0.0+windows"));
        assert_eq!(v("1.0.0+linux").to_string(), "1.0.0+linux");
    }

    #[test]
    fn with_prerelease_keeps_numbers() {
        let pre = SemVer::new(3, 1, 0).with_prerelease("rc.1").unwrap();
        assert_eq!(pre.to_string(), "3.1.0-rc.1");
        assert!(pre.is_prerelease());
        assert!(SemVer::new(3, 1, 0).with_prerelease("bad tag").is_err());
    }
}
