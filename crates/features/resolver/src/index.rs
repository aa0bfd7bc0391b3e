use crate::error::IndexError;
use crate::package::{InstalledPackage, InstalledPackages};
use mbridge_domain::ModId;
use mbridge_version::VersionConstraint;
use std::borrow::Cow;
use std::cell::Cell;

/// Remote source of packages, consulted when nothing installed satisfies a
/// constraint.
///
/// Implementations download and unpack as needed; the call may block.
pub trait PackageIndex {
    fn fetch(
        &self,
        id: &ModId,
        constraint: &VersionConstraint,
    ) -> Result<InstalledPackage, IndexError>;
}

impl<I: PackageIndex + ?Sized> PackageIndex for &I {
    fn fetch(
        &self,
        id: &ModId,
        constraint: &VersionConstraint,
    ) -> Result<InstalledPackage, IndexError> {
        (**self).fetch(id, constraint)
    }
}

impl<I: PackageIndex + ?Sized> PackageIndex for Box<I> {
    fn fetch(
        &self,
        id: &ModId,
        constraint: &VersionConstraint,
    ) -> Result<InstalledPackage, IndexError> {
        (**self).fetch(id, constraint)
    }
}

/// Index that never has anything: resolution uses installed packages only.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineIndex;

impl PackageIndex for OfflineIndex {
    fn fetch(
        &self,
        id: &ModId,
        constraint: &VersionConstraint,
    ) -> Result<InstalledPackage, IndexError> {
        Err(IndexError::NotFound {
            id: id.to_string(),
            constraint: constraint.to_string(),
            context: Some(Cow::Borrowed("offline")),
        })
    }
}

/// In-memory index serving a fixed package set.
///
/// Counts fetch requests, and can be switched to failing every request with
/// [`IndexError::Network`].
#[derive(Debug, Default)]
pub struct StaticIndex {
    packages: InstalledPackages,
    unreachable: bool,
    requests: Cell<usize>,
}

impl StaticIndex {
    #[must_use]
    pub fn new(packages: impl IntoIterator<Item = InstalledPackage>) -> Self {
        Self { packages: packages.into_iter().collect(), ..Self::default() }
    }

    /// An index whose every fetch fails as a network error.
    #[must_use]
    pub fn unreachable() -> Self {
        Self { unreachable: true, ..Self::default() }
    }

    /// Number of `fetch` calls served so far.
    #[must_use]
    pub fn requests(&self) -> usize {
        self.requests.get()
    }
}

impl PackageIndex for StaticIndex {
    fn fetch(
        &self,
        id: &ModId,
        constraint: &VersionConstraint,
    ) -> Result<InstalledPackage, IndexError> {
        self.requests.set(self.requests.get() + 1);

        if self.unreachable {
            return Err(IndexError::Network {
                id: id.to_string(),
                message: Cow::Borrowed("index marked unreachable"),
                context: None,
            });
        }

        self.packages.best_match(id.as_str(), constraint).cloned().ok_or_else(|| {
            IndexError::NotFound {
                id: id.to_string(),
                constraint: constraint.to_string(),
                context: None,
            }
        })
    }
}
