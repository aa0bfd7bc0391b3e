use crate::package::InstalledPackage;
use mbridge_domain::{Importance, ModId};
use mbridge_version::VersionConstraint;

/// One validated entry of a mod's dependency list. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DependencyDescriptor {
    id: ModId,
    constraint: VersionConstraint,
    importance: Importance,
}

impl DependencyDescriptor {
    #[must_use]
    pub const fn new(id: ModId, constraint: VersionConstraint, importance: Importance) -> Self {
        Self { id, constraint, importance }
    }

    #[must_use]
    pub const fn id(&self) -> &ModId {
        &self.id
    }

    #[must_use]
    pub const fn constraint(&self) -> &VersionConstraint {
        &self.constraint
    }

    #[must_use]
    pub const fn importance(&self) -> Importance {
        self.importance
    }

    /// Whether a located package for this dependency is exposed to the build.
    ///
    /// `required` always links, `recommended` only with auto-fetch and
    /// `suggested` never.
    #[must_use]
    pub const fn is_linked(&self, auto_fetch: bool) -> bool {
        self.importance.links(auto_fetch)
    }
}

/// Outcome of resolving one [`DependencyDescriptor`].
///
/// `linked` implies a package is present and satisfies the constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedDependency {
    descriptor: DependencyDescriptor,
    package: Option<InstalledPackage>,
    linked: bool,
}

impl ResolvedDependency {
    pub(crate) fn located(
        descriptor: DependencyDescriptor,
        package: InstalledPackage,
        auto_fetch: bool,
    ) -> Self {
        let linked = descriptor.is_linked(auto_fetch);
        Self { descriptor, package: Some(package), linked }
    }

    pub(crate) const fn unavailable(descriptor: DependencyDescriptor) -> Self {
        Self { descriptor, package: None, linked: false }
    }

    #[must_use]
    pub const fn descriptor(&self) -> &DependencyDescriptor {
        &self.descriptor
    }

    #[must_use]
    pub const fn id(&self) -> &ModId {
        &self.descriptor.id
    }

    #[must_use]
    pub const fn package(&self) -> Option<&InstalledPackage> {
        self.package.as_ref()
    }

    /// Linked package, if any.
    #[must_use]
    pub fn linked_package(&self) -> Option<&InstalledPackage> {
        self.package.as_ref().filter(|_| self.linked)
    }

    #[must_use]
    pub const fn is_linked(&self) -> bool {
        self.linked
    }
}
