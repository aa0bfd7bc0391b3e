use crate::descriptor::{DependencyDescriptor, ResolvedDependency};
use crate::error::{IndexError, ResolveError};
use crate::index::PackageIndex;
use crate::package::{InstalledPackage, InstalledPackages};
use mbridge_domain::Importance;
use tracing::{debug, warn};

/// Resolution policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Whether `recommended` dependencies get linked.
    pub auto_fetch: bool,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self { auto_fetch: true }
    }
}

/// Maps dependency descriptors onto installed or fetched packages.
///
/// Every descriptor is resolved on its own; constraints declared by the
/// dependencies themselves are not considered. Packages fetched from the
/// index are recorded as installed, so resolving the same descriptor again
/// finds them locally.
#[derive(Debug)]
pub struct DependencyResolver<I> {
    installed: InstalledPackages,
    index: I,
    options: ResolveOptions,
}

impl<I: PackageIndex> DependencyResolver<I> {
    pub const fn new(installed: InstalledPackages, index: I, options: ResolveOptions) -> Self {
        Self { installed, index, options }
    }

    /// Resolves every descriptor in order.
    ///
    /// Stops at the first `required` dependency that cannot be located;
    /// unavailable optional dependencies come back unlinked.
    pub fn resolve(
        &mut self,
        descriptors: &[DependencyDescriptor],
    ) -> Result<Vec<ResolvedDependency>, ResolveError> {
        descriptors.iter().map(|descriptor| self.resolve_one(descriptor)).collect()
    }

    pub fn resolve_one(
        &mut self,
        descriptor: &DependencyDescriptor,
    ) -> Result<ResolvedDependency, ResolveError> {
        match self.locate(descriptor) {
            Ok(package) => {
                let resolved =
                    ResolvedDependency::located(descriptor.clone(), package, self.options.auto_fetch);
                debug!(
                    id = %descriptor.id(),
                    importance = %descriptor.importance(),
                    linked = resolved.is_linked(),
                    "Resolved dependency"
                );
                Ok(resolved)
            }
            Err(err) if descriptor.importance() == Importance::Required => Err(err),
            Err(err) => {
                warn!(
                    id = %descriptor.id(),
                    importance = %descriptor.importance(),
                    error = %err,
                    "Optional dependency unavailable, continuing unlinked"
                );
                Ok(ResolvedDependency::unavailable(descriptor.clone()))
            }
        }
    }

    #[must_use]
    pub const fn installed(&self) -> &InstalledPackages {
        &self.installed
    }

    #[must_use]
    pub const fn options(&self) -> ResolveOptions {
        self.options
    }

    #[must_use]
    pub fn into_installed(self) -> InstalledPackages {
        self.installed
    }

    fn locate(&mut self, descriptor: &DependencyDescriptor) -> Result<InstalledPackage, ResolveError> {
        let (id, constraint) = (descriptor.id(), descriptor.constraint());

        if let Some(package) = self.installed.best_match(id.as_str(), constraint) {
            debug!(%id, version = %package.version(), "Using installed package");
            return Ok(package.clone());
        }

        debug!(%id, %constraint, "No installed match, querying package index");
        match self.index.fetch(id, constraint) {
            Ok(package) if package.id() == id && constraint.matches(package.version()) => {
                self.installed.insert(package.clone());
                Ok(package)
            }
            Ok(package) => {
                debug!(
                    %id,
                    fetched = %package.id(),
                    version = %package.version(),
                    "Index returned a package outside the constraint"
                );
                Err(ResolveError::NotFound {
                    id: id.clone(),
                    constraint: constraint.clone(),
                    context: Some("index returned a non-matching package".into()),
                })
            }
            Err(IndexError::NotFound { .. }) => Err(ResolveError::NotFound {
                id: id.clone(),
                constraint: constraint.clone(),
                context: None,
            }),
            Err(source @ IndexError::Network { .. }) => Err(ResolveError::NetworkFailure {
                id: id.clone(),
                constraint: constraint.clone(),
                source,
                context: None,
            }),
        }
    }
}
