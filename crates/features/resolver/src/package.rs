use fxhash::FxHashMap;
use mbridge_domain::ModId;
use mbridge_version::{SemVer, VersionConstraint};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A dependency package available on this machine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstalledPackage {
    id: ModId,
    version: SemVer,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    include_dir: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    binaries: Vec<PathBuf>,
}

impl InstalledPackage {
    #[must_use]
    pub const fn new(id: ModId, version: SemVer) -> Self {
        Self { id, version, include_dir: None, binaries: Vec::new() }
    }

    /// Sets the root of the package's header tree.
    #[must_use]
    pub fn with_include_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.include_dir = Some(dir.into());
        self
    }

    /// Adds a prebuilt binary shipped by the package.
    #[must_use]
    pub fn with_binary(mut self, path: impl Into<PathBuf>) -> Self {
        self.binaries.push(path.into());
        self
    }

    #[must_use]
    pub const fn id(&self) -> &ModId {
        &self.id
    }

    #[must_use]
    pub const fn version(&self) -> &SemVer {
        &self.version
    }

    #[must_use]
    pub fn include_dir(&self) -> Option<&Path> {
        self.include_dir.as_deref()
    }

    #[must_use]
    pub fn binaries(&self) -> &[PathBuf] {
        &self.binaries
    }

    /// The binary whose file name is exactly `file_name`, if shipped.
    #[must_use]
    pub fn binary_named(&self, file_name: &str) -> Option<&Path> {
        self.binaries
            .iter()
            .map(PathBuf::as_path)
            .find(|path| path.file_name().is_some_and(|name| name == file_name))
    }
}

/// Installed packages grouped by id.
///
/// Package storage normally keeps one version per id; several are tolerated
/// and the highest satisfying one wins.
#[derive(Debug, Clone, Default)]
pub struct InstalledPackages {
    packages: FxHashMap<ModId, Vec<InstalledPackage>>,
}

impl InstalledPackages {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `package`, replacing an entry with the same id and version.
    pub fn insert(&mut self, package: InstalledPackage) {
        let versions = self.packages.entry(package.id.clone()).or_default();
        match versions.iter_mut().find(|known| known.version == package.version) {
            Some(known) => *known = package,
            None => versions.push(package),
        }
    }

    /// Every installed version of `id`, in insertion order.
    #[must_use]
    pub fn versions_of(&self, id: &str) -> &[InstalledPackage] {
        self.packages.get(id).map_or(&[], Vec::as_slice)
    }

    /// Highest installed version of `id` that satisfies `constraint`.
    #[must_use]
    pub fn best_match(&self, id: &str, constraint: &VersionConstraint) -> Option<&InstalledPackage> {
        self.versions_of(id)
            .iter()
            .filter(|package| constraint.matches(&package.version))
            .max_by(|a, b| a.version.cmp(&b.version))
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.packages.contains_key(id)
    }

    /// Total number of installed packages across all ids.
    #[must_use]
    pub fn len(&self) -> usize {
        self.packages.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &InstalledPackage> {
        self.packages.values().flatten()
    }
}

impl FromIterator<InstalledPackage> for InstalledPackages {
    fn from_iter<I: IntoIterator<Item = InstalledPackage>>(iter: I) -> Self {
        let mut packages = Self::new();
        packages.extend(iter);
        packages
    }
}

impl Extend<InstalledPackage> for InstalledPackages {
    fn extend<I: IntoIterator<Item = InstalledPackage>>(&mut self, iter: I) {
        for package in iter {
            self.insert(package);
        }
    }
}
