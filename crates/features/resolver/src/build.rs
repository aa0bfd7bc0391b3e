use crate::descriptor::ResolvedDependency;
use crate::error::{BuildError, BuildErrorExt};
use mbridge_domain::config::LoaderConfig;
use mbridge_domain::{ModId, Platform};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

/// Where linked dependencies are laid out for a build.
///
/// Dependency `<id>` lives in `<deps_root>/<id>`, so adding `deps_root` to
/// the include path makes its headers reachable as `<id>/...`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildLayout {
    deps_root: PathBuf,
    platform: Platform,
}

impl BuildLayout {
    #[must_use]
    pub fn new(deps_root: impl Into<PathBuf>, platform: Platform) -> Self {
        Self { deps_root: deps_root.into(), platform }
    }

    #[must_use]
    pub fn from_config(config: &LoaderConfig) -> Self {
        Self::new(config.dependencies_dir.clone(), config.platform)
    }

    #[must_use]
    pub fn deps_root(&self) -> &Path {
        &self.deps_root
    }

    #[must_use]
    pub const fn platform(&self) -> Platform {
        self.platform
    }

    #[must_use]
    pub fn dependency_dir(&self, id: &ModId) -> PathBuf {
        self.deps_root.join(id.as_str())
    }
}

/// What the build tool needs to compile and link a mod.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildPlan {
    include_dirs: Vec<PathBuf>,
    link: Vec<PathBuf>,
    soft: Vec<ModId>,
}

impl BuildPlan {
    /// Plans the build without touching the filesystem.
    ///
    /// Link entries point at the materialized location
    /// `<deps_root>/<id>/<artifact>` and only exist for packages shipping a
    /// binary named after the layout's platform.
    #[must_use]
    pub fn from_resolved(layout: &BuildLayout, resolved: &[ResolvedDependency]) -> Self {
        let mut plan = Self::default();

        for dependency in resolved {
            let Some(package) = dependency.linked_package() else {
                plan.soft.push(dependency.id().clone());
                continue;
            };

            let artifact = layout.platform.artifact_name(package.id().as_str());
            if package.binary_named(&artifact).is_some() {
                plan.link.push(layout.dependency_dir(package.id()).join(artifact));
            }
        }

        if resolved.iter().any(ResolvedDependency::is_linked) {
            plan.include_dirs.push(layout.deps_root.clone());
        }

        plan
    }

    /// Copies include trees and platform binaries of linked packages into
    /// their dependency directories.
    ///
    /// Each dependency directory is emptied first, so nothing from a
    /// previously materialized version survives. Returns the number of files
    /// written.
    pub fn materialize(
        layout: &BuildLayout,
        resolved: &[ResolvedDependency],
    ) -> Result<usize, BuildError> {
        let mut written = 0;

        for package in resolved.iter().filter_map(ResolvedDependency::linked_package) {
            let target = layout.dependency_dir(package.id());
            if target.exists() {
                fs::remove_dir_all(&target)
                    .context(format!("Failed to clear {}", target.display()))?;
            }
            fs::create_dir_all(&target)
                .context(format!("Failed to create {}", target.display()))?;

            if let Some(include) = package.include_dir() {
                written += copy_tree(include, &target)?;
            }

            let artifact = layout.platform.artifact_name(package.id().as_str());
            if let Some(binary) = package.binary_named(&artifact) {
                fs::copy(binary, target.join(&artifact))
                    .context(format!("Failed to copy {}", binary.display()))?;
                written += 1;
            }

            debug!(id = %package.id(), target = %target.display(), "Materialized dependency");
        }

        info!(root = %layout.deps_root.display(), files = written, "Dependencies materialized");
        Ok(written)
    }

    #[must_use]
    pub fn include_dirs(&self) -> &[PathBuf] {
        &self.include_dirs
    }

    /// Binaries to link against.
    #[must_use]
    pub fn link(&self) -> &[PathBuf] {
        &self.link
    }

    /// Dependencies left unlinked, reachable only through dispatch.
    #[must_use]
    pub fn soft(&self) -> &[ModId] {
        &self.soft
    }
}

fn copy_tree(source: &Path, target: &Path) -> Result<usize, BuildError> {
    let mut copied = 0;

    for entry in WalkDir::new(source).min_depth(1) {
        let entry = entry.context(format!("while copying {}", source.display()))?;
        let Ok(relative) = entry.path().strip_prefix(source) else {
            continue;
        };
        let destination = target.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&destination)
                .context(format!("Failed to create {}", destination.display()))?;
        } else if entry.file_type().is_file() {
            fs::copy(entry.path(), &destination)
                .context(format!("Failed to copy {}", entry.path().display()))?;
            copied += 1;
        }
    }

    Ok(copied)
}
