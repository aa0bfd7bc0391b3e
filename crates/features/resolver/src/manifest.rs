use crate::descriptor::DependencyDescriptor;
use crate::error::{ManifestError, ManifestErrorExt};
use fxhash::FxHashSet;
use mbridge_domain::{Importance, ModId};
use mbridge_version::{SemVer, VersionConstraint};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Dependency entry exactly as written in a manifest.
///
/// Nothing is validated until [`ModManifest::descriptors`] runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyEntry {
    pub id: String,
    /// Constraint text such as `>=1.2.0`.
    pub version: String,
    #[serde(default)]
    pub importance: Importance,
}

#[derive(Deserialize)]
struct RawManifest {
    id: String,
    version: SemVer,
    #[serde(default)]
    dependencies: Vec<DependencyEntry>,
}

/// The part of a mod manifest the loader cares about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModManifest {
    id: ModId,
    version: SemVer,
    dependencies: Vec<DependencyEntry>,
}

impl ModManifest {
    #[must_use]
    pub const fn new(id: ModId, version: SemVer) -> Self {
        Self { id, version, dependencies: Vec::new() }
    }

    /// Appends a dependency entry without validating it.
    #[must_use]
    pub fn with_dependency(
        mut self,
        id: impl Into<String>,
        version: impl Into<String>,
        importance: Importance,
    ) -> Self {
        self.dependencies.push(DependencyEntry {
            id: id.into(),
            version: version.into(),
            importance,
        });
        self
    }

    /// Parses manifest JSON; only the mod's own id is validated here.
    pub fn from_json(text: &str) -> Result<Self, ManifestError> {
        let raw: RawManifest = serde_json::from_str(text)?;
        let id = ModId::new(raw.id.as_str())
            .ok_or_else(|| ManifestError::InvalidId { id: raw.id.clone(), context: None })?;

        Ok(Self { id, version: raw.version, dependencies: raw.dependencies })
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ManifestError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .context(format!("Failed to read manifest {}", path.display()))?;

        Self::from_json(&text).map_err(|err| match err {
            ManifestError::Json { source, .. } => ManifestError::Json {
                source,
                context: Some(format!("in {}", path.display()).into()),
            },
            other => other,
        })
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
    pub fn dependencies(&self) -> &[DependencyEntry] {
        &self.dependencies
    }

    /// Validates every dependency entry and builds the descriptors, in
    /// declaration order.
    ///
    /// The first invalid entry fails the whole manifest.
    pub fn descriptors(&self) -> Result<Vec<DependencyDescriptor>, ManifestError> {
        let mut seen = FxHashSet::default();
        let mut descriptors = Vec::with_capacity(self.dependencies.len());

        for entry in &self.dependencies {
            let id = ModId::new(entry.id.as_str()).ok_or_else(|| ManifestError::InvalidId {
                id: entry.id.clone(),
                context: Some(format!("dependency of {}", self.id).into()),
            })?;

            if id == self.id {
                return Err(ManifestError::SelfDependency { id: entry.id.clone(), context: None });
            }
            if !seen.insert(id.clone()) {
                return Err(ManifestError::DuplicateDependency {
                    id: entry.id.clone(),
                    context: Some(format!("in {}", self.id).into()),
                });
            }

            let constraint = VersionConstraint::parse(&entry.version).map_err(|source| {
                ManifestError::InvalidConstraint {
                    dependency: entry.id.clone(),
                    token: source.offending_token().to_owned(),
                    source,
                    context: None,
                }
            })?;

            descriptors.push(DependencyDescriptor::new(id, constraint, entry.importance));
        }

        debug!(mod_id = %self.id, count = descriptors.len(), "Validated dependency list");
        Ok(descriptors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn importance_defaults_to_required() {
        let manifest = ModManifest::from_json(
            r#"{"id":"beta.ui","version":"1.0.0","dependencies":[{"id":"alpha.core","version":">=1.0.0"}]}"#,
        )
        .unwrap();

        let descriptors = manifest.descriptors().unwrap();
        assert_eq!(descriptors[0].importance(), Importance::Required);
        assert!(descriptors[0].is_linked(false));
    }

    #[test]
    fn dependencies_are_optional() {
        let manifest = ModManifest::from_json(r#"{"id":"beta.ui","version":"v2.1.0"}"#).unwrap();
        assert!(manifest.descriptors().unwrap().is_empty());
        assert_eq!(manifest.version().to_string(), "2.1.0");
    }
}
