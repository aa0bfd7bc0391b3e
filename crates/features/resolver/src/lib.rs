//! # Dependency Resolution
//!
//! Turns the dependency list of a mod manifest into concrete packages and a
//! build plan.
//!
//! 1. [`ModManifest`] parses and validates the manifest into
//!    [`DependencyDescriptor`]s.
//! 2. [`DependencyResolver`] maps every descriptor independently onto an
//!    installed package, falling back to a [`PackageIndex`] fetch, and decides
//!    whether the dependency is linked.
//! 3. [`BuildPlan`] lists the include directory, link set and soft
//!    dependencies for the build tool; [`BuildPlan::materialize`] lays the
//!    linked packages out on disk.
//!
//! Unresolvable `required` dependencies are fatal. `recommended` and
//! `suggested` ones degrade to unlinked, so the declaring mod has to reach
//! them through dispatch events and attributes instead.
//!
//! ```rust
//! use mbridge_resolver::{
//!     DependencyResolver, InstalledPackage, InstalledPackages, ModManifest, OfflineIndex,
//!     ResolveOptions,
//! };
//!
//! let manifest = ModManifest::from_json(
//!     r#"{
//!         "id": "beta.ui",
//!         "version": "1.0.0",
//!         "dependencies": [
//!             { "id": "alpha.core", "version": ">=1.2.0" },
//!             { "id": "gamma.stats", "version": ">=0.4.0", "importance": "suggested" }
//!         ]
//!     }"#,
//! )
//! .unwrap();
//!
//! let installed: InstalledPackages =
//!     [InstalledPackage::new("alpha.core".parse().unwrap(), "1.4.2".parse().unwrap())]
//!         .into_iter()
//!         .collect();
//!
//! let mut resolver = DependencyResolver::new(installed, OfflineIndex, ResolveOptions::default());
//! let resolved = resolver.resolve(&manifest.descriptors().unwrap()).unwrap();
//!
//! assert!(resolved[0].is_linked());
//! assert!(!resolved[1].is_linked());
//! assert!(resolved[1].package().is_none());
//! ```

mod build;
mod descriptor;
mod error;
mod index;
mod manifest;
mod package;
mod resolver;

pub use build::{BuildLayout, BuildPlan};
pub use descriptor::{DependencyDescriptor, ResolvedDependency};
pub use error::{
    BuildError, BuildErrorExt, IndexError, IndexErrorExt, ManifestError, ManifestErrorExt,
    ResolveError, ResolveErrorExt, ResolveErrorKind,
};
pub use index::{OfflineIndex, PackageIndex, StaticIndex};
pub use manifest::{DependencyEntry, ModManifest};
pub use package::{InstalledPackage, InstalledPackages};
pub use resolver::{DependencyResolver, ResolveOptions};
