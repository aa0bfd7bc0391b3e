//! # Versions
//!
//! Semantic versions and the constraint language used in mod manifests.
//!
//! A constraint is an explicit comparator followed by a version:
//! `>=1.2.0`, `<=2.4.1` or `=1.0.0-beta.2`. Matching is **major-gated**: a
//! candidate with a different major version never satisfies a constraint,
//! whatever the comparator says about the numbers, because a major bump is a
//! breaking change for every mod that links against the dependency.
//!
//! ```rust
//! use mbridge_version::{SemVer, VersionConstraint};
//!
//! let constraint: VersionConstraint = ">=1.2.5".parse().unwrap();
//! assert!(constraint.matches(&SemVer::new(1, 8, 0)));
//! assert!(!constraint.matches(&SemVer::new(2, 0, 0)));
//! ```

mod constraint;
mod error;
mod version;

pub use constraint::{Comparator, VersionConstraint};
pub use error::{VersionError, VersionErrorExt};
pub use version::SemVer;
