mod build;
mod index;
mod manifest;
mod resolve;

pub use build::{BuildError, BuildErrorExt};
pub use index::{IndexError, IndexErrorExt};
pub use manifest::{ManifestError, ManifestErrorExt};
pub use resolve::{ResolveError, ResolveErrorExt, ResolveErrorKind};
