//! Facade crate for `ModBridge`.
//! Re-exports the shared and feature crates and owns the loader lifecycle.
//! Keep this crate thin: it composes the other crates, it does not implement resolution or dispatch.
//!
//! ## Usage
//! ```rust
//! use mbridge::{Loader, ModManifest, OfflineIndex};
//! use mbridge::domain::config::LoaderConfig;
//!
//! let mut loader = Loader::init(LoaderConfig::default());
//! let manifest = ModManifest::from_json(r#"{ "id": "alpha.core", "version": "1.0.0" }"#).unwrap();
//!
//! let prepared = loader.prepare_mod(&manifest, OfflineIndex).unwrap();
//! assert!(prepared.plan().link().is_empty());
//!
//! let context = loader.load_mod(&manifest).unwrap();
//! context.listen("alpha.core/Ping", |count: &mut u32| *count += 1);
//! assert_eq!(loader.unload_mod("alpha.core"), 1);
//! loader.shutdown();
//! ```

mod context;
mod error;
mod loader;
mod logging;

pub use context::ModContext;
pub use error::{LoaderError, LoaderErrorExt};
pub use loader::{Loader, PreparedMod};
pub use logging::init_logging;

pub use mbridge_attributes as attributes;
pub use mbridge_dispatch as dispatch;
pub use mbridge_domain as domain;
pub use mbridge_kernel as kernel;
pub use mbridge_logger as logger;
pub use mbridge_resolver as resolver;
pub use mbridge_version as version;

pub use mbridge_resolver::{ModManifest, OfflineIndex, PackageIndex, StaticIndex};
