//! Kernel utilities shared across the loader crates.
//! Keep this crate lightweight: it hosts config loading and the public key conventions
//! that providers and consumers agree on without linking against each other.
//!
//! ## Namespaced keys
//! ```rust
//! use mbridge_kernel::keys::{namespaced, split_namespaced};
//!
//! let key = namespaced("alpha.core", "Score").unwrap();
//! assert_eq!(key, "alpha.core/Score");
//! assert_eq!(split_namespaced(&key), Some(("alpha.core", "Score")));
//! ```
//!
//! ## Config loading
//! ```rust,ignore
//! use mbridge_kernel::config::load_config;
//! use mbridge_domain::config::LoaderConfig;
//!
//! let cfg: LoaderConfig = load_config(Some("loader.toml")).unwrap();
//! ```

pub mod config;
pub mod keys;

pub use mbridge_domain as domain;
