//! # Domain Models
//!
//! Plain data shared by the loader crates: mod identifiers, dependency
//! importance, target platforms and the loader configuration tree.
//! Only `serde` is allowed here: no I/O, no logging, no resolution logic.

pub mod config;
pub mod importance;
pub mod mod_id;
pub mod platform;

pub use importance::Importance;
pub use mod_id::ModId;
pub use platform::Platform;
