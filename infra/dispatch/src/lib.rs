//! # Dispatch
//!
//! A synchronous event registry that lets mods talk to dependencies they were
//! not linked against.
//!
//! ## Overview
//!
//! A capability provider registers listeners under a public event id such as
//! `"alpha.core/GetScore"`; consumers post a payload under the same id. The
//! registry is keyed by `(event id, payload type)`: a listener only ever sees
//! payloads of the exact type it registered for, and a mismatch on either
//! side is a silent no-op. When the provider is not installed the post simply
//! reaches nobody.
//!
//! ## Features
//!
//! * **Typed, not linked**: payloads are ordinary Rust values (tuples model
//!   argument lists); listeners get `&mut P` so they can write results back.
//! * **Ordered**: listeners run in registration order on the caller's thread.
//! * **Stoppable**: a listener may return [`ListenerResult::Stop`] to end
//!   delivery for the current post.
//! * **Re-entrant**: listeners may post, register and unregister while a post
//!   is in flight.
//! * **Owned listeners**: listeners can be tagged with a mod id and dropped in
//!   bulk when that mod unloads.
//!
//! # Example
//!
//! ```rust
//! use mbridge_dispatch::{DispatchRegistry, EventFilter, ListenerResult};
//!
//! let registry = DispatchRegistry::new();
//!
//! // Provider side.
//! registry.register(EventFilter::exact("alpha.core/Double"), |(input, output): &mut (i32, i32)| {
//!     *output = *input * 2;
//!     ListenerResult::Stop
//! });
//!
//! // Consumer side, without any static dependency on the provider.
//! let mut call = (21, 0);
//! let result = registry.post_mut("alpha.core/Double", &mut call);
//! assert!(result.is_stopped());
//! assert_eq!(call.1, 42);
//! ```

mod error;
mod event;
mod filter;
mod registry;
mod type_tag;

pub use error::{DispatchError, DispatchErrorExt};
pub use event::DispatchEvent;
pub use filter::EventFilter;
pub use registry::{DispatchRegistry, ListenerHandle, ListenerResult, PostResult};
pub use type_tag::TypeTag;
