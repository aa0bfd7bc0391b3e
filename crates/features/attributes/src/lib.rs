//! # Attributes
//!
//! Shared state between mods that do not link against each other.
//!
//! An [`AttributeStore`] maps string keys to values of any `'static` type.
//! Each value remembers its [`TypeTag`](mbridge_dispatch::TypeTag), so a read
//! with the wrong type is a miss rather than a bad cast. Keys follow the
//! `<mod id>/<name>` convention.
//!
//! A [`Node`] owns a store and announces every write on the dispatch registry
//! under `attribute-set/<key>`:
//!
//! ```rust
//! use mbridge_attributes::{AttributeSetEvent, Node, attribute_filter};
//! use mbridge_dispatch::DispatchRegistry;
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! let registry = DispatchRegistry::new();
//! let seen = Rc::new(Cell::new(0));
//! let counter = Rc::clone(&seen);
//! registry.listen(attribute_filter("alpha.core/Score"), move |_: &mut AttributeSetEvent| {
//!     counter.set(counter.get() + 1);
//! });
//!
//! let node = Node::new(registry);
//! node.set_attribute("alpha.core/Score", 42_i64);
//!
//! assert_eq!(node.get_attribute::<i64>("alpha.core/Score"), Some(42));
//! assert_eq!(node.get_attribute::<i32>("alpha.core/Score"), None);
//! assert_eq!(seen.get(), 1);
//! ```

mod node;
mod store;

pub use node::{
    ATTRIBUTE_SET_PREFIX, AttributeSetEvent, Node, NodeId, any_attribute_filter,
    attribute_event_id, attribute_filter,
};
pub use store::AttributeStore;
