use crate::store::AttributeStore;
use mbridge_dispatch::{DispatchRegistry, EventFilter, PostResult, TypeTag};
use std::cell::RefCell;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::trace;

/// Event id prefix of attribute change notifications.
pub const ATTRIBUTE_SET_PREFIX: &str = "attribute-set/";

static NEXT_NODE_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a [`Node`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

impl NodeId {
    fn next() -> Self {
        Self(NEXT_NODE_ID.fetch_add(1, Ordering::Relaxed))
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node#{}", self.0)
    }
}

/// Payload posted after an attribute was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeSetEvent {
    pub node: NodeId,
    pub key: String,
    /// Type of the value now stored.
    pub value_type: TypeTag,
}

/// Event id announcing writes to `key`.
#[must_use]
pub fn attribute_event_id(key: &str) -> String {
    format!("{ATTRIBUTE_SET_PREFIX}{key}")
}

/// Listens to writes of one attribute key.
#[must_use]
pub fn attribute_filter(key: &str) -> EventFilter {
    EventFilter::exact(attribute_event_id(key))
}

/// Listens to writes of every attribute on every node.
#[must_use]
pub fn any_attribute_filter() -> EventFilter {
    EventFilter::prefix(ATTRIBUTE_SET_PREFIX)
}

/// A scene object carrying attributes.
///
/// Attributes live as long as the node. Access goes through `&self` and every
/// accessor returns owned data, so no borrow outlives the call: listeners and
/// code posting between reads may freely read or write the node.
pub struct Node {
    id: NodeId,
    attributes: RefCell<AttributeStore>,
    dispatch: DispatchRegistry,
}

impl Node {
    #[must_use]
    pub fn new(dispatch: DispatchRegistry) -> Self {
        Self { id: NodeId::next(), attributes: RefCell::default(), dispatch }
    }

    #[must_use]
    pub const fn id(&self) -> NodeId {
        self.id
    }

    /// Writes the attribute, then posts [`AttributeSetEvent`] on
    /// `attribute-set/<key>`.
    pub fn set_attribute<T: 'static>(&self, key: &str, value: T) -> PostResult {
        self.attributes.borrow_mut().set(key, value);

        let mut event =
            AttributeSetEvent { node: self.id, key: key.to_owned(), value_type: TypeTag::of::<T>() };
        let result = self.dispatch.post_mut(&attribute_event_id(key), &mut event);
        trace!(node = %self.id, key, listeners = result.invoked(), "Attribute set");
        result
    }

    /// Copy of the attribute, or `None` when absent or of another type.
    #[must_use]
    pub fn get_attribute<T: Clone + 'static>(&self, key: &str) -> Option<T> {
        self.attributes.borrow().get::<T>(key).cloned()
    }

    /// Removes the attribute without notifying anyone.
    pub fn remove_attribute(&self, key: &str) -> bool {
        self.attributes.borrow_mut().remove(key)
    }

    #[must_use]
    pub fn has_attribute(&self, key: &str) -> bool {
        self.attributes.borrow().contains(key)
    }

    #[must_use]
    pub fn attribute_type(&self, key: &str) -> Option<&'static str> {
        self.attributes.borrow().type_name(key)
    }

    /// Snapshot of the current keys, in unspecified order.
    #[must_use]
    pub fn attribute_keys(&self) -> Vec<String> {
        self.attributes.borrow().keys().map(str::to_owned).collect()
    }

    #[must_use]
    pub fn attribute_count(&self) -> usize {
        self.attributes.borrow().len()
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("id", &self.id)
            .field("attributes", &self.attributes)
            .finish_non_exhaustive()
    }
}
