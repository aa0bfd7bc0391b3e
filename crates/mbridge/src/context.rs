use mbridge_attributes::{AttributeSetEvent, Node, attribute_filter};
use mbridge_dispatch::{DispatchRegistry, EventFilter, ListenerHandle, ListenerResult, PostResult};
use mbridge_domain::ModId;
use mbridge_kernel::keys;

/// A loaded mod's view of the dispatch registry.
///
/// Every listener registered through the context is owned by the mod and
/// removed by [`Loader::unload_mod`](crate::Loader::unload_mod).
#[derive(Debug, Clone)]
pub struct ModContext {
    id: ModId,
    dispatch: DispatchRegistry,
}

impl ModContext {
    pub(crate) const fn new(id: ModId, dispatch: DispatchRegistry) -> Self {
        Self { id, dispatch }
    }

    #[must_use]
    pub const fn id(&self) -> &ModId {
        &self.id
    }

    /// Public event id `<mod id>/<name>` for an event this mod provides.
    ///
    /// `None` when `name` is empty.
    #[must_use]
    pub fn event_id(&self, name: &str) -> Option<String> {
        keys::namespaced(self.id.as_str(), name)
    }

    /// Registers an owned listener that decides whether propagation continues.
    pub fn register<P, F>(&self, filter: impl Into<EventFilter>, callback: F) -> ListenerHandle
    where
        P: 'static,
        F: Fn(&mut P) -> ListenerResult + 'static,
    {
        self.dispatch.register_owned(self.id.as_str(), filter, callback)
    }

    /// Registers an owned listener that never stops propagation.
    pub fn listen<P, F>(&self, filter: impl Into<EventFilter>, callback: F) -> ListenerHandle
    where
        P: 'static,
        F: Fn(&mut P) + 'static,
    {
        self.register(filter, move |payload: &mut P| {
            callback(payload);
            ListenerResult::Continue
        })
    }

    /// Observes writes of one attribute key on any node.
    pub fn on_attribute<F>(&self, key: &str, callback: F) -> ListenerHandle
    where
        F: Fn(&mut AttributeSetEvent) + 'static,
    {
        self.listen(attribute_filter(key), callback)
    }

    pub fn unregister(&self, handle: ListenerHandle) -> bool {
        self.dispatch.unregister(handle)
    }

    pub fn post<P: 'static>(&self, event_id: &str, payload: P) -> PostResult {
        self.dispatch.post(event_id, payload)
    }

    /// Posts by reference so listener replies can be read back.
    pub fn post_mut<P: 'static>(&self, event_id: &str, payload: &mut P) -> PostResult {
        self.dispatch.post_mut(event_id, payload)
    }

    /// A fresh node wired to the shared registry.
    #[must_use]
    pub fn create_node(&self) -> Node {
        Node::new(self.dispatch.clone())
    }

    /// Number of live listeners owned by this mod.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.dispatch.owned_count(self.id.as_str())
    }

    #[must_use]
    pub const fn dispatch(&self) -> &DispatchRegistry {
        &self.dispatch
    }
}
