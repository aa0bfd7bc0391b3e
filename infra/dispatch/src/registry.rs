use crate::filter::EventFilter;
use crate::type_tag::TypeTag;
use fxhash::FxHashMap;
use std::any::Any;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::marker::PhantomData;
use std::rc::Rc;
use tracing::{debug, trace, warn};

/// What a listener wants to happen after it ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerResult {
    /// Keep delivering to the remaining listeners.
    Continue,
    /// Stop delivery for the current post only.
    Stop,
}

/// Outcome of a single post.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PostResult {
    stopped: bool,
    invoked: usize,
}

impl PostResult {
    /// Whether a listener returned [`ListenerResult::Stop`].
    #[must_use]
    pub const fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Number of listeners that actually ran.
    #[must_use]
    pub const fn invoked(&self) -> usize {
        self.invoked
    }

    /// Whether anybody received the payload.
    #[must_use]
    pub const fn was_handled(&self) -> bool {
        self.invoked > 0
    }
}

/// Identifies a registered listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerHandle(u64);

trait ErasedCallback {
    fn call(&self, payload: &mut dyn Any) -> Option<ListenerResult>;
}

struct TypedCallback<P, F> {
    callback: F,
    payload: PhantomData<fn(&mut P)>,
}

impl<P, F> ErasedCallback for TypedCallback<P, F>
where
    P: 'static,
    F: Fn(&mut P) -> ListenerResult,
{
    fn call(&self, payload: &mut dyn Any) -> Option<ListenerResult> {
        payload.downcast_mut::<P>().map(|payload| (self.callback)(payload))
    }
}

struct Listener {
    handle: ListenerHandle,
    owner: Option<String>,
    filter: EventFilter,
    tag: TypeTag,
    active: Cell<bool>,
    callback: Box<dyn ErasedCallback>,
}

impl fmt::Debug for Listener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listener")
            .field("handle", &self.handle)
            .field("owner", &self.owner)
            .field("filter", &self.filter)
            .field("tag", &self.tag)
            .field("active", &self.active.get())
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Default)]
struct RegistryState {
    listeners: Vec<Rc<Listener>>,
    /// Payload type declared by the first listener of each exact event id.
    signatures: FxHashMap<String, TypeTag>,
    next_handle: u64,
}

impl RegistryState {
    fn detach(&mut self, keep: impl Fn(&Listener) -> bool) -> usize {
        let before = self.listeners.len();
        self.listeners.retain(|listener| {
            let retained = keep(listener);
            if !retained {
                listener.active.set(false);
            }
            retained
        });

        let removed = before - self.listeners.len();
        if removed > 0 {
            // A signature follows the oldest remaining exact listener of its id.
            let listeners = &self.listeners;
            self.signatures.retain(|id, tag| {
                match listeners.iter().find(|listener| listener.filter.exact_id() == Some(id.as_str())) {
                    Some(first) => {
                        *tag = first.tag;
                        true
                    },
                    None => false,
                }
            });
        }
        removed
    }
}

/// Process-wide listener table for optional-dependency calls.
///
/// The registry is a cheap, clonable handle over single-threaded shared state.
/// It is created explicitly by the loader at startup and handed to every mod;
/// clones observe the same listeners.
///
/// Delivery runs over a snapshot of the matching listeners taken when the
/// post starts, so listeners may freely register, unregister or post again
/// from inside a callback.
#[derive(Debug, Clone, Default)]
pub struct DispatchRegistry {
    state: Rc<RefCell<RegistryState>>,
}

impl DispatchRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a listener for payloads of type `P` on every id matched by `filter`.
    ///
    /// A listener whose type differs from what posters send is never invoked.
    /// Conflicting types on the same exact id are accepted but reported at `warn`.
    ///
    /// # Examples
    /// ```rust
    /// use mbridge_dispatch::{DispatchRegistry, EventFilter, ListenerResult};
    ///
    /// let registry = DispatchRegistry::new();
    /// let handle = registry.register(EventFilter::prefix("alpha.core/"), |name: &mut String| {
    ///     name.push_str(" seen");
    ///     ListenerResult::Continue
    /// });
    ///
    /// let mut name = String::from("ping");
    /// registry.post_mut("alpha.core/Ping", &mut name);
    /// assert_eq!(name, "ping seen");
    /// assert!(registry.unregister(handle));
    /// ```
    pub fn register<P, F>(&self, filter: impl Into<EventFilter>, callback: F) -> ListenerHandle
    where
        P: 'static,
        F: Fn(&mut P) -> ListenerResult + 'static,
    {
        self.insert(None, filter.into(), callback)
    }

    /// Same as [`DispatchRegistry::register`], tagging the listener with the mod
    /// that owns it so [`DispatchRegistry::unregister_owner`] can remove it.
    pub fn register_owned<P, F>(
        &self,
        owner: impl Into<String>,
        filter: impl Into<EventFilter>,
        callback: F,
    ) -> ListenerHandle
    where
        P: 'static,
        F: Fn(&mut P) -> ListenerResult + 'static,
    {
        self.insert(Some(owner.into()), filter.into(), callback)
    }

    /// Registers a listener that never stops propagation.
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

    /// Posts `payload` to every matching listener of the same payload type.
    pub fn post<P: 'static>(&self, event_id: &str, mut payload: P) -> PostResult {
        self.post_mut(event_id, &mut payload)
    }

    /// Posts a payload by reference, so values written by listeners remain
    /// visible to the caller afterwards.
    pub fn post_mut<P: 'static>(&self, event_id: &str, payload: &mut P) -> PostResult {
        let tag = TypeTag::of::<P>();
        let snapshot: Vec<Rc<Listener>> = {
            let state = self.state.borrow();
            if let Some(expected) = state.signatures.get(event_id)
                && *expected != tag
            {
                trace!(
                    event = event_id,
                    posted = tag.name(),
                    expected = expected.name(),
                    "Posted payload type differs from registered listeners"
                );
            }
            state
                .listeners
                .iter()
                .filter(|listener| listener.filter.matches(event_id))
                .cloned()
                .collect()
        };

        let mut result = PostResult::default();
        for listener in snapshot {
            // Unregistered after the snapshot was taken, possibly by an earlier listener.
            if !listener.active.get() {
                continue;
            }
            if listener.tag != tag {
                trace!(
                    event = event_id,
                    listener = listener.handle.0,
                    expected = listener.tag.name(),
                    posted = tag.name(),
                    "Skipping listener with mismatched payload type"
                );
                continue;
            }
            let Some(outcome) = listener.callback.call(payload) else {
                continue;
            };
            result.invoked += 1;
            if outcome == ListenerResult::Stop {
                trace!(event = event_id, listener = listener.handle.0, "Propagation stopped");
                result.stopped = true;
                break;
            }
        }

        trace!(event = event_id, invoked = result.invoked, "Event dispatched");
        result
    }

    /// Removes a listener. Safe to call from inside any callback, including the
    /// listener's own; it will not run again, not even later in an in-flight post.
    ///
    /// Returns `false` if the handle was unknown or already removed.
    pub fn unregister(&self, handle: ListenerHandle) -> bool {
        let removed = self.state.borrow_mut().detach(|listener| listener.handle != handle);
        removed > 0
    }

    /// Removes every listener registered by `owner` (mod unload).
    pub fn unregister_owner(&self, owner: &str) -> usize {
        let removed =
            self.state.borrow_mut().detach(|listener| listener.owner.as_deref() != Some(owner));
        if removed > 0 {
            debug!(owner, removed, "Removed listeners of unloaded owner");
        }
        removed
    }

    #[must_use]
    pub fn is_registered(&self, handle: ListenerHandle) -> bool {
        self.state.borrow().listeners.iter().any(|listener| listener.handle == handle)
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.state.borrow().listeners.len()
    }

    /// Payload type expected on `event_id`, as declared by its oldest
    /// remaining exact listener.
    #[must_use]
    pub fn payload_type(&self, event_id: &str) -> Option<TypeTag> {
        self.state.borrow().signatures.get(event_id).copied()
    }

    /// Number of listeners owned by `owner`.
    #[must_use]
    pub fn owned_count(&self, owner: &str) -> usize {
        self.state
            .borrow()
            .listeners
            .iter()
            .filter(|listener| listener.owner.as_deref() == Some(owner))
            .count()
    }

    /// Drops every listener and forgets known signatures.
    ///
    /// Returns the number of listeners removed.
    #[must_use]
    pub fn shutdown(&self) -> usize {
        let mut state = self.state.borrow_mut();
        state.signatures.clear();
        state.detach(|_| false)
    }

    fn insert<P, F>(&self, owner: Option<String>, filter: EventFilter, callback: F) -> ListenerHandle
    where
        P: 'static,
        F: Fn(&mut P) -> ListenerResult + 'static,
    {
        let tag = TypeTag::of::<P>();
        let mut state = self.state.borrow_mut();

        if let Some(id) = filter.exact_id() {
            match state.signatures.get(id).copied() {
                Some(existing) if existing != tag => warn!(
                    event = id,
                    existing = existing.name(),
                    requested = tag.name(),
                    "Listener payload type conflicts with earlier listeners; it only receives matching posts"
                ),
                Some(_) => {},
                None => {
                    state.signatures.insert(id.to_owned(), tag);
                },
            }
        }

        let handle = ListenerHandle(state.next_handle);
        state.next_handle += 1;
        trace!(listener = handle.0, %filter, payload = tag.name(), ?owner, "Listener registered");

        state.listeners.push(Rc::new(Listener {
            handle,
            owner,
            filter,
            tag,
            active: Cell::new(true),
            callback: Box::new(TypedCallback { callback, payload: PhantomData }),
        }));
        handle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handles_are_unique_and_monotonic() {
        let registry = DispatchRegistry::new();
        let a = registry.listen("x", |_: &mut ()| {});
        let b = registry.listen("x", |_: &mut ()| {});
        assert!(a < b);
        assert_eq!(registry.listener_count(), 2);
    }

    #[test]
    fn unregister_unknown_handle_is_false() {
        let registry = DispatchRegistry::new();
        let handle = registry.listen("x", |_: &mut ()| {});
        assert!(registry.unregister(handle));
        assert!(!registry.unregister(handle));
        assert!(!registry.is_registered(handle));
    }

    #[test]
    fn clones_share_listeners() {
        let registry = DispatchRegistry::new();
        let clone = registry.clone();
        clone.listen("x", |hits: &mut u32| *hits += 1);

        let mut hits = 0_u32;
        registry.post_mut("x", &mut hits);
        assert_eq!(hits, 1);
    }

    #[test]
    fn shutdown_clears_everything() {
        let registry = DispatchRegistry::new();
        registry.listen("x", |_: &mut ()| {});
        registry.listen("y", |_: &mut ()| {});
        assert_eq!(registry.shutdown(), 2);
        assert_eq!(registry.listener_count(), 0);
        assert!(!registry.post("x", ()).was_handled());
    }
}
