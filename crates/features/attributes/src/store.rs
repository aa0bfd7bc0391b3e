use fxhash::FxHashMap;
use mbridge_dispatch::TypeTag;
use std::any::Any;
use std::fmt;
use tracing::trace;

struct Attribute {
    tag: TypeTag,
    value: Box<dyn Any>,
}

/// String-keyed values of arbitrary types.
///
/// Reads name the expected type; a key holding another type reads as absent.
#[derive(Default)]
pub struct AttributeStore {
    entries: FxHashMap<String, Attribute>,
}

impl AttributeStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value` under `key`, dropping whatever was there, whatever its type.
    pub fn set<T: 'static>(&mut self, key: impl Into<String>, value: T) {
        let key = key.into();
        let tag = TypeTag::of::<T>();
        if let Some(previous) = self.entries.get(&key)
            && previous.tag != tag
        {
            trace!(%key, from = %previous.tag, to = %tag, "Attribute changes type");
        }
        self.entries.insert(key, Attribute { tag, value: Box::new(value) });
    }

    #[must_use]
    pub fn get<T: 'static>(&self, key: &str) -> Option<&T> {
        let attribute = self.entries.get(key)?;
        let value = attribute.value.downcast_ref::<T>();
        if value.is_none() {
            trace!(key, stored = %attribute.tag, requested = std::any::type_name::<T>(), "Attribute type mismatch");
        }
        value
    }

    pub fn get_mut<T: 'static>(&mut self, key: &str) -> Option<&mut T> {
        self.entries.get_mut(key)?.value.downcast_mut::<T>()
    }

    /// Removes `key`; returns whether it was present.
    pub fn remove(&mut self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    /// Removes and returns the value under `key` if it has type `T`.
    ///
    /// A value of another type stays in place.
    pub fn take<T: 'static>(&mut self, key: &str) -> Option<T> {
        if !self.entries.get(key)?.tag.is::<T>() {
            return None;
        }
        let attribute = self.entries.remove(key)?;
        attribute.value.downcast::<T>().ok().map(|value| *value)
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Keys in unspecified order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    #[must_use]
    pub fn type_tag(&self, key: &str) -> Option<TypeTag> {
        self.entries.get(key).map(|attribute| attribute.tag)
    }

    #[must_use]
    pub fn type_name(&self, key: &str) -> Option<&'static str> {
        self.entries.get(key).map(|attribute| attribute.tag.name())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl fmt::Debug for AttributeStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.entries.iter().map(|(key, attribute)| (key, attribute.tag.name())))
            .finish()
    }
}
