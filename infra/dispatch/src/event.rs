use crate::registry::{DispatchRegistry, PostResult};
use std::borrow::Cow;

/// A posted call: a public event id plus a typed payload.
///
/// Nothing owns an event; it is built at the call site, posted, and its
/// payload read back to collect whatever listeners wrote into it.
///
/// ```rust
/// use mbridge_dispatch::{DispatchEvent, DispatchRegistry};
///
/// let registry = DispatchRegistry::new();
/// registry.listen("alpha.core/Greet", |(name, reply): &mut (String, Option<String>)| {
///     *reply = Some(format!("hello, {name}"));
/// });
///
/// let mut event = DispatchEvent::new("alpha.core/Greet", ("beta".to_owned(), None::<String>));
/// event.post(&registry);
/// assert_eq!(event.payload().1.as_deref(), Some("hello, beta"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchEvent<P> {
    id: Cow<'static, str>,
    payload: P,
}

impl<P: 'static> DispatchEvent<P> {
    pub fn new(id: impl Into<Cow<'static, str>>, payload: P) -> Self {
        Self { id: id.into(), payload }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub const fn payload(&self) -> &P {
        &self.payload
    }

    pub fn into_payload(self) -> P {
        self.payload
    }

    /// Delivers the payload; listener writes stay in `self`.
    pub fn post(&mut self, registry: &DispatchRegistry) -> PostResult {
        registry.post_mut(&self.id, &mut self.payload)
    }
}
