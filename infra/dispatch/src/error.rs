use std::borrow::Cow;

/// Errors raised while building dispatch filters.
///
/// Delivery itself never fails: type mismatches and missing listeners are
/// silent misses.
#[mbridge_derive::mbridge_error]
pub enum DispatchError {
    /// The pattern is empty or uses `*` anywhere but as the final character.
    #[error("Invalid event filter '{pattern}'{}", format_context(.context))]
    InvalidFilter { pattern: String, context: Option<Cow<'static, str>> },
}
