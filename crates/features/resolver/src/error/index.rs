use std::borrow::Cow;

/// Failure reported by a [`PackageIndex`](crate::PackageIndex).
#[mbridge_derive::mbridge_error]
pub enum IndexError {
    #[error("No package '{id}' matching {constraint} in the index{}", format_context(.context))]
    NotFound { id: String, constraint: String, context: Option<Cow<'static, str>> },

    #[error("Package index unreachable while fetching '{id}': {message}{}", format_context(.context))]
    Network { id: String, message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
