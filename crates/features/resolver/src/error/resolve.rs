use super::IndexError;
use mbridge_domain::ModId;
use mbridge_version::VersionConstraint;
use std::borrow::Cow;

/// Coarse classification of a [`ResolveError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResolveErrorKind {
    NotFound,
    NetworkFailure,
}

/// A dependency that could not be located.
///
/// Only returned for `required` dependencies; optional ones are downgraded to
/// unlinked instead.
#[mbridge_derive::mbridge_error]
pub enum ResolveError {
    #[error(
        "Required dependency '{id}' {constraint} is neither installed nor available{}",
        format_context(.context)
    )]
    NotFound { id: ModId, constraint: VersionConstraint, context: Option<Cow<'static, str>> },

    #[error(
        "Required dependency '{id}' {constraint} could not be fetched{}: {source}",
        format_context(.context)
    )]
    NetworkFailure {
        id: ModId,
        constraint: VersionConstraint,
        source: IndexError,
        context: Option<Cow<'static, str>>,
    },
}

impl ResolveError {
    #[must_use]
    pub const fn kind(&self) -> ResolveErrorKind {
        match self {
            Self::NotFound { .. } => ResolveErrorKind::NotFound,
            Self::NetworkFailure { .. } => ResolveErrorKind::NetworkFailure,
        }
    }

    /// The dependency that failed.
    #[must_use]
    pub const fn id(&self) -> &ModId {
        match self {
            Self::NotFound { id, .. } | Self::NetworkFailure { id, .. } => id,
        }
    }

    #[must_use]
    pub const fn constraint(&self) -> &VersionConstraint {
        match self {
            Self::NotFound { constraint, .. } | Self::NetworkFailure { constraint, .. } => {
                constraint
            }
        }
    }
}
