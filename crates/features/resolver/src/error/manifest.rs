use mbridge_version::VersionError;
use std::borrow::Cow;

/// A manifest that cannot be turned into dependency descriptors.
///
/// Every variant is fatal for the declaring mod.
#[mbridge_derive::mbridge_error]
pub enum ManifestError {
    #[error("Manifest is not valid JSON{}: {source}", format_context(.context))]
    Json { source: serde_json::Error, context: Option<Cow<'static, str>> },

    #[error("Manifest I/O error{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    #[error("Invalid mod id '{id}'{}", format_context(.context))]
    InvalidId { id: String, context: Option<Cow<'static, str>> },

    #[error(
        "Dependency '{dependency}' has an invalid version constraint near '{token}'{}: {source}",
        format_context(.context)
    )]
    InvalidConstraint {
        dependency: String,
        token: String,
        source: VersionError,
        context: Option<Cow<'static, str>>,
    },

    #[error("Dependency '{id}' is declared more than once{}", format_context(.context))]
    DuplicateDependency { id: String, context: Option<Cow<'static, str>> },

    #[error("Mod '{id}' declares a dependency on itself{}", format_context(.context))]
    SelfDependency { id: String, context: Option<Cow<'static, str>> },
}
