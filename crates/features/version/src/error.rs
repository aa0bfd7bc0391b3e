use std::borrow::Cow;

/// Malformed version or constraint text.
///
/// These surface as manifest validation failures and are fatal for the
/// declaring mod's build: the author has to fix the manifest.
#[mbridge_derive::mbridge_error]
pub enum VersionError {
    #[error("Version constraint is empty{}", format_context(.context))]
    Empty { context: Option<Cow<'static, str>> },

    /// A bare version was given; constraints must spell out their comparator.
    #[error(
        "Version constraint '{input}' has no comparator (expected >=, <= or =){}",
        format_context(.context)
    )]
    MissingOperator { input: String, context: Option<Cow<'static, str>> },

    #[error(
        "Unsupported comparator '{token}' in '{input}' (expected >=, <= or =){}",
        format_context(.context)
    )]
    UnknownOperator { token: String, input: String, context: Option<Cow<'static, str>> },

    #[error("Invalid version '{token}'{}: {source}", format_context(.context))]
    InvalidVersion { token: String, source: semver::Error, context: Option<Cow<'static, str>> },
}

impl VersionError {
    /// The piece of input that could not be understood.
    #[must_use]
    pub fn offending_token(&self) -> &str {
        match self {
            Self::Empty { .. } => "",
            Self::MissingOperator { input, .. } => input,
            Self::UnknownOperator { token, .. } | Self::InvalidVersion { token, .. } => token,
        }
    }
}
