use mbridge_kernel::config::ConfigError;
use mbridge_logger::LoggerError;
use mbridge_resolver::{BuildError, ManifestError, ResolveError};
use std::borrow::Cow;

/// Errors surfaced by the [`Loader`](crate::Loader).
#[mbridge_derive::mbridge_error]
pub enum LoaderError {
    #[error("Loader configuration error{}: {source}", format_context(.context))]
    Config { source: ConfigError, context: Option<Cow<'static, str>> },

    #[error("Logging setup failed{}: {source}", format_context(.context))]
    Logger { source: LoggerError, context: Option<Cow<'static, str>> },

    #[error("Invalid log level '{level}'{}", format_context(.context))]
    InvalidLogLevel { level: String, context: Option<Cow<'static, str>> },

    #[error("Invalid mod manifest{}: {source}", format_context(.context))]
    Manifest { source: ManifestError, context: Option<Cow<'static, str>> },

    #[error("Dependency resolution failed{}: {source}", format_context(.context))]
    Resolve { source: ResolveError, context: Option<Cow<'static, str>> },

    #[error("Failed to lay out dependencies{}: {source}", format_context(.context))]
    Build { source: BuildError, context: Option<Cow<'static, str>> },

    #[error("Mod '{id}' is already loaded{}", format_context(.context))]
    AlreadyLoaded { id: String, context: Option<Cow<'static, str>> },
}
