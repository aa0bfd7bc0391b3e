use std::borrow::Cow;

#[mbridge_derive::mbridge_error]
pub enum BuildError {
    #[error("Build I/O error{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    #[error("Failed to walk include tree{}: {source}", format_context(.context))]
    Walk { source: walkdir::Error, context: Option<Cow<'static, str>> },
}
