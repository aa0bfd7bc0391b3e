#![allow(unreachable_pub)]

//! # Macros
//!
//! Procedural macros shared by the loader crates.
//!
//! The only macro today is [`macro@mbridge_error`], which turns a plain enum into
//! a `thiserror` error with context support. Every crate in the workspace
//! declares its error type with it, so build-time failures (manifest,
//! resolution, configuration) all carry the same `(context)` suffix shape.
//!
//! ## Usage
//! ```toml
//! [dependencies]
//! mbridge-derive.workspace = true
//! thiserror.workspace = true
//! ```

mod error;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Attribute macro for declaring error enums.
///
/// # Generated items
///
/// * `#[derive(Debug, thiserror::Error)]` unless already derived.
/// * An inherent `with_context(..)` method that fills the `context` slot of
///   whichever variant the value is.
/// * A companion `<Name>Ext` trait adding `.context(..)` to `Result<T, Name>`
///   and to `Result<T, Source>` for every variant wrapping a source error.
/// * `From<Source>` for variants made of exactly a source and a context field.
/// * `From<&'static str>` and `From<String>` when an `Internal { message, context }`
///   variant exists.
/// * A module-private `format_context` helper for use in `#[error(..)]` strings.
///
/// # Requirements
///
/// 1. Only enums are accepted.
/// 2. Every variant uses named fields.
/// 3. A `context` field must be `Option<Cow<'static, str>>`.
/// 4. Variants with a source (`source` field, `#[source]` or `#[from]`) must also
///    carry a `context` field.
///
/// # Example
///
/// ```rust,ignore
/// use mbridge_derive::mbridge_error;
/// use std::borrow::Cow;
///
/// #[mbridge_error]
/// pub enum ManifestError {
///     #[error("Manifest is not valid JSON{}: {source}", format_context(.context))]
///     Json { source: serde_json::Error, context: Option<Cow<'static, str>> },
///
///     #[error("Internal manifest fault{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// fn read(raw: &str) -> Result<serde_json::Value, ManifestError> {
///     serde_json::from_str(raw).context("Reading mod.json")
/// }
/// ```
#[proc_macro_attribute]
pub fn mbridge_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    error::expand(&input).into()
}
