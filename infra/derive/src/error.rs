use fxhash::FxHashSet;
use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{
    Attribute, Data, DeriveInput, Field, Fields, GenericArgument, Ident, PathArguments, Type,
    Variant,
};

const CONTEXT_FIELD: &str = "context";
const INTERNAL_VARIANT: &str = "Internal";

struct ErrorVariant<'a> {
    ident: &'a Ident,
    cfg: Vec<&'a Attribute>,
    source: Option<(&'a Ident, &'a Type)>,
    has_context: bool,
    has_message: bool,
    field_count: usize,
}

struct ErrorEnum<'a> {
    input: &'a DeriveInput,
    ext: Ident,
    variants: Vec<ErrorVariant<'a>>,
}

pub fn expand(input: &DeriveInput) -> TokenStream {
    ErrorEnum::analyze(input).map_or_else(|err| err.to_compile_error(), |parsed| parsed.render())
}

impl<'a> ErrorVariant<'a> {
    fn analyze(variant: &'a Variant) -> syn::Result<Self> {
        let Fields::Named(fields) = &variant.fields else {
            return Err(syn::Error::new_spanned(
                variant,
                "mbridge_error requires named fields so context and sources can be wired",
            ));
        };

        let mut context = None;
        let mut source = None;
        let mut has_message = false;
        for field in &fields.named {
            let Some(name) = &field.ident else { continue };
            if name == CONTEXT_FIELD {
                if !is_context_type(&field.ty) {
                    return Err(syn::Error::new_spanned(
                        &field.ty,
                        "context field must be Option<Cow<'static, str>>",
                    ));
                }
                context = Some(field);
            } else if name == "message" {
                has_message = true;
            } else if source.is_none() && is_source(field) {
                source = Some((name, &field.ty));
            }
        }

        if source.is_some() && context.is_none() {
            return Err(syn::Error::new_spanned(
                &variant.ident,
                "mbridge_error requires `context: Option<Cow<'static, str>>` on variants with a source",
            ));
        }

        Ok(Self {
            ident: &variant.ident,
            cfg: variant.attrs.iter().filter(|attr| attr.path().is_ident("cfg")).collect(),
            source,
            has_context: context.is_some(),
            has_message,
            field_count: fields.named.len(),
        })
    }
}

impl<'a> ErrorEnum<'a> {
    fn analyze(input: &'a DeriveInput) -> syn::Result<Self> {
        let Data::Enum(data) = &input.data else {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "mbridge_error can only be applied to enums",
            ));
        };
        let variants =
            data.variants.iter().map(ErrorVariant::analyze).collect::<syn::Result<Vec<_>>>()?;

        Ok(Self { input, ext: format_ident!("{}Ext", input.ident), variants })
    }

    fn render(&self) -> TokenStream {
        let input = self.input;
        let derives = self.missing_derives();
        let with_context = self.render_with_context();
        let ext = self.render_ext_trait();
        let conversions = self.variants.iter().filter_map(|v| self.render_source_conversion(v));
        let internal = self.render_internal_conversions();

        quote! {
            #[allow(non_shorthand_field_patterns)]
            #derives
            #input

            #with_context
            #ext
            #(#conversions)*
            #internal

            #[allow(dead_code)]
            fn format_context(
                context: &::core::option::Option<::std::borrow::Cow<'static, str>>,
            ) -> ::std::borrow::Cow<'static, str> {
                match context {
                    ::core::option::Option::Some(c) => ::std::borrow::Cow::Owned(format!(" ({c})")),
                    ::core::option::Option::None => ::std::borrow::Cow::Borrowed(""),
                }
            }
        }
    }

    fn missing_derives(&self) -> TokenStream {
        let present = derived_traits(&self.input.attrs);
        let mut wanted = Vec::new();
        if !present.contains("Debug") {
            wanted.push(quote! { Debug });
        }
        if !present.contains("Error") {
            wanted.push(quote! { ::thiserror::Error });
        }
        if wanted.is_empty() { TokenStream::new() } else { quote! { #[derive(#(#wanted),*)] } }
    }

    fn render_with_context(&self) -> TokenStream {
        let name = &self.input.ident;
        let arms = self.variants.iter().filter(|v| v.has_context).map(|v| {
            let cfg = &v.cfg;
            let ident = v.ident;
            quote! { #(#cfg)* Self::#ident { context: slot, .. } => *slot = Some(context), }
        });

        quote! {
            #[automatically_derived]
            impl #name {
                /// Attaches a human-readable context to this error, replacing any previous one.
                #[allow(unreachable_patterns, unused_variables)]
                #[must_use]
                pub fn with_context(
                    mut self,
                    context: impl Into<::std::borrow::Cow<'static, str>>,
                ) -> Self {
                    let context = context.into();
                    match &mut self {
                        #(#arms)*
                        _ => {}
                    }
                    self
                }
            }
        }
    }

    fn render_ext_trait(&self) -> TokenStream {
        let name = &self.input.ident;
        let ext = &self.ext;

        quote! {
            pub trait #ext<T> {
                fn context(
                    self,
                    context: impl Into<::std::borrow::Cow<'static, str>>,
                ) -> ::core::result::Result<T, #name>;
            }

            #[automatically_derived]
            impl<T> #ext<T> for ::core::result::Result<T, #name> {
                #[inline]
                fn context(self, context: impl Into<::std::borrow::Cow<'static, str>>) -> Self {
                    self.map_err(|err| err.with_context(context))
                }
            }
        }
    }

    fn render_source_conversion(&self, variant: &ErrorVariant<'_>) -> Option<TokenStream> {
        if variant.ident == INTERNAL_VARIANT || variant.field_count != 2 {
            return None;
        }
        let (field, ty) = variant.source?;
        let name = &self.input.ident;
        let ext = &self.ext;
        let ident = variant.ident;
        let cfg = &variant.cfg;

        Some(quote! {
            #(#cfg)*
            #[automatically_derived]
            impl From<#ty> for #name {
                #[inline]
                fn from(#field: #ty) -> Self {
                    Self::#ident { #field, context: None }
                }
            }

            #(#cfg)*
            #[automatically_derived]
            impl<T> #ext<T> for ::core::result::Result<T, #ty> {
                #[inline]
                fn context(
                    self,
                    context: impl Into<::std::borrow::Cow<'static, str>>,
                ) -> ::core::result::Result<T, #name> {
                    self.map_err(|#field| #name::#ident { #field, context: Some(context.into()) })
                }
            }
        })
    }

    fn render_internal_conversions(&self) -> TokenStream {
        let Some(internal) =
            self.variants.iter().find(|v| v.ident == INTERNAL_VARIANT && v.has_message)
        else {
            return TokenStream::new();
        };
        let name = &self.input.ident;
        let cfg = &internal.cfg;
        let context = if internal.has_context { quote! { context: None } } else { quote! {} };

        quote! {
            #(#cfg)*
            #[automatically_derived]
            impl From<&'static str> for #name {
                #[inline]
                fn from(message: &'static str) -> Self {
                    Self::Internal { message: ::std::borrow::Cow::Borrowed(message), #context }
                }
            }

            #(#cfg)*
            #[automatically_derived]
            impl From<String> for #name {
                #[inline]
                fn from(message: String) -> Self {
                    Self::Internal { message: ::std::borrow::Cow::Owned(message), #context }
                }
            }
        }
    }
}

fn is_source(field: &Field) -> bool {
    field.ident.as_ref().is_some_and(|ident| ident == "source")
        || field.attrs.iter().any(|attr| attr.path().is_ident("source") || attr.path().is_ident("from"))
}

fn derived_traits(attrs: &[Attribute]) -> FxHashSet<String> {
    let mut traits = FxHashSet::default();
    for attr in attrs.iter().filter(|attr| attr.path().is_ident("derive")) {
        let _ = attr.parse_nested_meta(|meta| {
            if let Some(segment) = meta.path.segments.last() {
                traits.insert(segment.ident.to_string());
            }
            Ok(())
        });
    }
    traits
}

/// Matches `Option<Cow<'static, str>>`, with or without path qualification.
fn is_context_type(ty: &Type) -> bool {
    let Some(option) = single_generic(ty, "Option") else {
        return false;
    };
    let Some(GenericArgument::Type(cow)) = option.first() else {
        return false;
    };
    let Some(cow_args) = single_generic(cow, "Cow") else {
        return false;
    };
    let mut args = cow_args.into_iter();
    let is_static = matches!(args.next(), Some(GenericArgument::Lifetime(lt)) if lt.ident == "static");
    let is_str = matches!(
        args.next(),
        Some(GenericArgument::Type(Type::Path(path)))
            if path.path.segments.last().is_some_and(|seg| seg.ident == "str")
    );
    is_static && is_str
}

fn single_generic<'t>(ty: &'t Type, expected: &str) -> Option<Vec<&'t GenericArgument>> {
    let Type::Path(path) = ty else { return None };
    let segment = path.path.segments.last()?;
    if segment.ident != expected {
        return None;
    }
    let PathArguments::AngleBracketed(args) = &segment.arguments else { return None };
    Some(args.args.iter().collect())
}
