//! Procedural macros for `presence`.
//!
//! [`macro@optional_fields`] annotates every `Optional<..>` field of a struct
//! so that `serde` leaves absent values out of the output and reads missing
//! fields as absent.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{DeriveInput, parse_macro_input};

mod crate_path;
mod fields;

/// Elide absent `Optional` fields when serializing with `serde`.
///
/// Each named field whose type is `Optional<..>` gains
/// `#[serde(default, skip_serializing_if = "presence::introspect::is_absent_field")]`.
/// Fields that already declare `default` or a `skip*` option keep their own.
/// Place the attribute above `#[derive(Serialize, Deserialize)]`.
///
/// Pass `crate = "path"` when `presence` is renamed in `Cargo.toml`:
///
/// ```rust,ignore
/// #[optional_fields(crate = "my_presence")]
/// #[derive(serde::Serialize)]
/// struct Patch {
///     name: my_presence::Optional<String>,
/// }
/// ```
#[proc_macro_attribute]
pub fn optional_fields(args: TokenStream, input: TokenStream) -> TokenStream {
    let item = parse_macro_input!(input as DeriveInput);
    expand(args.into(), item)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand(args: TokenStream2, mut item: DeriveInput) -> syn::Result<TokenStream2> {
    let krate = crate_path::resolve(crate_path::parse_args(args)?.as_ref());
    fields::annotate(&mut item, &krate)?;
    Ok(quote! { #item })
}
