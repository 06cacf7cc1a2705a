//! Crate path resolution for dependency aliasing support.
//!
//! Reads the optional `crate = "..."` argument of `#[optional_fields]` so the
//! generated skip predicate can name a renamed dependency.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{LitStr, parse::Parser};

/// Parse the attribute arguments, returning the `crate` override if given.
pub(crate) fn parse_args(args: TokenStream) -> syn::Result<Option<syn::Path>> {
    let mut path = None;
    let parser = syn::meta::parser(|meta| {
        if meta.path.is_ident("crate") {
            let lit: LitStr = meta.value()?.parse()?;
            path = Some(lit.parse::<syn::Path>()?);
            Ok(())
        } else {
            Err(meta.error("unsupported optional_fields argument; expected `crate = \"...\"`"))
        }
    });
    parser.parse2(args)?;
    Ok(path)
}

/// Render the crate path as the string form `serde` expects in
/// `skip_serializing_if`. Defaults to `presence`.
pub(crate) fn resolve(crate_path: Option<&syn::Path>) -> String {
    let tokens = crate_path.map_or_else(|| quote! { presence }, |path| quote! { #path });
    tokens.to_string().replace(' ', "")
}
