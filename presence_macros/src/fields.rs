//! Field annotation for `#[optional_fields]`.

use proc_macro2::TokenTree;
use syn::{Attribute, Data, DeriveInput, Fields, LitStr, Meta, PathArguments, Type, parse_quote};

/// Add `serde` elision attributes to every `Optional<..>` field of `item`.
pub(crate) fn annotate(item: &mut DeriveInput, krate: &str) -> syn::Result<()> {
    let Data::Struct(data) = &mut item.data else {
        return Err(syn::Error::new_spanned(
            &item.ident,
            "#[optional_fields] can only be applied to structs",
        ));
    };
    let Fields::Named(named) = &mut data.fields else {
        return Err(syn::Error::new_spanned(
            data.struct_token,
            "#[optional_fields] requires named fields",
        ));
    };
    let predicate = LitStr::new(
        &format!("{krate}::introspect::is_absent_field"),
        proc_macro2::Span::call_site(),
    );
    for field in &mut named.named {
        if !is_optional(&field.ty) {
            continue;
        }
        let has_default = serde_options(&field.attrs).any(|option| option == "default");
        let has_skip = serde_options(&field.attrs).any(|option| option.starts_with("skip"));
        match (has_default, has_skip) {
            (false, false) => field
                .attrs
                .push(parse_quote! { #[serde(default, skip_serializing_if = #predicate)] }),
            (true, false) => field
                .attrs
                .push(parse_quote! { #[serde(skip_serializing_if = #predicate)] }),
            (false, true) => field.attrs.push(parse_quote! { #[serde(default)] }),
            (true, true) => {}
        }
    }
    Ok(())
}

/// Whether `ty` names `Optional<..>` through any path.
fn is_optional(ty: &Type) -> bool {
    let Type::Path(path) = ty else {
        return false;
    };
    path.qself.is_none()
        && path.path.segments.last().is_some_and(|segment| {
            segment.ident == "Optional"
                && matches!(segment.arguments, PathArguments::AngleBracketed(_))
        })
}

/// Top-level option names inside the `#[serde(...)]` attributes in `attrs`.
fn serde_options(attrs: &[Attribute]) -> impl Iterator<Item = String> + '_ {
    attrs
        .iter()
        .filter(|attr| attr.path().is_ident("serde"))
        .filter_map(|attr| match &attr.meta {
            Meta::List(list) => Some(list.tokens.clone()),
            _ => None,
        })
        .flat_map(|tokens| {
            tokens.into_iter().filter_map(|tree| match tree {
                TokenTree::Ident(ident) => Some(ident.to_string()),
                _ => None,
            })
        })
}
