// puzzle_macros/src/lib.rs

extern crate proc_macro;

use heck::ToSnakeCase;
use itertools::Itertools;
use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{Data, DeriveInput, Fields, LitStr, Result, Variant, parse_macro_input};

const ATTRIBUTE: &str = "domain";

/// Derives `logic_puzzles::modeling::Domain` (and `Display`) for a fieldless enum.
///
/// Elements keep their declaration order, which is also the order used by
/// ordinals. Each element is named after its variant in `snake_case`, unless
/// a `#[domain(rename = "...")]` attribute says otherwise.
///
/// ```ignore
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Domain)]
/// enum Time {
///     #[domain(rename = "4:00")]
///     T400,
///     #[domain(rename = "4:30")]
///     T430,
/// }
/// ```
#[proc_macro_derive(Domain, attributes(domain))]
pub fn derive_domain(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand(input: &DeriveInput) -> Result<TokenStream2> {
    let ident = &input.ident;

    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "`Domain` cannot be derived for generic types",
        ));
    }

    let Data::Enum(data) = &input.data else {
        return Err(syn::Error::new_spanned(
            ident,
            "`Domain` can only be derived for enums",
        ));
    };

    if data.variants.is_empty() {
        return Err(syn::Error::new_spanned(
            ident,
            "a domain needs at least one element",
        ));
    }

    let mut variants = Vec::with_capacity(data.variants.len());
    let mut names = Vec::with_capacity(data.variants.len());
    for variant in &data.variants {
        if !matches!(variant.fields, Fields::Unit) {
            return Err(syn::Error::new_spanned(
                variant,
                "domain elements must be unit variants",
            ));
        }
        names.push(element_name(variant)?);
        variants.push(&variant.ident);
    }

    if let Some(duplicate) = names.iter().duplicates().next() {
        return Err(syn::Error::new_spanned(
            ident,
            format!("two elements are both named `{duplicate}`"),
        ));
    }

    let sort_name = ident.to_string();
    let indices = 0..variants.len();

    Ok(quote! {
        impl ::logic_puzzles::modeling::Domain for #ident {
            const NAME: &'static str = #sort_name;
            const ALL: &'static [Self] = &[#(Self::#variants),*];

            fn index(self) -> usize {
                match self {
                    #(Self::#variants => #indices),*
                }
            }

            fn name(self) -> &'static str {
                match self {
                    #(Self::#variants => #names),*
                }
            }
        }

        impl ::core::fmt::Display for #ident {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(::logic_puzzles::modeling::Domain::name(*self))
            }
        }
    })
}

fn element_name(variant: &Variant) -> Result<String> {
    let mut name = variant.ident.to_string().to_snake_case();

    for attr in variant
        .attrs
        .iter()
        .filter(|attr| attr.path().is_ident(ATTRIBUTE))
    {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename") {
                let value: LitStr = meta.value()?.parse()?;
                name = value.value();
                Ok(())
            } else {
                Err(meta.error("unsupported `domain` attribute, expected `rename`"))
            }
        })?;
    }

    Ok(name)
}
