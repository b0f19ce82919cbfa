//! Procedural macros for toggle-dispatch

use darling::{FromDeriveInput, FromVariant};
use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, DeriveInput};

/// Container-level attributes for #[derive(Action)]
#[derive(Debug, FromDeriveInput)]
#[darling(attributes(action), supports(enum_any))]
struct ActionOpts {
    ident: syn::Ident,
    generics: syn::Generics,
    data: darling::ast::Data<ActionVariant, ()>,
}

/// Variant-level attributes
#[derive(Debug, FromVariant)]
#[darling(attributes(action))]
struct ActionVariant {
    ident: syn::Ident,
    fields: darling::ast::Fields<()>,

    /// Explicit kind override
    #[darling(default)]
    kind: Option<String>,
}

/// Convert PascalCase to snake_case
fn to_snake_case(s: &str) -> String {
    let mut result = String::new();
    for (i, ch) in s.chars().enumerate() {
        if ch.is_uppercase() {
            if i > 0 {
                result.push('_');
            }
            result.extend(ch.to_lowercase());
        } else {
            result.push(ch);
        }
    }
    result
}

/// Derive macro for the Action trait
///
/// Generates:
/// - `name()` returning the variant name as a static string
/// - `kind()` returning the snake_case variant name, or the value of
///   `#[action(kind = "...")]` on the variant
///
/// # Example
/// ```ignore
/// #[derive(Action, Clone, Debug)]
/// enum CounterAction {
///     Increment,
///     #[action(kind = "reset")]
///     ResetTo(i32),
///     SetStep { step: i32 },
/// }
///
/// assert_eq!(CounterAction::Increment.name(), "Increment");
/// assert_eq!(CounterAction::ResetTo(0).kind(), "reset");
/// assert_eq!(CounterAction::SetStep { step: 2 }.kind(), "set_step");
/// ```
#[proc_macro_derive(Action, attributes(action))]
pub fn derive_action(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let opts = match ActionOpts::from_derive_input(&input) {
        Ok(opts) => opts,
        Err(e) => return e.write_errors().into(),
    };

    let name = &opts.ident;
    let (impl_generics, ty_generics, where_clause) = opts.generics.split_for_impl();

    let variants = match &opts.data {
        darling::ast::Data::Enum(variants) => variants,
        _ => {
            return syn::Error::new_spanned(&input, "Action can only be derived for enums")
                .to_compile_error()
                .into();
        }
    };

    let pattern = |v: &ActionVariant| {
        let variant_name = &v.ident;
        match &v.fields.style {
            darling::ast::Style::Unit => quote! { #name::#variant_name },
            darling::ast::Style::Tuple => quote! { #name::#variant_name(..) },
            darling::ast::Style::Struct => quote! { #name::#variant_name { .. } },
        }
    };

    let name_arms = variants.iter().map(|v| {
        let pat = pattern(v);
        let variant_str = v.ident.to_string();
        quote! { #pat => #variant_str }
    });

    let kind_arms = variants.iter().map(|v| {
        let pat = pattern(v);
        let kind = v
            .kind
            .clone()
            .unwrap_or_else(|| to_snake_case(&v.ident.to_string()));
        quote! { #pat => #kind }
    });

    let expanded = quote! {
        impl #impl_generics toggle_dispatch::Action for #name #ty_generics #where_clause {
            fn name(&self) -> &'static str {
                match self {
                    #(#name_arms),*
                }
            }

            fn kind(&self) -> &str {
                match self {
                    #(#kind_arms),*
                }
            }
        }
    };

    TokenStream::from(expanded)
}
