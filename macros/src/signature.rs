use proc_macro2::TokenStream;
use quote::{ToTokens, quote};
use syn::ext::IdentExt;
use syn::{FnArg, ItemFn, Pat, Result};

pub fn prompt_inputs_impl(attr: TokenStream, item: TokenStream) -> Result<TokenStream> {
    if !attr.is_empty() {
        return Err(syn::Error::new_spanned(
            attr,
            "#[prompt_inputs] does not take any arguments",
        ));
    }

    let input = syn::parse2::<ItemFn>(item)?;
    let vis = &input.vis;
    let names = parameter_names(&input.sig.inputs)?;

    let fn_name = input.sig.ident.unraw().to_string();
    let signature_name = quote::format_ident!("{}Signature", to_pascal_case(&fn_name));

    let expanded = quote! {
        #input

        #[derive(Debug, Clone, Copy, Default)]
        #vis struct #signature_name;

        impl #signature_name {
            /// Declared parameter names, in order
            pub const NAMES: &'static [&'static str] = &[#(#names),*];
        }

        impl ::promptfill::ParameterNames for #signature_name {
            fn parameter_names(
                &self,
            ) -> ::std::option::Option<::std::vec::Vec<::std::string::String>> {
                ::std::option::Option::Some(
                    Self::NAMES.iter().map(|name| name.to_string()).collect(),
                )
            }
        }
    };

    Ok(expanded)
}

/// Collect parameter names in declaration order.
///
/// Plain identifiers drop any `mut`/`ref` binding modifiers and the `r#`
/// prefix of raw identifiers. Other patterns (tuples, structs) are kept as
/// their token text.
fn parameter_names(
    inputs: &syn::punctuated::Punctuated<FnArg, syn::token::Comma>,
) -> Result<Vec<String>> {
    inputs
        .iter()
        .map(|arg| match arg {
            FnArg::Receiver(_) => Err(syn::Error::new_spanned(
                arg,
                "#[prompt_inputs] functions cannot have self parameter",
            )),
            FnArg::Typed(pat_type) => Ok(match &*pat_type.pat {
                Pat::Ident(pat_ident) => pat_ident.ident.unraw().to_string(),
                pat => pat.to_token_stream().to_string(),
            }),
        })
        .collect()
}

fn to_pascal_case(name: &str) -> String {
    name.split('_')
        .map(|s| {
            let mut c = s.chars();
            match c.next() {
                None => String::new(),
                Some(f) => f.to_uppercase().collect::<String>() + c.as_str(),
            }
        })
        .collect()
}
