//! Derive macros for `api-smoke` response payloads.

use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, DeriveInput};

/// Derives `from_bytes(bytes::Bytes) -> crate::Result<Self>` and
/// `from_slice(&[u8]) -> crate::Result<Self>` for a `Deserialize` type.
///
/// Both decode the body as JSON and map failures to `crate::Error::JsonParse`,
/// so the deriving crate must expose `Result` and `Error` at its root.
#[proc_macro_derive(FromBytes)]
pub fn derive_from_bytes(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let expanded = quote! {
        impl #impl_generics #name #ty_generics #where_clause {
            pub fn from_bytes(bytes: ::bytes::Bytes) -> crate::Result<Self> {
                Self::from_slice(&bytes)
            }

            pub fn from_slice(slice: &[u8]) -> crate::Result<Self> {
                ::serde_json::from_slice(slice).map_err(crate::Error::JsonParse)
            }
        }
    };
    TokenStream::from(expanded)
}
