//! Derive macros for `bcs_model::Encode` and `bcs_model::Decode`.
//!
//! # Records
//!
//! A struct is written as its fields in declaration order. Individual fields
//! take a tag string:
//!
//! * `#[bcs = "optional"]` writes an [`Optional`] field (such as `Option<T>`)
//!   as a presence byte followed by the value, if present;
//! * `#[bcs = "-"]` leaves the field off the wire; decoding fills it with
//!   `Default::default()`.
//!
//! Tags are comma-separated; `-` overrides anything else in the list, and an
//! unrecognized token is a compile error that names the token.
//!
//! # Tagged unions
//!
//! An enum is written as the ULEB128 index of its variant followed by the
//! variant's fields. Discriminant values are ignored; the index is the
//! declaration position.
//!
//! A struct tagged `#[bcs = "enum"]` is also a tagged union, with each field an
//! [`Optional`] slot standing for one variant. The first present slot is
//! written; encoding fails if none is present. Both shapes also get an
//! implementation of `TaggedUnion` from `#[derive(Encode)]`.
//!
//! Field types with no canonical encoding (floats, function pointers, raw
//! pointers, trait objects) are rejected at compile time unless the field is
//! tagged `#[bcs = "-"]`.
//!
//! [`Optional`]: https://docs.rs/bcs-data-model/latest/bcs_model/schema/trait.Optional.html

extern crate proc_macro;

mod bound;
mod decode;
mod encode;
mod model;
mod shape;
mod tag;

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

use crate::model::Container;

#[proc_macro_derive(Encode, attributes(bcs))]
pub fn derive_encode(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    Container::from_ast(&input)
        .map(|c| encode::expand(&c))
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

#[proc_macro_derive(Decode, attributes(bcs))]
pub fn derive_decode(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    Container::from_ast(&input)
        .map(|c| decode::expand(&c))
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
