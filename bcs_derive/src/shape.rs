//! Rejection of field types that have no canonical encoding
//!
//! Floating-point numbers, function pointers, raw pointers, and trait objects
//! cannot be written canonically. The check walks into references, arrays,
//! tuples, and generic arguments, so `Vec<f64>` and `Box<dyn Fn()>` are caught
//! as well as bare `f64`.

use quote::ToTokens;
use syn::{GenericArgument, PathArguments, Type, TypePath};

fn reject<T: ToTokens>(ty: &T, shape: &str) -> syn::Error {
    syn::Error::new_spanned(
        ty,
        format!(
            "{shape} `{}` has no canonical encoding; tag the field `#[bcs = \"-\"]` \
             or implement `Encode` and `Decode` for the containing type by hand",
            ty.to_token_stream()
        ),
    )
}

pub(crate) fn check(ty: &Type) -> syn::Result<()> {
    match ty {
        Type::BareFn(_) => Err(reject(ty, "function pointer")),
        Type::Ptr(_) => Err(reject(ty, "raw pointer")),
        Type::TraitObject(_) => Err(reject(ty, "trait object")),
        Type::ImplTrait(_) => Err(reject(ty, "opaque type")),
        Type::Array(arr) => check(&arr.elem),
        Type::Slice(slice) => check(&slice.elem),
        Type::Reference(r) => check(&r.elem),
        Type::Paren(paren) => check(&paren.elem),
        Type::Group(group) => check(&group.elem),
        Type::Tuple(tuple) => tuple.elems.iter().try_for_each(check),
        Type::Path(path) => check_path(path),
        _ => Ok(()),
    }
}

fn check_path(tp: &TypePath) -> syn::Result<()> {
    if tp.qself.is_none() {
        if let Some(ident) = tp.path.get_ident() {
            if ident == "f32" || ident == "f64" {
                return Err(reject(tp, "floating-point number"));
            }
        }
    }
    for seg in &tp.path.segments {
        if let PathArguments::AngleBracketed(args) = &seg.arguments {
            for arg in &args.args {
                if let GenericArgument::Type(ty) = arg {
                    check(ty)?;
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use syn::parse_quote;

    fn message(ty: Type) -> String {
        check(&ty).unwrap_err().to_string()
    }

    #[test]
    fn accepts_codec_shapes() {
        let ok: [Type; 5] = [
            parse_quote!(u64),
            parse_quote!(Vec<Option<String>>),
            parse_quote!([u8; 32]),
            parse_quote!((bool, Box<Self>)),
            parse_quote!(std::collections::BTreeMap<u8, u8>),
        ];
        for ty in &ok {
            assert!(check(ty).is_ok());
        }
    }

    #[test]
    fn rejects_floats_anywhere() {
        assert!(message(parse_quote!(f64)).starts_with("floating-point number"));
        assert!(message(parse_quote!(Vec<(u8, f32)>)).starts_with("floating-point number"));
    }

    #[test]
    fn rejects_indirect_shapes() {
        assert!(message(parse_quote!(fn(u8) -> u8)).starts_with("function pointer"));
        assert!(message(parse_quote!(*const u8)).starts_with("raw pointer"));
        assert!(message(parse_quote!(Box<dyn Send>)).starts_with("trait object"));
    }

    #[test]
    fn suggests_ignoring() {
        assert!(message(parse_quote!(f32)).contains("#[bcs = \"-\"]"));
    }
}
