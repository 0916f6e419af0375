use proc_macro2::{Span, TokenStream};
use syn::{parse_quote, GenericParam, Generics, Ident, WherePredicate};

use crate::model::{mentions_any, Body, Container, Field};
use crate::tag::FieldTag;

/// Adds `T: #bound` for every type parameter `T`, plus any `extra` predicates.
pub(crate) fn with_bound(
    generics: &Generics,
    bound: &TokenStream,
    extra: impl IntoIterator<Item = WherePredicate>,
) -> Generics {
    let mut generics = generics.clone();
    let params: Vec<_> = generics
        .params
        .iter()
        .filter_map(|param| match param {
            GenericParam::Type(ty) => Some(ty.ident.clone()),
            _ => None,
        })
        .collect();
    let where_clause = generics.make_where_clause();
    for ident in params {
        where_clause.predicates.push(parse_quote!(#ident: #bound));
    }
    where_clause.predicates.extend(extra);
    generics
}

/// Predicates on the field types that involve a type parameter, in the form
/// the generated code uses each field.
///
/// A field written as-is gets `Ty: #bound`; an optional field or a slot gets
/// the bound on its `Optional::Inner`. Ignored fields are only bounded when
/// `fill_ignored` is set, by `Default`. Field types that refer back to the
/// container itself are left to the impl being generated.
pub(crate) fn field_predicates(c: &Container<'_>, bound: &TokenStream, fill_ignored: bool) -> Vec<WherePredicate> {
    let params: Vec<&Ident> = c
        .input
        .generics
        .params
        .iter()
        .filter_map(|param| match param {
            GenericParam::Type(ty) => Some(&ty.ident),
            _ => None,
        })
        .collect();
    if params.is_empty() {
        return Vec::new();
    }
    let this = Ident::new("Self", Span::call_site());
    let recursive = [&c.input.ident, &this];

    let (fields, slots): (Vec<&Field<'_>>, bool) = match &c.body {
        Body::Record(_, fields) => (fields.iter().collect(), false),
        Body::Union(variants) => (variants.iter().flat_map(|v| v.fields.iter()).collect(), false),
        Body::Slots(_, fields) => (fields.iter().collect(), true),
    };

    let mut ret = Vec::new();
    for f in fields {
        let ty = f.ty;
        if !mentions_any(ty, &params) || mentions_any(ty, &recursive) {
            continue;
        }
        match f.tag {
            FieldTag::Normal if !slots => ret.push(parse_quote!(#ty: #bound)),
            FieldTag::Normal | FieldTag::Optional => {
                ret.push(parse_quote!(#ty: ::bcs_model::Optional));
                ret.push(parse_quote!(<#ty as ::bcs_model::Optional>::Inner: #bound));
            }
            FieldTag::Ignored if fill_ignored => ret.push(parse_quote!(#ty: ::core::default::Default)),
            FieldTag::Ignored => {}
        }
    }
    ret
}

#[cfg(test)]
mod test {
    use super::*;
    use quote::{quote, ToTokens};
    use syn::DeriveInput;

    fn predicates(input: DeriveInput, fill_ignored: bool) -> Vec<String> {
        let c = Container::from_ast(&input).unwrap();
        field_predicates(&c, &quote!(Encode), fill_ignored)
            .into_iter()
            .map(|p| p.to_token_stream().to_string())
            .collect()
    }

    #[test]
    fn pointer_fields_are_bounded() {
        let input: DeriveInput = parse_quote! {
            struct Holder<T> {
                len: u8,
                value: Ptr<T>,
                #[bcs = "optional"]
                backup: Ptr<T>,
                #[bcs = "-"]
                cache: Vec<T>,
            }
        };
        assert_eq!(
            predicates(input.clone(), false),
            [
                "Ptr < T > : Encode",
                "Ptr < T > : :: bcs_model :: Optional",
                "< Ptr < T > as :: bcs_model :: Optional > :: Inner : Encode",
            ]
        );
        assert_eq!(predicates(input, true).last().unwrap(), "Vec < T > : :: core :: default :: Default");
    }

    #[test]
    fn recursive_fields_are_skipped() {
        let input: DeriveInput = parse_quote! {
            enum Tree<T> {
                Leaf(T),
                Node(Vec<Tree<T>>),
                Boxed(Box<Self>),
            }
        };
        assert_eq!(predicates(input, false), ["T : Encode"]);
    }

    #[test]
    fn concrete_containers_add_nothing() {
        let input: DeriveInput = parse_quote! {
            #[bcs = "enum"]
            struct Arg {
                input: Option<u16>,
            }
        };
        assert!(predicates(input, true).is_empty());
    }
}
