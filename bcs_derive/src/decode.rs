use proc_macro2::TokenStream;
use quote::quote;

use crate::bound;
use crate::model::{construct, Body, Container, Field, Style, Variant};
use crate::tag::FieldTag;

fn read_field(field: &Field<'_>) -> TokenStream {
    let ty = field.ty;
    match field.tag {
        FieldTag::Normal => quote! { <#ty as ::bcs_model::Decode>::parse(p)? },
        FieldTag::Optional => quote! { ::bcs_model::schema::read_optional::<#ty, _>(p)? },
        FieldTag::Ignored => quote! { ::core::default::Default::default() },
    }
}

fn read_all(path: TokenStream, style: Style, fields: &[Field<'_>]) -> TokenStream {
    let exprs: Vec<TokenStream> = fields.iter().map(read_field).collect();
    construct(path, style, fields, &exprs)
}

fn self_name() -> TokenStream {
    quote! { ::core::any::type_name::<Self>() }
}

fn union_body(variants: &[Variant<'_>]) -> TokenStream {
    let type_name = self_name();
    let count = variants.len();
    let arms = variants.iter().enumerate().map(|(ix, v)| {
        let ident = v.ident;
        let value = read_all(quote! { Self::#ident }, v.style, &v.fields);
        quote! { #ix => Ok(#value), }
    });
    quote! {
        let __ix = ::bcs_model::Parser::take_variant_index(p, #type_name, #count)?;
        match __ix {
            #( #arms )*
            _ => ::core::unreachable!("variant index {} exceeds checked count {}", __ix, #count),
        }
    }
}

fn slots_body(style: Style, fields: &[Field<'_>]) -> TokenStream {
    let type_name = self_name();
    let count = fields.len();
    let arms = (0..count).map(|selected| {
        let exprs: Vec<TokenStream> = fields
            .iter()
            .enumerate()
            .map(|(ix, f)| {
                let ty = f.ty;
                if ix == selected {
                    quote! {
                        <#ty as ::bcs_model::Optional>::from_present(::core::option::Option::Some(
                            <<#ty as ::bcs_model::Optional>::Inner as ::bcs_model::Decode>::parse(p)?,
                        ))
                    }
                } else {
                    quote! { <#ty as ::bcs_model::Optional>::from_present(::core::option::Option::None) }
                }
            })
            .collect();
        let value = construct(quote! { Self }, style, fields, &exprs);
        quote! { #selected => Ok(#value), }
    });
    quote! {
        let __ix = ::bcs_model::Parser::take_variant_index(p, #type_name, #count)?;
        match __ix {
            #( #arms )*
            _ => ::core::unreachable!("variant index {} exceeds checked count {}", __ix, #count),
        }
    }
}

pub(crate) fn expand(c: &Container<'_>) -> TokenStream {
    let name = &c.input.ident;
    let decode = quote! { ::bcs_model::Decode };
    let generics = bound::with_bound(&c.input.generics, &decode, bound::field_predicates(c, &decode, true));
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let body = match &c.body {
        Body::Record(style, fields) => {
            let value = read_all(quote! { Self }, *style, fields);
            quote! { Ok(#value) }
        }
        Body::Union(variants) => union_body(variants),
        Body::Slots(style, fields) => slots_body(*style, fields),
    };

    quote! {
        impl #impl_generics ::bcs_model::Decode for #name #ty_generics #where_clause {
            #[allow(unused_variables)]
            fn parse<__P: ::bcs_model::Parser>(p: &mut __P) -> ::bcs_model::ParseResult<Self> {
                #body
            }
        }
    }
}
