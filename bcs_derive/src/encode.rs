use proc_macro2::TokenStream;
use quote::{format_ident, quote};

use crate::bound;
use crate::model::{member_name, Body, Container, Field, Style, Variant};
use crate::tag::FieldTag;

/// Expression writing one field, or `None` for an ignored field.
fn write_field(access: &TokenStream, field: &Field<'_>) -> Option<TokenStream> {
    match field.tag {
        FieldTag::Normal => Some(quote! { ::bcs_model::Encode::write_to(#access, buf)? }),
        FieldTag::Optional => Some(quote! { ::bcs_model::schema::write_optional(#access, buf)? }),
        FieldTag::Ignored => None,
    }
}

fn record(fields: &[Field<'_>]) -> TokenStream {
    let parts = fields.iter().filter_map(|f| {
        let member = &f.member;
        write_field(&quote! { &self.#member }, f)
    });
    quote! {
        Ok(#( #parts + )* ::bcs_model::Target::resolve_zero(buf))
    }
}

/// Pattern binding each non-ignored field of a variant to `__fN`.
fn variant_pattern(v: &Variant<'_>) -> (TokenStream, Vec<TokenStream>) {
    let ident = v.ident;
    let mut bindings = Vec::with_capacity(v.fields.len());
    let mut parts = Vec::new();
    for (ix, f) in v.fields.iter().enumerate() {
        if f.tag == FieldTag::Ignored {
            bindings.push(quote! { _ });
        } else {
            let name = format_ident!("__f{}", ix);
            parts.extend(write_field(&quote! { #name }, f));
            bindings.push(quote! { #name });
        }
    }
    let pat = match v.style {
        Style::Unit => quote! { Self::#ident },
        Style::Unnamed => quote! { Self::#ident( #( #bindings ),* ) },
        Style::Named => {
            let member = v.fields.iter().map(|f| &f.member);
            quote! { Self::#ident { #( #member: #bindings ),* } }
        }
    };
    (pat, parts)
}

fn union(variants: &[Variant<'_>]) -> TokenStream {
    if variants.is_empty() {
        return quote! { match *self {} };
    }
    let arms = variants.iter().enumerate().map(|(ix, v)| {
        let (pat, parts) = variant_pattern(v);
        quote! {
            #pat => Ok(
                ::bcs_model::adt::write_variant_index(buf, #ix)
                    #( + #parts )*
                    + ::bcs_model::Target::resolve_zero(buf)
            ),
        }
    });
    quote! {
        match self {
            #( #arms )*
        }
    }
}

fn slots(fields: &[Field<'_>]) -> TokenStream {
    let arms = fields.iter().enumerate().map(|(ix, f)| {
        let member = &f.member;
        quote! {
            if let ::core::option::Option::Some(__v) = ::bcs_model::Optional::present(&self.#member) {
                return Ok(
                    ::bcs_model::adt::write_variant_index(buf, #ix)
                        + ::bcs_model::Encode::write_to(__v, buf)?
                        + ::bcs_model::Target::resolve_zero(buf)
                );
            }
        }
    });
    quote! {
        #( #arms )*
        Err(::bcs_model::adt::no_active_variant::<Self>())
    }
}

fn tagged_union(c: &Container<'_>) -> Option<TokenStream> {
    let (names, active) = match &c.body {
        Body::Record(..) => return None,
        Body::Union(variants) => {
            let names: Vec<String> = variants.iter().map(|v| v.ident.to_string()).collect();
            let active = if variants.is_empty() {
                quote! { match *self {} }
            } else {
                let ident = variants.iter().map(|v| v.ident);
                let ix = 0..variants.len();
                quote! {
                    match self {
                        #( Self::#ident { .. } => ::core::option::Option::Some(#ix), )*
                    }
                }
            };
            (names, active)
        }
        Body::Slots(_, fields) => {
            let names: Vec<String> = fields.iter().map(|f| member_name(&f.member)).collect();
            let member = fields.iter().map(|f| &f.member);
            let ix = 0..fields.len();
            let active = quote! {
                #(
                    if ::bcs_model::Optional::is_present(&self.#member) {
                        return ::core::option::Option::Some(#ix);
                    }
                )*
                ::core::option::Option::None
            };
            (names, active)
        }
    };

    let name = &c.input.ident;
    let (impl_generics, ty_generics, where_clause) = c.input.generics.split_for_impl();
    Some(quote! {
        impl #impl_generics ::bcs_model::TaggedUnion for #name #ty_generics #where_clause {
            const VARIANTS: &'static [&'static str] = &[#( #names ),*];

            fn active_variant(&self) -> ::core::option::Option<usize> {
                #active
            }
        }
    })
}

pub(crate) fn expand(c: &Container<'_>) -> TokenStream {
    let name = &c.input.ident;
    let encode = quote! { ::bcs_model::Encode };
    let generics = bound::with_bound(&c.input.generics, &encode, bound::field_predicates(c, &encode, false));
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let body = match &c.body {
        Body::Record(_, fields) => record(fields),
        Body::Union(variants) => union(variants),
        Body::Slots(_, fields) => slots(fields),
    };
    let tagged = tagged_union(c);

    quote! {
        impl #impl_generics ::bcs_model::Encode for #name #ty_generics #where_clause {
            #[allow(unused_variables)]
            fn write_to<__U: ::bcs_model::Target>(
                &self,
                buf: &mut __U,
            ) -> ::bcs_model::EncodeResult<usize> {
                #body
            }
        }

        #tagged
    }
}
