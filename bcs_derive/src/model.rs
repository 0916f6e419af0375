//! Validated view of a derive input
//!
//! Every attribute and field type is checked here, before any code is
//! generated, so the encode and decode expansions only ever see well-formed
//! input. Errors are accumulated and reported together.

use proc_macro2::TokenStream;
use quote::{quote, ToTokens};
use syn::{Attribute, Data, DeriveInput, Expr, ExprLit, Fields, Ident, Index, Lit, LitStr, Member, Meta, Type};

use crate::shape;
use crate::tag::{ContainerTag, FieldTag};

#[derive(Clone, Copy, PartialEq, Eq)]
pub(crate) enum Style {
    Named,
    Unnamed,
    Unit,
}

pub(crate) struct Field<'a> {
    pub member: Member,
    pub ty: &'a Type,
    pub tag: FieldTag,
}

pub(crate) struct Variant<'a> {
    pub ident: &'a Ident,
    pub style: Style,
    pub fields: Vec<Field<'a>>,
}

pub(crate) enum Body<'a> {
    /// A struct whose fields are written in declaration order.
    Record(Style, Vec<Field<'a>>),
    /// A Rust enum.
    Union(Vec<Variant<'a>>),
    /// A struct tagged `#[bcs = "enum"]`, whose fields are optional slots.
    Slots(Style, Vec<Field<'a>>),
}

pub(crate) struct Container<'a> {
    pub input: &'a DeriveInput,
    pub body: Body<'a>,
}

#[derive(Default)]
struct Errors(Option<syn::Error>);

impl Errors {
    fn push(&mut self, err: syn::Error) {
        match &mut self.0 {
            Some(acc) => acc.combine(err),
            None => self.0 = Some(err),
        }
    }

    fn finish(self) -> syn::Result<()> {
        self.0.map_or(Ok(()), Err)
    }
}

/// Extracts the string of the single `#[bcs = "..."]` attribute, if any.
fn tag_string(attrs: &[Attribute]) -> syn::Result<Option<LitStr>> {
    let mut found = None;
    for attr in attrs.iter().filter(|attr| attr.path().is_ident("bcs")) {
        let lit = match &attr.meta {
            Meta::NameValue(nv) => match &nv.value {
                Expr::Lit(ExprLit { lit: Lit::Str(s), .. }) => s.clone(),
                other => {
                    return Err(syn::Error::new_spanned(
                        other,
                        "expected a string literal, as in `#[bcs = \"optional\"]`",
                    ))
                }
            },
            _ => return Err(syn::Error::new_spanned(attr, "expected `#[bcs = \"...\"]`")),
        };
        if found.is_some() {
            return Err(syn::Error::new_spanned(attr, "duplicate `bcs` tag"));
        }
        found = Some(lit);
    }
    Ok(found)
}

fn field_tag(attrs: &[Attribute]) -> syn::Result<FieldTag> {
    match tag_string(attrs)? {
        None => Ok(FieldTag::Normal),
        Some(lit) => FieldTag::parse(&lit.value()).map_err(|e| syn::Error::new(lit.span(), e)),
    }
}

fn container_tag(attrs: &[Attribute]) -> syn::Result<ContainerTag> {
    match tag_string(attrs)? {
        None => Ok(ContainerTag::Record),
        Some(lit) => ContainerTag::parse(&lit.value()).map_err(|e| syn::Error::new(lit.span(), e)),
    }
}

fn style_of(fields: &Fields) -> Style {
    match fields {
        Fields::Named(_) => Style::Named,
        Fields::Unnamed(_) => Style::Unnamed,
        Fields::Unit => Style::Unit,
    }
}

fn collect_fields<'a>(fields: &'a Fields, allow_tags: bool, errors: &mut Errors) -> Vec<Field<'a>> {
    let mut ret = Vec::with_capacity(fields.len());
    for (ix, field) in fields.iter().enumerate() {
        let tag = if allow_tags {
            field_tag(&field.attrs)
        } else {
            match tag_string(&field.attrs) {
                Ok(None) => Ok(FieldTag::Normal),
                Ok(Some(lit)) => Err(syn::Error::new(
                    lit.span(),
                    "fields of a `#[bcs = \"enum\"]` struct are variant slots and take no tags",
                )),
                Err(e) => Err(e),
            }
        };
        let tag = tag.unwrap_or_else(|e| {
            errors.push(e);
            FieldTag::Normal
        });
        if tag != FieldTag::Ignored {
            if let Err(e) = shape::check(&field.ty) {
                errors.push(e);
            }
        }
        let member = match &field.ident {
            Some(ident) => Member::Named(ident.clone()),
            None => Member::Unnamed(Index::from(ix)),
        };
        ret.push(Field {
            member,
            ty: &field.ty,
            tag,
        });
    }
    ret
}

impl<'a> Container<'a> {
    pub(crate) fn from_ast(input: &'a DeriveInput) -> syn::Result<Self> {
        let mut errors = Errors::default();
        let ctag = container_tag(&input.attrs).unwrap_or_else(|e| {
            errors.push(e);
            ContainerTag::Record
        });

        let body = match &input.data {
            Data::Struct(data) => {
                let style = style_of(&data.fields);
                match ctag {
                    ContainerTag::Record => Body::Record(style, collect_fields(&data.fields, true, &mut errors)),
                    ContainerTag::Enum => Body::Slots(style, collect_fields(&data.fields, false, &mut errors)),
                }
            }
            Data::Enum(data) => {
                if ctag == ContainerTag::Enum {
                    errors.push(syn::Error::new_spanned(
                        &input.ident,
                        "`#[bcs = \"enum\"]` applies to structs; an enum is already a tagged union",
                    ));
                }
                let variants = data
                    .variants
                    .iter()
                    .map(|v| {
                        if let Ok(Some(lit)) = tag_string(&v.attrs) {
                            errors.push(syn::Error::new(lit.span(), "variants take no `bcs` tags"));
                        }
                        Variant {
                            ident: &v.ident,
                            style: style_of(&v.fields),
                            fields: collect_fields(&v.fields, true, &mut errors),
                        }
                    })
                    .collect();
                Body::Union(variants)
            }
            Data::Union(_) => {
                return Err(syn::Error::new_spanned(
                    input,
                    "unions have no canonical encoding; implement `Encode` and `Decode` by hand",
                ))
            }
        };

        errors.finish()?;
        Ok(Self { input, body })
    }
}

/// Builds a constructor expression from one expression per field.
pub(crate) fn construct(path: TokenStream, style: Style, fields: &[Field<'_>], exprs: &[TokenStream]) -> TokenStream {
    let member = fields.iter().map(|f| &f.member);
    match style {
        Style::Unit => path,
        Style::Named | Style::Unnamed => quote! { #path { #( #member: #exprs ),* } },
    }
}

/// Display name of a slot or field, used in `TaggedUnion::VARIANTS`.
pub(crate) fn member_name(member: &Member) -> String {
    match member {
        Member::Named(ident) => ident.to_string(),
        Member::Unnamed(ix) => ix.index.to_string(),
    }
}

/// Whether `ty` mentions any of the type parameters in `params`.
pub(crate) fn mentions_any(ty: &Type, params: &[&Ident]) -> bool {
    fn walk(tokens: TokenStream, params: &[&Ident]) -> bool {
        tokens.into_iter().any(|tt| match tt {
            proc_macro2::TokenTree::Ident(ident) => params.iter().any(|p| **p == ident),
            proc_macro2::TokenTree::Group(g) => walk(g.stream(), params),
            _ => false,
        })
    }
    walk(ty.to_token_stream(), params)
}

#[cfg(test)]
mod test {
    use super::*;
    use syn::parse_quote;

    fn error_of(input: DeriveInput) -> String {
        match Container::from_ast(&input) {
            Ok(_) => panic!("expected an error"),
            Err(e) => e.to_string(),
        }
    }

    #[test]
    fn accepts_tagged_record() {
        let input: DeriveInput = parse_quote! {
            struct Transfer {
                amount: u64,
                #[bcs = "optional"]
                memo: Option<String>,
                #[bcs = "-"]
                scratch: f64,
            }
        };
        let c = Container::from_ast(&input).unwrap();
        let Body::Record(Style::Named, fields) = &c.body else {
            panic!("expected a record")
        };
        let tags: Vec<FieldTag> = fields.iter().map(|f| f.tag).collect();
        assert_eq!(tags, [FieldTag::Normal, FieldTag::Optional, FieldTag::Ignored]);
    }

    #[test]
    fn unknown_tag_is_named() {
        let err = error_of(parse_quote! {
            struct S {
                #[bcs = "omitempty"]
                x: u8,
            }
        });
        assert_eq!(err, "unknown bcs tag `omitempty`");
    }

    #[test]
    fn duplicate_tag() {
        let err = error_of(parse_quote! {
            struct S {
                #[bcs = "optional"]
                #[bcs = "-"]
                x: Option<u8>,
            }
        });
        assert_eq!(err, "duplicate `bcs` tag");
    }

    #[test]
    fn slots_take_no_tags() {
        let err = error_of(parse_quote! {
            #[bcs = "enum"]
            struct S {
                #[bcs = "optional"]
                a: Option<u8>,
            }
        });
        assert!(err.contains("variant slots"));
    }

    #[test]
    fn enum_tag_on_enum() {
        let err = error_of(parse_quote! {
            #[bcs = "enum"]
            enum E { A }
        });
        assert!(err.contains("already a tagged union"));
    }

    #[test]
    fn float_field() {
        let err = error_of(parse_quote! {
            struct S(u8, f32);
        });
        assert!(err.starts_with("floating-point number `f32`"));
    }

    #[test]
    fn generic_mentions() {
        let t: Ident = parse_quote!(T);
        assert!(mentions_any(&parse_quote!(Vec<Box<T>>), &[&t]));
        assert!(!mentions_any(&parse_quote!(Vec<u8>), &[&t]));
    }
}
