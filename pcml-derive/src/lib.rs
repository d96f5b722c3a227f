//! # PCML Derive
//!
//! Procedural macros for PCML record definitions.
//!
//! This crate provides the `PcmlRecord` derive, which turns `#[pcml(...)]`
//! attributes on a record struct into its static field metadata table.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::ext::IdentExt;
use syn::meta::ParseNestedMeta;
use syn::{Data, DeriveInput, Fields, LitInt, LitStr, Path, parse_macro_input};

/// Derives `PcmlRecord`, and `PcmlProgram` for program records.
///
/// # Example
/// ```ignore
/// #[derive(PcmlRecord)]
/// #[pcml(program(name = "ADDR", document = "META-INF.ADDR"))]
/// struct Addr {
///     #[pcml(structure)]
///     home: Address,
///     #[pcml(data(name = "zip", usage = "input", length = 5, complete_with = "0"))]
///     zip: String,
///     #[pcml(array(name = "tags", size = 3, element = "char", usage = "inputoutput"))]
///     tags: Vec<String>,
/// }
/// ```
///
/// `#[pcml(structure)]` on the struct sets `PcmlRecord::STRUCTURE`. A field
/// without a `pcml` attribute is treated as `data` named after the field,
/// with usage `inputoutput` and no padding. Use
/// `#[pcml(crate = "path")]` when the runtime crate is not reachable as
/// `::pcml`.
#[proc_macro_derive(PcmlRecord, attributes(pcml))]
pub fn derive_pcml_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

struct ProgramAttr {
    name: LitStr,
    document: LitStr,
}

#[derive(Default)]
struct RecordAttrs {
    krate: Option<Path>,
    program: Option<ProgramAttr>,
    structure: bool,
}

enum FieldAttr {
    Data {
        name: LitStr,
        usage: Option<LitStr>,
        length: Option<LitInt>,
        complete_with: Option<LitStr>,
    },
    Array {
        name: LitStr,
        size: LitInt,
        element: Option<LitStr>,
        usage: Option<LitStr>,
    },
    Structure,
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let attrs = record_attrs(input)?;
    let krate = attrs
        .krate
        .unwrap_or_else(|| syn::parse_quote!(::pcml));

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(syn::Error::new(
                    input.ident.span(),
                    "PcmlRecord requires a struct with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new(
                input.ident.span(),
                "PcmlRecord can only be derived for structs",
            ));
        }
    };

    let mut metas = Vec::with_capacity(fields.len());
    for field in fields {
        let Some(ident) = &field.ident else {
            continue;
        };
        let ident_str = ident.unraw().to_string();
        let kind = match field_attr(field)? {
            Some(attr) => field_kind(&krate, attr)?,
            None => field_kind(
                &krate,
                FieldAttr::Data {
                    name: LitStr::new(&ident_str, ident.span()),
                    usage: None,
                    length: None,
                    complete_with: None,
                },
            )?,
        };
        metas.push(quote! {
            #krate::core::FieldMeta {
                ident: #ident_str,
                kind: #kind,
            }
        });
    }

    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let structure = attrs.structure;
    let mut expanded = quote! {
        impl #impl_generics #krate::core::PcmlRecord for #name #ty_generics #where_clause {
            const FIELDS: &'static [#krate::core::FieldMeta] = &[#(#metas),*];
            const STRUCTURE: bool = #structure;
        }
    };

    if let Some(program) = attrs.program {
        let program_name = program.name;
        let document_name = program.document;
        expanded.extend(quote! {
            impl #impl_generics #krate::core::PcmlProgram for #name #ty_generics #where_clause {
                const PROGRAM: #krate::core::ProgramMeta = #krate::core::ProgramMeta {
                    program_name: #program_name,
                    document_name: #document_name,
                };
            }
        });
    }

    Ok(expanded)
}

fn record_attrs(input: &DeriveInput) -> syn::Result<RecordAttrs> {
    let mut attrs = RecordAttrs::default();

    for attr in input.attrs.iter().filter(|a| a.path().is_ident("pcml")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("structure") {
                attrs.structure = true;
                Ok(())
            } else if meta.path.is_ident("crate") {
                let path: LitStr = meta.value()?.parse()?;
                attrs.krate = Some(path.parse()?);
                Ok(())
            } else if meta.path.is_ident("program") {
                attrs.program = Some(program_attr(&meta)?);
                Ok(())
            } else {
                Err(meta.error("unsupported pcml record attribute"))
            }
        })?;
    }

    if attrs.structure && attrs.program.is_some() {
        return Err(syn::Error::new(
            input.ident.span(),
            "a record cannot be both `structure` and `program`",
        ));
    }
    Ok(attrs)
}

fn program_attr(meta: &ParseNestedMeta<'_>) -> syn::Result<ProgramAttr> {
    let mut name: Option<LitStr> = None;
    let mut document: Option<LitStr> = None;
    meta.parse_nested_meta(|inner| {
        if inner.path.is_ident("name") {
            name = Some(inner.value()?.parse()?);
        } else if inner.path.is_ident("document") {
            document = Some(inner.value()?.parse()?);
        } else {
            return Err(inner.error("expected `name` or `document`"));
        }
        Ok(())
    })?;

    match (name, document) {
        (Some(name), Some(document)) => Ok(ProgramAttr { name, document }),
        _ => Err(meta.error("program requires both `name` and `document`")),
    }
}

fn field_attr(field: &syn::Field) -> syn::Result<Option<FieldAttr>> {
    let mut result: Option<FieldAttr> = None;

    for attr in field.attrs.iter().filter(|a| a.path().is_ident("pcml")) {
        attr.parse_nested_meta(|meta| {
            if result.is_some() {
                return Err(meta.error("only one pcml field kind is allowed"));
            }
            if meta.path.is_ident("structure") {
                result = Some(FieldAttr::Structure);
            } else if meta.path.is_ident("data") {
                result = Some(data_attr(&meta)?);
            } else if meta.path.is_ident("array") {
                result = Some(array_attr(&meta)?);
            } else {
                return Err(meta.error("expected `data`, `array` or `structure`"));
            }
            Ok(())
        })?;
    }

    Ok(result)
}

fn data_attr(meta: &ParseNestedMeta<'_>) -> syn::Result<FieldAttr> {
    let mut name: Option<LitStr> = None;
    let mut usage: Option<LitStr> = None;
    let mut length: Option<LitInt> = None;
    let mut complete_with: Option<LitStr> = None;
    meta.parse_nested_meta(|inner| {
        if inner.path.is_ident("name") {
            name = Some(inner.value()?.parse()?);
        } else if inner.path.is_ident("usage") {
            usage = Some(inner.value()?.parse()?);
        } else if inner.path.is_ident("length") {
            length = Some(inner.value()?.parse()?);
        } else if inner.path.is_ident("complete_with") {
            complete_with = Some(inner.value()?.parse()?);
        } else {
            return Err(inner.error("unsupported data attribute"));
        }
        Ok(())
    })?;

    let name = name.ok_or_else(|| meta.error("data requires `name`"))?;
    if length.is_some() != complete_with.is_some() {
        return Err(meta.error("`length` and `complete_with` must be given together"));
    }
    Ok(FieldAttr::Data {
        name,
        usage,
        length,
        complete_with,
    })
}

fn array_attr(meta: &ParseNestedMeta<'_>) -> syn::Result<FieldAttr> {
    let mut name: Option<LitStr> = None;
    let mut size: Option<LitInt> = None;
    let mut element: Option<LitStr> = None;
    let mut usage: Option<LitStr> = None;
    meta.parse_nested_meta(|inner| {
        if inner.path.is_ident("name") {
            name = Some(inner.value()?.parse()?);
        } else if inner.path.is_ident("size") {
            size = Some(inner.value()?.parse()?);
        } else if inner.path.is_ident("element") {
            element = Some(inner.value()?.parse()?);
        } else if inner.path.is_ident("usage") {
            usage = Some(inner.value()?.parse()?);
        } else {
            return Err(inner.error("unsupported array attribute"));
        }
        Ok(())
    })?;

    Ok(FieldAttr::Array {
        name: name.ok_or_else(|| meta.error("array requires `name`"))?,
        size: size.ok_or_else(|| meta.error("array requires `size`"))?,
        element,
        usage,
    })
}

fn field_kind(krate: &Path, attr: FieldAttr) -> syn::Result<TokenStream2> {
    let kind = match attr {
        FieldAttr::Data {
            name,
            usage,
            length,
            complete_with,
        } => {
            let usage = usage_tokens(krate, usage.as_ref())?;
            let padding = match (length, complete_with) {
                (Some(length), Some(fill)) => {
                    let length: u32 = length.base10_parse()?;
                    quote! {
                        ::core::option::Option::Some(#krate::core::Padding {
                            length: #length,
                            complete_with: #fill,
                        })
                    }
                }
                _ => quote! { ::core::option::Option::None },
            };
            quote! {
                #krate::core::FieldKind::Data {
                    pcml_name: #name,
                    usage: #usage,
                    padding: #padding,
                }
            }
        }
        FieldAttr::Array {
            name,
            size,
            element,
            usage,
        } => {
            let usage = usage_tokens(krate, usage.as_ref())?;
            let size: u32 = size.base10_parse()?;
            let element = match element {
                Some(element) => quote! { ::core::option::Option::Some(#element) },
                None => quote! { ::core::option::Option::None },
            };
            quote! {
                #krate::core::FieldKind::Array {
                    pcml_name: #name,
                    size: #size,
                    element: #element,
                    usage: #usage,
                }
            }
        }
        FieldAttr::Structure => quote! { #krate::core::FieldKind::Structure },
    };
    Ok(kind)
}

fn usage_tokens(krate: &Path, usage: Option<&LitStr>) -> syn::Result<TokenStream2> {
    let variant = match usage.map(LitStr::value).as_deref() {
        Some("input") => quote! { Input },
        Some("output") => quote! { Output },
        Some("inputoutput") | None => quote! { InputOutput },
        Some(other) => {
            return Err(syn::Error::new(
                usage.map_or_else(proc_macro2::Span::call_site, LitStr::span),
                format!("unknown usage `{other}`, expected input, output or inputoutput"),
            ));
        }
    };
    Ok(quote! { #krate::core::Usage::#variant })
}
