use darling::FromAttributes;
use proc_macro::TokenStream;
use quote::quote;

use crate::parser::{MemberAttrs, TypeAttrs};

/// #[derive(CqlEnum)] implements CqlEnum, reading from a CQL value and conversion
/// into a CQL value for a fieldless enum.
pub(crate) fn cql_enum_derive(tokens_input: TokenStream) -> Result<proc_macro2::TokenStream, syn::Error> {
    let input: syn::DeriveInput = syn::parse(tokens_input)?;
    let enum_name = &input.ident;
    let type_name = enum_name.to_string();
    let data = crate::parser::parse_fieldless_enum(&input, "CqlEnum")?;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let path = TypeAttrs::from_attributes(&input.attrs)?.macro_internal_path();

    let variants = data
        .variants
        .iter()
        .map(|variant| {
            let attrs = MemberAttrs::from_attributes(&variant.attrs)?;
            let name = attrs
                .rename
                .unwrap_or_else(|| variant.ident.to_string());
            Ok((&variant.ident, name))
        })
        .collect::<Result<Vec<_>, syn::Error>>()?;

    let constants = variants.iter().map(|(_, name)| name);
    let to_name_arms = variants.iter().map(|(ident, name)| {
        quote! { #enum_name::#ident => #name, }
    });
    let from_name_arms = variants.iter().map(|(ident, name)| {
        quote! { #name => ::std::option::Option::Some(#enum_name::#ident), }
    });

    Ok(quote! {
        impl #impl_generics #path::CqlEnum for #enum_name #ty_generics #where_clause {
            const TYPE_NAME: &'static str = #type_name;
            const CONSTANTS: &'static [&'static str] = &[#(#constants),*];

            fn name(&self) -> &'static str {
                match self {
                    #(#to_name_arms)*
                }
            }

            fn from_name(name: &str) -> ::std::option::Option<Self> {
                match name {
                    #(#from_name_arms)*
                    _ => ::std::option::Option::None,
                }
            }
        }

        impl #impl_generics #path::FromCqlVal<#path::CqlValue> for #enum_name #ty_generics #where_clause {
            fn from_cql(cql_val: #path::CqlValue) -> ::std::result::Result<Self, #path::FromCqlValError> {
                #path::enum_from_cql::<Self>(cql_val)
            }
        }

        impl #impl_generics ::std::convert::From<#enum_name #ty_generics> for #path::CqlValue #where_clause {
            fn from(value: #enum_name #ty_generics) -> Self {
                #path::CqlValue::Text(
                    <#enum_name #ty_generics as #path::CqlEnum>::name(&value).to_owned()
                )
            }
        }
    })
}
