use darling::FromAttributes;
use proc_macro::TokenStream;
use quote::quote_spanned;
use syn::ext::IdentExt;
use syn::parse_quote;
use syn::spanned::Spanned;

use crate::parser::{MemberAttrs, TypeAttrs};

/// #[derive(FromRow)] derives FromRow for struct
/// Works only on structs with named fields
pub(crate) fn from_row_derive(tokens_input: TokenStream) -> Result<syn::ItemImpl, syn::Error> {
    let input: syn::DeriveInput = syn::parse(tokens_input)?;
    let struct_name = &input.ident;
    let struct_fields = crate::parser::parse_named_fields(&input, "FromRow")?;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let path = TypeAttrs::from_attributes(&input.attrs)?.macro_internal_path();

    // Generates tokens for field_name: row.get_by_name::<field_type>("column")?, ...
    let set_fields_code = struct_fields
        .named
        .iter()
        .map(|field| {
            let attrs = MemberAttrs::from_attributes(&field.attrs)?;
            let field_name = field
                .ident
                .as_ref()
                .ok_or_else(|| syn::Error::new_spanned(field, "expected a named field"))?;
            let field_type = &field.ty;
            let column = attrs
                .rename
                .unwrap_or_else(|| field_name.unraw().to_string());

            Ok(quote_spanned! {field.span() =>
                #field_name: row.get_by_name::<#field_type>(#column)?,
            })
        })
        .collect::<Result<Vec<_>, syn::Error>>()?;

    Ok(parse_quote! {
        impl #impl_generics #path::FromRow for #struct_name #ty_generics #where_clause {
            fn from_row(row: #path::Row) -> ::std::result::Result<Self, #path::FromRowError> {
                ::std::result::Result::Ok(#struct_name {
                    #(#set_fields_code)*
                })
            }
        }
    })
}
