use darling::FromAttributes;
use syn::{parse_quote, Data, DataEnum, DeriveInput, Fields, FieldsNamed};

/// Parses a struct DeriveInput and returns named fields of this struct.
pub(crate) fn parse_named_fields<'a>(
    input: &'a DeriveInput,
    current_derive: &str,
) -> Result<&'a FieldsNamed, syn::Error> {
    let create_err_msg = || {
        format!(
            "derive({}) works only for structs with named fields",
            current_derive
        )
    };

    match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named_fields) => Ok(named_fields),
            _ => Err(syn::Error::new_spanned(data.struct_token, create_err_msg())),
        },
        Data::Enum(e) => Err(syn::Error::new_spanned(e.enum_token, create_err_msg())),
        Data::Union(u) => Err(syn::Error::new_spanned(u.union_token, create_err_msg())),
    }
}

/// Parses an enum DeriveInput and returns its variants, which all have to be fieldless.
pub(crate) fn parse_fieldless_enum<'a>(
    input: &'a DeriveInput,
    current_derive: &str,
) -> Result<&'a DataEnum, syn::Error> {
    let data = match &input.data {
        Data::Enum(data) => data,
        Data::Struct(s) => {
            return Err(syn::Error::new_spanned(
                s.struct_token,
                format!("derive({}) works only for enums", current_derive),
            ))
        }
        Data::Union(u) => {
            return Err(syn::Error::new_spanned(
                u.union_token,
                format!("derive({}) works only for enums", current_derive),
            ))
        }
    };

    if data.variants.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.ident,
            format!("derive({}) needs at least one variant", current_derive),
        ));
    }
    if let Some(variant) = data
        .variants
        .iter()
        .find(|v| !matches!(v.fields, Fields::Unit))
    {
        return Err(syn::Error::new_spanned(
            variant,
            format!("derive({}) works only for variants without fields", current_derive),
        ));
    }

    Ok(data)
}

/// `#[cql_ops(...)]` attributes understood on the deriving type itself.
#[derive(FromAttributes)]
#[darling(attributes(cql_ops))]
pub(crate) struct TypeAttrs {
    #[darling(rename = "crate")]
    crate_path: Option<syn::Path>,
}

impl TypeAttrs {
    /// The path to `_macro_internal` module, which contains exports used by macros.
    pub(crate) fn macro_internal_path(&self) -> syn::Path {
        match &self.crate_path {
            Some(path) => parse_quote!(#path::_macro_internal),
            None => parse_quote!(::cql_ops::_macro_internal),
        }
    }
}

/// `#[cql_ops(...)]` attributes understood on fields and variants.
#[derive(FromAttributes, Default)]
#[darling(attributes(cql_ops))]
pub(crate) struct MemberAttrs {
    // Column name (or stored constant name) to use instead of the Rust one.
    #[darling(default)]
    pub(crate) rename: Option<String>,
}
