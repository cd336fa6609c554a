use proc_macro::TokenStream;
use quote::ToTokens;

mod cql_enum;
mod from_row;
mod parser;

/// #[derive(FromRow)] derives FromRow for a struct with named fields.
///
/// Every field is read from the column of the same name, in any column order.
/// Supported attributes:
/// - `#[cql_ops(crate = path)]` on the struct, when `cql_ops` is renamed or re-exported,
/// - `#[cql_ops(rename = "column")]` on a field, to read it from a differently named column.
#[proc_macro_derive(FromRow, attributes(cql_ops))]
pub fn from_row_derive(tokens_input: TokenStream) -> TokenStream {
    match from_row::from_row_derive(tokens_input) {
        Ok(t) => t.into_token_stream().into(),
        Err(e) => e.into_compile_error().into(),
    }
}

/// #[derive(CqlEnum)] stores a fieldless enum by the names of its variants.
///
/// Also derives reading the enum from a text column and converting it into a
/// `CqlValue`. Supported attributes:
/// - `#[cql_ops(crate = path)]` on the enum,
/// - `#[cql_ops(rename = "NAME")]` on a variant, to store it under another name.
#[proc_macro_derive(CqlEnum, attributes(cql_ops))]
pub fn cql_enum_derive(tokens_input: TokenStream) -> TokenStream {
    match cql_enum::cql_enum_derive(tokens_input) {
        Ok(t) => t.into_token_stream().into(),
        Err(e) => e.into_compile_error().into(),
    }
}
