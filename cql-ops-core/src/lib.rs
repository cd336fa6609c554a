//! Defines the CQL-level building blocks of cql-ops: validated identifiers, the value
//! model returned by a session, schema-change specifications with their CQL generators,
//! and programmatic DML statement builders.
//!
//! Mainly intended to be used through the `cql-ops` crate, but can also be useful on its
//! own for applications that only need to render CQL text.

pub(crate) mod literal;

pub mod convert;
pub mod cql_to_rust;
pub mod errors;
pub mod generator;
pub mod identifier;
pub mod query;
pub mod spec;
pub mod value;

pub use cql_ops_macros::CqlEnum;
pub use cql_ops_macros::FromRow;

pub use crate::convert::CqlEnum;
pub use crate::cql_to_rust::{FromCqlVal, FromRow};
pub use crate::identifier::Identifier;
pub use crate::value::{ColumnSpec, ColumnType, CqlValue, Row};

#[doc(hidden)]
pub mod _macro_internal;
