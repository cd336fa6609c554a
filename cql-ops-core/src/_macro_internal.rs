pub use crate::convert::{enum_from_cql, CqlEnum};
pub use crate::cql_to_rust::{FromCqlVal, FromCqlValError, FromRow, FromRowError};
pub use crate::value::{CqlValue, Row};
