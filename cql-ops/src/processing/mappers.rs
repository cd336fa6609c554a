use std::collections::HashMap;
use std::marker::PhantomData;

use cql_ops_core::cql_to_rust::{FromCqlVal, FromRowError};
use cql_ops_core::{CqlValue, FromRow, Row};

use super::RowMapper;

/// Converts the first column of every row into `T`.
///
/// A value of a different CQL type is an error, it is never cast.
pub struct FirstColumn<T>(PhantomData<fn() -> T>);

impl<T> FirstColumn<T> {
    pub fn new() -> Self {
        FirstColumn(PhantomData)
    }
}

impl<T> Default for FirstColumn<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> RowMapper<T> for FirstColumn<T>
where
    T: FromCqlVal<Option<CqlValue>>,
{
    fn map_row(&mut self, mut row: Row, _row_num: usize) -> Result<T, FromRowError> {
        row.take(0)
    }
}

/// Maps every row to a column name to value map.
#[derive(Debug, Default, Clone, Copy)]
pub struct ColumnMapper;

impl RowMapper<HashMap<String, Option<CqlValue>>> for ColumnMapper {
    fn map_row(
        &mut self,
        row: Row,
        _row_num: usize,
    ) -> Result<HashMap<String, Option<CqlValue>>, FromRowError> {
        Ok(row.into_map())
    }
}

/// Parses every row as `R` with its [`FromRow`] implementation.
pub struct TypedRowMapper<R>(PhantomData<fn() -> R>);

impl<R> TypedRowMapper<R> {
    pub fn new() -> Self {
        TypedRowMapper(PhantomData)
    }
}

impl<R> Default for TypedRowMapper<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: FromRow> RowMapper<R> for TypedRowMapper<R> {
    fn map_row(&mut self, row: Row, _row_num: usize) -> Result<R, FromRowError> {
        row.into_typed()
    }
}
