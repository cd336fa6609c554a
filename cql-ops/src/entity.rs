//! Reading rows as mapped entities.
//!
//! How an entity is laid out in a table is decided by an [`EntityReader`]; the default
//! one goes through the entity's [`FromRow`] implementation, usually derived with
//! `#[derive(FromRow)]`.

use std::marker::PhantomData;
use std::sync::Arc;

use cql_ops_core::cql_to_rust::FromRowError;
use cql_ops_core::{FromRow, Row};

use crate::processing::{RowCallbackHandler, RowMapper};

/// Converts rows into entities of type `T`.
pub trait EntityReader<T>: Send + Sync {
    fn read(&self, row: Row) -> Result<T, FromRowError>;
}

impl<T, F> EntityReader<T> for F
where
    F: Fn(Row) -> Result<T, FromRowError> + Send + Sync,
{
    fn read(&self, row: Row) -> Result<T, FromRowError> {
        self(row)
    }
}

/// Reads entities through their [`FromRow`] implementation.
pub struct FromRowReader<T>(PhantomData<fn() -> T>);

impl<T> FromRowReader<T> {
    pub fn new() -> Self {
        FromRowReader(PhantomData)
    }
}

impl<T> Default for FromRowReader<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: FromRow> EntityReader<T> for FromRowReader<T> {
    fn read(&self, row: Row) -> Result<T, FromRowError> {
        T::from_row(row)
    }
}

/// Receives entities one by one, in result order.
pub trait EntryCallbackHandler<T>: Send {
    fn process_entry(&mut self, entry: T);
}

impl<T, F> EntryCallbackHandler<T> for F
where
    F: FnMut(T) + Send,
{
    fn process_entry(&mut self, entry: T) {
        self(entry)
    }
}

/// Reads every row with an [`EntityReader`] and hands the entity to an
/// [`EntryCallbackHandler`].
pub struct ReaderEntryCallbackAdapter<T, H> {
    reader: Arc<dyn EntityReader<T>>,
    handler: H,
}

impl<T, H: EntryCallbackHandler<T>> ReaderEntryCallbackAdapter<T, H> {
    pub fn new(reader: Arc<dyn EntityReader<T>>, handler: H) -> Self {
        ReaderEntryCallbackAdapter { reader, handler }
    }
}

impl<T, H: EntryCallbackHandler<T>> RowCallbackHandler for ReaderEntryCallbackAdapter<T, H> {
    fn process_row(&mut self, row: Row) -> Result<(), FromRowError> {
        let entry = self.reader.read(row)?;
        self.handler.process_entry(entry);
        Ok(())
    }
}

/// Maps rows through a shared [`EntityReader`].
pub(crate) struct ReaderRowMapper<T>(pub(crate) Arc<dyn EntityReader<T>>);

impl<T> RowMapper<T> for ReaderRowMapper<T> {
    fn map_row(&mut self, row: Row, _row_num: usize) -> Result<T, FromRowError> {
        self.0.read(row)
    }
}

/// An entity stored in a table of its own.
pub trait TableEntity {
    /// Name of the table the entity is read from unless told otherwise.
    fn table_name() -> &'static str;
}
