use std::fmt;
use std::sync::Arc;

use cql_ops_core::query::Select;
use cql_ops_core::{CqlValue, FromRow};

use crate::entity::{
    EntityReader, EntryCallbackHandler, FromRowReader, ReaderEntryCallbackAdapter,
    ReaderRowMapper,
};
use crate::errors::{BadIdentifier, OperationError};
use crate::template::Template;

use super::future::OperationFuture;
use super::query::QueryOperation;

/// A pending read of entities of type `T`, started with [`Template::get_all`].
///
/// Reads from the entity's own table unless pointed elsewhere with
/// [`from_table`](GetOperation::from_table).
#[must_use]
pub struct GetOperation<T> {
    template: Template,
    select: Select,
    reader: Arc<dyn EntityReader<T>>,
}

impl<T> fmt::Debug for GetOperation<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GetOperation")
            .field("template", &self.template)
            .field("select", &self.select)
            .finish_non_exhaustive()
    }
}

impl<T: FromRow + Send + 'static> GetOperation<T> {
    pub(crate) fn new(template: Template, table: &str) -> Result<Self, BadIdentifier> {
        Ok(GetOperation {
            template,
            select: Select::all().from(table)?,
            reader: Arc::new(FromRowReader::<T>::new()),
        })
    }
}

impl<T: Send + 'static> GetOperation<T> {
    /// Reads from `table` instead of the entity's table.
    pub fn from_table(mut self, table: impl Into<String>) -> Result<Self, BadIdentifier> {
        self.select = self.select.from(table)?;
        Ok(self)
    }

    /// Only reads rows whose `column` equals `value`.
    pub fn where_eq(
        mut self,
        column: impl Into<String>,
        value: impl Into<CqlValue>,
    ) -> Result<Self, BadIdentifier> {
        self.select = self.select.where_eq(column, value)?;
        Ok(self)
    }

    /// Reads rows with `reader` instead of the entity's [`FromRow`] implementation.
    pub fn with_reader(mut self, reader: impl EntityReader<T> + 'static) -> Self {
        self.reader = Arc::new(reader);
        self
    }

    pub fn execute(self) -> Result<Vec<T>, OperationError> {
        let (query, reader) = self.into_query()?;
        query.map(ReaderRowMapper(reader)).execute()
    }

    /// Reads the only matching entity.
    pub fn execute_one(self) -> Result<T, OperationError> {
        let (query, reader) = self.into_query()?;
        query.single_result().map(ReaderRowMapper(reader)).execute()
    }

    /// Hands every entity to `handler`, in result order.
    pub fn for_each(self, handler: impl EntryCallbackHandler<T>) -> Result<(), OperationError> {
        let (query, reader) = self.into_query()?;
        query
            .for_each(ReaderEntryCallbackAdapter::new(reader, handler))
            .execute()
    }

    pub fn execute_async(self) -> OperationFuture<Vec<T>> {
        match self.into_query() {
            Ok((query, reader)) => query.map(ReaderRowMapper(reader)).execute_async(),
            Err(err) => OperationFuture::ready(Err(err)),
        }
    }

    fn into_query(self) -> Result<(QueryOperation, Arc<dyn EntityReader<T>>), OperationError> {
        let statement = self.select.build()?;
        Ok((self.template.query(statement), self.reader))
    }
}
