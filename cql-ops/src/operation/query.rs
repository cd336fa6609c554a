use std::collections::HashMap;

use cql_ops_core::cql_to_rust::FromCqlVal;
use cql_ops_core::{CqlValue, FromRow};

use crate::errors::OperationError;
use crate::processing::{
    process, ColumnMapper, FirstColumn, Processed, ResultProcessor, ResultSetExtractor,
    RowCallbackHandler, RowMapper, TypedRowMapper,
};
use crate::response::ResultSet;
use crate::statement::{StatementConfig, StatementSource};
use crate::template::Template;

use super::future::{OperationFuture, ResultSetFuture};

/// A pending query, started with [`Template::query`].
///
/// Pick a result shape with one of the selector methods, or execute it as is to get the
/// raw [`ResultSet`].
#[derive(Debug)]
#[must_use]
pub struct QueryOperation {
    template: Template,
    source: StatementSource,
    overrides: StatementConfig,
}

impl QueryOperation {
    pub(crate) fn new(template: Template, source: StatementSource) -> Self {
        QueryOperation {
            template,
            source,
            overrides: StatementConfig::default(),
        }
    }

    /// Sets the page size for this query, overriding the statement's own.
    pub fn page_size(mut self, page_size: i32) -> Self {
        assert!(page_size > 0, "page size must be larger than 0");
        self.overrides.page_size = Some(page_size);
        self
    }

    /// Enables or disables CQL tracing for this query.
    pub fn tracing(mut self, tracing: bool) -> Self {
        self.overrides.tracing = Some(tracing);
        self
    }

    pub fn execute(self) -> Result<ResultSet, OperationError> {
        self.template.run(self.source, &self.overrides)
    }

    pub fn execute_async(self) -> ResultSetFuture {
        self.template.run_async(self.source, self.overrides)
    }

    /// Hands every row to `handler`.
    pub fn for_each<'p>(self, handler: impl RowCallbackHandler + 'p) -> ForEachOperation<'p> {
        ForEachOperation {
            inner: self.processed(ResultProcessor::row_callback(handler)),
        }
    }

    /// Maps every row with `mapper`, preserving result order.
    pub fn map<'p, T>(self, mapper: impl RowMapper<T> + 'p) -> RowsOperation<'p, T> {
        RowsOperation {
            inner: self.processed(ResultProcessor::rows(mapper)),
        }
    }

    /// Converts the first column of every row into `T`.
    pub fn first_column<T>(self) -> RowsOperation<'static, T>
    where
        T: FromCqlVal<Option<CqlValue>> + 'static,
    {
        self.map(FirstColumn::<T>::new())
    }

    /// Maps every row to a column name to value map.
    pub fn as_map(self) -> RowsOperation<'static, HashMap<String, Option<CqlValue>>> {
        self.map(ColumnMapper)
    }

    /// Parses every row as `R`.
    pub fn typed<R: FromRow + 'static>(self) -> RowsOperation<'static, R> {
        self.map(TypedRowMapper::<R>::new())
    }

    /// Gives the whole result set to `extractor`.
    pub fn transform<'p, T>(
        self,
        extractor: impl ResultSetExtractor<T> + 'p,
    ) -> TransformOperation<'p, T> {
        TransformOperation {
            inner: self.processed(ResultProcessor::extractor(extractor)),
        }
    }

    /// Requires the query to return exactly one row.
    pub fn single_result(self) -> SingleResultOperation {
        SingleResultOperation { query: self }
    }

    fn processed<'p, T>(self, processor: ResultProcessor<'p, T>) -> ProcessedQuery<'p, T> {
        ProcessedQuery {
            query: self,
            processor,
        }
    }
}

/// A query that must return exactly one row.
///
/// Executing it fails with [`SingleRowError`](crate::errors::SingleRowError) if the
/// result is empty or has a second row.
#[derive(Debug)]
#[must_use]
pub struct SingleResultOperation {
    query: QueryOperation,
}

impl SingleResultOperation {
    pub fn map<'p, T>(self, mapper: impl RowMapper<T> + 'p) -> SingleRowOperation<'p, T> {
        SingleRowOperation {
            inner: self.query.processed(ResultProcessor::single(mapper)),
        }
    }

    pub fn first_column<T>(self) -> SingleRowOperation<'static, T>
    where
        T: FromCqlVal<Option<CqlValue>> + 'static,
    {
        self.map(FirstColumn::<T>::new())
    }

    pub fn as_map(self) -> SingleRowOperation<'static, HashMap<String, Option<CqlValue>>> {
        self.map(ColumnMapper)
    }

    pub fn typed<R: FromRow + 'static>(self) -> SingleRowOperation<'static, R> {
        self.map(TypedRowMapper::<R>::new())
    }
}

// A query together with the processor its result goes through.
struct ProcessedQuery<'p, T> {
    query: QueryOperation,
    processor: ResultProcessor<'p, T>,
}

impl<T> ProcessedQuery<'_, T> {
    fn run(self) -> Result<Processed<T>, OperationError> {
        let rs = self.query.execute()?;
        process(rs, self.processor)
    }
}

impl<T: Send + 'static> ProcessedQuery<'static, T> {
    fn run_async(self) -> OperationFuture<Processed<T>> {
        let processor = self.processor;
        self.query
            .execute_async()
            .and_then(move |rs| process(rs, processor))
    }
}

/// Query whose rows are handed to a callback.
#[must_use]
pub struct ForEachOperation<'p> {
    inner: ProcessedQuery<'p, ()>,
}

impl ForEachOperation<'_> {
    pub fn execute(self) -> Result<(), OperationError> {
        self.inner.run()?.into_unit()
    }
}

impl ForEachOperation<'static> {
    pub fn execute_async(self) -> OperationFuture<()> {
        self.inner.run_async().and_then(Processed::into_unit)
    }
}

/// Query whose rows are mapped one by one.
#[must_use]
pub struct RowsOperation<'p, T> {
    inner: ProcessedQuery<'p, T>,
}

impl<T> RowsOperation<'_, T> {
    pub fn execute(self) -> Result<Vec<T>, OperationError> {
        self.inner.run()?.into_many()
    }
}

impl<T: Send + 'static> RowsOperation<'static, T> {
    pub fn execute_async(self) -> OperationFuture<Vec<T>> {
        self.inner.run_async().and_then(Processed::into_many)
    }
}

/// Query whose only row is mapped.
#[must_use]
pub struct SingleRowOperation<'p, T> {
    inner: ProcessedQuery<'p, T>,
}

impl<T> SingleRowOperation<'_, T> {
    pub fn execute(self) -> Result<T, OperationError> {
        self.inner.run()?.into_one()
    }
}

impl<T: Send + 'static> SingleRowOperation<'static, T> {
    pub fn execute_async(self) -> OperationFuture<T> {
        self.inner.run_async().and_then(Processed::into_one)
    }
}

/// Query whose whole result set goes through an extractor.
#[must_use]
pub struct TransformOperation<'p, T> {
    inner: ProcessedQuery<'p, T>,
}

impl<T> TransformOperation<'_, T> {
    pub fn execute(self) -> Result<T, OperationError> {
        self.inner.run()?.into_one()
    }
}

impl<T: Send + 'static> TransformOperation<'static, T> {
    pub fn execute_async(self) -> OperationFuture<T> {
        self.inner.run_async().and_then(Processed::into_one)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use assert_matches::assert_matches;
    use cql_ops_core::cql_to_rust::FromRowError;
    use cql_ops_core::Row;

    use super::*;
    use crate::errors::SingleRowError;
    use crate::utils::test_utils::{setup_tracing, MockSession};

    const BOOKS: &str = "SELECT isbn FROM book";
    const ONE_BOOK: &str = "SELECT isbn FROM book WHERE isbn = '1234'";

    fn template() -> (Template, MockSession) {
        let session = MockSession::new()
            .with_isbns(BOOKS, &["1234", "2345", "3456"])
            .with_isbns(ONE_BOOK, &["1234"]);
        (Template::new(Arc::new(session.clone())), session)
    }

    #[test]
    fn options_override_statement_settings() {
        let (template, session) = template();
        template
            .query(BOOKS)
            .page_size(2)
            .tracing(true)
            .execute()
            .unwrap();

        let executed = session.executed();
        assert_eq!(executed[0].get_page_size(), Some(2));
        assert!(executed[0].get_tracing());
    }

    #[test]
    fn shapes() {
        setup_tracing();
        let (template, _) = template();

        let mut seen = Vec::new();
        template
            .query(BOOKS)
            .for_each(|row: Row| -> Result<(), FromRowError> {
                seen.push(row.get::<String>(0)?);
                Ok(())
            })
            .execute()
            .unwrap();
        assert_eq!(seen, ["1234", "2345", "3456"]);

        let isbns = template.query(BOOKS).first_column::<String>().execute().unwrap();
        assert_eq!(isbns, ["1234", "2345", "3456"]);

        let count = template
            .query(BOOKS)
            .transform(|rs: ResultSet| -> Result<usize, OperationError> { Ok(rs.count()) })
            .execute()
            .unwrap();
        assert_eq!(count, 3);

        let isbn = template
            .query(ONE_BOOK)
            .single_result()
            .first_column::<String>()
            .execute()
            .unwrap();
        assert_eq!(isbn, "1234");

        assert_matches!(
            template.query(BOOKS).single_result().as_map().execute(),
            Err(OperationError::SingleRow(SingleRowError::NonUniqueResult))
        );
    }

    #[tokio::test]
    async fn async_shapes_match_sync_ones() {
        setup_tracing();
        let (template, _) = template();

        let sync = template.query(BOOKS).as_map().execute().unwrap();
        let not_sync = template.query(BOOKS).as_map().execute_async().await.unwrap();
        assert_eq!(sync, not_sync);

        let isbn = template
            .query(ONE_BOOK)
            .single_result()
            .typed::<(String,)>()
            .execute_async()
            .await
            .unwrap();
        assert_eq!(isbn.0, "1234");

        assert_matches!(
            template
                .query(BOOKS)
                .single_result()
                .first_column::<String>()
                .execute_async()
                .await,
            Err(OperationError::SingleRow(SingleRowError::NonUniqueResult))
        );
    }
}
