//! The execution engine behind every operation.

mod config;
mod ring;

pub use config::{TemplateConfig, TemplateConfigBuilder};
pub use ring::{HostMapper, RingMember, RingMemberHostMapper};

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use cql_ops_core::convert::ValueConverter;
use cql_ops_core::cql_to_rust::FromCqlVal;
use cql_ops_core::query::Truncate;
use cql_ops_core::spec::Specification;
use cql_ops_core::{CqlValue, FromRow};
use itertools::Itertools;
use tracing::{debug, trace};

use crate::entity::TableEntity;
use crate::errors::{BadIdentifier, OperationError};
use crate::operation::{
    ExecuteOperation, GetOperation, OperationFuture, QueryOperation, ResultSetFuture,
};
use crate::processing::{
    self, ColumnMapper, FirstColumn, Processed, ResultProcessor, RowCallbackHandler, RowMapper,
};
use crate::response::ResultSet;
use crate::session::Session;
use crate::statement::{Statement, StatementConfig, StatementSource};

/// Issues statements against a [`Session`] and processes their results.
///
/// A template holds nothing but the session and an immutable configuration, so it is
/// cheap to clone and can be shared by any number of callers.
#[derive(Clone)]
pub struct Template {
    session: Arc<dyn Session>,
    config: Arc<TemplateConfig>,
}

impl Template {
    pub fn new(session: Arc<dyn Session>) -> Self {
        Self::with_config(session, TemplateConfig::default())
    }

    pub fn with_config(session: Arc<dyn Session>, config: TemplateConfig) -> Self {
        Template {
            session,
            config: Arc::new(config),
        }
    }

    pub fn session(&self) -> &Arc<dyn Session> {
        &self.session
    }

    pub fn config(&self) -> &TemplateConfig {
        &self.config
    }

    pub fn value_converter(&self) -> &ValueConverter {
        self.config.value_converter()
    }

    /// Resolves `source` into a statement, executes it and returns the raw result.
    pub fn execute(&self, source: impl Into<StatementSource>) -> Result<ResultSet, OperationError> {
        self.run(source.into(), &StatementConfig::default())
    }

    /// Like [`execute`](Self::execute), but returns immediately.
    ///
    /// The statement is resolved and submitted when the returned future is first polled.
    pub fn execute_async(&self, source: impl Into<StatementSource>) -> ResultSetFuture {
        self.run_async(source.into(), StatementConfig::default())
    }

    /// Renders `specification` to CQL and executes it.
    pub fn execute_specification(
        &self,
        specification: impl Specification,
    ) -> Result<ResultSet, OperationError> {
        let cql = specification.to_cql()?;
        self.execute(cql)
    }

    /// Gives `callback` direct access to the session.
    pub fn execute_in_session<T, F>(&self, callback: F) -> Result<T, OperationError>
    where
        F: FnOnce(&dyn Session) -> Result<T, OperationError>,
    {
        callback(&*self.session)
    }

    /// Starts a query operation.
    pub fn query(&self, source: impl Into<StatementSource>) -> QueryOperation {
        QueryOperation::new(self.clone(), source.into())
    }

    /// Starts an operation for a statement whose rows are of no interest, e.g. a write
    /// or a schema change.
    pub fn execute_operation(&self, source: impl Into<StatementSource>) -> ExecuteOperation {
        ExecuteOperation::new(self.clone(), source.into())
    }

    /// Starts an operation removing all rows of `table`.
    pub fn truncate(&self, table: impl Into<String>) -> Result<ExecuteOperation, BadIdentifier> {
        let truncate = Truncate::table(table)?;
        Ok(self.execute_operation(truncate.build()))
    }

    /// Starts an operation reading entities of type `T` from their table.
    pub fn get_all<T>(&self) -> Result<GetOperation<T>, BadIdentifier>
    where
        T: TableEntity + FromRow + Send + 'static,
    {
        GetOperation::new(self.clone(), T::table_name())
    }

    /// Applies `processor` to a result obtained earlier.
    pub fn process<T>(
        &self,
        rs: ResultSet,
        processor: ResultProcessor<'_, T>,
    ) -> Result<Processed<T>, OperationError> {
        processing::process(rs, processor)
    }

    pub fn for_each_row(
        &self,
        rs: ResultSet,
        handler: impl RowCallbackHandler,
    ) -> Result<(), OperationError> {
        self.process::<()>(rs, ResultProcessor::row_callback(handler))?
            .into_unit()
    }

    pub fn process_rows<T>(
        &self,
        rs: ResultSet,
        mapper: impl RowMapper<T>,
    ) -> Result<Vec<T>, OperationError> {
        self.process(rs, ResultProcessor::rows(mapper))?.into_many()
    }

    /// Maps the first row of `rs`.
    ///
    /// With `require_single` the result must have exactly one row; otherwise an empty
    /// result gives `None` and rows after the first are not looked at.
    pub fn process_one<T>(
        &self,
        rs: ResultSet,
        mapper: impl RowMapper<T>,
        require_single: bool,
    ) -> Result<Option<T>, OperationError> {
        if require_single {
            return self.process(rs, ResultProcessor::single(mapper))?.into_one().map(Some);
        }

        let mut mapper = mapper;
        let first_row = move |mut rs: ResultSet| -> Result<Option<T>, OperationError> {
            match rs.one()? {
                Some(row) => Ok(Some(mapper.map_row(row, 0)?)),
                None => Ok(None),
            }
        };
        self.process(rs, ResultProcessor::extractor(first_row))?.into_one()
    }

    pub fn process_as_map(
        &self,
        rs: ResultSet,
    ) -> Result<Vec<HashMap<String, Option<CqlValue>>>, OperationError> {
        self.process_rows(rs, ColumnMapper)
    }

    pub fn process_one_as_map(
        &self,
        rs: ResultSet,
    ) -> Result<HashMap<String, Option<CqlValue>>, OperationError> {
        self.process(rs, ResultProcessor::single(ColumnMapper))?.into_one()
    }

    pub fn process_first_column<T>(&self, rs: ResultSet) -> Result<Vec<T>, OperationError>
    where
        T: FromCqlVal<Option<CqlValue>>,
    {
        self.process_rows(rs, FirstColumn::<T>::new())
    }

    pub fn process_one_first_column<T>(&self, rs: ResultSet) -> Result<T, OperationError>
    where
        T: FromCqlVal<Option<CqlValue>>,
    {
        self.process(rs, ResultProcessor::single(FirstColumn::<T>::new()))?
            .into_one()
    }

    /// Members of the ring, in the order the session reports them.
    pub fn describe_ring(&self) -> Result<Vec<RingMember>, OperationError> {
        self.describe_ring_with(RingMemberHostMapper)
    }

    /// Members of the ring, each mapped with `mapper`.
    pub fn describe_ring_with<T>(&self, mapper: impl HostMapper<T>) -> Result<Vec<T>, OperationError> {
        let hosts = self.session.describe_ring()?;
        trace!(
            hosts = %hosts.iter().map(|host| host.address).join(", "),
            "Described ring"
        );
        Ok(hosts.iter().map(|host| mapper.map_host(host)).collect())
    }

    // Statement settings: explicit overrides first, then the statement's own, then the
    // template defaults.
    fn resolve(
        &self,
        source: StatementSource,
        overrides: &StatementConfig,
    ) -> Result<Statement, OperationError> {
        let mut statement = source.resolve(&*self.session)?;
        let config = statement.config_mut();
        if overrides.page_size.is_some() {
            config.page_size = overrides.page_size;
        }
        if overrides.tracing.is_some() {
            config.tracing = overrides.tracing;
        }
        config.apply_defaults(&self.config);
        Ok(statement)
    }

    pub(crate) fn run(
        &self,
        source: StatementSource,
        overrides: &StatementConfig,
    ) -> Result<ResultSet, OperationError> {
        let statement = self.resolve(source, overrides)?;
        debug!(
            cql = statement.get_contents(),
            values = statement.get_values().len(),
            "Executing statement"
        );
        Ok(self.session.execute(&statement)?)
    }

    pub(crate) fn run_async(
        &self,
        source: StatementSource,
        overrides: StatementConfig,
    ) -> ResultSetFuture {
        let template = self.clone();
        OperationFuture::new(async move {
            let statement = template.resolve(source, &overrides)?;
            debug!(
                cql = statement.get_contents(),
                values = statement.get_values().len(),
                "Submitting statement asynchronously"
            );
            Ok(template.session.execute_async(statement).await?)
        })
    }
}

impl fmt::Debug for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Template")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
