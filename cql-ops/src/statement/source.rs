use cql_ops_core::query::BuiltStatement;
use cql_ops_core::CqlValue;

use crate::errors::OperationError;
use crate::session::Session;

use super::{BoundStatement, PreparedStatement, SimpleStatement, Statement};

/// Creates the statement to execute, at the moment the operation runs.
pub trait StatementCreator: Send {
    fn create_statement(&mut self) -> Result<Statement, OperationError>;
}

impl<F> StatementCreator for F
where
    F: FnMut() -> Result<Statement, OperationError> + Send,
{
    fn create_statement(&mut self) -> Result<Statement, OperationError> {
        self()
    }
}

/// Prepares a statement using the session the operation runs against.
pub trait PreparedStatementCreator: Send {
    fn create_prepared_statement(
        &mut self,
        session: &dyn Session,
    ) -> Result<PreparedStatement, OperationError>;
}

impl<F> PreparedStatementCreator for F
where
    F: FnMut(&dyn Session) -> Result<PreparedStatement, OperationError> + Send,
{
    fn create_prepared_statement(
        &mut self,
        session: &dyn Session,
    ) -> Result<PreparedStatement, OperationError> {
        self(session)
    }
}

/// Prepares a fixed CQL string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimplePreparedStatementCreator(pub String);

impl PreparedStatementCreator for SimplePreparedStatementCreator {
    fn create_prepared_statement(
        &mut self,
        session: &dyn Session,
    ) -> Result<PreparedStatement, OperationError> {
        Ok(session.prepare(&self.0)?)
    }
}

/// Binds values to a freshly prepared statement.
pub trait PreparedStatementBinder: Send {
    fn bind_values(&mut self, prepared: &PreparedStatement) -> Result<BoundStatement, OperationError>;
}

impl<F> PreparedStatementBinder for F
where
    F: FnMut(&PreparedStatement) -> Result<BoundStatement, OperationError> + Send,
{
    fn bind_values(&mut self, prepared: &PreparedStatement) -> Result<BoundStatement, OperationError> {
        self(prepared)
    }
}

/// Binds a fixed list of values, in marker order.
#[derive(Debug, Clone, PartialEq)]
pub struct ValuesBinder(pub Vec<Option<CqlValue>>);

impl PreparedStatementBinder for ValuesBinder {
    fn bind_values(&mut self, prepared: &PreparedStatement) -> Result<BoundStatement, OperationError> {
        Ok(prepared.bind(self.0.clone()))
    }
}

/// Everything an operation can be built from.
///
/// Callbacks are only invoked when the operation is executed, so for asynchronous
/// execution their failures are delivered through the returned future.
pub enum StatementSource {
    Statement(Statement),
    Creator(Box<dyn StatementCreator>),
    Prepared {
        creator: Box<dyn PreparedStatementCreator>,
        binder: Box<dyn PreparedStatementBinder>,
    },
}

impl StatementSource {
    pub fn from_creator(creator: impl StatementCreator + 'static) -> Self {
        StatementSource::Creator(Box::new(creator))
    }

    pub fn prepared(
        creator: impl PreparedStatementCreator + 'static,
        binder: impl PreparedStatementBinder + 'static,
    ) -> Self {
        StatementSource::Prepared {
            creator: Box::new(creator),
            binder: Box::new(binder),
        }
    }

    pub(crate) fn resolve(self, session: &dyn Session) -> Result<Statement, OperationError> {
        match self {
            StatementSource::Statement(statement) => Ok(statement),
            StatementSource::Creator(mut creator) => creator.create_statement(),
            StatementSource::Prepared {
                mut creator,
                mut binder,
            } => {
                let prepared = creator.create_prepared_statement(session)?;
                Ok(Statement::Bound(binder.bind_values(&prepared)?))
            }
        }
    }
}

impl std::fmt::Debug for StatementSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatementSource::Statement(statement) => {
                f.debug_tuple("Statement").field(statement).finish()
            }
            StatementSource::Creator(_) => f.write_str("Creator"),
            StatementSource::Prepared { .. } => f.write_str("Prepared"),
        }
    }
}

impl From<Statement> for StatementSource {
    fn from(statement: Statement) -> Self {
        StatementSource::Statement(statement)
    }
}

impl From<SimpleStatement> for StatementSource {
    fn from(statement: SimpleStatement) -> Self {
        StatementSource::Statement(Statement::Simple(statement))
    }
}

impl From<BoundStatement> for StatementSource {
    fn from(statement: BoundStatement) -> Self {
        StatementSource::Statement(Statement::Bound(statement))
    }
}

impl From<BuiltStatement> for StatementSource {
    fn from(statement: BuiltStatement) -> Self {
        SimpleStatement::from(statement).into()
    }
}

impl From<String> for StatementSource {
    fn from(cql: String) -> Self {
        SimpleStatement::new(cql).into()
    }
}

impl<'a> From<&'a str> for StatementSource {
    fn from(cql: &'a str) -> Self {
        SimpleStatement::new(cql).into()
    }
}
