//! This module contains the errors which can be returned by the [`Template`](crate::Template)
//! and the operations it builds.

use std::sync::Arc;

use thiserror::Error;

pub use cql_ops_core::cql_to_rust::{FromCqlValError, FromRowError};
pub use cql_ops_core::errors::{
    BadIdentifier, ConflictingInstructions, IncompleteSpecification, SpecificationError,
};

/// Top-level error of every operation.
///
/// Each failure surfaces as exactly one of these kinds, synchronously or through the
/// failure channel of an [`OperationFuture`](crate::operation::OperationFuture).
#[derive(Error, Debug, Clone)]
#[non_exhaustive]
pub enum OperationError {
    /// The session failed to prepare or execute the statement
    #[error(transparent)]
    Execution(#[from] ExecutionError),

    /// A name given to a builder is not a valid identifier
    #[error(transparent)]
    BadIdentifier(#[from] BadIdentifier),

    /// A statement was rendered before all its required parts were set
    #[error(transparent)]
    IncompleteSpecification(#[from] IncompleteSpecification),

    /// A schema change combined instructions that need separate statements
    #[error(transparent)]
    ConflictingInstructions(#[from] ConflictingInstructions),

    /// A single row was expected but the result had a different number of rows
    #[error(transparent)]
    SingleRow(#[from] SingleRowError),

    /// A row could not be converted into the requested type
    #[error(transparent)]
    FromRow(#[from] FromRowError),

    /// The API was used in a way that is not allowed
    #[error("Illegal state: {0}")]
    IllegalState(&'static str),
}

impl From<SpecificationError> for OperationError {
    fn from(err: SpecificationError) -> Self {
        match err {
            SpecificationError::Incomplete(err) => err.into(),
            SpecificationError::Conflicting(err) => err.into(),
        }
    }
}

/// Failure reported by the [`Session`](crate::session::Session) collaborator.
///
/// The template passes these on unmodified; it never retries nor reinterprets them.
#[derive(Error, Debug, Clone)]
#[non_exhaustive]
pub enum ExecutionError {
    /// Database sent a response containing some error with a message
    #[error("Database returned an error: {0}, Error message: {1}")]
    DbError(DbError, String),

    /// Input/Output error has occurred, connection broken etc.
    #[error("IO Error: {0}")]
    IoError(Arc<std::io::Error>),

    /// Unexpected or invalid message received
    #[error("Protocol Error: {0}")]
    ProtocolError(&'static str),

    /// Timeout error has occurred, function didn't complete in time.
    #[error("Timeout Error")]
    TimeoutError,

    /// The statement was rejected before being sent, e.g. because of bad bound values
    #[error("Invalid statement: {0}")]
    BadStatement(String),

    /// The session was closed and can't serve requests anymore
    #[error("Session is closed")]
    SessionClosed,
}

impl From<std::io::Error> for ExecutionError {
    fn from(io_error: std::io::Error) -> ExecutionError {
        ExecutionError::IoError(Arc::new(io_error))
    }
}

/// Kind of error the database reported for a statement.
///
/// The accompanying message is carried by [`ExecutionError::DbError`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DbError {
    #[error("Syntax error in CQL statement")]
    SyntaxError,

    /// Well-formed, but refers to missing schema or misuses a type
    #[error("Invalid CQL statement")]
    Invalid,

    /// Schema change targets a keyspace or table that already exists
    #[error("Keyspace or table already exists (keyspace: {keyspace}, table: {table})")]
    AlreadyExists {
        keyspace: String,
        /// Empty when a keyspace was being created
        table: String,
    },

    #[error("User is not allowed to run this statement")]
    Unauthorized,

    /// Too few replicas alive for the requested consistency
    #[error("Not enough replicas available")]
    Unavailable,

    /// Replicas did not answer in time
    #[error("Replicas timed out")]
    Timeout,

    #[error("Coordinator is overloaded")]
    Overloaded,

    #[error("Internal server error")]
    ServerError,

    /// Anything the session could not classify
    #[error("Other database error")]
    Other,
}

/// Violation of a single-row expectation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SingleRowError {
    /// The result had no rows
    #[error("Expected exactly one row, but the result was empty")]
    EmptyResult,

    /// The result had a second row
    #[error("Expected exactly one row, but the result had more")]
    NonUniqueResult,
}
