//! Turning a [`ResultSet`] into what the caller asked for.
//!
//! Every operation picks one [`ResultProcessor`] and [`process`] is the only place that
//! dispatches on it.

mod mappers;

pub use mappers::{ColumnMapper, FirstColumn, TypedRowMapper};

use cql_ops_core::cql_to_rust::FromRowError;
use cql_ops_core::Row;
use tracing::trace;

use crate::errors::{OperationError, SingleRowError};
use crate::response::ResultSet;

/// Called once per row, in result order.
pub trait RowCallbackHandler: Send {
    fn process_row(&mut self, row: Row) -> Result<(), FromRowError>;
}

impl<F> RowCallbackHandler for F
where
    F: FnMut(Row) -> Result<(), FromRowError> + Send,
{
    fn process_row(&mut self, row: Row) -> Result<(), FromRowError> {
        self(row)
    }
}

/// Maps one row, given together with its zero-based position in the result.
pub trait RowMapper<T>: Send {
    fn map_row(&mut self, row: Row, row_num: usize) -> Result<T, FromRowError>;
}

impl<T, F> RowMapper<T> for F
where
    F: FnMut(Row, usize) -> Result<T, FromRowError> + Send,
{
    fn map_row(&mut self, row: Row, row_num: usize) -> Result<T, FromRowError> {
        self(row, row_num)
    }
}

/// Consumes the whole result set at once.
pub trait ResultSetExtractor<T>: Send {
    fn extract_data(&mut self, rs: ResultSet) -> Result<T, OperationError>;
}

impl<T, F> ResultSetExtractor<T> for F
where
    F: FnMut(ResultSet) -> Result<T, OperationError> + Send,
{
    fn extract_data(&mut self, rs: ResultSet) -> Result<T, OperationError> {
        self(rs)
    }
}

/// How a result set is to be processed.
pub enum ResultProcessor<'p, T> {
    /// Hand every row to a callback; produces nothing.
    RowCallback(Box<dyn RowCallbackHandler + 'p>),
    /// Map rows one by one. With `single` set, the result must have exactly one row.
    RowMapper {
        mapper: Box<dyn RowMapper<T> + 'p>,
        single: bool,
    },
    /// Give the whole result set to an extractor.
    Extractor(Box<dyn ResultSetExtractor<T> + 'p>),
}

impl<'p, T> ResultProcessor<'p, T> {
    pub fn row_callback(handler: impl RowCallbackHandler + 'p) -> Self {
        ResultProcessor::RowCallback(Box::new(handler))
    }

    pub fn rows(mapper: impl RowMapper<T> + 'p) -> Self {
        ResultProcessor::RowMapper {
            mapper: Box::new(mapper),
            single: false,
        }
    }

    pub fn single(mapper: impl RowMapper<T> + 'p) -> Self {
        ResultProcessor::RowMapper {
            mapper: Box::new(mapper),
            single: true,
        }
    }

    pub fn extractor(extractor: impl ResultSetExtractor<T> + 'p) -> Self {
        ResultProcessor::Extractor(Box::new(extractor))
    }
}

/// Output of [`process`], shaped after the processor that produced it.
#[derive(Debug, Clone, PartialEq)]
pub enum Processed<T> {
    Unit,
    One(T),
    Many(Vec<T>),
}

impl<T> Processed<T> {
    pub fn into_unit(self) -> Result<(), OperationError> {
        match self {
            Processed::Unit => Ok(()),
            _ => Err(OperationError::IllegalState("expected no output from processing")),
        }
    }

    pub fn into_one(self) -> Result<T, OperationError> {
        match self {
            Processed::One(value) => Ok(value),
            _ => Err(OperationError::IllegalState("expected a single output from processing")),
        }
    }

    pub fn into_many(self) -> Result<Vec<T>, OperationError> {
        match self {
            Processed::Many(values) => Ok(values),
            _ => Err(OperationError::IllegalState("expected a list output from processing")),
        }
    }
}

/// Applies `processor` to `rs`.
pub fn process<T>(
    rs: ResultSet,
    processor: ResultProcessor<'_, T>,
) -> Result<Processed<T>, OperationError> {
    match processor {
        ResultProcessor::RowCallback(mut handler) => {
            let mut processed = 0usize;
            for row in rs {
                handler.process_row(row?)?;
                processed += 1;
            }
            trace!(rows = processed, "Handed rows to callback");
            Ok(Processed::Unit)
        }
        ResultProcessor::RowMapper {
            mut mapper,
            single: false,
        } => {
            let values = rs
                .enumerate()
                .map(|(row_num, row)| -> Result<T, OperationError> {
                    Ok(mapper.map_row(row?, row_num)?)
                })
                .collect::<Result<Vec<T>, OperationError>>()?;
            trace!(rows = values.len(), "Mapped rows");
            Ok(Processed::Many(values))
        }
        ResultProcessor::RowMapper {
            mapper,
            single: true,
        } => map_single_row(rs, mapper).map(Processed::One),
        ResultProcessor::Extractor(mut extractor) => extractor.extract_data(rs).map(Processed::One),
    }
}

// Pulls at most two rows: the first is mapped before the second is looked at.
fn map_single_row<T>(
    mut rs: ResultSet,
    mut mapper: Box<dyn RowMapper<T> + '_>,
) -> Result<T, OperationError> {
    let first = rs.one()?.ok_or(SingleRowError::EmptyResult)?;
    let value = mapper.map_row(first, 0)?;
    if rs.one()?.is_some() {
        return Err(SingleRowError::NonUniqueResult.into());
    }
    trace!("Mapped single row");
    Ok(value)
}
