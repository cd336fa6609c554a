//! Fluent, single-use descriptions of one statement execution.
//!
//! Every terminal method (`execute`, `execute_async`, ...) takes the operation by value,
//! so an operation can't be executed twice.

mod execute;
pub mod future;
mod get;
mod query;

pub use execute::ExecuteOperation;
pub use future::{OperationFuture, ResultSetFuture};
pub use get::GetOperation;
pub use query::{
    ForEachOperation, QueryOperation, RowsOperation, SingleResultOperation, SingleRowOperation,
    TransformOperation,
};
