//! Template-style access layer for CQL databases such as [Scylla](https://scylladb.com)
//! and [Apache Cassandra®](https://cassandra.apache.org/).
//!
//! # Overview
//! All statement execution goes through a [`Template`], which wraps a [`Session`]
//! provided by the application's driver of choice.
//!
//! ### Schema changes
//! Schema changes are described with specifications, which are rendered to CQL by
//! generators and executed with [`Template::execute_specification`]:
//!
//! ```rust
//! # use cql_ops::{Template, errors::OperationError};
//! use cql_ops::spec::CreateIndexSpecification;
//!
//! # fn example(template: &Template) -> Result<(), OperationError> {
//! let index = CreateIndexSpecification::new()
//!     .table("book")?
//!     .column("title")?
//!     .if_not_exists();
//! template.execute_specification(index)?;
//! # Ok(())
//! # }
//! ```
//!
//! ### Queries
//! Queries are described with operations. An operation is built fluently, chooses the
//! shape of its result, and is then executed either synchronously or asynchronously:
//!
//! ```rust
//! # use cql_ops::{Template, errors::OperationError};
//! # async fn example(template: &Template) -> Result<(), OperationError> {
//! let titles: Vec<String> = template
//!     .query("SELECT title FROM book")
//!     .first_column::<String>()
//!     .execute()?;
//!
//! let count: i64 = template
//!     .query("SELECT COUNT(*) FROM book")
//!     .single_result()
//!     .first_column::<i64>()
//!     .execute_async()
//!     .await?;
//! # Ok(())
//! # }
//! ```
//!
//! Rows can be handed to a callback, mapped one by one, converted to maps or parsed
//! into structs deriving [`FromRow`]. See the [`processing`] module for details.

#[doc(hidden)]
pub mod _macro_internal {
    pub use cql_ops_core::_macro_internal::*;
}

pub use cql_ops_core::{convert, cql_to_rust, generator, identifier, query, spec, value};

pub mod entity;
pub mod errors;
pub mod operation;
pub mod processing;
pub mod response;
pub mod session;
pub mod statement;
pub mod template;

pub(crate) mod utils;

pub use cql_ops_core::{ColumnSpec, ColumnType, CqlEnum, CqlValue, FromCqlVal, FromRow, Row};

pub use entity::TableEntity;
pub use operation::{OperationFuture, ResultSetFuture};
pub use response::ResultSet;
pub use session::{Host, Session};
pub use template::{Template, TemplateConfig};
