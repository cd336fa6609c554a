//! Specifications describe a single schema change before it is rendered to CQL.
//!
//! Every specification is a builder consumed by value. Setters taking a name validate it
//! on the spot and return [`BadIdentifier`](crate::errors::BadIdentifier) on failure;
//! whether all required parts are present is only checked when the specification is
//! rendered by its generator (see [`crate::generator`]).

pub mod index;
pub mod keyspace;
pub mod table;

pub use index::{CreateIndexSpecification, DropIndexSpecification, IndexNameSpecification};
pub use keyspace::{
    AlterKeyspaceSpecification, CreateKeyspaceSpecification, DropKeyspaceSpecification,
    KeyspaceNameSpecification, ReplicationStrategy,
};
pub use table::{
    AlterTableSpecification, ClusteringOrder, ColumnChange, ColumnSpecification,
    CreateTableSpecification, DropTableSpecification, KeyKind, TableNameSpecification,
};

use crate::errors::{BadIdentifier, SpecificationError};
use crate::identifier::Identifier;
use crate::value::CqlValue;

/// A schema change that can be rendered to a CQL statement.
pub trait Specification {
    /// Renders the statement, failing if a required part was never set or parts conflict.
    fn to_cql(&self) -> Result<String, SpecificationError>;
}

impl<S: Specification + ?Sized> Specification for &S {
    fn to_cql(&self) -> Result<String, SpecificationError> {
        (**self).to_cql()
    }
}

/// `name = value` entry of a `WITH` clause, e.g. `comment = 'books'`.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaOption {
    name: Identifier,
    value: CqlValue,
}

impl SchemaOption {
    pub fn new(name: impl Into<String>, value: impl Into<CqlValue>) -> Result<Self, BadIdentifier> {
        Ok(SchemaOption {
            name: Identifier::new(name)?,
            value: value.into(),
        })
    }

    pub fn name(&self) -> &Identifier {
        &self.name
    }

    pub fn value(&self) -> &CqlValue {
        &self.value
    }
}

// Setting an option twice replaces the earlier value, keeping its position.
pub(crate) fn set_option(options: &mut Vec<SchemaOption>, option: SchemaOption) {
    match options.iter_mut().find(|o| o.name == option.name) {
        Some(existing) => *existing = option,
        None => options.push(option),
    }
}
