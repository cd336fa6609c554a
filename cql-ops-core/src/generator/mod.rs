//! Generators render [specifications](crate::spec) into CQL text.
//!
//! Each generator borrows one specification and never modifies it. Output is a fixed
//! template: upper-case keywords, identifiers in their quoted form where needed and
//! optional clauses only when set. No trailing semicolon is added.

mod index;
mod keyspace;
mod table;

pub use index::{CreateIndexCqlGenerator, DropIndexCqlGenerator};
pub use keyspace::{AlterKeyspaceCqlGenerator, CreateKeyspaceCqlGenerator, DropKeyspaceCqlGenerator};
pub use table::{AlterTableCqlGenerator, CreateTableCqlGenerator, DropTableCqlGenerator};

use itertools::Itertools;

use crate::errors::{IncompleteSpecification, SpecificationError};
use crate::spec::SchemaOption;

pub trait CqlGenerator {
    /// Appends the rendered statement to `cql`.
    ///
    /// On error nothing useful has been written; the caller should discard `cql`.
    fn write_cql(&self, cql: &mut String) -> Result<(), SpecificationError>;

    fn to_cql(&self) -> Result<String, SpecificationError> {
        let mut cql = String::new();
        self.write_cql(&mut cql)?;
        Ok(cql)
    }
}

pub(crate) fn require<'a, T: ?Sized>(
    part: Option<&'a T>,
    statement: &'static str,
    missing: &'static str,
) -> Result<&'a T, IncompleteSpecification> {
    part.ok_or(IncompleteSpecification::new(statement, missing))
}

pub(crate) fn render_options<'a>(options: impl Iterator<Item = &'a SchemaOption>) -> String {
    options
        .map(|option| format!("{} = {}", option.name(), option.value()))
        .join(" AND ")
}

#[cfg(test)]
pub(crate) fn incomplete(
    statement: &'static str,
    missing: &'static str,
) -> Result<String, SpecificationError> {
    Err(IncompleteSpecification::new(statement, missing).into())
}
