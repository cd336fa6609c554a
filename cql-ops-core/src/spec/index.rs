use crate::errors::{BadIdentifier, SpecificationError};
use crate::generator::{CqlGenerator, CreateIndexCqlGenerator, DropIndexCqlGenerator};
use crate::identifier::{derived_index_name, Identifier};

use super::Specification;

/// Shared by the specifications that name an index.
pub trait IndexNameSpecification: Sized {
    /// Sets the index name, validating it.
    fn name(self, name: impl Into<String>) -> Result<Self, BadIdentifier>;

    fn get_name(&self) -> Option<&Identifier>;

    /// Names the index `{table}_{column}_idx`.
    ///
    /// The derived name goes through [`name`](Self::name), so it is validated like any
    /// other.
    fn default_name(self, table: &str, column: &str) -> Result<Self, BadIdentifier> {
        self.name(derived_index_name(table, column))
    }
}

/// `CREATE [CUSTOM] INDEX` on a single column.
///
/// The table and the column are required. Without a name the database picks one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateIndexSpecification {
    name: Option<Identifier>,
    if_not_exists: bool,
    table: Option<Identifier>,
    column: Option<Identifier>,
    using: Option<String>,
}

impl CreateIndexSpecification {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn if_not_exists(mut self) -> Self {
        self.if_not_exists = true;
        self
    }

    pub fn table(mut self, table: impl Into<String>) -> Result<Self, BadIdentifier> {
        self.table = Some(Identifier::new(table)?);
        Ok(self)
    }

    pub fn column(mut self, column: impl Into<String>) -> Result<Self, BadIdentifier> {
        self.column = Some(Identifier::new(column)?);
        Ok(self)
    }

    /// Makes this a custom index implemented by `class`.
    pub fn using(mut self, class: impl Into<String>) -> Self {
        self.using = Some(class.into());
        self
    }

    pub fn get_if_not_exists(&self) -> bool {
        self.if_not_exists
    }

    pub fn get_table(&self) -> Option<&Identifier> {
        self.table.as_ref()
    }

    pub fn get_column(&self) -> Option<&Identifier> {
        self.column.as_ref()
    }

    pub fn get_using(&self) -> Option<&str> {
        self.using.as_deref()
    }

    pub fn is_custom(&self) -> bool {
        self.using.is_some()
    }
}

impl IndexNameSpecification for CreateIndexSpecification {
    fn name(mut self, name: impl Into<String>) -> Result<Self, BadIdentifier> {
        self.name = Some(Identifier::new(name)?);
        Ok(self)
    }

    fn get_name(&self) -> Option<&Identifier> {
        self.name.as_ref()
    }
}

impl Specification for CreateIndexSpecification {
    fn to_cql(&self) -> Result<String, SpecificationError> {
        CreateIndexCqlGenerator::new(self).to_cql()
    }
}

/// `DROP INDEX`; the name is required.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DropIndexSpecification {
    name: Option<Identifier>,
    if_exists: bool,
}

impl DropIndexSpecification {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn if_exists(mut self) -> Self {
        self.if_exists = true;
        self
    }

    pub fn get_if_exists(&self) -> bool {
        self.if_exists
    }
}

impl IndexNameSpecification for DropIndexSpecification {
    fn name(mut self, name: impl Into<String>) -> Result<Self, BadIdentifier> {
        self.name = Some(Identifier::new(name)?);
        Ok(self)
    }

    fn get_name(&self) -> Option<&Identifier> {
        self.name.as_ref()
    }
}

impl Specification for DropIndexSpecification {
    fn to_cql(&self) -> Result<String, SpecificationError> {
        DropIndexCqlGenerator::new(self).to_cql()
    }
}
