use crate::errors::{IncompleteSpecification, SpecificationError};
use crate::literal::StringLiteral;
use crate::spec::{CreateIndexSpecification, DropIndexSpecification, IndexNameSpecification};

use super::{require, CqlGenerator};

/// Renders `CREATE [CUSTOM ]INDEX [IF NOT EXISTS ][name ]ON table (column)[ USING 'class']`.
pub struct CreateIndexCqlGenerator<'a> {
    spec: &'a CreateIndexSpecification,
}

impl<'a> CreateIndexCqlGenerator<'a> {
    pub fn new(spec: &'a CreateIndexSpecification) -> Self {
        CreateIndexCqlGenerator { spec }
    }

    pub fn specification(&self) -> &'a CreateIndexSpecification {
        self.spec
    }
}

impl CqlGenerator for CreateIndexCqlGenerator<'_> {
    fn write_cql(&self, cql: &mut String) -> Result<(), SpecificationError> {
        const STATEMENT: &str = "CREATE INDEX";

        let table = require(self.spec.get_table(), STATEMENT, "table")?;
        let column = require(self.spec.get_column(), STATEMENT, "column")?;

        cql.push_str("CREATE ");
        if self.spec.is_custom() {
            cql.push_str("CUSTOM ");
        }
        cql.push_str("INDEX ");
        if self.spec.get_if_not_exists() {
            cql.push_str("IF NOT EXISTS ");
        }
        if let Some(name) = self.spec.get_name() {
            cql.push_str(&format!("{name} "));
        }
        cql.push_str(&format!("ON {table} ({column})"));
        if let Some(class) = self.spec.get_using() {
            cql.push_str(&format!(" USING {}", StringLiteral(class)));
        }

        Ok(())
    }
}

/// Renders `DROP INDEX [IF EXISTS ]name`.
pub struct DropIndexCqlGenerator<'a> {
    spec: &'a DropIndexSpecification,
}

impl<'a> DropIndexCqlGenerator<'a> {
    pub fn new(spec: &'a DropIndexSpecification) -> Self {
        DropIndexCqlGenerator { spec }
    }

    pub fn specification(&self) -> &'a DropIndexSpecification {
        self.spec
    }
}

impl CqlGenerator for DropIndexCqlGenerator<'_> {
    fn write_cql(&self, cql: &mut String) -> Result<(), SpecificationError> {
        let name = require(self.spec.get_name(), "DROP INDEX", "index name")?;

        cql.push_str("DROP INDEX ");
        if self.spec.get_if_exists() {
            cql.push_str("IF EXISTS ");
        }
        cql.push_str(&name.to_string());

        Ok(())
    }
}
