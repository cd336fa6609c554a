use crate::errors::{IncompleteSpecification, SpecificationError};
use crate::spec::{
    AlterKeyspaceSpecification, CreateKeyspaceSpecification, DropKeyspaceSpecification,
    KeyspaceNameSpecification,
};

use super::{require, CqlGenerator};

/// Renders `CREATE KEYSPACE [IF NOT EXISTS ]name WITH replication = {...}[ AND durable_writes = bool]`.
pub struct CreateKeyspaceCqlGenerator<'a> {
    spec: &'a CreateKeyspaceSpecification,
}

impl<'a> CreateKeyspaceCqlGenerator<'a> {
    pub fn new(spec: &'a CreateKeyspaceSpecification) -> Self {
        CreateKeyspaceCqlGenerator { spec }
    }
}

impl CqlGenerator for CreateKeyspaceCqlGenerator<'_> {
    fn write_cql(&self, cql: &mut String) -> Result<(), SpecificationError> {
        let name = require(self.spec.get_name(), "CREATE KEYSPACE", "keyspace name")?;

        cql.push_str("CREATE KEYSPACE ");
        if self.spec.get_if_not_exists() {
            cql.push_str("IF NOT EXISTS ");
        }
        cql.push_str(&format!(
            "{name} WITH replication = {}",
            self.spec.get_replication().to_cql_value()
        ));
        if let Some(durable_writes) = self.spec.get_durable_writes() {
            cql.push_str(&format!(" AND durable_writes = {durable_writes}"));
        }

        Ok(())
    }
}

/// Renders `ALTER KEYSPACE name WITH ...`.
pub struct AlterKeyspaceCqlGenerator<'a> {
    spec: &'a AlterKeyspaceSpecification,
}

impl<'a> AlterKeyspaceCqlGenerator<'a> {
    pub fn new(spec: &'a AlterKeyspaceSpecification) -> Self {
        AlterKeyspaceCqlGenerator { spec }
    }
}

impl CqlGenerator for AlterKeyspaceCqlGenerator<'_> {
    fn write_cql(&self, cql: &mut String) -> Result<(), SpecificationError> {
        const STATEMENT: &str = "ALTER KEYSPACE";

        let name = require(self.spec.get_name(), STATEMENT, "keyspace name")?;

        let mut settings = Vec::new();
        if let Some(replication) = self.spec.get_replication() {
            settings.push(format!("replication = {}", replication.to_cql_value()));
        }
        if let Some(durable_writes) = self.spec.get_durable_writes() {
            settings.push(format!("durable_writes = {durable_writes}"));
        }
        if settings.is_empty() {
            let missing = "replication or durable_writes";
            return Err(IncompleteSpecification::new(STATEMENT, missing).into());
        }

        cql.push_str(&format!("ALTER KEYSPACE {name} WITH {}", settings.join(" AND ")));

        Ok(())
    }
}

/// Renders `DROP KEYSPACE [IF EXISTS ]name`.
pub struct DropKeyspaceCqlGenerator<'a> {
    spec: &'a DropKeyspaceSpecification,
}

impl<'a> DropKeyspaceCqlGenerator<'a> {
    pub fn new(spec: &'a DropKeyspaceSpecification) -> Self {
        DropKeyspaceCqlGenerator { spec }
    }
}

impl CqlGenerator for DropKeyspaceCqlGenerator<'_> {
    fn write_cql(&self, cql: &mut String) -> Result<(), SpecificationError> {
        let name = require(self.spec.get_name(), "DROP KEYSPACE", "keyspace name")?;

        cql.push_str("DROP KEYSPACE ");
        if self.spec.get_if_exists() {
            cql.push_str("IF EXISTS ");
        }
        cql.push_str(&name.to_string());

        Ok(())
    }
}
