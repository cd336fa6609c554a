use crate::errors::{BadIdentifier, SpecificationError};
use crate::generator::{
    AlterKeyspaceCqlGenerator, CqlGenerator, CreateKeyspaceCqlGenerator,
    DropKeyspaceCqlGenerator,
};
use crate::identifier::Identifier;
use crate::value::CqlValue;

use super::Specification;

/// Shared by the specifications that name a keyspace.
pub trait KeyspaceNameSpecification: Sized {
    /// Sets the keyspace name, validating it.
    fn name(self, name: impl Into<String>) -> Result<Self, BadIdentifier>;

    fn get_name(&self) -> Option<&Identifier>;
}

macro_rules! impl_keyspace_name_specification {
    ($($spec:ty),+) => {
        $(
            impl KeyspaceNameSpecification for $spec {
                fn name(mut self, name: impl Into<String>) -> Result<Self, BadIdentifier> {
                    self.name = Some(Identifier::new(name)?);
                    Ok(self)
                }

                fn get_name(&self) -> Option<&Identifier> {
                    self.name.as_ref()
                }
            }
        )+
    };
}

impl_keyspace_name_specification!(
    CreateKeyspaceSpecification,
    AlterKeyspaceSpecification,
    DropKeyspaceSpecification
);

/// Replication settings of a keyspace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplicationStrategy {
    Simple { replication_factor: u32 },
    /// Replication factor per datacenter, rendered in the given order.
    NetworkTopology { datacenters: Vec<(String, u32)> },
}

impl Default for ReplicationStrategy {
    fn default() -> Self {
        ReplicationStrategy::Simple {
            replication_factor: 1,
        }
    }
}

impl ReplicationStrategy {
    pub fn class(&self) -> &'static str {
        match self {
            ReplicationStrategy::Simple { .. } => "SimpleStrategy",
            ReplicationStrategy::NetworkTopology { .. } => "NetworkTopologyStrategy",
        }
    }

    /// The replication map, as it appears after `replication =`.
    pub fn to_cql_value(&self) -> CqlValue {
        let mut entries = vec![(CqlValue::from("class"), CqlValue::from(self.class()))];
        match self {
            ReplicationStrategy::Simple { replication_factor } => {
                entries.push((
                    CqlValue::from("replication_factor"),
                    replication_factor_value(*replication_factor),
                ));
            }
            ReplicationStrategy::NetworkTopology { datacenters } => {
                entries.extend(datacenters.iter().map(|(dc, factor)| {
                    (CqlValue::Text(dc.clone()), replication_factor_value(*factor))
                }));
            }
        }
        CqlValue::Map(entries)
    }
}

fn replication_factor_value(factor: u32) -> CqlValue {
    CqlValue::BigInt(i64::from(factor))
}

/// `CREATE KEYSPACE`; the name is required, replication defaults to `SimpleStrategy`
/// with a replication factor of 1.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateKeyspaceSpecification {
    name: Option<Identifier>,
    if_not_exists: bool,
    replication: ReplicationStrategy,
    durable_writes: Option<bool>,
}

impl CreateKeyspaceSpecification {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn if_not_exists(mut self) -> Self {
        self.if_not_exists = true;
        self
    }

    pub fn replication(mut self, replication: ReplicationStrategy) -> Self {
        self.replication = replication;
        self
    }

    pub fn durable_writes(mut self, durable_writes: bool) -> Self {
        self.durable_writes = Some(durable_writes);
        self
    }

    pub fn get_if_not_exists(&self) -> bool {
        self.if_not_exists
    }

    pub fn get_replication(&self) -> &ReplicationStrategy {
        &self.replication
    }

    pub fn get_durable_writes(&self) -> Option<bool> {
        self.durable_writes
    }
}

impl Specification for CreateKeyspaceSpecification {
    fn to_cql(&self) -> Result<String, SpecificationError> {
        CreateKeyspaceCqlGenerator::new(self).to_cql()
    }
}

/// `ALTER KEYSPACE`; the name and at least one setting are required.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlterKeyspaceSpecification {
    name: Option<Identifier>,
    replication: Option<ReplicationStrategy>,
    durable_writes: Option<bool>,
}

impl AlterKeyspaceSpecification {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replication(mut self, replication: ReplicationStrategy) -> Self {
        self.replication = Some(replication);
        self
    }

    pub fn durable_writes(mut self, durable_writes: bool) -> Self {
        self.durable_writes = Some(durable_writes);
        self
    }

    pub fn get_replication(&self) -> Option<&ReplicationStrategy> {
        self.replication.as_ref()
    }

    pub fn get_durable_writes(&self) -> Option<bool> {
        self.durable_writes
    }
}

impl Specification for AlterKeyspaceSpecification {
    fn to_cql(&self) -> Result<String, SpecificationError> {
        AlterKeyspaceCqlGenerator::new(self).to_cql()
    }
}

/// `DROP KEYSPACE`; the name is required.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DropKeyspaceSpecification {
    name: Option<Identifier>,
    if_exists: bool,
}

impl DropKeyspaceSpecification {
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

impl Specification for DropKeyspaceSpecification {
    fn to_cql(&self) -> Result<String, SpecificationError> {
        DropKeyspaceCqlGenerator::new(self).to_cql()
    }
}
