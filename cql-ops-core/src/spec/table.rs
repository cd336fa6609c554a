use crate::errors::{BadIdentifier, SpecificationError};
use crate::generator::{
    AlterTableCqlGenerator, CqlGenerator, CreateTableCqlGenerator, DropTableCqlGenerator,
};
use crate::identifier::Identifier;
use crate::value::{ColumnType, CqlValue};

use super::{set_option, SchemaOption, Specification};

/// Shared by the specifications that name a table.
pub trait TableNameSpecification: Sized {
    /// Sets the table name, validating it.
    fn name(self, name: impl Into<String>) -> Result<Self, BadIdentifier>;

    fn get_name(&self) -> Option<&Identifier>;
}

macro_rules! impl_table_name_specification {
    ($($spec:ty),+) => {
        $(
            impl TableNameSpecification for $spec {
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

impl_table_name_specification!(
    CreateTableSpecification,
    AlterTableSpecification,
    DropTableSpecification
);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClusteringOrder {
    #[default]
    Ascending,
    Descending,
}

impl ClusteringOrder {
    pub fn as_cql(&self) -> &'static str {
        match self {
            ClusteringOrder::Ascending => "ASC",
            ClusteringOrder::Descending => "DESC",
        }
    }
}

/// Role of a column in the primary key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    Partition,
    Clustering(ClusteringOrder),
}

/// A column of a table being created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpecification {
    name: Identifier,
    typ: ColumnType,
    key: Option<KeyKind>,
}

impl ColumnSpecification {
    pub fn new(name: impl Into<String>, typ: ColumnType) -> Result<Self, BadIdentifier> {
        Ok(ColumnSpecification {
            name: Identifier::new(name)?,
            typ,
            key: None,
        })
    }

    pub fn partition_key(mut self) -> Self {
        self.key = Some(KeyKind::Partition);
        self
    }

    pub fn clustering_key(mut self, order: ClusteringOrder) -> Self {
        self.key = Some(KeyKind::Clustering(order));
        self
    }

    pub fn name(&self) -> &Identifier {
        &self.name
    }

    pub fn typ(&self) -> &ColumnType {
        &self.typ
    }

    pub fn key(&self) -> Option<KeyKind> {
        self.key
    }
}

/// `CREATE TABLE`; the name and at least one partition key column are required.
///
/// Columns are rendered in the order they were added. Key columns keep that order within
/// the partition and the clustering part of the primary key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateTableSpecification {
    name: Option<Identifier>,
    if_not_exists: bool,
    columns: Vec<ColumnSpecification>,
    options: Vec<SchemaOption>,
}

impl CreateTableSpecification {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn if_not_exists(mut self) -> Self {
        self.if_not_exists = true;
        self
    }

    pub fn column(self, name: impl Into<String>, typ: ColumnType) -> Result<Self, BadIdentifier> {
        Ok(self.with_column(ColumnSpecification::new(name, typ)?))
    }

    pub fn partition_key_column(
        self,
        name: impl Into<String>,
        typ: ColumnType,
    ) -> Result<Self, BadIdentifier> {
        Ok(self.with_column(ColumnSpecification::new(name, typ)?.partition_key()))
    }

    pub fn clustered_key_column(
        self,
        name: impl Into<String>,
        typ: ColumnType,
        order: ClusteringOrder,
    ) -> Result<Self, BadIdentifier> {
        Ok(self.with_column(ColumnSpecification::new(name, typ)?.clustering_key(order)))
    }

    pub fn with_column(mut self, column: ColumnSpecification) -> Self {
        self.columns.push(column);
        self
    }

    /// Adds a table option, e.g. `comment` or `gc_grace_seconds`.
    pub fn with(
        mut self,
        option: impl Into<String>,
        value: impl Into<CqlValue>,
    ) -> Result<Self, BadIdentifier> {
        set_option(&mut self.options, SchemaOption::new(option, value)?);
        Ok(self)
    }

    pub fn get_if_not_exists(&self) -> bool {
        self.if_not_exists
    }

    pub fn get_columns(&self) -> &[ColumnSpecification] {
        &self.columns
    }

    pub fn get_options(&self) -> &[SchemaOption] {
        &self.options
    }

    pub fn partition_key_columns(&self) -> impl Iterator<Item = &ColumnSpecification> + Clone {
        self.columns
            .iter()
            .filter(|c| c.key == Some(KeyKind::Partition))
    }

    pub fn clustered_key_columns(&self) -> impl Iterator<Item = &ColumnSpecification> + Clone {
        self.columns
            .iter()
            .filter(|c| matches!(c.key, Some(KeyKind::Clustering(_))))
    }
}

impl Specification for CreateTableSpecification {
    fn to_cql(&self) -> Result<String, SpecificationError> {
        CreateTableCqlGenerator::new(self).to_cql()
    }
}

/// One change applied by `ALTER TABLE`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnChange {
    Add(Identifier, ColumnType),
    AlterType(Identifier, ColumnType),
    Drop(Identifier),
    Rename(Identifier, Identifier),
}

impl ColumnChange {
    /// Keyword of the `ALTER TABLE` instruction carrying this change.
    pub fn instruction(&self) -> &'static str {
        match self {
            ColumnChange::Add(..) => "ADD",
            ColumnChange::AlterType(..) => "ALTER",
            ColumnChange::Drop(..) => "DROP",
            ColumnChange::Rename(..) => "RENAME",
        }
    }
}

/// `ALTER TABLE`; the name and at least one change or option are required.
///
/// A statement carries a single instruction. Several adds, drops or renames are grouped
/// into one clause, but different kinds of changes, more than one type change, or changes
/// together with options fail to render with
/// [`ConflictingInstructions`](crate::errors::ConflictingInstructions).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlterTableSpecification {
    name: Option<Identifier>,
    changes: Vec<ColumnChange>,
    options: Vec<SchemaOption>,
}

impl AlterTableSpecification {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(mut self, column: impl Into<String>, typ: ColumnType) -> Result<Self, BadIdentifier> {
        self.changes.push(ColumnChange::Add(Identifier::new(column)?, typ));
        Ok(self)
    }

    pub fn alter(mut self, column: impl Into<String>, typ: ColumnType) -> Result<Self, BadIdentifier> {
        self.changes
            .push(ColumnChange::AlterType(Identifier::new(column)?, typ));
        Ok(self)
    }

    pub fn drop(mut self, column: impl Into<String>) -> Result<Self, BadIdentifier> {
        self.changes.push(ColumnChange::Drop(Identifier::new(column)?));
        Ok(self)
    }

    pub fn rename(
        mut self,
        from: impl Into<String>,
        to: impl Into<String>,
    ) -> Result<Self, BadIdentifier> {
        self.changes.push(ColumnChange::Rename(
            Identifier::new(from)?,
            Identifier::new(to)?,
        ));
        Ok(self)
    }

    pub fn with(
        mut self,
        option: impl Into<String>,
        value: impl Into<CqlValue>,
    ) -> Result<Self, BadIdentifier> {
        set_option(&mut self.options, SchemaOption::new(option, value)?);
        Ok(self)
    }

    pub fn get_changes(&self) -> &[ColumnChange] {
        &self.changes
    }

    pub fn get_options(&self) -> &[SchemaOption] {
        &self.options
    }
}

impl Specification for AlterTableSpecification {
    fn to_cql(&self) -> Result<String, SpecificationError> {
        AlterTableCqlGenerator::new(self).to_cql()
    }
}

/// `DROP TABLE`; the name is required.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DropTableSpecification {
    name: Option<Identifier>,
    if_exists: bool,
}

impl DropTableSpecification {
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

impl Specification for DropTableSpecification {
    fn to_cql(&self) -> Result<String, SpecificationError> {
        DropTableCqlGenerator::new(self).to_cql()
    }
}
