use itertools::Itertools;

use crate::errors::{ConflictingInstructions, IncompleteSpecification, SpecificationError};
use crate::spec::{
    AlterTableSpecification, ColumnChange, CreateTableSpecification, DropTableSpecification,
    KeyKind, TableNameSpecification,
};

use super::{render_options, require, CqlGenerator};

/// Renders `CREATE TABLE` with its primary key, clustering order and options.
pub struct CreateTableCqlGenerator<'a> {
    spec: &'a CreateTableSpecification,
}

impl<'a> CreateTableCqlGenerator<'a> {
    pub fn new(spec: &'a CreateTableSpecification) -> Self {
        CreateTableCqlGenerator { spec }
    }
}

impl CqlGenerator for CreateTableCqlGenerator<'_> {
    fn write_cql(&self, cql: &mut String) -> Result<(), SpecificationError> {
        const STATEMENT: &str = "CREATE TABLE";

        let name = require(self.spec.get_name(), STATEMENT, "table name")?;
        if self.spec.partition_key_columns().next().is_none() {
            return Err(IncompleteSpecification::new(STATEMENT, "partition key column").into());
        }

        cql.push_str("CREATE TABLE ");
        if self.spec.get_if_not_exists() {
            cql.push_str("IF NOT EXISTS ");
        }

        let columns = self
            .spec
            .get_columns()
            .iter()
            .map(|column| format!("{} {}", column.name(), column.typ()))
            .join(", ");
        let partition_key = self.spec.partition_key_columns().map(|c| c.name()).join(", ");
        cql.push_str(&format!("{name} ({columns}, PRIMARY KEY (({partition_key})"));
        for column in self.spec.clustered_key_columns() {
            cql.push_str(&format!(", {}", column.name()));
        }
        cql.push_str("))");

        let mut with_clauses = Vec::new();
        let clustering_order = self
            .spec
            .clustered_key_columns()
            .filter_map(|column| match column.key() {
                Some(KeyKind::Clustering(order)) => {
                    Some(format!("{} {}", column.name(), order.as_cql()))
                }
                _ => None,
            })
            .join(", ");
        if !clustering_order.is_empty() {
            with_clauses.push(format!("CLUSTERING ORDER BY ({clustering_order})"));
        }
        if !self.spec.get_options().is_empty() {
            with_clauses.push(render_options(self.spec.get_options().iter()));
        }
        if !with_clauses.is_empty() {
            cql.push_str(&format!(" WITH {}", with_clauses.join(" AND ")));
        }

        Ok(())
    }
}

/// Renders `ALTER TABLE` with exactly one instruction: `ADD`, `ALTER .. TYPE`, `DROP`,
/// `RENAME` or `WITH`.
pub struct AlterTableCqlGenerator<'a> {
    spec: &'a AlterTableSpecification,
}

impl<'a> AlterTableCqlGenerator<'a> {
    pub fn new(spec: &'a AlterTableSpecification) -> Self {
        AlterTableCqlGenerator { spec }
    }

    fn instruction(&self) -> Result<&'static str, SpecificationError> {
        const STATEMENT: &str = "ALTER TABLE";

        let changes = self.spec.get_changes();
        let options = self.spec.get_options();
        let instruction = match (changes.first(), options.is_empty()) {
            (None, true) => {
                let missing = "column change or option";
                return Err(IncompleteSpecification::new(STATEMENT, missing).into());
            }
            (None, false) => return Ok("WITH"),
            (Some(first), false) => {
                let conflict = ConflictingInstructions::new(STATEMENT, first.instruction(), "WITH");
                return Err(conflict.into());
            }
            (Some(first), true) => first.instruction(),
        };

        // Only one column type can be changed per statement.
        let mut others = changes.iter().map(ColumnChange::instruction).skip(1);
        match others.find(|other| *other != instruction || instruction == "ALTER") {
            Some(other) => Err(ConflictingInstructions::new(STATEMENT, instruction, other).into()),
            None => Ok(instruction),
        }
    }
}

impl CqlGenerator for AlterTableCqlGenerator<'_> {
    fn write_cql(&self, cql: &mut String) -> Result<(), SpecificationError> {
        let name = require(self.spec.get_name(), "ALTER TABLE", "table name")?;
        let instruction = self.instruction()?;
        let changes = self.spec.get_changes();

        cql.push_str(&format!("ALTER TABLE {name} "));
        match changes {
            [] => cql.push_str(&format!("WITH {}", render_options(self.spec.get_options().iter()))),
            [ColumnChange::Add(column, typ)] => cql.push_str(&format!("ADD {column} {typ}")),
            [ColumnChange::AlterType(column, typ)] => {
                cql.push_str(&format!("ALTER {column} TYPE {typ}"))
            }
            [ColumnChange::Drop(column)] => cql.push_str(&format!("DROP {column}")),
            _ if instruction == "RENAME" => {
                let renames = changes
                    .iter()
                    .filter_map(|change| match change {
                        ColumnChange::Rename(from, to) => Some(format!("{from} TO {to}")),
                        _ => None,
                    })
                    .join(" AND ");
                cql.push_str(&format!("RENAME {renames}"));
            }
            _ => {
                let columns = changes
                    .iter()
                    .filter_map(|change| match change {
                        ColumnChange::Add(column, typ) => Some(format!("{column} {typ}")),
                        ColumnChange::Drop(column) => Some(column.to_string()),
                        _ => None,
                    })
                    .join(", ");
                cql.push_str(&format!("{instruction} ({columns})"));
            }
        }

        Ok(())
    }
}

/// Renders `DROP TABLE [IF EXISTS ]name`.
pub struct DropTableCqlGenerator<'a> {
    spec: &'a DropTableSpecification,
}

impl<'a> DropTableCqlGenerator<'a> {
    pub fn new(spec: &'a DropTableSpecification) -> Self {
        DropTableCqlGenerator { spec }
    }
}

impl CqlGenerator for DropTableCqlGenerator<'_> {
    fn write_cql(&self, cql: &mut String) -> Result<(), SpecificationError> {
        let name = require(self.spec.get_name(), "DROP TABLE", "table name")?;

        cql.push_str("DROP TABLE ");
        if self.spec.get_if_exists() {
            cql.push_str("IF EXISTS ");
        }
        cql.push_str(&name.to_string());

        Ok(())
    }
}
