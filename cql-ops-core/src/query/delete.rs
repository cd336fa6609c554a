use itertools::Itertools;

use crate::errors::{BadIdentifier, IncompleteSpecification};
use crate::identifier::Identifier;

use super::{impl_where_methods, BuiltStatement, Conditions};

/// `DELETE [columns] FROM table WHERE ...`.
///
/// Without columns the whole row is deleted.
#[derive(Debug, Clone, PartialEq)]
pub struct Delete {
    table: Identifier,
    columns: Vec<Identifier>,
    conditions: Conditions,
}

impl Delete {
    pub fn from(table: impl Into<String>) -> Result<Self, BadIdentifier> {
        Ok(Delete {
            table: Identifier::new(table)?,
            columns: Vec::new(),
            conditions: Conditions::default(),
        })
    }

    pub fn column(mut self, column: impl Into<String>) -> Result<Self, BadIdentifier> {
        self.columns.push(Identifier::new(column)?);
        Ok(self)
    }

    pub fn build(&self) -> Result<BuiltStatement, IncompleteSpecification> {
        if self.conditions.is_empty() {
            return Err(IncompleteSpecification::new("DELETE", "WHERE clause"));
        }

        let mut cql = String::from("DELETE ");
        if !self.columns.is_empty() {
            cql.push_str(&format!("{} ", self.columns.iter().join(", ")));
        }
        cql.push_str(&format!("FROM {}", self.table));

        let mut values = Vec::new();
        cql.push_str(&self.conditions.render(&mut values));

        Ok(BuiltStatement::new(cql, values))
    }
}

impl_where_methods!(Delete);
