use itertools::Itertools;

use crate::errors::{BadIdentifier, IncompleteSpecification};
use crate::identifier::Identifier;
use crate::value::CqlValue;

use super::{impl_where_methods, BuiltStatement, Conditions};

/// `UPDATE table [USING TTL n] SET ... WHERE ...`.
#[derive(Debug, Clone, PartialEq)]
pub struct Update {
    table: Identifier,
    assignments: Vec<(Identifier, Option<CqlValue>)>,
    conditions: Conditions,
    ttl: Option<u32>,
}

impl Update {
    pub fn table(table: impl Into<String>) -> Result<Self, BadIdentifier> {
        Ok(Update {
            table: Identifier::new(table)?,
            assignments: Vec::new(),
            conditions: Conditions::default(),
            ttl: None,
        })
    }

    /// Adds `column = ?`.
    pub fn set(
        mut self,
        column: impl Into<String>,
        value: impl Into<CqlValue>,
    ) -> Result<Self, BadIdentifier> {
        self.assignments
            .push((Identifier::new(column)?, Some(value.into())));
        Ok(self)
    }

    /// Sets `column` to null.
    pub fn set_null(mut self, column: impl Into<String>) -> Result<Self, BadIdentifier> {
        self.assignments.push((Identifier::new(column)?, None));
        Ok(self)
    }

    pub fn using_ttl(mut self, seconds: u32) -> Self {
        self.ttl = Some(seconds);
        self
    }

    pub fn build(&self) -> Result<BuiltStatement, IncompleteSpecification> {
        const STATEMENT: &str = "UPDATE";

        if self.assignments.is_empty() {
            return Err(IncompleteSpecification::new(STATEMENT, "assignment"));
        }
        if self.conditions.is_empty() {
            return Err(IncompleteSpecification::new(STATEMENT, "WHERE clause"));
        }

        let mut cql = format!("UPDATE {}", self.table);
        if let Some(ttl) = self.ttl {
            cql.push_str(&format!(" USING TTL {ttl}"));
        }
        let assignments = self
            .assignments
            .iter()
            .map(|(column, _)| format!("{column} = ?"))
            .join(", ");
        cql.push_str(&format!(" SET {assignments}"));

        let mut values: Vec<_> = self.assignments.iter().map(|(_, v)| v.clone()).collect();
        cql.push_str(&self.conditions.render(&mut values));

        Ok(BuiltStatement::new(cql, values))
    }
}

impl_where_methods!(Update);
