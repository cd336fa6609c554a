use itertools::Itertools;

use crate::errors::{BadIdentifier, IncompleteSpecification};
use crate::identifier::Identifier;
use crate::value::CqlValue;

use super::BuiltStatement;

/// `INSERT INTO table (...) VALUES (...) [IF NOT EXISTS] [USING TTL n]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Insert {
    table: Identifier,
    values: Vec<(Identifier, Option<CqlValue>)>,
    if_not_exists: bool,
    ttl: Option<u32>,
}

impl Insert {
    pub fn into(table: impl Into<String>) -> Result<Self, BadIdentifier> {
        Ok(Insert {
            table: Identifier::new(table)?,
            values: Vec::new(),
            if_not_exists: false,
            ttl: None,
        })
    }

    pub fn value(
        mut self,
        column: impl Into<String>,
        value: impl Into<CqlValue>,
    ) -> Result<Self, BadIdentifier> {
        self.values
            .push((Identifier::new(column)?, Some(value.into())));
        Ok(self)
    }

    /// Binds null to `column`.
    pub fn null_value(mut self, column: impl Into<String>) -> Result<Self, BadIdentifier> {
        self.values.push((Identifier::new(column)?, None));
        Ok(self)
    }

    pub fn if_not_exists(mut self) -> Self {
        self.if_not_exists = true;
        self
    }

    pub fn using_ttl(mut self, seconds: u32) -> Self {
        self.ttl = Some(seconds);
        self
    }

    pub fn build(&self) -> Result<BuiltStatement, IncompleteSpecification> {
        if self.values.is_empty() {
            return Err(IncompleteSpecification::new("INSERT", "column value"));
        }

        let columns = self.values.iter().map(|(column, _)| column).join(", ");
        let markers = self.values.iter().map(|_| "?").join(", ");
        let mut cql = format!("INSERT INTO {} ({columns}) VALUES ({markers})", self.table);
        if self.if_not_exists {
            cql.push_str(" IF NOT EXISTS");
        }
        if let Some(ttl) = self.ttl {
            cql.push_str(&format!(" USING TTL {ttl}"));
        }

        let values = self.values.iter().map(|(_, value)| value.clone()).collect();
        Ok(BuiltStatement::new(cql, values))
    }
}
