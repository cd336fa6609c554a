use crate::errors::BadIdentifier;
use crate::identifier::Identifier;

use super::BuiltStatement;

/// `TRUNCATE table`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Truncate {
    table: Identifier,
}

impl Truncate {
    pub fn table(table: impl Into<String>) -> Result<Self, BadIdentifier> {
        Ok(Truncate {
            table: Identifier::new(table)?,
        })
    }

    pub fn get_table(&self) -> &Identifier {
        &self.table
    }

    pub fn build(&self) -> BuiltStatement {
        BuiltStatement::new(format!("TRUNCATE {}", self.table), Vec::new())
    }
}
