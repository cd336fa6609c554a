//! Statements handed to the [`Session`](crate::session::Session), and the sources a
//! statement can be resolved from.

pub mod prepared;
pub mod simple;
pub mod source;

pub use prepared::{BoundStatement, PreparedStatement};
pub use simple::SimpleStatement;
pub use source::{
    PreparedStatementBinder, PreparedStatementCreator, StatementCreator, StatementSource,
};

use cql_ops_core::CqlValue;

use crate::template::TemplateConfig;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct StatementConfig {
    pub(crate) page_size: Option<i32>,
    pub(crate) tracing: Option<bool>,
}

impl StatementConfig {
    // Fills in whatever the statement itself left unset.
    pub(crate) fn apply_defaults(&mut self, defaults: &TemplateConfig) {
        if self.page_size.is_none() {
            self.page_size = defaults.default_page_size();
        }
        if self.tracing.is_none() {
            self.tracing = Some(defaults.tracing());
        }
    }
}

/// A statement ready to be executed.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Simple(SimpleStatement),
    Bound(BoundStatement),
}

impl Statement {
    /// The CQL text of the statement.
    pub fn get_contents(&self) -> &str {
        match self {
            Statement::Simple(s) => s.get_contents(),
            Statement::Bound(b) => b.get_prepared().get_contents(),
        }
    }

    /// The values bound to the statement's markers, in marker order.
    pub fn get_values(&self) -> &[Option<CqlValue>] {
        match self {
            Statement::Simple(s) => s.get_values(),
            Statement::Bound(b) => b.get_values(),
        }
    }

    pub fn get_page_size(&self) -> Option<i32> {
        self.config().page_size
    }

    pub fn get_tracing(&self) -> bool {
        self.config().tracing.unwrap_or(false)
    }

    pub fn set_page_size(&mut self, page_size: i32) {
        assert!(page_size > 0, "page size must be larger than 0");
        self.config_mut().page_size = Some(page_size);
    }

    pub fn set_tracing(&mut self, tracing: bool) {
        self.config_mut().tracing = Some(tracing);
    }

    fn config(&self) -> &StatementConfig {
        match self {
            Statement::Simple(s) => &s.config,
            Statement::Bound(b) => &b.config,
        }
    }

    pub(crate) fn config_mut(&mut self) -> &mut StatementConfig {
        match self {
            Statement::Simple(s) => &mut s.config,
            Statement::Bound(b) => &mut b.config,
        }
    }
}

impl From<SimpleStatement> for Statement {
    fn from(statement: SimpleStatement) -> Self {
        Statement::Simple(statement)
    }
}

impl From<BoundStatement> for Statement {
    fn from(statement: BoundStatement) -> Self {
        Statement::Bound(statement)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_do_not_override_statement_settings() {
        let defaults = TemplateConfig::builder()
            .default_page_size(100)
            .tracing(true)
            .build();

        let mut statement = Statement::from(SimpleStatement::new("SELECT * FROM book"));
        statement.set_page_size(10);
        statement.config_mut().apply_defaults(&defaults);
        assert_eq!(statement.get_page_size(), Some(10));
        assert!(statement.get_tracing());

        let mut statement = Statement::from(SimpleStatement::new("SELECT * FROM book"));
        statement.set_tracing(false);
        statement.config_mut().apply_defaults(&defaults);
        assert_eq!(statement.get_page_size(), Some(100));
        assert!(!statement.get_tracing());
    }
}
