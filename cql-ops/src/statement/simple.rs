use cql_ops_core::query::BuiltStatement;
use cql_ops_core::CqlValue;

use super::StatementConfig;

/// CQL text executed without preparation, optionally with values for its `?` markers.
#[derive(Debug, Clone, PartialEq)]
pub struct SimpleStatement {
    contents: String,
    values: Vec<Option<CqlValue>>,
    pub(crate) config: StatementConfig,
}

impl SimpleStatement {
    /// Creates a new `SimpleStatement` from a CQL string.
    pub fn new(contents: impl Into<String>) -> Self {
        Self::with_values(contents, Vec::new())
    }

    pub fn with_values(contents: impl Into<String>, values: Vec<Option<CqlValue>>) -> Self {
        Self {
            contents: contents.into(),
            values,
            config: StatementConfig::default(),
        }
    }

    /// Returns the string representation of the CQL statement.
    pub fn get_contents(&self) -> &str {
        &self.contents
    }

    pub fn get_values(&self) -> &[Option<CqlValue>] {
        &self.values
    }

    /// Sets the page size for this CQL statement.
    pub fn set_page_size(&mut self, page_size: i32) {
        assert!(page_size > 0, "page size must be larger than 0");
        self.config.page_size = Some(page_size);
    }

    /// Returns the page size for this CQL statement.
    pub fn get_page_size(&self) -> Option<i32> {
        self.config.page_size
    }

    /// Enables or disables CQL tracing for this statement.
    pub fn set_tracing(&mut self, should_trace: bool) {
        self.config.tracing = Some(should_trace);
    }

    pub fn get_tracing(&self) -> bool {
        self.config.tracing.unwrap_or(false)
    }
}

impl From<String> for SimpleStatement {
    fn from(s: String) -> SimpleStatement {
        SimpleStatement::new(s)
    }
}

impl<'a> From<&'a str> for SimpleStatement {
    fn from(s: &'a str) -> SimpleStatement {
        SimpleStatement::new(s.to_owned())
    }
}

impl From<BuiltStatement> for SimpleStatement {
    fn from(statement: BuiltStatement) -> SimpleStatement {
        let (contents, values) = statement.into_parts();
        SimpleStatement::with_values(contents, values)
    }
}
