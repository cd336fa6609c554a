use crate::errors::OperationError;
use crate::response::ResultSet;
use crate::statement::{StatementConfig, StatementSource};
use crate::template::Template;

use super::future::ResultSetFuture;

/// A pending write, schema change or truncation, started with
/// [`Template::execute_operation`] or [`Template::truncate`].
#[derive(Debug)]
#[must_use]
pub struct ExecuteOperation {
    template: Template,
    source: StatementSource,
    overrides: StatementConfig,
}

impl ExecuteOperation {
    pub(crate) fn new(template: Template, source: StatementSource) -> Self {
        ExecuteOperation {
            template,
            source,
            overrides: StatementConfig::default(),
        }
    }

    /// Enables or disables CQL tracing for this statement.
    pub fn tracing(mut self, tracing: bool) -> Self {
        self.overrides.tracing = Some(tracing);
        self
    }

    pub fn execute(self) -> Result<ResultSet, OperationError> {
        self.template.run(self.source, &self.overrides)
    }

    pub fn execute_async(self) -> ResultSetFuture {
        self.template.run_async(self.source, self.overrides)
    }
}
