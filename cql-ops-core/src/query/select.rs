use itertools::Itertools;

use crate::errors::{BadIdentifier, IncompleteSpecification};
use crate::identifier::Identifier;

use super::{impl_where_methods, BuiltStatement, Conditions};

#[derive(Debug, Clone, PartialEq)]
enum Selection {
    All,
    Columns(Vec<Identifier>),
    CountAll,
}

/// `SELECT ... FROM table [WHERE ...] [LIMIT n] [ALLOW FILTERING]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Select {
    selection: Selection,
    table: Option<Identifier>,
    conditions: Conditions,
    limit: Option<u32>,
    allow_filtering: bool,
}

impl Select {
    fn with_selection(selection: Selection) -> Self {
        Select {
            selection,
            table: None,
            conditions: Conditions::default(),
            limit: None,
            allow_filtering: false,
        }
    }

    /// `SELECT *`
    pub fn all() -> Self {
        Self::with_selection(Selection::All)
    }

    pub fn columns<I, S>(columns: I) -> Result<Self, BadIdentifier>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let columns = columns
            .into_iter()
            .map(Identifier::new)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::with_selection(Selection::Columns(columns)))
    }

    /// `SELECT COUNT(*)`
    pub fn count_all() -> Self {
        Self::with_selection(Selection::CountAll)
    }

    pub fn from(mut self, table: impl Into<String>) -> Result<Self, BadIdentifier> {
        self.table = Some(Identifier::new(table)?);
        Ok(self)
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn allow_filtering(mut self) -> Self {
        self.allow_filtering = true;
        self
    }

    pub fn build(&self) -> Result<BuiltStatement, IncompleteSpecification> {
        const STATEMENT: &str = "SELECT";

        let table = self
            .table
            .as_ref()
            .ok_or(IncompleteSpecification::new(STATEMENT, "table"))?;
        let selection = match &self.selection {
            Selection::All => "*".to_owned(),
            Selection::CountAll => "COUNT(*)".to_owned(),
            Selection::Columns(columns) if columns.is_empty() => {
                return Err(IncompleteSpecification::new(STATEMENT, "selected column"));
            }
            Selection::Columns(columns) => columns.iter().join(", "),
        };

        let mut values = Vec::new();
        let mut cql = format!("SELECT {selection} FROM {table}");
        cql.push_str(&self.conditions.render(&mut values));
        if let Some(limit) = self.limit {
            cql.push_str(&format!(" LIMIT {limit}"));
        }
        if self.allow_filtering {
            cql.push_str(" ALLOW FILTERING");
        }

        Ok(BuiltStatement::new(cql, values))
    }
}

impl_where_methods!(Select);
