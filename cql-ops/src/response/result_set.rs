use std::fmt;
use std::sync::Arc;

use cql_ops_core::{ColumnSpec, CqlValue, Row};
use uuid::Uuid;

use crate::errors::ExecutionError;

/// Column values of one row, as produced by the session.
pub type RawRow = Vec<Option<CqlValue>>;

enum RowSource {
    Void,
    Buffered(std::vec::IntoIter<RawRow>),
    Streamed(Box<dyn Iterator<Item = Result<RawRow, ExecutionError>> + Send>),
}

/// Result of a single statement execution.
///
/// Rows are consumed by iterating; a streamed result fetches further rows from the
/// session only when they are pulled.
pub struct ResultSet {
    col_specs: Arc<[ColumnSpec]>,
    rows: RowSource,
    tracing_id: Option<Uuid>,
    warnings: Vec<String>,
}

impl ResultSet {
    /// Result of a statement that doesn't return rows, e.g. `INSERT` or DDL.
    pub fn void() -> Self {
        ResultSet {
            col_specs: Vec::<ColumnSpec>::new().into(),
            rows: RowSource::Void,
            tracing_id: None,
            warnings: Vec::new(),
        }
    }

    /// Rows that are all available up front.
    pub fn buffered(col_specs: Vec<ColumnSpec>, rows: Vec<RawRow>) -> Self {
        ResultSet {
            col_specs: col_specs.into(),
            rows: RowSource::Buffered(rows.into_iter()),
            tracing_id: None,
            warnings: Vec::new(),
        }
    }

    /// Rows fetched lazily, e.g. page by page.
    pub fn streamed<I>(col_specs: Vec<ColumnSpec>, rows: I) -> Self
    where
        I: Iterator<Item = Result<RawRow, ExecutionError>> + Send + 'static,
    {
        ResultSet {
            col_specs: col_specs.into(),
            rows: RowSource::Streamed(Box::new(rows)),
            tracing_id: None,
            warnings: Vec::new(),
        }
    }

    pub fn with_tracing_id(mut self, tracing_id: Uuid) -> Self {
        self.tracing_id = Some(tracing_id);
        self
    }

    pub fn with_warnings(mut self, warnings: Vec<String>) -> Self {
        self.warnings = warnings;
        self
    }

    /// Returns `false` for results of statements that are not supposed to return rows.
    pub fn is_rows(&self) -> bool {
        !matches!(self.rows, RowSource::Void)
    }

    /// Returns column specifications.
    #[inline]
    pub fn col_specs(&self) -> &[ColumnSpec] {
        &self.col_specs
    }

    /// CQL Tracing uuid - can only be Some if tracing is enabled for this statement
    pub fn tracing_id(&self) -> Option<Uuid> {
        self.tracing_id
    }

    /// Warnings returned by the database
    pub fn warnings(&self) -> impl Iterator<Item = &str> {
        self.warnings.iter().map(String::as_str)
    }

    /// Pulls the next row, if there is one.
    pub fn one(&mut self) -> Result<Option<Row>, ExecutionError> {
        self.next().transpose()
    }

    /// Pulls all remaining rows.
    pub fn into_rows(self) -> Result<Vec<Row>, ExecutionError> {
        self.collect()
    }
}

impl Iterator for ResultSet {
    type Item = Result<Row, ExecutionError>;

    fn next(&mut self) -> Option<Self::Item> {
        let raw = match &mut self.rows {
            RowSource::Void => None,
            RowSource::Buffered(rows) => rows.next().map(Ok),
            RowSource::Streamed(rows) => rows.next(),
        }?;
        Some(raw.map(|columns| Row::new(self.col_specs.clone(), columns)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.rows {
            RowSource::Void => (0, Some(0)),
            RowSource::Buffered(rows) => rows.size_hint(),
            RowSource::Streamed(rows) => rows.size_hint(),
        }
    }
}

impl fmt::Debug for ResultSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows = match &self.rows {
            RowSource::Void => "void",
            RowSource::Buffered(_) => "buffered",
            RowSource::Streamed(_) => "streamed",
        };
        f.debug_struct("ResultSet")
            .field("col_specs", &self.col_specs)
            .field("rows", &rows)
            .field("tracing_id", &self.tracing_id)
            .field("warnings", &self.warnings)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use cql_ops_core::ColumnType;

    use super::*;

    fn specs() -> Vec<ColumnSpec> {
        vec![
            ColumnSpec::new("isbn", ColumnType::Text),
            ColumnSpec::new("pages", ColumnType::Int),
        ]
    }

    #[test]
    fn void_result_has_no_rows() {
        let mut rs = ResultSet::void();
        assert!(!rs.is_rows());
        assert!(rs.col_specs().is_empty());
        assert_matches!(rs.one(), Ok(None));
    }

    #[test]
    fn buffered_rows_share_column_specs() {
        let rs = ResultSet::buffered(
            specs(),
            vec![
                vec![Some(CqlValue::Text("1234".to_owned())), Some(CqlValue::Int(100))],
                vec![Some(CqlValue::Text("2345".to_owned())), None],
            ],
        );
        assert!(rs.is_rows());

        let rows = rs.into_rows().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].get_by_name::<String>("isbn").unwrap(), "2345");
        assert_eq!(rows[1].get_by_name::<Option<i32>>("pages").unwrap(), None);
    }

    #[test]
    fn streamed_errors_are_yielded() {
        let rows = vec![
            Ok(vec![Some(CqlValue::Text("1234".to_owned())), None]),
            Err(ExecutionError::TimeoutError),
        ];
        let mut rs = ResultSet::streamed(specs(), rows.into_iter());

        assert_matches!(rs.one(), Ok(Some(_)));
        assert_matches!(rs.one(), Err(ExecutionError::TimeoutError));
        assert_matches!(rs.one(), Ok(None));
    }

    #[test]
    fn metadata() {
        let id = Uuid::new_v4();
        let rs = ResultSet::void()
            .with_tracing_id(id)
            .with_warnings(vec!["Aggregation query used without partition key".to_owned()]);
        assert_eq!(rs.tracing_id(), Some(id));
        assert_eq!(
            rs.warnings().collect::<Vec<_>>(),
            ["Aggregation query used without partition key"]
        );
    }
}
