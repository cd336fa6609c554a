use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;
use cql_ops_core::{ColumnSpec, ColumnType, CqlValue};
use uuid::Uuid;

use crate::errors::{DbError, ExecutionError};
use crate::response::{RawRow, ResultSet};
use crate::session::{Host, Session};
use crate::statement::{PreparedStatement, Statement};

pub(crate) fn setup_tracing() {
    let _ = tracing_subscriber::fmt::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(tracing_subscriber::fmt::TestWriter::new())
        .try_init();
}

#[derive(Default)]
struct Recorded {
    executed: Vec<Statement>,
    prepared: Vec<String>,
}

/// In-memory session answering scripted statements.
///
/// Unknown statements are rejected with an `Invalid` database error. Synchronous
/// executions get buffered results, asynchronous ones streamed results.
#[derive(Clone, Default)]
pub(crate) struct MockSession {
    results: Arc<HashMap<String, (Vec<ColumnSpec>, Vec<RawRow>)>>,
    ring: Arc<Vec<Host>>,
    fail_prepare: bool,
    recorded: Arc<Mutex<Recorded>>,
}

impl MockSession {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_rows(
        mut self,
        cql: &str,
        col_specs: Vec<ColumnSpec>,
        rows: Vec<RawRow>,
    ) -> Self {
        Arc::make_mut(&mut self.results).insert(cql.to_owned(), (col_specs, rows));
        self
    }

    /// Scripts `cql` to return a single text column `isbn` with the given values.
    pub(crate) fn with_isbns(self, cql: &str, isbns: &[&str]) -> Self {
        let rows = isbns
            .iter()
            .map(|isbn| vec![Some(CqlValue::Text((*isbn).to_owned()))])
            .collect();
        self.with_rows(cql, vec![ColumnSpec::new("isbn", ColumnType::Text)], rows)
    }

    pub(crate) fn with_host(mut self, address: IpAddr, datacenter: &str) -> Self {
        Arc::make_mut(&mut self.ring).push(Host {
            address: SocketAddr::new(address, 9042),
            datacenter: Some(datacenter.to_owned()),
            rack: Some("rack1".to_owned()),
            host_id: Uuid::new_v4(),
        });
        self
    }

    pub(crate) fn failing_prepare(mut self) -> Self {
        self.fail_prepare = true;
        self
    }

    pub(crate) fn executed(&self) -> Vec<Statement> {
        self.recorded.lock().unwrap().executed.clone()
    }

    pub(crate) fn prepared(&self) -> Vec<String> {
        self.recorded.lock().unwrap().prepared.clone()
    }

    fn lookup(&self, statement: &Statement) -> Result<(Vec<ColumnSpec>, Vec<RawRow>), ExecutionError> {
        self.recorded.lock().unwrap().executed.push(statement.clone());
        match self.results.get(statement.get_contents()) {
            Some(result) => Ok(result.clone()),
            None if !statement.get_contents().starts_with("SELECT") => Ok((Vec::new(), Vec::new())),
            None => Err(ExecutionError::DbError(
                DbError::Invalid,
                format!("unknown statement: {}", statement.get_contents()),
            )),
        }
    }
}

#[async_trait]
impl Session for MockSession {
    fn prepare(&self, cql: &str) -> Result<PreparedStatement, ExecutionError> {
        if self.fail_prepare {
            return Err(ExecutionError::DbError(DbError::SyntaxError, cql.to_owned()));
        }
        self.recorded.lock().unwrap().prepared.push(cql.to_owned());
        Ok(PreparedStatement::new(Bytes::from_static(&[0x01]), cql))
    }

    fn execute(&self, statement: &Statement) -> Result<ResultSet, ExecutionError> {
        let (col_specs, rows) = self.lookup(statement)?;
        if col_specs.is_empty() {
            return Ok(ResultSet::void());
        }
        Ok(ResultSet::buffered(col_specs, rows))
    }

    async fn execute_async(&self, statement: Statement) -> Result<ResultSet, ExecutionError> {
        let (col_specs, rows) = self.lookup(&statement)?;
        if col_specs.is_empty() {
            return Ok(ResultSet::void());
        }
        Ok(ResultSet::streamed(col_specs, rows.into_iter().map(Ok)))
    }

    fn describe_ring(&self) -> Result<Vec<Host>, ExecutionError> {
        Ok(self.ring.as_ref().clone())
    }
}

#[allow(dead_code)]
pub(crate) fn localhost(last: u8) -> IpAddr {
    IpAddr::V4(Ipv4Addr::new(127, 0, 0, last))
}
