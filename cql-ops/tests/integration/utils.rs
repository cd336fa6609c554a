use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;
use cql_ops::errors::{DbError, ExecutionError};
use cql_ops::response::{RawRow, ResultSet};
use cql_ops::session::{Host, Session};
use cql_ops::statement::{PreparedStatement, Statement};
use cql_ops::{ColumnSpec, ColumnType, CqlValue, Template};
use uuid::Uuid;

pub(crate) fn setup_tracing() {
    let _ = tracing_subscriber::fmt::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(tracing_subscriber::fmt::TestWriter::new())
        .try_init();
}

#[derive(Clone)]
struct Scripted {
    col_specs: Vec<ColumnSpec>,
    rows: Vec<RawRow>,
}

/// A session answering from a script of CQL strings to rows.
///
/// Statements missing from the script are executed successfully without rows, unless
/// they are `SELECT`s, which fail with an `Invalid` database error. Synchronous
/// execution returns buffered rows; asynchronous execution streams them, counting every
/// row pulled from the stream.
#[derive(Default)]
pub(crate) struct ScriptedSession {
    script: HashMap<String, Scripted>,
    ring: Vec<Host>,
    executed: Mutex<Vec<Statement>>,
    prepared: Mutex<Vec<String>>,
    pulled: Arc<AtomicUsize>,
}

impl ScriptedSession {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_rows(
        mut self,
        cql: &str,
        col_specs: Vec<ColumnSpec>,
        rows: Vec<RawRow>,
    ) -> Self {
        self.script
            .insert(cql.to_owned(), Scripted { col_specs, rows });
        self
    }

    pub(crate) fn with_host(mut self, address: IpAddr, datacenter: &str, rack: &str) -> Self {
        self.ring.push(Host {
            address: SocketAddr::new(address, 9042),
            datacenter: Some(datacenter.to_owned()),
            rack: Some(rack.to_owned()),
            host_id: Uuid::new_v4(),
        });
        self
    }

    pub(crate) fn into_template(self) -> (Template, Arc<ScriptedSession>) {
        let session = Arc::new(self);
        (Template::new(session.clone()), session)
    }

    pub(crate) fn executed(&self) -> Vec<Statement> {
        self.executed.lock().unwrap().clone()
    }

    pub(crate) fn executed_cql(&self) -> Vec<String> {
        self.executed()
            .iter()
            .map(|statement| statement.get_contents().to_owned())
            .collect()
    }

    pub(crate) fn prepared(&self) -> Vec<String> {
        self.prepared.lock().unwrap().clone()
    }

    /// Rows pulled so far from streamed results.
    pub(crate) fn pulled_rows(&self) -> usize {
        self.pulled.load(Ordering::SeqCst)
    }

    fn lookup(&self, statement: &Statement) -> Result<Option<Scripted>, ExecutionError> {
        self.executed.lock().unwrap().push(statement.clone());
        let cql = statement.get_contents();
        match self.script.get(cql) {
            Some(scripted) => Ok(Some(scripted.clone())),
            None if cql.starts_with("SELECT") => Err(ExecutionError::DbError(
                DbError::Invalid,
                format!("unconfigured table in {cql}"),
            )),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl Session for ScriptedSession {
    fn prepare(&self, cql: &str) -> Result<PreparedStatement, ExecutionError> {
        let mut prepared = self.prepared.lock().unwrap();
        prepared.push(cql.to_owned());
        Ok(PreparedStatement::new(
            Bytes::from(prepared.len().to_be_bytes().to_vec()),
            cql,
        ))
    }

    fn execute(&self, statement: &Statement) -> Result<ResultSet, ExecutionError> {
        Ok(match self.lookup(statement)? {
            Some(scripted) => ResultSet::buffered(scripted.col_specs, scripted.rows),
            None => ResultSet::void(),
        })
    }

    async fn execute_async(&self, statement: Statement) -> Result<ResultSet, ExecutionError> {
        let Some(scripted) = self.lookup(&statement)? else {
            return Ok(ResultSet::void());
        };
        let pulled = self.pulled.clone();
        let rows = scripted.rows.into_iter().map(move |row| {
            pulled.fetch_add(1, Ordering::SeqCst);
            Ok(row)
        });
        Ok(ResultSet::streamed(scripted.col_specs, rows))
    }

    fn describe_ring(&self) -> Result<Vec<Host>, ExecutionError> {
        Ok(self.ring.clone())
    }
}

pub(crate) fn text(value: &str) -> Option<CqlValue> {
    Some(CqlValue::Text(value.to_owned()))
}

pub(crate) const BOOKS: &str = "SELECT isbn, title FROM book";

/// Books `1234`, `2345` and `3456`, titled `A`, `B` and `C`.
pub(crate) fn books() -> ScriptedSession {
    ScriptedSession::new().with_rows(
        BOOKS,
        vec![
            ColumnSpec::new("isbn", ColumnType::Text),
            ColumnSpec::new("title", ColumnType::Text),
        ],
        vec![
            vec![text("1234"), text("A")],
            vec![text("2345"), text("B")],
            vec![text("3456"), text("C")],
        ],
    )
}
