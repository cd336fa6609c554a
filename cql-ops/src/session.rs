//! The cluster session the [`Template`](crate::Template) executes statements against.
//!
//! Connection handling, paging, topology discovery and the network protocol all live
//! behind this trait.

use std::net::SocketAddr;

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::ExecutionError;
use crate::response::ResultSet;
use crate::statement::{PreparedStatement, Statement};

#[async_trait]
pub trait Session: Send + Sync {
    /// Prepares `cql` on the cluster.
    fn prepare(&self, cql: &str) -> Result<PreparedStatement, ExecutionError>;

    /// Executes `statement`, blocking until the first page of the result is available.
    fn execute(&self, statement: &Statement) -> Result<ResultSet, ExecutionError>;

    /// Executes `statement` without blocking the caller.
    async fn execute_async(&self, statement: Statement) -> Result<ResultSet, ExecutionError>;

    /// Hosts of the cluster the session is connected to, in the order the session
    /// knows them.
    fn describe_ring(&self) -> Result<Vec<Host>, ExecutionError>;
}

/// A node of the cluster, as seen by the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Host {
    pub address: SocketAddr,
    pub datacenter: Option<String>,
    pub rack: Option<String>,
    pub host_id: Uuid,
}
