use bytes::Bytes;
use cql_ops_core::CqlValue;

use super::StatementConfig;

/// A statement prepared by the session, identified by the id the session assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedStatement {
    id: Bytes,
    contents: String,
}

impl PreparedStatement {
    /// Used by [`Session`](crate::session::Session) implementations.
    pub fn new(id: Bytes, contents: impl Into<String>) -> Self {
        PreparedStatement {
            id,
            contents: contents.into(),
        }
    }

    pub fn get_id(&self) -> &Bytes {
        &self.id
    }

    pub fn get_contents(&self) -> &str {
        &self.contents
    }

    /// Binds values to the markers of this statement, in marker order.
    pub fn bind(&self, values: Vec<Option<CqlValue>>) -> BoundStatement {
        BoundStatement {
            prepared: self.clone(),
            values,
            config: StatementConfig::default(),
        }
    }
}

/// A prepared statement together with the values bound to it.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundStatement {
    prepared: PreparedStatement,
    values: Vec<Option<CqlValue>>,
    pub(crate) config: StatementConfig,
}

impl BoundStatement {
    pub fn get_prepared(&self) -> &PreparedStatement {
        &self.prepared
    }

    pub fn get_values(&self) -> &[Option<CqlValue>] {
        &self.values
    }

    pub fn set_page_size(&mut self, page_size: i32) {
        assert!(page_size > 0, "page size must be larger than 0");
        self.config.page_size = Some(page_size);
    }

    pub fn set_tracing(&mut self, should_trace: bool) {
        self.config.tracing = Some(should_trace);
    }
}
