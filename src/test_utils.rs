//! Fakes for exercising the connector without a database.
//!
//! `RecordingHandle` logs every statement it receives and answers from a queue of canned
//! responses; `StaticInspector` answers schema questions from a fixed table list.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::connector::Connector;
use crate::error::ConnectorError;
use crate::handle::DatabaseHandle;
use crate::params::Params;
use crate::results::ResultSet;
use crate::schema::SchemaInspector;
use crate::types::{Dialect, RowValues};

/// Build a result set with the given columns and rows.
#[must_use]
pub fn rows(columns: &[&str], values: Vec<Vec<RowValues>>) -> ResultSet {
    let mut rs = ResultSet::with_capacity(values.len());
    rs.set_column_names(Arc::new(columns.iter().map(|c| (*c).to_string()).collect()));
    for row in values {
        rs.add_row_values(row);
    }
    rs
}

/// Statements seen by a [`RecordingHandle`], shared with the test after the handle is boxed.
#[derive(Debug, Clone, Default)]
pub struct RecordingLog {
    entries: Arc<Mutex<Vec<(String, Params)>>>,
}

impl RecordingLog {
    fn lock(&self) -> MutexGuard<'_, Vec<(String, Params)>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[must_use]
    pub fn statements(&self) -> Vec<String> {
        self.lock().iter().map(|(sql, _)| sql.clone()).collect()
    }

    #[must_use]
    pub fn params(&self) -> Vec<Params> {
        self.lock().iter().map(|(_, p)| p.clone()).collect()
    }
}

/// In-memory [`DatabaseHandle`] that records statements and replays canned results.
#[derive(Debug)]
pub struct RecordingHandle {
    dialect: Dialect,
    log: RecordingLog,
    queued: VecDeque<Result<ResultSet, String>>,
    fallback: ResultSet,
}

impl RecordingHandle {
    #[must_use]
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            log: RecordingLog::default(),
            queued: VecDeque::new(),
            fallback: ResultSet::default(),
        }
    }

    /// Answer every unqueued statement with these rows.
    #[must_use]
    pub fn with_rows(mut self, columns: &[&str], values: Vec<Vec<RowValues>>) -> Self {
        self.fallback = rows(columns, values);
        self
    }

    /// Answer every unqueued statement with `n` rows affected.
    #[must_use]
    pub fn with_affected(mut self, n: u64) -> Self {
        self.fallback = ResultSet::affected(n);
        self
    }

    /// Queue rows for the next unanswered statement.
    #[must_use]
    pub fn then_rows(mut self, columns: &[&str], values: Vec<Vec<RowValues>>) -> Self {
        self.queued.push_back(Ok(rows(columns, values)));
        self
    }

    /// Queue a driver failure for the next unanswered statement.
    #[must_use]
    pub fn then_fail(mut self, message: &str) -> Self {
        self.queued.push_back(Err(message.to_string()));
        self
    }

    #[must_use]
    pub fn log(&self) -> RecordingLog {
        self.log.clone()
    }
}

#[async_trait]
impl DatabaseHandle for RecordingHandle {
    async fn execute(
        &mut self,
        sql: &str,
        params: &Params,
    ) -> Result<ResultSet, ConnectorError> {
        self.log.lock().push((sql.to_string(), params.clone()));
        match self.queued.pop_front() {
            Some(Ok(rs)) => Ok(rs),
            Some(Err(message)) => Err(ConnectorError::DatabaseError(message)),
            None => Ok(self.fallback.clone()),
        }
    }

    fn dialect(&self) -> Dialect {
        self.dialect
    }
}

/// [`SchemaInspector`] backed by a fixed table → primary key map; it never touches the handle.
#[derive(Debug, Clone, Default)]
pub struct StaticInspector {
    tables: HashMap<String, Option<String>>,
}

impl StaticInspector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn table(mut self, name: &str, primary_key: Option<&str>) -> Self {
        self.tables
            .insert(name.to_string(), primary_key.map(str::to_string));
        self
    }
}

#[async_trait]
impl SchemaInspector for StaticInspector {
    async fn table_exists(
        &self,
        _handle: &mut dyn DatabaseHandle,
        table: &str,
    ) -> Result<bool, ConnectorError> {
        Ok(self.tables.contains_key(table))
    }

    async fn primary_key_column(
        &self,
        _handle: &mut dyn DatabaseHandle,
        table: &str,
    ) -> Result<Option<String>, ConnectorError> {
        Ok(self.tables.get(table).cloned().flatten())
    }
}

/// Connector over `handle` with the dialect's own inspector.
#[must_use]
pub fn connector_with(handle: RecordingHandle) -> (Connector, RecordingLog) {
    let log = handle.log();
    (Connector::from_handle(Box::new(handle)), log)
}

/// Connector over `handle` with a fixed schema.
#[must_use]
pub fn connector_with_schema(
    handle: RecordingHandle,
    inspector: StaticInspector,
) -> (Connector, RecordingLog) {
    let log = handle.log();
    let connector = Connector::from_handle(Box::new(handle)).with_inspector(Box::new(inspector));
    (connector, log)
}
