use serde::{Deserialize, Serialize};
use tracing::info;

use super::connection::SqliteHandle;
use crate::connector::Connector;
use crate::error::ConnectorError;

/// Options for opening a `SQLite` database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SqliteOptions {
    /// File path, or `:memory:` for a private in-memory database.
    pub db_path: String,
}

impl SqliteOptions {
    #[must_use]
    pub fn new(db_path: impl Into<String>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }

    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(":memory:")
    }
}

/// Fluent builder for `SQLite` options.
#[derive(Debug, Clone)]
pub struct SqliteOptionsBuilder {
    opts: SqliteOptions,
}

impl SqliteOptionsBuilder {
    #[must_use]
    pub fn new(db_path: impl Into<String>) -> Self {
        Self {
            opts: SqliteOptions::new(db_path),
        }
    }

    #[must_use]
    pub fn finish(self) -> SqliteOptions {
        self.opts
    }

    /// Open the database and wrap it in a [`Connector`].
    ///
    /// # Errors
    ///
    /// Returns `ConnectorError::ConnectionError` if the database cannot be opened.
    pub async fn build(self) -> Result<Connector, ConnectorError> {
        Connector::connect_sqlite(self.finish()).await
    }
}

impl Connector {
    #[must_use]
    pub fn sqlite_builder(db_path: impl Into<String>) -> SqliteOptionsBuilder {
        SqliteOptionsBuilder::new(db_path)
    }

    /// Open a `SQLite` database.
    ///
    /// # Errors
    /// Returns `ConnectorError::ConnectionError` if the file cannot be opened or the blocking task
    /// fails.
    pub async fn connect_sqlite(opts: SqliteOptions) -> Result<Self, ConnectorError> {
        let db_path = opts.db_path;
        let path_for_log = db_path.clone();
        let conn = tokio::task::spawn_blocking(move || rusqlite::Connection::open(&db_path))
            .await
            .map_err(|e| ConnectorError::ConnectionError(format!("SQLite open task failed: {e}")))?
            .map_err(|e| {
                ConnectorError::ConnectionError(format!("Failed to open SQLite database: {e}"))
            })?;

        info!(db_path = %path_for_log, "connected to sqlite");
        Ok(Connector::from_handle(Box::new(SqliteHandle::new(conn))))
    }
}
