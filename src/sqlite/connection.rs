use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::params::NamedParams;
use super::query::build_result_set;
use crate::error::ConnectorError;
use crate::handle::DatabaseHandle;
use crate::params::Params;
use crate::results::ResultSet;
use crate::types::Dialect;

pub(crate) type SharedSqliteConnection = Arc<Mutex<rusqlite::Connection>>;

/// `SQLite` connection owned by one connector; blocking calls run on tokio's blocking pool.
pub struct SqliteHandle {
    conn: SharedSqliteConnection,
}

impl SqliteHandle {
    #[must_use]
    pub fn new(conn: rusqlite::Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    /// Run synchronous `rusqlite` logic against the underlying connection.
    ///
    /// # Errors
    /// Propagates any [`ConnectorError`] raised by the callback, or a `DatabaseError` if the
    /// blocking task panics.
    pub async fn with_connection<F, R>(&self, func: F) -> Result<R, ConnectorError>
    where
        F: FnOnce(&mut rusqlite::Connection) -> Result<R, ConnectorError> + Send + 'static,
        R: Send + 'static,
    {
        run_blocking(Arc::clone(&self.conn), func).await
    }
}

impl fmt::Debug for SqliteHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqliteHandle").finish_non_exhaustive()
    }
}

#[async_trait]
impl DatabaseHandle for SqliteHandle {
    async fn execute(
        &mut self,
        sql: &str,
        params: &Params,
    ) -> Result<ResultSet, ConnectorError> {
        let sql_owned = sql.to_owned();
        let params_owned = NamedParams::convert(params);
        self.with_connection(move |conn| {
            let mut stmt = conn.prepare(&sql_owned)?;
            build_result_set(&mut stmt, &params_owned)
        })
        .await
    }

    fn dialect(&self) -> Dialect {
        Dialect::Sqlite
    }
}

pub(crate) async fn run_blocking<F, R>(
    conn: SharedSqliteConnection,
    func: F,
) -> Result<R, ConnectorError>
where
    F: FnOnce(&mut rusqlite::Connection) -> Result<R, ConnectorError> + Send + 'static,
    R: Send + 'static,
{
    tokio::task::spawn_blocking(move || {
        let mut guard = conn.blocking_lock();
        func(&mut guard)
    })
    .await
    .map_err(|e| ConnectorError::DatabaseError(format!("sqlite spawn_blocking join error: {e}")))?
}
