use std::fmt;

use async_trait::async_trait;
use mysql_async::Conn;
use mysql_async::prelude::Queryable;

use super::params::convert_params;
use super::query::build_result_set;
use crate::error::ConnectorError;
use crate::handle::DatabaseHandle;
use crate::params::Params;
use crate::results::ResultSet;
use crate::types::Dialect;

/// A single MySQL connection owned by one connector.
///
/// Every statement goes through the binary protocol (`COM_STMT_PREPARE` / `COM_STMT_EXECUTE`), so
/// values are bound server-side and never spliced into SQL text.
pub struct MySqlHandle {
    conn: Conn,
}

impl MySqlHandle {
    #[must_use]
    pub fn new(conn: Conn) -> Self {
        Self { conn }
    }

    /// Close the connection gracefully.
    ///
    /// # Errors
    /// Returns `ConnectorError::MysqlError` if the server rejects the disconnect.
    pub async fn disconnect(self) -> Result<(), ConnectorError> {
        self.conn.disconnect().await?;
        Ok(())
    }
}

impl fmt::Debug for MySqlHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MySqlHandle")
            .field("connection_id", &self.conn.id())
            .finish()
    }
}

#[async_trait]
impl DatabaseHandle for MySqlHandle {
    async fn execute(
        &mut self,
        sql: &str,
        params: &Params,
    ) -> Result<ResultSet, ConnectorError> {
        let result = self.conn.exec_iter(sql, convert_params(params)).await?;
        build_result_set(result).await
    }

    fn dialect(&self) -> Dialect {
        Dialect::MySql
    }
}
