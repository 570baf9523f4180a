use async_trait::async_trait;

use crate::error::ConnectorError;
use crate::params::Params;
use crate::results::ResultSet;
use crate::types::Dialect;

/// A live, authenticated connection that can run one statement at a time.
///
/// This is the driver seam: prepare, bind, execute and fetch happen in one call. Implementations
/// must return an error for every driver-level failure rather than an empty result, and must send
/// `params` as real bound parameters keyed by their `:name` placeholders.
#[async_trait]
pub trait DatabaseHandle: Send {
    /// Executes a single statement and returns its rows.
    ///
    /// For row-producing statements `rows_affected` is the number of rows returned; for DML it is
    /// the number of rows changed.
    async fn execute(&mut self, sql: &str, params: &Params)
    -> Result<ResultSet, ConnectorError>;

    /// SQL engine this handle talks to.
    fn dialect(&self) -> Dialect;
}

