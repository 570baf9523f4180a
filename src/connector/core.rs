use tracing::debug;

use super::{Connector, PendingStatement};
use crate::error::ConnectorError;
use crate::params::Params;
use crate::results::{ResultSet, Selection};
use crate::types::RowValues;

impl Connector {
    /// Run one statement with exact-match binding checks. Every path to the driver goes through
    /// here.
    pub(crate) async fn run_statement(
        &mut self,
        sql: &str,
        params: &Params,
    ) -> Result<ResultSet, ConnectorError> {
        params.check_against(sql, self.dialect())?;
        debug!(sql, params = params.len(), "executing statement");
        self.handle.execute(sql, params).await
    }

    pub(crate) async fn run_pending(
        &mut self,
        stmt: &PendingStatement,
    ) -> Result<ResultSet, ConnectorError> {
        let params = stmt.bindings.single()?;
        self.run_statement(&stmt.sql, &params).await
    }

    fn take_pending(&mut self, op: &str) -> Result<PendingStatement, ConnectorError> {
        self.pending
            .take()
            .ok_or_else(|| ConnectorError::usage(format!("{op}() called before prepare()")))
    }

    /// Number of rows the pending statement matched or affected.
    ///
    /// The pending statement is kept, so it can be run again.
    ///
    /// # Errors
    /// `UsageError` when unprepared or the bindings do not match the template; driver failures
    /// otherwise.
    pub async fn row_count(&mut self) -> Result<u64, ConnectorError> {
        let stmt = self
            .pending
            .clone()
            .ok_or_else(|| ConnectorError::usage("row_count() called before prepare()"))?;
        Ok(self.run_pending(&stmt).await?.rows_affected)
    }

    /// Execute the pending INSERT/UPDATE/DELETE.
    ///
    /// Returns `true` once the driver accepted the statement; failures are errors, never `false`.
    ///
    /// # Errors
    /// `UsageError` when unprepared; driver failures otherwise.
    pub async fn modify(&mut self) -> Result<bool, ConnectorError> {
        let stmt = self.take_pending("modify")?;
        self.run_pending(&stmt).await?;
        Ok(true)
    }

    /// First column of the first row, or `None` when nothing matched.
    ///
    /// # Errors
    /// `UsageError` when unprepared; driver failures otherwise.
    pub async fn query(&mut self) -> Result<Option<RowValues>, ConnectorError> {
        let stmt = self.take_pending("query")?;
        let rs = self.run_pending(&stmt).await?;
        Ok(rs.first_value().cloned())
    }

    /// Id generated by the most recent INSERT on this connection.
    ///
    /// Runs on its own and does not touch the pending statement.
    ///
    /// # Errors
    /// Driver failures, or `DatabaseError` if the server answers with something other than an
    /// integer.
    pub async fn last_insert_id(&mut self) -> Result<i64, ConnectorError> {
        let sql = self.dialect().last_insert_id_sql();
        let rs = self.run_statement(sql, &Params::new()).await?;
        rs.first_value()
            .and_then(RowValues::to_i64)
            .ok_or_else(|| {
                ConnectorError::DatabaseError(format!("'{sql}' did not return an integer id"))
            })
    }

    /// Fetch every row of the pending statement, normalized by row count.
    ///
    /// # Errors
    /// `UsageError` when unprepared; driver failures otherwise.
    pub async fn select(&mut self) -> Result<Selection, ConnectorError> {
        let stmt = self.take_pending("select")?;
        let rs = self.run_pending(&stmt).await?;
        Ok(Selection::from(rs))
    }
}

#[cfg(test)]
mod tests {
    use crate::ErrorKind;
    use crate::params::Params;
    use crate::test_utils::{RecordingHandle, connector_with};
    use crate::types::{Dialect, RowValues};

    #[tokio::test]
    async fn execution_without_prepare_is_a_usage_error() {
        let (mut db, log) = connector_with(RecordingHandle::new(Dialect::MySql));

        assert_eq!(db.modify().await.unwrap_err().kind(), ErrorKind::Usage);
        assert_eq!(db.select().await.unwrap_err().kind(), ErrorKind::Usage);
        assert_eq!(db.row_count().await.unwrap_err().kind(), ErrorKind::Usage);
        assert_eq!(db.query().await.unwrap_err().kind(), ErrorKind::Usage);
        assert!(log.statements().is_empty());
    }

    #[tokio::test]
    async fn execution_consumes_pending_statement() {
        let (mut db, log) = connector_with(RecordingHandle::new(Dialect::MySql));

        db.prepare("DELETE FROM t WHERE id = :id", Params::new().with_value("id", 1));
        assert!(db.modify().await.unwrap());
        assert!(!db.is_prepared());
        assert_eq!(db.modify().await.unwrap_err().kind(), ErrorKind::Usage);
        assert_eq!(log.statements(), vec!["DELETE FROM t WHERE id = :id"]);
    }

    #[tokio::test]
    async fn row_count_keeps_pending_statement() {
        let handle = RecordingHandle::new(Dialect::MySql).with_affected(4);
        let (mut db, log) = connector_with(handle);

        db.prepare("UPDATE t SET a = 1", ());
        assert_eq!(db.row_count().await.unwrap(), 4);
        assert!(db.is_prepared());
        assert!(db.modify().await.unwrap());
        assert_eq!(log.statements().len(), 2);
    }

    #[tokio::test]
    async fn mismatched_bindings_never_reach_the_driver() {
        let (mut db, log) = connector_with(RecordingHandle::new(Dialect::MySql));

        let err = db
            .prepare("SELECT * FROM t WHERE id = :id", ())
            .select()
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Usage);

        let err = db
            .prepare("SELECT * FROM t", Params::new().with_value("id", 1))
            .select()
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Usage);
        assert!(log.statements().is_empty());
    }

    #[tokio::test]
    async fn last_insert_id_uses_dialect_query() {
        let handle = RecordingHandle::new(Dialect::MySql)
            .with_rows(&["LAST_INSERT_ID()"], vec![vec![RowValues::Int(42)]]);
        let (mut db, log) = connector_with(handle);

        db.prepare("SELECT 1", ());
        assert_eq!(db.last_insert_id().await.unwrap(), 42);
        assert!(db.is_prepared());
        assert_eq!(log.statements(), vec!["SELECT LAST_INSERT_ID()"]);
    }

    #[tokio::test]
    async fn query_returns_first_column() {
        let handle = RecordingHandle::new(Dialect::Sqlite).with_rows(
            &["name", "age"],
            vec![
                vec![RowValues::Text("Ann".into()), RowValues::Int(30)],
                vec![RowValues::Text("Bea".into()), RowValues::Int(31)],
            ],
        );
        let (mut db, _log) = connector_with(handle);

        let value = db.prepare("SELECT name, age FROM users", ()).query().await.unwrap();
        assert_eq!(value, Some(RowValues::Text("Ann".into())));
    }

    #[tokio::test]
    async fn query_without_rows_is_none() {
        let (mut db, _log) = connector_with(RecordingHandle::new(Dialect::Sqlite));
        let value = db.prepare("SELECT name FROM users", ()).query().await.unwrap();
        assert_eq!(value, None);
    }
}
