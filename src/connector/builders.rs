use super::{Connector, PendingStatement};
use crate::error::ConnectorError;
use crate::params::{Params, Payload};
use crate::placeholders::validate_identifier;

fn check_payload(table: &str, payload: &Payload) -> Result<(), ConnectorError> {
    validate_identifier(table, "table")?;
    if payload.is_empty() {
        return Err(ConnectorError::usage(format!(
            "no columns given for table '{table}'"
        )));
    }
    payload
        .columns()
        .try_for_each(|column| validate_identifier(column, "column"))
}

/// `INSERT INTO <table> (c1, c2) VALUES (:c1, :c2)`, columns in payload order.
///
/// # Errors
/// `UsageError` for an empty payload or a name that is not a plain identifier.
pub fn build_insert(table: &str, payload: &Payload) -> Result<PendingStatement, ConnectorError> {
    check_payload(table, payload)?;
    let columns: Vec<&str> = payload.columns().collect();
    let placeholders: Vec<String> = columns.iter().map(|c| format!(":{c}")).collect();
    let params: Params = payload.iter().collect();

    let sql = format!(
        "INSERT INTO {table} ({}) VALUES ({})",
        columns.join(", "),
        placeholders.join(", ")
    );
    Ok(PendingStatement::new(sql, params))
}

/// `UPDATE <table> SET c1 = :c1, c2 = :c2 WHERE <pk> = <id>`.
///
/// The integer id is written into the SQL; payload values stay bound.
///
/// # Errors
/// `UsageError` for an empty payload or a name that is not a plain identifier.
pub fn build_update(
    table: &str,
    primary_key: &str,
    id: i64,
    payload: &Payload,
) -> Result<PendingStatement, ConnectorError> {
    check_payload(table, payload)?;
    validate_identifier(primary_key, "primary key")?;
    let assignments: Vec<String> = payload.columns().map(|c| format!("{c} = :{c}")).collect();
    let params: Params = payload.iter().collect();

    let sql = format!(
        "UPDATE {table} SET {} WHERE {primary_key} = {id}",
        assignments.join(", ")
    );
    Ok(PendingStatement::new(sql, params))
}

/// `DELETE FROM <table> WHERE <pk> = :id`.
///
/// # Errors
/// `UsageError` for a name that is not a plain identifier.
pub fn build_delete(
    table: &str,
    primary_key: &str,
    id: i64,
) -> Result<PendingStatement, ConnectorError> {
    validate_identifier(table, "table")?;
    validate_identifier(primary_key, "primary key")?;
    let sql = format!("DELETE FROM {table} WHERE {primary_key} = :id");
    Ok(PendingStatement::new(sql, Params::new().with_value("id", id)))
}

/// One multi-row INSERT; the column list comes from the first row and every value gets its own
/// `:<column>_<rowIndex>` placeholder.
///
/// Later rows are not checked against the first. A row with a different column set produces
/// placeholders that fail the binding check or SQL the server rejects; a row with the same columns
/// in a different order is accepted and its values land in the first row's column positions.
///
/// # Errors
/// `UsageError` for no rows, an empty first row, or a name that is not a plain identifier.
pub fn build_bulk_insert(table: &str, rows: &[Payload]) -> Result<PendingStatement, ConnectorError> {
    let Some(first) = rows.first() else {
        return Err(ConnectorError::usage(format!(
            "no rows given for table '{table}'"
        )));
    };
    check_payload(table, first)?;

    let columns: Vec<&str> = first.columns().collect();
    let mut params = Params::new();
    let mut groups = Vec::with_capacity(rows.len());
    for (i, row) in rows.iter().enumerate() {
        let mut placeholders = Vec::with_capacity(row.len());
        for (column, value) in row.iter() {
            validate_identifier(column, "column")?;
            let name = format!("{column}_{i}");
            placeholders.push(format!(":{name}"));
            params.insert(&name, value.clone());
        }
        groups.push(format!("({})", placeholders.join(", ")));
    }

    let sql = format!(
        "INSERT INTO {table} ({}) VALUES {}",
        columns.join(", "),
        groups.join(", ")
    );
    Ok(PendingStatement::new(sql, params))
}

impl Connector {
    async fn ensure_table(&mut self, table: &str) -> Result<(), ConnectorError> {
        validate_identifier(table, "table")?;
        if self.inspector.table_exists(&mut *self.handle, table).await? {
            Ok(())
        } else {
            Err(ConnectorError::MissingTable(table.to_string()))
        }
    }

    async fn primary_key(&mut self, table: &str) -> Result<String, ConnectorError> {
        self.inspector
            .primary_key_column(&mut *self.handle, table)
            .await?
            .ok_or_else(|| ConnectorError::MissingPrimaryKey(table.to_string()))
    }

    /// Delete the row of `table` whose primary key equals `id`.
    ///
    /// A missing id is not an error; nothing is deleted.
    ///
    /// # Errors
    /// `SchemaError` if the table does not exist or has no single-column primary key; driver
    /// failures otherwise.
    pub async fn delete(&mut self, table: &str, id: i64) -> Result<bool, ConnectorError> {
        self.ensure_table(table).await?;
        let primary_key = self.primary_key(table).await?;
        let stmt = build_delete(table, &primary_key, id)?;
        self.run_pending(&stmt).await?;
        Ok(true)
    }

    /// Insert one row built from `payload`.
    ///
    /// # Errors
    /// `UsageError` for an empty payload or bad names, `SchemaError` if the table does not exist,
    /// driver failures otherwise.
    pub async fn quick_insert(
        &mut self,
        table: &str,
        payload: &Payload,
    ) -> Result<bool, ConnectorError> {
        let stmt = build_insert(table, payload)?;
        self.ensure_table(table).await?;
        self.run_pending(&stmt).await?;
        Ok(true)
    }

    /// Update the columns in `payload` on the row whose primary key equals `id`.
    ///
    /// # Errors
    /// `UsageError` for an empty payload or bad names, `SchemaError` if the table or its primary
    /// key cannot be found, driver failures otherwise.
    pub async fn quick_update(
        &mut self,
        table: &str,
        id: i64,
        payload: &Payload,
    ) -> Result<bool, ConnectorError> {
        check_payload(table, payload)?;
        self.ensure_table(table).await?;
        let primary_key = self.primary_key(table).await?;
        let stmt = build_update(table, &primary_key, id, payload)?;
        self.run_pending(&stmt).await?;
        Ok(true)
    }

    /// Insert all `rows` with a single statement.
    ///
    /// # Errors
    /// `UsageError` for no rows or bad names, `SchemaError` if the table does not exist, driver
    /// failures otherwise (including rows whose columns differ from the first row's).
    pub async fn bulk_insert(
        &mut self,
        table: &str,
        rows: &[Payload],
    ) -> Result<bool, ConnectorError> {
        let stmt = build_bulk_insert(table, rows)?;
        self.ensure_table(table).await?;
        self.run_pending(&stmt).await?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use crate::params::Bindings;
    use crate::test_utils::{RecordingHandle, StaticInspector, connector_with_schema};
    use crate::types::{Dialect, RowValues};

    fn users_schema() -> StaticInspector {
        StaticInspector::new().table("users", Some("id"))
    }

    fn ann() -> Payload {
        Payload::new().with("name", "Ann").with("age", 30)
    }

    #[test]
    fn insert_sql() {
        let stmt = build_insert("users", &ann()).unwrap();
        assert_eq!(
            stmt.sql,
            "INSERT INTO users (name, age) VALUES (:name, :age)"
        );
        let Bindings::Named(params) = stmt.bindings else {
            panic!("expected named bindings");
        };
        assert_eq!(params.get("name"), Some(&RowValues::Text("Ann".into())));
        assert_eq!(params.get("age"), Some(&RowValues::Int(30)));
    }

    #[test]
    fn update_sql_embeds_id() {
        let stmt = build_update("users", "id", 7, &Payload::new().with("age", 31)).unwrap();
        assert_eq!(stmt.sql, "UPDATE users SET age = :age WHERE id = 7");
        assert_eq!(
            stmt.bindings,
            Bindings::Named(Params::new().with_value("age", 31))
        );
    }

    #[test]
    fn delete_sql_binds_id() {
        let stmt = build_delete("users", "user_id", 3).unwrap();
        assert_eq!(stmt.sql, "DELETE FROM users WHERE user_id = :id");
        assert_eq!(
            stmt.bindings,
            Bindings::Named(Params::new().with_value("id", 3))
        );
    }

    #[test]
    fn bulk_sql_uses_row_suffixed_placeholders() {
        let rows = vec![
            ann(),
            Payload::new().with("name", "Bea").with("age", 41),
            Payload::new().with("name", "Cy").with("age", 52),
        ];
        let stmt = build_bulk_insert("users", &rows).unwrap();
        assert_eq!(
            stmt.sql,
            "INSERT INTO users (name, age) VALUES (:name_0, :age_0), (:name_1, :age_1), (:name_2, :age_2)"
        );
        let Bindings::Named(params) = stmt.bindings else {
            panic!("expected named bindings");
        };
        assert_eq!(params.len(), 6);
        assert_eq!(params.get("name_2"), Some(&RowValues::Text("Cy".into())));
        assert!(params.check_against(&stmt.sql, Dialect::MySql).is_ok());
    }

    #[test]
    fn builders_reject_bad_input() {
        assert_eq!(
            build_insert("users", &Payload::new()).unwrap_err().kind(),
            ErrorKind::Usage
        );
        assert!(build_insert("users; DROP TABLE users", &ann()).is_err());
        assert!(build_insert("users", &Payload::new().with("a b", 1)).is_err());
        assert!(build_bulk_insert("users", &[]).is_err());
        assert!(build_delete("users", "id = 1 OR 1", 1).is_err());
    }

    #[tokio::test]
    async fn dollar_in_column_name_is_rejected_before_lookup() {
        let (mut db, log) =
            connector_with_schema(RecordingHandle::new(Dialect::MySql), users_schema());

        let err = db
            .quick_insert("users", &Payload::new().with("b$c", "v"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Usage);
        assert!(err.to_string().contains("b$c"), "{err}");
        assert!(log.statements().is_empty());
    }

    #[tokio::test]
    async fn missing_table_sends_no_statement() {
        let (mut db, log) = connector_with_schema(
            RecordingHandle::new(Dialect::MySql),
            StaticInspector::new(),
        );

        for err in [
            db.delete("ghosts", 1).await.unwrap_err(),
            db.quick_insert("ghosts", &ann()).await.unwrap_err(),
            db.quick_update("ghosts", 1, &ann()).await.unwrap_err(),
            db.bulk_insert("ghosts", &[ann()]).await.unwrap_err(),
        ] {
            assert_eq!(err.kind(), ErrorKind::Schema);
            assert_eq!(err.table(), Some("ghosts"));
        }
        assert!(log.statements().is_empty());
    }

    #[tokio::test]
    async fn missing_primary_key_is_a_schema_error() {
        let (mut db, log) = connector_with_schema(
            RecordingHandle::new(Dialect::MySql),
            StaticInspector::new().table("audit", None),
        );

        let err = db.delete("audit", 1).await.unwrap_err();
        assert!(matches!(err, ConnectorError::MissingPrimaryKey(ref t) if t == "audit"));
        let err = db.quick_update("audit", 1, &ann()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Schema);
        assert!(log.statements().is_empty());
    }

    #[tokio::test]
    async fn helpers_run_generated_sql() {
        let (mut db, log) =
            connector_with_schema(RecordingHandle::new(Dialect::MySql), users_schema());

        assert!(db.quick_insert("users", &ann()).await.unwrap());
        assert!(db.quick_update("users", 1, &Payload::new().with("age", 31)).await.unwrap());
        assert!(db.delete("users", 1).await.unwrap());

        assert_eq!(
            log.statements(),
            vec![
                "INSERT INTO users (name, age) VALUES (:name, :age)",
                "UPDATE users SET age = :age WHERE id = 1",
                "DELETE FROM users WHERE id = :id",
            ]
        );
    }

    #[tokio::test]
    async fn helpers_leave_pending_statement_alone() {
        let (mut db, _log) =
            connector_with_schema(RecordingHandle::new(Dialect::MySql), users_schema());

        db.prepare("SELECT * FROM users", ());
        db.quick_insert("users", &ann()).await.unwrap();
        assert_eq!(db.pending().map(|p| p.sql.as_str()), Some("SELECT * FROM users"));
    }

    #[tokio::test]
    async fn mysql_inspector_queries_catalog() {
        let handle = RecordingHandle::new(Dialect::MySql)
            .then_rows(&["Tables_in_connector (users)"], vec![vec![RowValues::Text("users".into())]])
            .then_rows(
                &["Table", "Key_name", "Column_name"],
                vec![vec![
                    RowValues::Text("users".into()),
                    RowValues::Text("PRIMARY".into()),
                    RowValues::Text("id".into()),
                ]],
            );
        let (mut db, log) = crate::test_utils::connector_with(handle);

        assert!(db.delete("users", 9).await.unwrap());
        assert_eq!(
            log.statements(),
            vec![
                "SHOW TABLES LIKE 'users'",
                "SHOW KEYS FROM users WHERE Key_name = 'PRIMARY'",
                "DELETE FROM users WHERE id = :id",
            ]
        );
    }

    #[tokio::test]
    async fn composite_primary_key_is_rejected() {
        let handle = RecordingHandle::new(Dialect::MySql)
            .then_rows(&["t"], vec![vec![RowValues::Text("pairs".into())]])
            .then_rows(
                &["Column_name"],
                vec![
                    vec![RowValues::Text("a".into())],
                    vec![RowValues::Text("b".into())],
                ],
            );
        let (mut db, log) = crate::test_utils::connector_with(handle);

        let err = db.delete("pairs", 1).await.unwrap_err();
        assert!(matches!(err, ConnectorError::CompositePrimaryKey(ref t, ref cols) if t == "pairs" && cols == "a, b"));
        assert_eq!(log.statements().len(), 2);
    }
}
