use async_trait::async_trait;
use tracing::debug;

use crate::error::ConnectorError;
use crate::handle::DatabaseHandle;
use crate::params::Params;
use crate::results::ResultSet;
use crate::types::{Dialect, RowValues};

/// Catalog lookups the statement builders need, kept apart from the SQL they generate.
#[async_trait]
pub trait SchemaInspector: Send + Sync {
    /// Whether a table named exactly `table` exists in the current database.
    async fn table_exists(
        &self,
        handle: &mut dyn DatabaseHandle,
        table: &str,
    ) -> Result<bool, ConnectorError>;

    /// The single primary-key column of `table`, or `None` if it has no primary key.
    ///
    /// # Errors
    /// Returns `ConnectorError::CompositePrimaryKey` when the key spans several columns.
    async fn primary_key_column(
        &self,
        handle: &mut dyn DatabaseHandle,
        table: &str,
    ) -> Result<Option<String>, ConnectorError>;
}

/// Default inspector for a dialect.
#[must_use]
pub fn inspector_for(dialect: Dialect) -> Box<dyn SchemaInspector> {
    match dialect {
        Dialect::MySql => Box::new(MySqlInspector),
        Dialect::Sqlite => Box::new(SqliteInspector),
    }
}

/// `SHOW TABLES` / `SHOW KEYS` based lookups.
#[derive(Debug, Clone, Copy, Default)]
pub struct MySqlInspector;

impl MySqlInspector {
    #[must_use]
    pub fn table_exists_sql(table: &str) -> String {
        let pattern = table.replace('\\', "\\\\").replace('_', "\\_").replace('%', "\\%");
        format!("SHOW TABLES LIKE '{pattern}'")
    }

    #[must_use]
    pub fn primary_key_sql(table: &str) -> String {
        format!("SHOW KEYS FROM {table} WHERE Key_name = 'PRIMARY'")
    }
}

#[async_trait]
impl SchemaInspector for MySqlInspector {
    async fn table_exists(
        &self,
        handle: &mut dyn DatabaseHandle,
        table: &str,
    ) -> Result<bool, ConnectorError> {
        let sql = Self::table_exists_sql(table);
        debug!(table, "checking table exists");
        let rs = handle.execute(&sql, &Params::new()).await?;
        Ok(rs.rows_affected > 0)
    }

    async fn primary_key_column(
        &self,
        handle: &mut dyn DatabaseHandle,
        table: &str,
    ) -> Result<Option<String>, ConnectorError> {
        let sql = Self::primary_key_sql(table);
        debug!(table, "looking up primary key");
        let rs = handle.execute(&sql, &Params::new()).await?;
        single_key_column(table, &rs, "Column_name")
    }
}

/// `sqlite_master` / `pragma_table_info` based lookups.
#[derive(Debug, Clone, Copy, Default)]
pub struct SqliteInspector;

impl SqliteInspector {
    pub const TABLE_EXISTS_SQL: &'static str =
        "SELECT name FROM sqlite_master WHERE type = 'table' AND name = :table";
    pub const PRIMARY_KEY_SQL: &'static str =
        "SELECT name FROM pragma_table_info(:table) WHERE pk > 0 ORDER BY pk";
}

#[async_trait]
impl SchemaInspector for SqliteInspector {
    async fn table_exists(
        &self,
        handle: &mut dyn DatabaseHandle,
        table: &str,
    ) -> Result<bool, ConnectorError> {
        debug!(table, "checking table exists");
        let params = Params::new().with_value("table", table);
        let rs = handle.execute(Self::TABLE_EXISTS_SQL, &params).await?;
        Ok(!rs.results.is_empty())
    }

    async fn primary_key_column(
        &self,
        handle: &mut dyn DatabaseHandle,
        table: &str,
    ) -> Result<Option<String>, ConnectorError> {
        debug!(table, "looking up primary key");
        let params = Params::new().with_value("table", table);
        let rs = handle.execute(Self::PRIMARY_KEY_SQL, &params).await?;
        single_key_column(table, &rs, "name")
    }
}

fn single_key_column(
    table: &str,
    rs: &ResultSet,
    field: &str,
) -> Result<Option<String>, ConnectorError> {
    let columns: Vec<String> = rs
        .results
        .iter()
        .filter_map(|row| match row.get(field) {
            Some(RowValues::Text(name)) => Some(name.clone()),
            _ => None,
        })
        .collect();

    match columns.len() {
        0 => Ok(None),
        1 => Ok(columns.into_iter().next()),
        _ => Err(ConnectorError::CompositePrimaryKey(
            table.to_string(),
            columns.join(", "),
        )),
    }
}
