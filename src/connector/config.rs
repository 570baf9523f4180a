use serde::{Deserialize, Serialize};

use super::Connector;
use crate::error::ConnectorError;
#[cfg(feature = "mysql")]
use crate::mysql::MySqlOptions;
#[cfg(feature = "sqlite")]
use crate::sqlite::SqliteOptions;

/// Which backend to open, in a form that can be read from a config file.
///
/// ```rust
/// use sql_connector::ConnectionConfig;
///
/// let cfg: ConnectionConfig = serde_json::from_str(
///     r#"{"backend": "sqlite", "db_path": ":memory:"}"#,
/// ).unwrap();
/// # let _ = cfg;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "backend", rename_all = "lowercase")]
pub enum ConnectionConfig {
    #[cfg(feature = "mysql")]
    Mysql(MySqlOptions),
    #[cfg(feature = "sqlite")]
    Sqlite(SqliteOptions),
}

impl Connector {
    /// Open the backend described by `config`.
    ///
    /// # Errors
    /// Returns `ConnectorError::ConnectionError` if the connection cannot be established.
    pub async fn connect(config: &ConnectionConfig) -> Result<Self, ConnectorError> {
        match config {
            #[cfg(feature = "mysql")]
            ConnectionConfig::Mysql(opts) => Connector::connect_mysql(opts.clone()).await,
            #[cfg(feature = "sqlite")]
            ConnectionConfig::Sqlite(opts) => Connector::connect_sqlite(opts.clone()).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(feature = "mysql")]
    #[test]
    fn reads_mysql_config() {
        let cfg: ConnectionConfig = serde_json::from_str(
            r#"{"backend": "mysql", "host": "127.0.0.1", "user": "root", "database": "connector"}"#,
        )
        .unwrap();
        let ConnectionConfig::Mysql(opts) = cfg else {
            panic!("expected mysql config");
        };
        assert_eq!(opts.port, 3306);
        assert_eq!(opts.password, "");
    }

    #[cfg(feature = "sqlite")]
    #[tokio::test]
    async fn connects_from_sqlite_config() {
        let cfg: ConnectionConfig =
            serde_json::from_str(r#"{"backend": "sqlite", "db_path": ":memory:"}"#).unwrap();
        let db = Connector::connect(&cfg).await.unwrap();
        assert_eq!(db.dialect(), crate::Dialect::Sqlite);
    }
}
