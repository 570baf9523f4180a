use mysql_async::{Conn, OptsBuilder};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::connection::MySqlHandle;
use crate::connector::Connector;
use crate::error::ConnectorError;

fn default_port() -> u16 {
    3306
}

/// Options for connecting to a MySQL server.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MySqlOptions {
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub user: String,
    #[serde(default)]
    pub password: String,
    pub database: String,
}

impl MySqlOptions {
    #[must_use]
    pub fn new(
        host: impl Into<String>,
        user: impl Into<String>,
        password: impl Into<String>,
        database: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            port: default_port(),
            user: user.into(),
            password: password.into(),
            database: database.into(),
        }
    }

    fn to_opts(&self) -> OptsBuilder {
        OptsBuilder::default()
            .ip_or_hostname(self.host.clone())
            .tcp_port(self.port)
            .user(Some(self.user.clone()))
            .pass(Some(self.password.clone()))
            .db_name(Some(self.database.clone()))
    }
}

// Keep the password out of logs and panics.
impl std::fmt::Debug for MySqlOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MySqlOptions")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"***")
            .field("database", &self.database)
            .finish()
    }
}

/// Fluent builder for MySQL options.
#[derive(Debug, Clone)]
pub struct MySqlOptionsBuilder {
    opts: MySqlOptions,
}

impl MySqlOptionsBuilder {
    #[must_use]
    pub fn new(host: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            opts: MySqlOptions::new(host, "root", "", database),
        }
    }

    #[must_use]
    pub fn port(mut self, port: u16) -> Self {
        self.opts.port = port;
        self
    }

    #[must_use]
    pub fn user(mut self, user: impl Into<String>) -> Self {
        self.opts.user = user.into();
        self
    }

    #[must_use]
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.opts.password = password.into();
        self
    }

    #[must_use]
    pub fn finish(self) -> MySqlOptions {
        self.opts
    }

    /// Connect and wrap the connection in a [`Connector`].
    ///
    /// # Errors
    ///
    /// Returns `ConnectorError::ConnectionError` if the server is unreachable or rejects the
    /// credentials.
    pub async fn build(self) -> Result<Connector, ConnectorError> {
        Connector::connect_mysql(self.finish()).await
    }
}

impl Connector {
    #[must_use]
    pub fn mysql_builder(
        host: impl Into<String>,
        database: impl Into<String>,
    ) -> MySqlOptionsBuilder {
        MySqlOptionsBuilder::new(host, database)
    }

    /// Open one authenticated connection; a single attempt with no retry.
    ///
    /// # Errors
    /// Returns `ConnectorError::ConnectionError` if network setup or authentication fails.
    pub async fn connect_mysql(opts: MySqlOptions) -> Result<Self, ConnectorError> {
        let conn = Conn::new(opts.to_opts()).await.map_err(|e| {
            ConnectorError::ConnectionError(format!(
                "Failed to connect to MySQL at {}:{}: {e}",
                opts.host, opts.port
            ))
        })?;

        info!(host = %opts.host, database = %opts.database, "connected to mysql");
        Ok(Connector::from_handle(Box::new(MySqlHandle::new(conn))))
    }
}
