use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConnectorError {
    #[cfg(feature = "sqlite")]
    #[error(transparent)]
    SqliteError(#[from] rusqlite::Error),

    #[cfg(feature = "mysql")]
    #[error(transparent)]
    MysqlError(#[from] mysql_async::Error),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Usage error: {0}")]
    UsageError(String),

    #[error("Schema error: table '{0}' does not exist in this database")]
    MissingTable(String),

    #[error("Schema error: table '{0}' has no primary key")]
    MissingPrimaryKey(String),

    #[error("Schema error: table '{0}' has a composite primary key ({1})")]
    CompositePrimaryKey(String, String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// Coarse classification of a [`ConnectorError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The database handle could not be established.
    Connection,
    /// The caller broke a precondition (unprepared execution, bad bindings, bad identifiers).
    Usage,
    /// A referenced table or its primary key could not be found.
    Schema,
    /// The driver reported a failure while running a statement.
    Database,
}

impl ConnectorError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            ConnectorError::ConnectionError(_) => ErrorKind::Connection,
            ConnectorError::UsageError(_) => ErrorKind::Usage,
            ConnectorError::MissingTable(_)
            | ConnectorError::MissingPrimaryKey(_)
            | ConnectorError::CompositePrimaryKey(..) => ErrorKind::Schema,
            #[cfg(feature = "sqlite")]
            ConnectorError::SqliteError(_) => ErrorKind::Database,
            #[cfg(feature = "mysql")]
            ConnectorError::MysqlError(_) => ErrorKind::Database,
            ConnectorError::DatabaseError(_) => ErrorKind::Database,
        }
    }

    /// Name of the table a schema error refers to.
    #[must_use]
    pub fn table(&self) -> Option<&str> {
        match self {
            ConnectorError::MissingTable(table)
            | ConnectorError::MissingPrimaryKey(table)
            | ConnectorError::CompositePrimaryKey(table, _) => Some(table),
            _ => None,
        }
    }

    pub(crate) fn usage(msg: impl Into<String>) -> Self {
        ConnectorError::UsageError(msg.into())
    }
}
