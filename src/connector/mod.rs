use std::fmt;

use crate::handle::DatabaseHandle;
use crate::params::Bindings;
use crate::schema::{SchemaInspector, inspector_for};
use crate::types::Dialect;

mod builders;
#[cfg(any(feature = "mysql", feature = "sqlite"))]
mod config;
mod core;
mod multi;

pub use builders::{build_bulk_insert, build_delete, build_insert, build_update};
#[cfg(any(feature = "mysql", feature = "sqlite"))]
pub use config::ConnectionConfig;

/// A SQL template and the values bound to it, waiting to be executed.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingStatement {
    pub sql: String,
    pub bindings: Bindings,
}

impl PendingStatement {
    pub fn new(sql: impl Into<String>, bindings: impl Into<Bindings>) -> Self {
        Self {
            sql: sql.into(),
            bindings: bindings.into(),
        }
    }
}

/// Prepare-then-execute access layer over one database handle.
///
/// ```rust,no_run
/// use sql_connector::prelude::*;
///
/// # async fn demo() -> Result<(), ConnectorError> {
/// let mut db = Connector::connect_sqlite(SqliteOptions::in_memory()).await?;
/// let adults = db
///     .prepare(
///         "SELECT * FROM users WHERE age >= :age",
///         Params::new().with_value("age", 18),
///     )
///     .select()
///     .await?;
/// # let _ = adults;
/// # Ok(())
/// # }
/// ```
///
/// The connector is either unprepared or holds one [`PendingStatement`]. Every execution method
/// except [`Connector::row_count`] consumes it; calling one while unprepared is a
/// `ConnectorError::UsageError`. The key-value helpers (`quick_insert`, `delete`, ...) build and run
/// their own statements and leave any pending statement untouched.
pub struct Connector {
    handle: Box<dyn DatabaseHandle>,
    inspector: Box<dyn SchemaInspector>,
    pending: Option<PendingStatement>,
}

impl Connector {
    /// Wrap an already-open handle; the schema inspector follows the handle's dialect.
    #[must_use]
    pub fn from_handle(handle: Box<dyn DatabaseHandle>) -> Self {
        let inspector = inspector_for(handle.dialect());
        Self {
            handle,
            inspector,
            pending: None,
        }
    }

    /// Replace the schema inspector used by the statement builders.
    #[must_use]
    pub fn with_inspector(mut self, inspector: Box<dyn SchemaInspector>) -> Self {
        self.inspector = inspector;
        self
    }

    #[must_use]
    pub fn dialect(&self) -> Dialect {
        self.handle.dialect()
    }

    /// Store `sql` and its bindings as the pending statement, replacing any earlier one.
    pub fn prepare(&mut self, sql: impl Into<String>, bindings: impl Into<Bindings>) -> &mut Self {
        self.pending = Some(PendingStatement::new(sql, bindings));
        self
    }

    #[must_use]
    pub fn pending(&self) -> Option<&PendingStatement> {
        self.pending.as_ref()
    }

    #[must_use]
    pub fn is_prepared(&self) -> bool {
        self.pending.is_some()
    }

    /// Drop the pending statement without running it.
    pub fn clear(&mut self) -> Option<PendingStatement> {
        self.pending.take()
    }
}

impl fmt::Debug for Connector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connector")
            .field("dialect", &self.handle.dialect())
            .field("pending", &self.pending)
            .finish_non_exhaustive()
    }
}
