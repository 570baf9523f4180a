//! Prepare-then-execute access layer over a single MySQL (or SQLite) connection.
//!
//! A [`Connector`] holds at most one pending SQL template with its named `:placeholder`
//! bindings and runs it through one of its execution methods (`row_count`, `modify`, `query`,
//! `select`, `m_modify`). Key-value helpers (`quick_insert`, `quick_update`, `bulk_insert`,
//! `delete`) generate their SQL from table metadata and validated identifiers.
//!
//! ```rust,no_run
//! use sql_connector::prelude::*;
//!
//! # async fn demo() -> Result<(), ConnectorError> {
//! let mut db = Connector::connect_sqlite(SqliteOptions::in_memory()).await?;
//! db.prepare(
//!     "CREATE TABLE users (id INTEGER PRIMARY KEY, name TEXT, age INTEGER)",
//!     (),
//! )
//! .modify()
//! .await?;
//!
//! db.quick_insert("users", &Payload::new().with("name", "Ann").with("age", 30))
//!     .await?;
//! let id = db.last_insert_id().await?;
//! let user = db
//!     .prepare("SELECT * FROM users WHERE id = :id", Params::new().with_value("id", id))
//!     .select()
//!     .await?;
//! # let _ = user;
//! # Ok(())
//! # }
//! ```

pub mod connector;
pub mod error;
pub mod handle;
pub mod params;
pub mod placeholders;
pub mod prelude;
pub mod results;
pub mod schema;
pub mod types;

#[cfg(feature = "mysql")]
pub mod mysql;
#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

#[cfg(any(feature = "mysql", feature = "sqlite"))]
pub use connector::ConnectionConfig;
pub use connector::{
    Connector, PendingStatement, build_bulk_insert, build_delete, build_insert, build_update,
};
pub use error::{ConnectorError, ErrorKind};
pub use handle::DatabaseHandle;
pub use params::{Bindings, Params, Payload};
pub use results::{CustomDbRow, ResultSet, Selection};
pub use schema::{MySqlInspector, SchemaInspector, SqliteInspector};
pub use types::{Dialect, RowValues};
