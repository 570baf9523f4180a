//! Convenient imports for common functionality.
//!
//! This module re-exports the most commonly used types so that a single
//! `use sql_connector::prelude::*;` is enough to prepare and run statements.

pub use crate::connector::{Connector, PendingStatement};
pub use crate::error::{ConnectorError, ErrorKind};
pub use crate::handle::DatabaseHandle;
pub use crate::params::{Bindings, Params, Payload};
pub use crate::results::{CustomDbRow, ResultSet, Selection};
pub use crate::types::{Dialect, RowValues};

#[cfg(any(feature = "mysql", feature = "sqlite"))]
pub use crate::connector::ConnectionConfig;

#[cfg(feature = "mysql")]
pub use crate::mysql::{MySqlOptions, MySqlOptionsBuilder};

#[cfg(feature = "sqlite")]
pub use crate::sqlite::{SqliteOptions, SqliteOptionsBuilder};
