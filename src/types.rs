use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::error::ConnectorError;

/// Values that can be stored in a database row or used as query parameters.
///
/// The set is closed on purpose so that untyped input is checked when it enters
/// the crate rather than when the driver sees it:
/// ```rust
/// use sql_connector::prelude::*;
///
/// let params = vec![
///     RowValues::Int(1),
///     RowValues::Text("alice".into()),
///     RowValues::Bool(true),
/// ];
/// # let _ = params;
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RowValues {
    /// Integer value (64-bit)
    Int(i64),
    /// Floating point value (64-bit)
    Float(f64),
    /// Text/string value
    Text(String),
    /// Boolean value
    Bool(bool),
    /// NULL value
    Null,
}

impl RowValues {
    /// Check if this value is NULL
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub fn as_int(&self) -> Option<&i64> {
        if let RowValues::Int(value) = self {
            Some(value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        if let RowValues::Text(value) = self {
            Some(value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<&bool> {
        if let RowValues::Bool(value) = self {
            return Some(value);
        } else if let Some(i) = self.as_int() {
            if *i == 1 {
                return Some(&true);
            } else if *i == 0 {
                return Some(&false);
            }
        }
        None
    }

    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        if let RowValues::Float(value) = self {
            Some(*value)
        } else {
            None
        }
    }

    /// Integer view used for generated keys; MySQL may hand numeric results back as text.
    #[must_use]
    pub fn to_i64(&self) -> Option<i64> {
        match self {
            RowValues::Int(i) => Some(*i),
            RowValues::Text(s) => s.trim().parse().ok(),
            RowValues::Bool(b) => Some(i64::from(*b)),
            RowValues::Float(_) | RowValues::Null => None,
        }
    }
}

impl From<&RowValues> for RowValues {
    fn from(value: &RowValues) -> Self {
        value.clone()
    }
}

impl From<i64> for RowValues {
    fn from(value: i64) -> Self {
        RowValues::Int(value)
    }
}

impl From<i32> for RowValues {
    fn from(value: i32) -> Self {
        RowValues::Int(i64::from(value))
    }
}

impl From<f64> for RowValues {
    fn from(value: f64) -> Self {
        RowValues::Float(value)
    }
}

impl From<bool> for RowValues {
    fn from(value: bool) -> Self {
        RowValues::Bool(value)
    }
}

impl From<String> for RowValues {
    fn from(value: String) -> Self {
        RowValues::Text(value)
    }
}

impl From<&str> for RowValues {
    fn from(value: &str) -> Self {
        RowValues::Text(value.to_string())
    }
}

impl<T: Into<RowValues>> From<Option<T>> for RowValues {
    fn from(value: Option<T>) -> Self {
        value.map_or(RowValues::Null, Into::into)
    }
}

impl TryFrom<JsonValue> for RowValues {
    type Error = ConnectorError;

    fn try_from(value: JsonValue) -> Result<Self, Self::Error> {
        match value {
            JsonValue::Null => Ok(RowValues::Null),
            JsonValue::Bool(b) => Ok(RowValues::Bool(b)),
            JsonValue::String(s) => Ok(RowValues::Text(s)),
            JsonValue::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(RowValues::Int(i))
                } else if n.is_u64() {
                    Err(ConnectorError::usage(format!(
                        "integer {n} does not fit a signed 64-bit column value"
                    )))
                } else {
                    n.as_f64().map(RowValues::Float).ok_or_else(|| {
                        ConnectorError::usage(format!("unsupported number {n}"))
                    })
                }
            }
            JsonValue::Array(_) | JsonValue::Object(_) => Err(ConnectorError::usage(
                "arrays and objects cannot be bound as column values",
            )),
        }
    }
}

/// SQL engine a handle speaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    /// MySQL / MariaDB
    MySql,
    /// `SQLite`
    Sqlite,
}

impl Dialect {
    /// Statement returning the id generated by the last INSERT on this connection.
    #[must_use]
    pub fn last_insert_id_sql(self) -> &'static str {
        match self {
            Dialect::MySql => "SELECT LAST_INSERT_ID()",
            Dialect::Sqlite => "SELECT last_insert_rowid()",
        }
    }
}
