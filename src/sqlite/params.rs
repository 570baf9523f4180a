use rusqlite::types::Value;

use crate::params::Params;
use crate::types::RowValues;

/// Convert a single `RowValue` to a rusqlite `Value`.
#[must_use]
pub fn row_value_to_sqlite_value(value: &RowValues) -> Value {
    match value {
        RowValues::Int(i) => Value::Integer(*i),
        RowValues::Float(f) => Value::Real(*f),
        RowValues::Text(s) => Value::Text(s.clone()),
        RowValues::Bool(b) => Value::Integer(i64::from(*b)),
        RowValues::Null => Value::Null,
    }
}

/// Owned named bindings (`":name"`, value) ready to move onto the blocking thread.
#[derive(Debug, Clone, Default)]
pub struct NamedParams(pub Vec<(String, Value)>);

impl NamedParams {
    #[must_use]
    pub fn convert(params: &Params) -> Self {
        NamedParams(
            params
                .iter()
                .map(|(name, value)| (format!(":{name}"), row_value_to_sqlite_value(value)))
                .collect(),
        )
    }

    /// Build a borrowed slice suitable for rusqlite execution.
    #[must_use]
    pub fn as_refs(&self) -> Vec<(&str, &dyn rusqlite::ToSql)> {
        self.0
            .iter()
            .map(|(name, value)| (name.as_str(), value as &dyn rusqlite::ToSql))
            .collect()
    }
}
