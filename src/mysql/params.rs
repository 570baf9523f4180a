use mysql_async::Value;

use crate::params::Params;
use crate::types::RowValues;

/// Convert a single `RowValue` to a `mysql_async` value.
#[must_use]
pub fn row_value_to_mysql_value(value: &RowValues) -> Value {
    match value {
        RowValues::Int(i) => Value::Int(*i),
        RowValues::Float(f) => Value::Double(*f),
        RowValues::Text(s) => Value::Bytes(s.as_bytes().to_vec()),
        RowValues::Bool(b) => Value::Int(i64::from(*b)),
        RowValues::Null => Value::NULL,
    }
}

/// Named parameters for a binary-protocol execution; no bindings maps to `Params::Empty`.
#[must_use]
pub fn convert_params(params: &Params) -> mysql_async::Params {
    if params.is_empty() {
        return mysql_async::Params::Empty;
    }
    let named: Vec<(String, Value)> = params
        .iter()
        .map(|(name, value)| (name.to_string(), row_value_to_mysql_value(value)))
        .collect();
    mysql_async::Params::from(named)
}
