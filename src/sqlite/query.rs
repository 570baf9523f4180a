use std::sync::Arc;

use rusqlite::Statement;
use rusqlite::types::Value;

use super::params::NamedParams;
use crate::error::ConnectorError;
use crate::results::ResultSet;
use crate::types::RowValues;

/// Extract a `RowValues` from a `SQLite` row.
///
/// # Errors
///
/// Returns `ConnectorError` if the value cannot be read.
pub fn sqlite_extract_value_sync(
    row: &rusqlite::Row,
    idx: usize,
) -> Result<RowValues, ConnectorError> {
    let value: Value = row.get(idx)?;
    match value {
        Value::Null => Ok(RowValues::Null),
        Value::Integer(i) => Ok(RowValues::Int(i)),
        Value::Real(f) => Ok(RowValues::Float(f)),
        Value::Text(s) => Ok(RowValues::Text(s)),
        Value::Blob(b) => Ok(RowValues::Text(String::from_utf8_lossy(&b).into_owned())),
    }
}

/// Run a prepared statement and collect what it produced.
///
/// Statements without result columns are executed as DML and report rows changed.
///
/// # Errors
/// Returns `ConnectorError::SqliteError` if binding, execution or row extraction fails.
pub fn build_result_set(
    stmt: &mut Statement,
    params: &NamedParams,
) -> Result<ResultSet, ConnectorError> {
    let refs = params.as_refs();

    if stmt.column_count() == 0 {
        let affected = stmt.execute(&refs[..])?;
        return Ok(ResultSet::affected(affected as u64));
    }

    let column_names: Vec<String> = stmt
        .column_names()
        .iter()
        .map(std::string::ToString::to_string)
        .collect();
    let col_count = column_names.len();

    let mut result_set = ResultSet::default();
    result_set.set_column_names(Arc::new(column_names));

    let mut rows_iter = stmt.query(&refs[..])?;
    while let Some(row) = rows_iter.next()? {
        let mut row_values = Vec::with_capacity(col_count);
        for i in 0..col_count {
            row_values.push(sqlite_extract_value_sync(row, i)?);
        }
        result_set.add_row_values(row_values);
    }

    Ok(result_set)
}
