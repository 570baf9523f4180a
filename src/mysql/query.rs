use std::sync::Arc;

use mysql_async::prelude::Protocol;
use mysql_async::{QueryResult, Row, Value};

use crate::error::ConnectorError;
use crate::results::ResultSet;
use crate::types::RowValues;

/// Extract a `RowValues` from a `mysql_async` value.
#[must_use]
pub fn mysql_value_to_row_value(value: &Value) -> RowValues {
    match value {
        Value::NULL => RowValues::Null,
        Value::Int(i) => RowValues::Int(*i),
        Value::UInt(u) => {
            i64::try_from(*u).map_or_else(|_| RowValues::Text(u.to_string()), RowValues::Int)
        }
        Value::Float(f) => RowValues::Float(f64::from(*f)),
        Value::Double(f) => RowValues::Float(*f),
        Value::Bytes(bytes) => RowValues::Text(String::from_utf8_lossy(bytes).into_owned()),
        Value::Date(y, mo, d, h, mi, s, us) => {
            if *us == 0 {
                RowValues::Text(format!("{y:04}-{mo:02}-{d:02} {h:02}:{mi:02}:{s:02}"))
            } else {
                RowValues::Text(format!(
                    "{y:04}-{mo:02}-{d:02} {h:02}:{mi:02}:{s:02}.{us:06}"
                ))
            }
        }
        Value::Time(neg, days, h, mi, s, us) => {
            let sign = if *neg { "-" } else { "" };
            let hours = u32::from(*h) + *days * 24;
            if *us == 0 {
                RowValues::Text(format!("{sign}{hours:02}:{mi:02}:{s:02}"))
            } else {
                RowValues::Text(format!("{sign}{hours:02}:{mi:02}:{s:02}.{us:06}"))
            }
        }
    }
}

/// Drain a query result into a [`ResultSet`].
///
/// Only the first result set is kept; any further sets are read and dropped so the connection is
/// ready for the next statement.
///
/// # Errors
/// Returns `ConnectorError::MysqlError` if reading rows from the server fails.
pub async fn build_result_set<P>(
    mut result: QueryResult<'_, 'static, P>,
) -> Result<ResultSet, ConnectorError>
where
    P: Protocol + Send + 'static,
{
    let columns = result.columns();
    let rows: Vec<Row> = result.collect().await?;
    let affected = result.affected_rows();
    result.drop_result().await?;

    let Some(columns) = columns.filter(|cols| !cols.is_empty()) else {
        return Ok(ResultSet::affected(affected));
    };

    let column_names: Vec<String> = columns
        .iter()
        .map(|col| col.name_str().into_owned())
        .collect();
    let col_count = column_names.len();

    let mut result_set = ResultSet::with_capacity(rows.len());
    result_set.set_column_names(Arc::new(column_names));
    for row in &rows {
        let values = (0..col_count)
            .map(|i| row.as_ref(i).map_or(RowValues::Null, mysql_value_to_row_value))
            .collect();
        result_set.add_row_values(values);
    }
    Ok(result_set)
}
