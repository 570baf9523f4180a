use std::collections::HashMap;
use std::sync::Arc;

use super::row::{CustomDbRow, build_index};
use crate::types::RowValues;

/// A result set from a database query
///
/// This struct represents the result of a single statement: the rows it
/// returned (if any) and the number of rows it matched or affected.
#[derive(Debug, Clone, Default)]
pub struct ResultSet {
    /// The rows returned by the query
    pub results: Vec<CustomDbRow>,
    /// Rows returned (row-producing statements) or affected (DML)
    pub rows_affected: u64,
    /// Column names shared by all rows (to avoid duplicating in each row)
    column_names: Option<Arc<Vec<String>>>,
    column_index_cache: Option<Arc<HashMap<String, usize>>>,
}

impl ResultSet {
    /// Create a new result set with a known capacity
    #[must_use]
    pub fn with_capacity(capacity: usize) -> ResultSet {
        ResultSet {
            results: Vec::with_capacity(capacity),
            ..ResultSet::default()
        }
    }

    /// Result of a statement that returned no rows and changed `rows_affected` rows.
    #[must_use]
    pub fn affected(rows_affected: u64) -> ResultSet {
        ResultSet {
            rows_affected,
            ..ResultSet::default()
        }
    }

    /// Set the column names for this result set (to be shared by all rows)
    pub fn set_column_names(&mut self, column_names: Arc<Vec<String>>) {
        self.column_index_cache = Some(Arc::new(build_index(&column_names)));
        self.column_names = Some(column_names);
    }

    /// Get the column names for this result set
    #[must_use]
    pub fn get_column_names(&self) -> Option<&Arc<Vec<String>>> {
        self.column_names.as_ref()
    }

    /// Add a row to the result set
    ///
    /// Ignored until column names are set.
    pub fn add_row_values(&mut self, row_values: Vec<RowValues>) {
        if let (Some(column_names), Some(cache)) = (&self.column_names, &self.column_index_cache) {
            self.results.push(CustomDbRow::with_cache(
                Arc::clone(column_names),
                row_values,
                Arc::clone(cache),
            ));
            self.rows_affected += 1;
        }
    }

    /// Add a row to the result set (legacy method, less efficient)
    pub fn add_row(&mut self, row: CustomDbRow) {
        if self.column_names.is_none() {
            self.column_index_cache = Some(Arc::clone(&row.column_index_cache));
            self.column_names = Some(Arc::clone(&row.column_names));
        }

        self.results.push(row);
        self.rows_affected += 1;
    }

    /// First column of the first row.
    #[must_use]
    pub fn first_value(&self) -> Option<&RowValues> {
        self.results.first().and_then(|row| row.get_by_index(0))
    }
}
