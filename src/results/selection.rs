use serde::ser::{Serialize, SerializeSeq, Serializer};

use super::{CustomDbRow, ResultSet};

/// Rows returned by `Connector::select`, shaped by how many matched.
///
/// Zero rows is `Empty`, exactly one row is the bare row, two or more is the list. Serialized, the
/// three shapes are `[]`, `{..}` and `[{..}, ..]`.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Selection {
    #[default]
    Empty,
    Single(CustomDbRow),
    Many(Vec<CustomDbRow>),
}

impl Selection {
    #[must_use]
    pub fn from_rows(mut rows: Vec<CustomDbRow>) -> Self {
        match rows.len() {
            0 => Selection::Empty,
            1 => rows.pop().map_or(Selection::Empty, Selection::Single),
            _ => Selection::Many(rows),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Selection::Empty)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Selection::Empty => 0,
            Selection::Single(_) => 1,
            Selection::Many(rows) => rows.len(),
        }
    }

    /// The bare row when exactly one matched.
    #[must_use]
    pub fn single(&self) -> Option<&CustomDbRow> {
        match self {
            Selection::Single(row) => Some(row),
            _ => None,
        }
    }

    /// Every row regardless of shape.
    #[must_use]
    pub fn rows(&self) -> &[CustomDbRow] {
        match self {
            Selection::Empty => &[],
            Selection::Single(row) => std::slice::from_ref(row),
            Selection::Many(rows) => rows,
        }
    }

    #[must_use]
    pub fn into_rows(self) -> Vec<CustomDbRow> {
        match self {
            Selection::Empty => Vec::new(),
            Selection::Single(row) => vec![row],
            Selection::Many(rows) => rows,
        }
    }
}

impl From<ResultSet> for Selection {
    fn from(rs: ResultSet) -> Self {
        Selection::from_rows(rs.results)
    }
}

impl Serialize for Selection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Selection::Empty => serializer.serialize_seq(Some(0))?.end(),
            Selection::Single(row) => row.serialize(serializer),
            Selection::Many(rows) => {
                let mut seq = serializer.serialize_seq(Some(rows.len()))?;
                for row in rows {
                    seq.serialize_element(row)?;
                }
                seq.end()
            }
        }
    }
}
