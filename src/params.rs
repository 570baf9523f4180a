use std::collections::HashSet;

use serde_json::Value as JsonValue;

use crate::error::ConnectorError;
use crate::placeholders::named_placeholders;
use crate::types::{Dialect, RowValues};

/// Ordered mapping of placeholder name to bound value.
///
/// Names are stored without the leading `:`; `with_value(":id", 1)` and
/// `with_value("id", 1)` bind the same placeholder.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Params {
    entries: Vec<(String, RowValues)>,
}

impl Params {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a named value, replacing any earlier value bound to the same name.
    #[must_use]
    pub fn with_value(mut self, name: &str, value: impl Into<RowValues>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: &str, value: impl Into<RowValues>) {
        let name = name.strip_prefix(':').unwrap_or(name);
        let value = value.into();
        if let Some(slot) = self.entries.iter_mut().find(|(n, _)| n == name) {
            slot.1 = value;
        } else {
            self.entries.push((name.to_string(), value));
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&RowValues> {
        let name = name.strip_prefix(':').unwrap_or(name);
        self.entries
            .iter()
            .find_map(|(n, v)| (n == name).then_some(v))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RowValues)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Check that `sql`, lexed by `dialect`'s rules, references exactly the names bound here.
    ///
    /// # Errors
    /// Returns `ConnectorError::UsageError` naming the first unbound placeholder or unused binding.
    pub fn check_against(&self, sql: &str, dialect: Dialect) -> Result<(), ConnectorError> {
        let referenced: HashSet<&str> = named_placeholders(sql, dialect).into_iter().collect();
        if let Some(missing) = referenced.iter().find(|name| self.get(name).is_none()) {
            return Err(ConnectorError::usage(format!(
                "placeholder :{missing} has no bound value"
            )));
        }
        if let Some((unused, _)) = self.iter().find(|(name, _)| !referenced.contains(name)) {
            return Err(ConnectorError::usage(format!(
                "bound value :{unused} is not referenced by the statement"
            )));
        }
        Ok(())
    }
}

impl<K: AsRef<str>, V: Into<RowValues>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Params::new();
        for (k, v) in iter {
            params.insert(k.as_ref(), v);
        }
        params
    }
}

/// Ordered column → value mapping handed to the insert/update helpers.
///
/// Insertion order is the column order of the generated SQL.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Payload {
    columns: Vec<(String, RowValues)>,
}

impl Payload {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, column: &str, value: impl Into<RowValues>) -> Self {
        self.insert(column, value);
        self
    }

    pub fn insert(&mut self, column: &str, value: impl Into<RowValues>) {
        let value = value.into();
        if let Some(slot) = self.columns.iter_mut().find(|(c, _)| c == column) {
            slot.1 = value;
        } else {
            self.columns.push((column.to_string(), value));
        }
    }

    #[must_use]
    pub fn get(&self, column: &str) -> Option<&RowValues> {
        self.columns
            .iter()
            .find_map(|(c, v)| (c == column).then_some(v))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(c, _)| c.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RowValues)> {
        self.columns.iter().map(|(c, v)| (c.as_str(), v))
    }

    /// Build a payload from an untyped JSON object, keeping its key order.
    ///
    /// # Errors
    /// Returns `ConnectorError::UsageError` if `value` is not an object or holds a nested
    /// array/object.
    pub fn from_json(value: JsonValue) -> Result<Self, ConnectorError> {
        let JsonValue::Object(map) = value else {
            return Err(ConnectorError::usage("payload must be a JSON object"));
        };
        let mut payload = Payload::new();
        for (column, v) in map {
            let v = RowValues::try_from(v)
                .map_err(|e| ConnectorError::usage(format!("column {column}: {e}")))?;
            payload.insert(&column, v);
        }
        Ok(payload)
    }
}

impl<K: AsRef<str>, V: Into<RowValues>> FromIterator<(K, V)> for Payload {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut payload = Payload::new();
        for (k, v) in iter {
            payload.insert(k.as_ref(), v);
        }
        payload
    }
}

/// Parameters attached to a pending statement.
#[derive(Debug, Default, Clone, PartialEq)]
pub enum Bindings {
    /// No parameters.
    #[default]
    None,
    /// One named parameter set for a single statement.
    Named(Params),
    /// One parameter set per `;`-separated statement, used by `m_modify`.
    PerStatement(Vec<Params>),
}

impl Bindings {
    /// Named parameters for a single statement; `None` binds nothing.
    ///
    /// # Errors
    /// Returns `ConnectorError::UsageError` for per-statement bindings.
    pub fn single(&self) -> Result<Params, ConnectorError> {
        match self {
            Bindings::None => Ok(Params::new()),
            Bindings::Named(params) => Ok(params.clone()),
            Bindings::PerStatement(_) => Err(ConnectorError::usage(
                "per-statement parameter sets can only be executed with m_modify",
            )),
        }
    }
}

impl From<()> for Bindings {
    fn from((): ()) -> Self {
        Bindings::None
    }
}

impl From<Params> for Bindings {
    fn from(params: Params) -> Self {
        Bindings::Named(params)
    }
}

impl From<Option<Params>> for Bindings {
    fn from(params: Option<Params>) -> Self {
        params.map_or(Bindings::None, Bindings::Named)
    }
}

impl From<Vec<Params>> for Bindings {
    fn from(sets: Vec<Params>) -> Self {
        Bindings::PerStatement(sets)
    }
}
