//! Lightweight SQL text scanning: named placeholders, statement splitting and identifier checks.
//!
//! Quoted strings, backticked identifiers and comments are skipped via a small state machine that
//! follows the dialect's lexing rules (backslash escapes and `#` comments are MySQL only). It does
//! not understand procedural bodies (`BEGIN ... END`) and will split them on `;`.

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::ConnectorError;
use crate::types::Dialect;

mod parsers;
mod scanner;

use parsers::is_placeholder_start;
use scanner::{scan_name, walk};

lazy_static! {
    static ref IDENTIFIER: Regex = Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap();
}

/// Names of the `:name` placeholders referenced by `sql`, in order of appearance.
///
/// A placeholder used twice is reported twice.
#[must_use]
pub fn named_placeholders(sql: &str, dialect: Dialect) -> Vec<&str> {
    let bytes = sql.as_bytes();
    let mut names = Vec::new();
    walk(sql, dialect, |idx, _| {
        if is_placeholder_start(bytes, idx)
            && let Some((end, name)) = scan_name(bytes, idx + 1)
        {
            names.push(name);
            return end - idx - 1;
        }
        0
    });
    names
}

/// Split a multi-statement template on `;`, ignoring separators inside quotes and comments.
///
/// Fragments are trimmed; whitespace-only fragments (e.g. after a trailing `;`) are dropped.
#[must_use]
pub fn split_statements(sql: &str, dialect: Dialect) -> Vec<&str> {
    let mut cuts = Vec::new();
    walk(sql, dialect, |idx, b| {
        if b == b';' {
            cuts.push(idx);
        }
        0
    });

    let mut statements = Vec::with_capacity(cuts.len() + 1);
    let mut start = 0;
    for cut in cuts.into_iter().chain(std::iter::once(sql.len())) {
        let fragment = sql[start..cut].trim();
        if !fragment.is_empty() {
            statements.push(fragment);
        }
        start = (cut + 1).min(sql.len());
    }
    statements
}

#[must_use]
pub fn is_valid_identifier(name: &str) -> bool {
    IDENTIFIER.is_match(name)
}

/// Table and column names are spliced into SQL text and reused as placeholder names, so only plain
/// identifiers are accepted.
///
/// # Errors
/// Returns `ConnectorError::UsageError` when `name` is not a plain identifier.
pub fn validate_identifier(name: &str, what: &str) -> Result<(), ConnectorError> {
    if is_valid_identifier(name) {
        Ok(())
    } else {
        Err(ConnectorError::usage(format!(
            "invalid {what} name '{name}': expected letters, digits or '_'"
        )))
    }
}
