use crate::types::Dialect;

/// `--` everywhere; `#` only on MySQL.
pub(super) fn is_line_comment_start(bytes: &[u8], idx: usize, dialect: Dialect) -> bool {
    (dialect == Dialect::MySql && bytes.get(idx) == Some(&b'#'))
        || (bytes.get(idx) == Some(&b'-') && bytes.get(idx + 1) == Some(&b'-'))
}

pub(super) fn is_block_comment_start(bytes: &[u8], idx: usize) -> bool {
    bytes.get(idx) == Some(&b'/') && bytes.get(idx + 1) == Some(&b'*')
}

pub(super) fn is_block_comment_end(bytes: &[u8], idx: usize) -> bool {
    bytes.get(idx) == Some(&b'*') && bytes.get(idx + 1) == Some(&b'/')
}

/// `:name` starts here unless the colon is part of `::` or `:=`.
pub(super) fn is_placeholder_start(bytes: &[u8], idx: usize) -> bool {
    bytes.get(idx) == Some(&b':')
        && (idx == 0 || bytes[idx - 1] != b':')
        && !matches!(bytes.get(idx + 1), Some(b':' | b'='))
}
