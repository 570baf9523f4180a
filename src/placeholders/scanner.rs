use crate::types::Dialect;

#[derive(Clone, Copy, PartialEq, Eq)]
pub(super) enum State {
    Normal,
    SingleQuoted,
    DoubleQuoted,
    Backticked,
    LineComment,
    BlockComment,
}

pub(super) fn scan_name(bytes: &[u8], start: usize) -> Option<(usize, &str)> {
    match bytes.get(start) {
        Some(b) if b.is_ascii_alphabetic() || *b == b'_' => {}
        _ => return None,
    }
    let mut idx = start + 1;
    while idx < bytes.len() && (bytes[idx].is_ascii_alphanumeric() || bytes[idx] == b'_') {
        idx += 1;
    }
    std::str::from_utf8(&bytes[start..idx])
        .ok()
        .map(|name| (idx, name))
}

/// Walk `sql` once, calling `on_normal` for every byte outside quotes and comments.
///
/// The callback returns how many extra bytes to skip. A doubled quote is a literal quote in every
/// dialect; a backslash escapes the next byte only on MySQL.
pub(super) fn walk<F>(sql: &str, dialect: Dialect, mut on_normal: F)
where
    F: FnMut(usize, u8) -> usize,
{
    let backslash_escapes = dialect == Dialect::MySql;
    let bytes = sql.as_bytes();
    let mut state = State::Normal;
    let mut idx = 0;

    while idx < bytes.len() {
        let b = bytes[idx];
        match state {
            State::Normal => match b {
                b'\'' => state = State::SingleQuoted,
                b'"' => state = State::DoubleQuoted,
                b'`' => state = State::Backticked,
                _ if super::parsers::is_line_comment_start(bytes, idx, dialect) => {
                    state = State::LineComment;
                }
                _ if super::parsers::is_block_comment_start(bytes, idx) => {
                    state = State::BlockComment;
                    idx += 1;
                }
                _ => idx += on_normal(idx, b),
            },
            State::SingleQuoted | State::DoubleQuoted => {
                let quote = if state == State::SingleQuoted { b'\'' } else { b'"' };
                if backslash_escapes && b == b'\\' {
                    idx += 1; // escaped byte
                } else if b == quote {
                    if bytes.get(idx + 1) == Some(&quote) {
                        idx += 1; // doubled quote
                    } else {
                        state = State::Normal;
                    }
                }
            }
            State::Backticked => {
                if b == b'`' {
                    if bytes.get(idx + 1) == Some(&b'`') {
                        idx += 1;
                    } else {
                        state = State::Normal;
                    }
                }
            }
            State::LineComment => {
                if b == b'\n' {
                    state = State::Normal;
                }
            }
            State::BlockComment => {
                if super::parsers::is_block_comment_end(bytes, idx) {
                    state = State::Normal;
                    idx += 1;
                }
            }
        }
        idx += 1;
    }
}
