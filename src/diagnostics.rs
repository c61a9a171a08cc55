//! Line/column diagnostics for malformed JSON responses.
//!
//! The API can return truncated or otherwise malformed JSON under certain
//! failure conditions, and a bare "unexpected token" error is not actionable.
//! These helpers turn a byte offset into a line/column pair plus a short
//! excerpt of the offending response with a caret pointing at the exact
//! position of the syntax error.

/// Takes a response body and the byte offset of a parse error and returns the
/// line, column, and pretty-printed context around the error with an arrow
/// indicating the exact position of the syntax error.
///
/// Lines are 1-based. Column counts bytes, not characters; the newline that
/// terminates a line belongs to that line.
pub fn highlight_byte_position(body: &[u8], pos: u64) -> (usize, usize, String) {
    let mut line = 1usize;
    let mut col = 0usize;
    let mut last_line = String::new();
    let mut this_line: Vec<u8> = Vec::new();

    for &byte in body.iter().take(usize::try_from(pos).unwrap_or(usize::MAX)) {
        if byte == b'\n' {
            last_line = String::from_utf8_lossy(&this_line).into_owned();
            this_line.clear();
            line += 1;
            col = 1;
        } else {
            col += 1;
            this_line.push(byte);
        }
    }

    let mut highlight = String::new();
    if line > 1 {
        highlight.push_str(&format!("{:5}: {}\n", line - 1, last_line));
    }
    highlight.push_str(&format!(
        "{:5}: {}\n",
        line,
        String::from_utf8_lossy(&this_line)
    ));
    highlight.push_str(&format!("{}^\n", " ".repeat(col + 5)));

    (line, col, highlight)
}

/// Converts a 1-based line/column pair (as reported by `serde_json`) back
/// into the byte offset it refers to.
pub(crate) fn byte_offset(body: &[u8], line: usize, column: usize) -> u64 {
    if line == 0 {
        return 0;
    }
    let mut offset = 0u64;
    let mut current_line = 1usize;
    let mut bytes = body.iter();
    while current_line < line {
        match bytes.next() {
            Some(&byte) => {
                offset += 1;
                if byte == b'\n' {
                    current_line += 1;
                }
            }
            None => break,
        }
    }
    offset + column.saturating_sub(1) as u64
}
