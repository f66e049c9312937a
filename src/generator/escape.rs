//! Escaping for text interpolated into generated JavaScript
//!
//! Every string placed inside a generated single-quoted literal or comment
//! goes through `escape_js`.

/// Escape text for a single-quoted JavaScript string literal
pub fn escape_js(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '\'' => escaped.push_str("\\'"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\u{2028}' => escaped.push_str("\\u2028"),
            '\u{2029}' => escaped.push_str("\\u2029"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Escape text for a line inside a `/** ... */` block comment
pub fn escape_block_comment(text: &str) -> String {
    escape_js(text).replace("*/", "*\\/")
}
