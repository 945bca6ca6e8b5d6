//! Identifier validation for values spliced into SQL text or URL paths.

use super::RuleError;

/// Accept a SQL identifier (`[A-Za-z_][A-Za-z0-9_]*`, at most 63 bytes).
pub fn sql_identifier(value: &str) -> Result<&str, RuleError> {
    let mut bytes = value.bytes();
    let valid_head = matches!(bytes.next(), Some(b) if b.is_ascii_alphabetic() || b == b'_');
    let valid_tail = bytes.all(|b| b.is_ascii_alphanumeric() || b == b'_');

    if valid_head && valid_tail && value.len() <= 63 {
        Ok(value)
    } else {
        Err(RuleError::InvalidIdentifier(value.to_string()))
    }
}

/// Accept a single URL path segment made of ASCII letters, digits, `-`, `_` and `.`.
pub fn path_segment(value: &str) -> Result<&str, RuleError> {
    let valid = !value.is_empty()
        && value != "."
        && value != ".."
        && value
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.'));

    if valid {
        Ok(value)
    } else {
        Err(RuleError::InvalidIdentifier(value.to_string()))
    }
}
