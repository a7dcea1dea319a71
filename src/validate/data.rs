//! `data-*` metadata validation (syntax-highlight language, theme, ...).

/// Accept `[A-Za-z0-9_-]+` values no longer than `max_len` bytes.
pub fn validate_data(value: &str, max_len: usize) -> Option<&str> {
    let ok = !value.is_empty()
        && value.len() <= max_len
        && value
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-');
    ok.then_some(value)
}
