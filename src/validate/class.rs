//! `class` attribute validation.

use std::sync::LazyLock;

use regex::Regex;

static CLASS_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9_-]*$").expect("invalid regex pattern"));

const MAX_CLASS_LEN: usize = 512;

/// Accept a class list only if every token is a plain class name.
///
/// One bad token drops the whole value; tokens are never filtered
/// individually. The accepted value is returned byte-for-byte.
pub fn validate_class(value: &str) -> Option<&str> {
    if value.len() > MAX_CLASS_LEN || value.contains(['"', '\'', '<', '>']) {
        return None;
    }
    let mut tokens = value.split_ascii_whitespace().peekable();
    tokens.peek()?;
    tokens.all(|t| CLASS_TOKEN.is_match(t)).then_some(value)
}
