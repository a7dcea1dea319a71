//! Attribute value validators.
//!
//! Every validator is a total function over `&str`: it either accepts the
//! value (returning the exact text to emit) or rejects it, in which case the
//! attribute is dropped.
//!
//! Built-in validators:
//!
//! - [`Validator::Class`] -- space separated class names, all-or-nothing.
//! - [`Validator::Style`] -- allow-listed inline declarations, all-or-nothing.
//! - [`Validator::Url`] / [`Validator::ImageUrl`] -- scheme allow-list.
//! - [`Validator::Data`] -- short identifier-like metadata for `data-*`.
//! - [`Validator::Enum`] / [`Validator::Tokens`] -- fixed literal sets.
//! - [`Validator::Number`] / [`Validator::Text`] -- plain values.

mod class;
mod data;
mod link;
mod style;

pub use self::class::validate_class;
pub use self::data::validate_data;
pub use self::link::{validate_image_url, validate_url};
pub use self::style::validate_style;

/// Rule bound to an attribute name in a [`Policy`](crate::Policy).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Validator {
    /// Class list where every token matches `[A-Za-z][A-Za-z0-9_-]*`.
    Class,
    /// Inline `style` declarations from the presentational allow-list.
    Style,
    /// Root-relative path, `#fragment`, or `http`/`https`/`mailto` URL.
    Url,
    /// [`Validator::Url`] plus raster `data:image/*` when the policy allows it.
    ImageUrl,
    /// `[A-Za-z0-9_-]+`, bounded by [`ValidatorOptions::max_data_len`].
    Data,
    /// Exactly one of the listed literals.
    Enum(&'static [&'static str]),
    /// Whitespace separated tokens, each one of the listed literals.
    Tokens(&'static [&'static str]),
    /// One to four ASCII digits.
    Number,
    /// Free text bounded by [`ValidatorOptions::max_text_len`].
    Text,
}

/// Knobs shared by all validators of one policy.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidatorOptions {
    /// Accept `data:image/{png,jpeg,gif,webp}` for [`Validator::ImageUrl`].
    pub allow_data_images: bool,
    /// Longest accepted [`Validator::Data`] value, in bytes.
    pub max_data_len: usize,
    /// Longest accepted [`Validator::Text`] value, in chars.
    pub max_text_len: usize,
}

impl Default for ValidatorOptions {
    fn default() -> Self {
        Self {
            allow_data_images: false,
            max_data_len: 64,
            max_text_len: 512,
        }
    }
}

impl Validator {
    /// Check `value`, returning the text to emit or `None` to drop the attribute.
    pub fn check<'a>(&self, value: &'a str, options: &ValidatorOptions) -> Option<&'a str> {
        match self {
            Validator::Class => validate_class(value),
            Validator::Style => validate_style(value),
            Validator::Url => validate_url(value),
            Validator::ImageUrl => validate_image_url(value, options.allow_data_images),
            Validator::Data => validate_data(value, options.max_data_len),
            Validator::Enum(allowed) => allowed.iter().any(|a| *a == value).then_some(value),
            Validator::Tokens(allowed) => validate_tokens(value, allowed),
            Validator::Number => validate_number(value),
            Validator::Text => (value.chars().count() <= options.max_text_len).then_some(value),
        }
    }

    /// Whether this validator enforces a URL scheme allow-list.
    pub fn checks_url(&self) -> bool {
        matches!(self, Validator::Url | Validator::ImageUrl)
    }
}

fn validate_tokens<'a>(value: &'a str, allowed: &[&str]) -> Option<&'a str> {
    let mut tokens = value.split_ascii_whitespace().peekable();
    tokens.peek()?;
    tokens
        .all(|t| allowed.iter().any(|a| *a == t))
        .then_some(value)
}

fn validate_number(value: &str) -> Option<&str> {
    let ok = (1..=4).contains(&value.len()) && value.bytes().all(|b| b.is_ascii_digit());
    ok.then_some(value)
}
