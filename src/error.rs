//! Error types for the `rich_html_policy` crate.
//!
//! Only policy construction can fail. Sanitizing never returns an error.

/// All errors that can occur while building a custom [`Policy`](crate::Policy).
#[derive(Debug, thiserror::Error)]
pub enum PolicyError {
    /// An element or attribute name is not a lowercase HTML name.
    #[error("Invalid name: {0:?}")]
    InvalidName(String),

    /// An attribute rule would let script or an unchecked URL through.
    #[error("Unsafe attribute rule: <{element}> {attribute}")]
    UnsafeAttribute { element: String, attribute: String },

    /// An element whose content is executable was listed as allowed.
    #[error("Element cannot be allowed: <{0}>")]
    DangerousElement(String),

    /// Any other invalid builder setting.
    #[error("Config error: {0}")]
    Config(String),
}

/// A type alias for `Result<T, PolicyError>`.
pub type Result<T> = std::result::Result<T, PolicyError>;
