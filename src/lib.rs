//! # rich_html_policy
//!
//! An allow-list HTML sanitizer for content produced by a rich-text editor.
//!
//! ## Overview
//!
//! A [`Policy`] decides, per element and per attribute, what survives:
//!
//! - allowed elements keep the attributes their validators accept;
//! - executable elements (`script`, `style`, `iframe`, ...) are removed with
//!   everything inside them;
//! - any other element is unwrapped, its children kept and sanitized in turn;
//! - comments are always dropped.
//!
//! The policy is immutable once built and can be shared across threads
//! without locking. Sanitizing is a pure, synchronous function of its input.
//!
//! ## Quick start
//!
//! ```
//! use rich_html_policy::create_html_policy;
//!
//! let policy = create_html_policy();
//!
//! let html = r#"<p onclick="steal()">Hi <span style="color: rgb(59, 130, 246);">there</span></p><script>alert(1)</script>"#;
//! assert_eq!(
//!     policy.sanitize(html),
//!     r#"<p>Hi <span style="color: rgb(59, 130, 246);">there</span></p>"#,
//! );
//! ```
//!
//! ## Custom policies
//!
//! Use [`PolicyBuilder`] to derive a stricter or richer policy. Pass the
//! policy explicitly to each call site, or hold it as a [`Sanitizer`] trait
//! object.

pub mod config;
pub mod error;
pub mod policy;
pub mod sanitizer;
pub mod validate;

pub use config::PolicyBuilder;
pub use error::{PolicyError, Result};
pub use policy::{Disposition, ElementRule, OnDisallowed, Policy, create_html_policy};
pub use sanitizer::{SanitizeReport, Sanitizer, sanitize};
pub use validate::{Validator, ValidatorOptions};
