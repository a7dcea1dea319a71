//! Policy-driven HTML sanitization.
//!
//! Input is parsed into a document tree, walked once against the [`Policy`]
//! into a fresh arena of surviving nodes, and serialized back to a string.
//! Unwrapping can splice children into parents the parser would not nest
//! them under (`<h2>` inside `<h1>`, `<li>` inside `<li>`), so output that
//! went through an unwrap is re-parsed until it stops changing.
//!
//! Consumers that want to swap policies hold a [`Sanitizer`] trait object.

mod serialize;
mod walk;

use scraper::Html;

use crate::policy::Policy;

/// Upper bound on parse/walk/serialize rounds for one call.
const MAX_PASSES: usize = 4;

/// Trait for HTML content sanitizers.
///
/// Implementations must be `Send + Sync` so a single instance can serve
/// every request thread.
pub trait Sanitizer: Send + Sync {
    /// Transform the given HTML content, returning the sanitized result.
    fn sanitize(&self, html: &str) -> String;
}

/// What one sanitize call removed.
///
/// The three element/attribute counters match the three outcomes a caller
/// can observe: an attribute dropped with its element kept, an element
/// unwrapped with its children kept, and an element stripped with its
/// whole subtree.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SanitizeReport {
    pub dropped_attributes: usize,
    pub unwrapped_elements: usize,
    pub stripped_elements: usize,
    pub dropped_comments: usize,
}

impl SanitizeReport {
    /// `true` when the input already satisfied the policy.
    pub fn is_clean(&self) -> bool {
        *self == Self::default()
    }

    fn merge(&mut self, other: &Self) {
        self.dropped_attributes += other.dropped_attributes;
        self.unwrapped_elements += other.unwrapped_elements;
        self.stripped_elements += other.stripped_elements;
        self.dropped_comments += other.dropped_comments;
    }
}

impl Policy {
    /// Sanitize an HTML fragment.
    ///
    /// Total: malformed input still yields safe, well-formed output.
    pub fn sanitize(&self, html: &str) -> String {
        self.sanitize_with_report(html).0
    }

    /// Sanitize an HTML fragment and report what was removed.
    ///
    /// The output is a fixed point: sanitizing it again returns it unchanged
    /// with a clean report.
    pub fn sanitize_with_report(&self, html: &str) -> (String, SanitizeReport) {
        let mut report = SanitizeReport::default();
        let mut output = self.clean_pass(html, &mut report);
        let mut needs_pass = report.unwrapped_elements > 0;

        let mut passes = 1;
        while needs_pass && passes < MAX_PASSES {
            let mut pass_report = SanitizeReport::default();
            let next = self.clean_pass(&output, &mut pass_report);
            report.merge(&pass_report);
            passes += 1;
            needs_pass = next != output;
            output = next;
        }
        if needs_pass {
            tracing::warn!(passes, "Sanitized output did not settle");
        }

        tracing::debug!(
            input_len = html.len(),
            output_len = output.len(),
            passes,
            dropped_attributes = report.dropped_attributes,
            unwrapped_elements = report.unwrapped_elements,
            stripped_elements = report.stripped_elements,
            dropped_comments = report.dropped_comments,
            "Sanitized HTML fragment"
        );
        (output, report)
    }

    fn clean_pass(&self, html: &str, report: &mut SanitizeReport) -> String {
        let document = Html::parse_fragment(html);
        let tree = walk::clean_tree(self, &document, report);
        serialize::serialize_tree(&tree)
    }
}

impl Sanitizer for Policy {
    fn sanitize(&self, html: &str) -> String {
        Policy::sanitize(self, html)
    }
}

/// Sanitize `html` with `policy`.
pub fn sanitize(policy: &Policy, html: &str) -> String {
    policy.sanitize(html)
}
