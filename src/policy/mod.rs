//! The immutable allow-list policy consulted by the sanitizer.
//!
//! A [`Policy`] pairs the element table with the global attribute rules and
//! the validator knobs. It is built once, never mutated, and can be shared by
//! reference (or behind an `Arc`) across any number of threads.

pub(crate) mod table;

use std::collections::{HashMap, HashSet};

use crate::config::PolicyBuilder;
use crate::validate::{Validator, ValidatorOptions};

/// What happens to an element that is not on the allow-list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OnDisallowed {
    /// Drop the element and all of its descendants.
    StripSubtree,
    /// Drop only the tag; children take its place and are sanitized in turn.
    UnwrapKeepChildren,
}

/// Attributes an allowed element may carry, each bound to a validator.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ElementRule {
    attributes: Vec<(String, Validator)>,
}

impl ElementRule {
    pub(crate) fn new(attributes: Vec<(String, Validator)>) -> Self {
        Self { attributes }
    }

    /// The validator bound to `attribute` on this element, if any.
    pub fn validator(&self, attribute: &str) -> Option<Validator> {
        lookup(&self.attributes, attribute)
    }

    /// Iterate over `(attribute, validator)` pairs in table order.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, Validator)> {
        self.attributes.iter().map(|(name, v)| (name.as_str(), *v))
    }
}

/// Resolved decision for one element name.
#[derive(Clone, Copy, Debug)]
pub enum Disposition<'p> {
    Allowed(&'p ElementRule),
    Disallowed(OnDisallowed),
}

/// Immutable aggregate of the element table and the global attribute rules.
///
/// Create the editor policy with [`create_html_policy`] or a custom one with
/// [`PolicyBuilder`](crate::PolicyBuilder).
#[derive(Clone, Debug)]
pub struct Policy {
    elements: HashMap<String, ElementRule>,
    strip: HashSet<String>,
    global: Vec<(String, Validator)>,
    options: ValidatorOptions,
    link_rel: Option<String>,
}

impl Policy {
    pub(crate) fn new(
        elements: HashMap<String, ElementRule>,
        strip: HashSet<String>,
        global: Vec<(String, Validator)>,
        options: ValidatorOptions,
        link_rel: Option<String>,
    ) -> Self {
        Self {
            elements,
            strip,
            global,
            options,
            link_rel,
        }
    }

    /// Decide what to do with an element called `element`.
    ///
    /// Names absent from the table unwrap unless they are listed as
    /// strip-subtree.
    pub fn disposition(&self, element: &str) -> Disposition<'_> {
        if let Some(rule) = self.elements.get(element) {
            Disposition::Allowed(rule)
        } else if self.strip.contains(element) {
            Disposition::Disallowed(OnDisallowed::StripSubtree)
        } else {
            Disposition::Disallowed(OnDisallowed::UnwrapKeepChildren)
        }
    }

    /// The rule for an allowed element.
    pub fn element_rule(&self, element: &str) -> Option<&ElementRule> {
        self.elements.get(element)
    }

    /// Validator for `attribute` on an element governed by `rule`: the
    /// element's own binding first, then the global rules.
    pub fn validator_for(&self, rule: &ElementRule, attribute: &str) -> Option<Validator> {
        rule.validator(attribute).or_else(|| lookup(&self.global, attribute))
    }

    /// Run the attribute decision the sanitizer makes for `element`.
    ///
    /// Returns the value to emit, or `None` when the attribute would be
    /// dropped (including when the element itself is not allowed).
    pub fn check_attribute<'a>(
        &self,
        element: &str,
        attribute: &str,
        value: &'a str,
    ) -> Option<&'a str> {
        let rule = self.element_rule(element)?;
        self.validator_for(rule, attribute)?.check(value, &self.options)
    }

    /// Knobs passed to every validator.
    pub fn options(&self) -> &ValidatorOptions {
        &self.options
    }

    /// `rel` value forced onto links that keep `target="_blank"`, if any.
    pub fn link_rel(&self) -> Option<&str> {
        self.link_rel.as_deref()
    }
}

fn lookup(rules: &[(String, Validator)], attribute: &str) -> Option<Validator> {
    rules
        .iter()
        .find(|(name, _)| name == attribute)
        .map(|(_, v)| *v)
}

/// Build the policy for content produced by the rich-text editor.
///
/// Infallible: the table is constant data, and
/// `PolicyBuilder::new().build()` is what checks it.
pub fn create_html_policy() -> Policy {
    PolicyBuilder::new().assemble()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn editor_elements_are_allowed() {
        let policy = create_html_policy();
        for element in ["p", "blockquote", "h3", "figure", "pre", "code", "table", "td", "img"] {
            assert!(
                matches!(policy.disposition(element), Disposition::Allowed(_)),
                "{element}"
            );
        }
    }

    #[test]
    fn executable_elements_strip_their_subtree() {
        let policy = create_html_policy();
        for element in ["script", "style", "iframe", "object", "embed", "form", "svg"] {
            assert!(
                matches!(
                    policy.disposition(element),
                    Disposition::Disallowed(OnDisallowed::StripSubtree)
                ),
                "{element}"
            );
        }
    }

    #[test]
    fn unknown_elements_unwrap() {
        let policy = create_html_policy();
        for element in ["div", "font", "section", "x-widget"] {
            assert!(matches!(
                policy.disposition(element),
                Disposition::Disallowed(OnDisallowed::UnwrapKeepChildren)
            ));
        }
    }

    #[test]
    fn element_bindings_and_global_rules_both_apply() {
        let policy = create_html_policy();
        assert_eq!(
            policy.check_attribute("pre", "data-language", "go"),
            Some("go")
        );
        assert_eq!(policy.check_attribute("pre", "class", "language-go"), Some("language-go"));
        assert_eq!(policy.check_attribute("p", "data-language", "go"), None);
        assert_eq!(policy.check_attribute("a", "target", "_blank"), Some("_blank"));
        assert_eq!(policy.check_attribute("span", "target", "_blank"), None);
    }

    #[test]
    fn event_handlers_have_no_binding() {
        let policy = create_html_policy();
        for element in ["p", "a", "img", "span"] {
            assert_eq!(policy.check_attribute(element, "onclick", "x"), None);
            assert_eq!(policy.check_attribute(element, "onerror", "x"), None);
        }
    }

    #[test]
    fn attributes_on_disallowed_elements_are_refused() {
        let policy = create_html_policy();
        assert_eq!(policy.check_attribute("div", "class", "ok"), None);
        assert_eq!(policy.check_attribute("script", "src", "/x.js"), None);
    }

    #[test]
    fn element_rule_lists_bindings_in_table_order() {
        let policy = create_html_policy();
        let rule = policy.element_rule("a").unwrap();
        let names: Vec<&str> = rule.attributes().map(|(name, _)| name).collect();
        assert_eq!(names, ["href", "target", "rel"]);
    }
}
