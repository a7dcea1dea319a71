//! Builder for configuring a custom [`Policy`].

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{PolicyError, Result};
use crate::policy::table::{
    ALLOWED_ELEMENTS, FORBIDDEN_ATTRIBUTES, GLOBAL_ATTRIBUTES, STRIP_SUBTREE, URL_ATTRIBUTES,
};
use crate::policy::{ElementRule, Policy};
use crate::validate::{Validator, ValidatorOptions};

static HTML_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z][a-z0-9]*(?:-[a-z0-9]+)*$").expect("invalid regex pattern")
});

static REL_VALUE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z]+(?: [a-z]+)*$").expect("invalid regex pattern"));

/// Builder for a [`Policy`].
///
/// Starts from the editor table (or from nothing, with [`empty`](Self::empty))
/// and exposes the policy knobs that the editor table leaves off.
///
/// # Example
///
/// ```
/// use rich_html_policy::{PolicyBuilder, Validator};
///
/// let comments = PolicyBuilder::empty()
///     .allow_element("p", &[])
///     .allow_element("a", &[("href", Validator::Url)])
///     .link_rel(Some("noopener noreferrer"))
///     .build()
///     .unwrap();
///
/// let out = comments.sanitize(r#"<p><a href="/x" onclick="y()">x</a> <img src="/i.png"></p>"#);
/// assert_eq!(out, r#"<p><a href="/x">x</a> </p>"#);
/// ```
pub struct PolicyBuilder {
    elements: Vec<(String, Vec<(String, Validator)>)>,
    strip: Vec<String>,
    global: Vec<(String, Validator)>,
    options: ValidatorOptions,
    link_rel: Option<String>,
}

impl PolicyBuilder {
    /// Create a builder holding the rich-text editor table.
    ///
    /// Defaults: no `data:` images, no forced `rel`, data values up to 64
    /// bytes, text values up to 512 chars.
    pub fn new() -> Self {
        Self {
            elements: ALLOWED_ELEMENTS
                .iter()
                .map(|(name, attrs)| (name.to_string(), owned(attrs)))
                .collect(),
            global: owned(GLOBAL_ATTRIBUTES),
            ..Self::empty()
        }
    }

    /// Create a builder that allows nothing and still strips executable elements.
    pub fn empty() -> Self {
        Self {
            elements: Vec::new(),
            strip: STRIP_SUBTREE.iter().map(|s| s.to_string()).collect(),
            global: Vec::new(),
            options: ValidatorOptions::default(),
            link_rel: None,
        }
    }

    /// Allow `element`, adding `attributes` to any it already allows.
    pub fn allow_element(mut self, element: &str, attributes: &[(&str, Validator)]) -> Self {
        let added = attributes.iter().map(|(n, v)| (n.to_string(), *v));
        match self.elements.iter_mut().find(|(name, _)| name == element) {
            Some((_, existing)) => {
                for (name, validator) in added {
                    existing.retain(|(n, _)| *n != name);
                    existing.push((name, validator));
                }
            }
            None => self.elements.push((element.to_string(), added.collect())),
        }
        self
    }

    /// Check `attribute` with `validator` on every allowed element.
    pub fn allow_global_attribute(mut self, attribute: &str, validator: Validator) -> Self {
        self.global.retain(|(n, _)| n != attribute);
        self.global.push((attribute.to_string(), validator));
        self
    }

    /// Stop allowing `element`; it unwraps from now on.
    pub fn deny_element(mut self, element: &str) -> Self {
        self.elements.retain(|(name, _)| name != element);
        self
    }

    /// Remove `element` together with its content.
    pub fn strip_element(mut self, element: &str) -> Self {
        self.elements.retain(|(name, _)| name != element);
        if !self.strip.iter().any(|s| s == element) {
            self.strip.push(element.to_string());
        }
        self
    }

    /// Accept raster `data:image/*` URLs in image sources.
    pub fn allow_data_images(mut self, allow: bool) -> Self {
        self.options.allow_data_images = allow;
        self
    }

    /// Longest accepted `data-*` value, in bytes.
    pub fn max_data_len(mut self, len: usize) -> Self {
        self.options.max_data_len = len;
        self
    }

    /// Longest accepted free-text value (`alt`, `title`), in chars.
    pub fn max_text_len(mut self, len: usize) -> Self {
        self.options.max_text_len = len;
        self
    }

    /// Force this `rel` onto every element that keeps `target="_blank"`.
    pub fn link_rel(mut self, rel: Option<&str>) -> Self {
        self.link_rel = rel.map(str::to_string);
        self
    }

    /// Validate the configuration and produce the [`Policy`].
    pub fn build(self) -> Result<Policy> {
        self.validate()?;
        Ok(self.assemble())
    }

    pub(crate) fn assemble(self) -> Policy {
        let elements: HashMap<String, ElementRule> = self
            .elements
            .into_iter()
            .map(|(name, attrs)| (name, ElementRule::new(attrs)))
            .collect();
        let strip: HashSet<String> = self.strip.into_iter().collect();
        Policy::new(elements, strip, self.global, self.options, self.link_rel)
    }

    fn validate(&self) -> Result<()> {
        for (element, attributes) in &self.elements {
            check_name(element)?;
            if self.strip.contains(element) {
                tracing::warn!("Refusing to allow strip-subtree element <{element}>");
                return Err(PolicyError::DangerousElement(element.clone()));
            }
            for (attribute, validator) in attributes {
                check_attribute(element, attribute, *validator)?;
            }
        }
        for element in &self.strip {
            check_name(element)?;
        }
        for (attribute, validator) in &self.global {
            check_attribute("*", attribute, *validator)?;
        }

        if let Some(rel) = &self.link_rel {
            if !REL_VALUE.is_match(rel) {
                return Err(PolicyError::Config(format!("invalid link rel {rel:?}")));
            }
        }
        if self.options.max_data_len == 0 || self.options.max_text_len == 0 {
            return Err(PolicyError::Config(
                "length limits must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}

impl Default for PolicyBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn owned(rules: &[(&str, Validator)]) -> Vec<(String, Validator)> {
    rules.iter().map(|(n, v)| (n.to_string(), *v)).collect()
}

fn check_name(name: &str) -> Result<()> {
    if HTML_NAME.is_match(name) {
        Ok(())
    } else {
        Err(PolicyError::InvalidName(name.to_string()))
    }
}

fn check_attribute(element: &str, attribute: &str, validator: Validator) -> Result<()> {
    check_name(attribute)?;
    let unsafe_rule = attribute.starts_with("on")
        || FORBIDDEN_ATTRIBUTES.iter().any(|a| *a == attribute)
        || (URL_ATTRIBUTES.iter().any(|a| *a == attribute) && !validator.checks_url())
        || (attribute == "style" && validator != Validator::Style);
    if unsafe_rule {
        tracing::warn!("Refusing attribute rule <{element}> {attribute} ({validator:?})");
        return Err(PolicyError::UnsafeAttribute {
            element: element.to_string(),
            attribute: attribute.to_string(),
        });
    }
    Ok(())
}
