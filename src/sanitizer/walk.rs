//! Single-pass tree walk that applies a [`Policy`] to a parsed document.

use std::borrow::Cow;

use ego_tree::{NodeId, NodeRef, Tree};
use scraper::node::{Element, Node};
use scraper::Html;

use super::SanitizeReport;
use crate::policy::{Disposition, ElementRule, OnDisallowed, Policy};

/// A node that survived sanitization. Borrows from the parsed document.
pub(crate) enum Clean<'a> {
    Fragment,
    Element {
        name: &'a str,
        attrs: Vec<(&'a str, Cow<'a, str>)>,
    },
    Text(&'a str),
}

/// Walk `document` depth-first, pre-order, building the sanitized tree.
///
/// Uses an explicit stack so nesting depth is bounded by memory rather than
/// by the call stack. Children of an unwrapped element are re-parented onto
/// the unwrapped element's parent and still go through their own rules.
pub(crate) fn clean_tree<'a>(
    policy: &Policy,
    document: &'a Html,
    report: &mut SanitizeReport,
) -> Tree<Clean<'a>> {
    let mut tree = Tree::new(Clean::Fragment);
    let root = tree.root().id();

    // parse_fragment wraps the content in a synthetic <html> element
    let Some(container) = document
        .tree
        .root()
        .children()
        .find(|n| n.value().is_element())
    else {
        return tree;
    };

    let mut stack: Vec<(NodeRef<'a, Node>, NodeId)> =
        container.children().rev().map(|c| (c, root)).collect();

    while let Some((node, parent)) = stack.pop() {
        match node.value() {
            Node::Text(text) => {
                append(&mut tree, parent, Clean::Text(&**text));
            }
            Node::Comment(_) => report.dropped_comments += 1,
            Node::Element(element) => {
                let name = element.name();
                match policy.disposition(name) {
                    Disposition::Allowed(rule) => {
                        let attrs = clean_attributes(policy, rule, element, report);
                        let kept = append(&mut tree, parent, Clean::Element { name, attrs });
                        if let Some(id) = kept {
                            stack.extend(node.children().rev().map(|c| (c, id)));
                        }
                    }
                    Disposition::Disallowed(OnDisallowed::StripSubtree) => {
                        tracing::trace!(element = name, "Stripped element subtree");
                        report.stripped_elements += 1;
                    }
                    Disposition::Disallowed(OnDisallowed::UnwrapKeepChildren) => {
                        tracing::trace!(element = name, "Unwrapped element");
                        report.unwrapped_elements += 1;
                        stack.extend(node.children().rev().map(|c| (c, parent)));
                    }
                }
            }
            // doctypes and processing instructions carry nothing worth keeping
            _ => {}
        }
    }

    tree
}

fn append<'a>(tree: &mut Tree<Clean<'a>>, parent: NodeId, value: Clean<'a>) -> Option<NodeId> {
    tree.get_mut(parent).map(|mut p| p.append(value).id())
}

/// Keep the attributes whose validator accepts them, in source order.
fn clean_attributes<'a>(
    policy: &Policy,
    rule: &ElementRule,
    element: &'a Element,
    report: &mut SanitizeReport,
) -> Vec<(&'a str, Cow<'a, str>)> {
    let mut attrs = Vec::new();
    for (name, value) in element.attrs() {
        let accepted = policy
            .validator_for(rule, name)
            .and_then(|v| v.check(value, policy.options()));
        match accepted {
            Some(value) => attrs.push((name, Cow::Borrowed(value))),
            None => {
                tracing::trace!(
                    element = element.name(),
                    attribute = name,
                    "Dropped attribute"
                );
                report.dropped_attributes += 1;
            }
        }
    }

    if let Some(rel) = policy.link_rel() {
        force_link_rel(&mut attrs, rel);
    }
    attrs
}

/// Replace (or add) `rel` when the element keeps `target="_blank"`.
fn force_link_rel<'a>(attrs: &mut Vec<(&'a str, Cow<'a, str>)>, rel: &str) {
    let opens_new_context = attrs
        .iter()
        .any(|(name, value)| *name == "target" && value == "_blank");
    if !opens_new_context {
        return;
    }
    let rel = Cow::Owned(rel.to_string());
    match attrs.iter_mut().find(|(name, _)| *name == "rel") {
        Some((_, value)) => *value = rel,
        None => attrs.push(("rel", rel)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forces_rel_only_for_blank_targets() {
        let mut attrs = vec![("href", Cow::Borrowed("/x")), ("target", Cow::Borrowed("_blank"))];
        force_link_rel(&mut attrs, "noopener");
        assert_eq!(attrs.last().unwrap(), &("rel", Cow::Borrowed("noopener")));

        let mut attrs = vec![("href", Cow::Borrowed("/x"))];
        force_link_rel(&mut attrs, "noopener");
        assert_eq!(attrs.len(), 1);
    }

    #[test]
    fn forced_rel_replaces_in_place() {
        let mut attrs = vec![
            ("rel", Cow::Borrowed("nofollow")),
            ("target", Cow::Borrowed("_blank")),
        ];
        force_link_rel(&mut attrs, "noopener noreferrer");
        assert_eq!(attrs[0], ("rel", Cow::Borrowed("noopener noreferrer")));
        assert_eq!(attrs.len(), 2);
    }
}
