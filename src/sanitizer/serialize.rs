//! Render a sanitized tree back to an HTML string.

use ego_tree::iter::Edge;
use ego_tree::{NodeRef, Tree};

use super::walk::Clean;

/// HTML5 void elements that must not have a closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Elements whose first newline is eaten by the parser.
const LEADING_NEWLINE_ELEMENTS: &[&str] = &["pre", "listing", "textarea"];

pub(crate) fn serialize_tree(tree: &Tree<Clean<'_>>) -> String {
    let mut out = String::new();
    for edge in tree.root().traverse() {
        match edge {
            Edge::Open(node) => match node.value() {
                Clean::Element { name, attrs } => {
                    out.push('<');
                    out.push_str(name);
                    for (k, v) in attrs {
                        out.push(' ');
                        out.push_str(k);
                        out.push_str("=\"");
                        escape_attribute(v, &mut out);
                        out.push('"');
                    }
                    out.push('>');

                    if is_one_of(name, LEADING_NEWLINE_ELEMENTS) && starts_with_newline(node) {
                        out.push('\n');
                    }
                }
                Clean::Text(text) => escape_text(text, &mut out),
                Clean::Fragment => {}
            },
            Edge::Close(node) => {
                if let Clean::Element { name, .. } = node.value() {
                    if !is_one_of(name, VOID_ELEMENTS) {
                        out.push_str("</");
                        out.push_str(name);
                        out.push('>');
                    }
                }
            }
        }
    }
    out
}

fn is_one_of(name: &str, names: &[&str]) -> bool {
    names.iter().any(|n| *n == name)
}

fn starts_with_newline(node: NodeRef<'_, Clean<'_>>) -> bool {
    node.first_child()
        .is_some_and(|c| matches!(c.value(), Clean::Text(t) if t.starts_with('\n')))
}

fn escape_text(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
}

fn escape_attribute(value: &str, out: &mut String) {
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::borrow::Cow;

    use super::*;

    fn element<'a>(name: &'a str, attrs: &[(&'a str, &'a str)]) -> Clean<'a> {
        Clean::Element {
            name,
            attrs: attrs
                .iter()
                .map(|(k, v)| (*k, Cow::Borrowed(*v)))
                .collect(),
        }
    }

    #[test]
    fn escapes_text_and_attributes() {
        let mut tree = Tree::new(Clean::Fragment);
        tree.root_mut()
            .append(element("a", &[("title", r#"a "b" & <c>"#)]))
            .append(Clean::Text("1 < 2 & \"3\""));
        assert_eq!(
            serialize_tree(&tree),
            r#"<a title="a &quot;b&quot; &amp; &lt;c&gt;">1 &lt; 2 &amp; "3"</a>"#
        );
    }

    #[test]
    fn void_elements_have_no_closing_tag() {
        let mut tree = Tree::new(Clean::Fragment);
        let mut root = tree.root_mut();
        root.append(element("img", &[("src", "/a.png"), ("alt", "a")]));
        root.append(element("br", &[]));
        assert_eq!(serialize_tree(&tree), r#"<img src="/a.png" alt="a"><br>"#);
    }

    #[test]
    fn pre_keeps_leading_newline() {
        let mut tree = Tree::new(Clean::Fragment);
        tree.root_mut()
            .append(element("pre", &[]))
            .append(Clean::Text("\nfn main() {}"));
        assert_eq!(serialize_tree(&tree), "<pre>\n\nfn main() {}</pre>");
    }

    #[test]
    fn nested_elements_close_in_order() {
        let mut tree = Tree::new(Clean::Fragment);
        let mut root = tree.root_mut();
        let mut p = root.append(element("p", &[]));
        p.append(element("em", &[])).append(Clean::Text("x"));
        p.append(Clean::Text("y"));
        assert_eq!(serialize_tree(&tree), "<p><em>x</em>y</p>");
    }
}
