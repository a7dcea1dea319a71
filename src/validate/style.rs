//! Inline `style` attribute validation.
//!
//! The value is split into `property: value` declarations. Every declaration
//! must name an allow-listed presentational property and carry a value from
//! that property's grammar; one failure drops the whole attribute. Accepted
//! values are returned untouched, spacing included.

use std::sync::LazyLock;

use regex::Regex;

static COLOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?i)^(?:",
        r"#(?:[0-9a-f]{3,4}|[0-9a-f]{6}|[0-9a-f]{8})",
        r"|rgba?\(\s*(?:\d{1,3}(?:\.\d+)?%?\s*,\s*){2}\d{1,3}(?:\.\d+)?%?\s*",
        r"(?:,\s*(?:\d(?:\.\d+)?|\.\d+|\d{1,3}%)\s*)?\)",
        r"|transparent|currentcolor|inherit",
        r"|black|white|gray|grey|silver|red|maroon|orange|yellow|olive",
        r"|lime|green|teal|aqua|cyan|blue|navy|fuchsia|magenta|purple",
        r")$",
    ))
    .expect("invalid regex pattern")
});

static LENGTH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:0|\d{1,4}(?:\.\d{1,4})?(?:px|em|rem|%|pt))$")
        .expect("invalid regex pattern")
});

static FONT_FAMILY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9 ,_-]{1,128}$").expect("invalid regex pattern"));

/// Substrings that reject the attribute no matter where they appear.
const FORBIDDEN: &[&str] = &[
    "url(",
    "expression(",
    "javascript:",
    "@import",
    "/*",
    "\\",
    "\"",
    "'",
    "<",
    ">",
];

const MAX_STYLE_LEN: usize = 1024;

enum Grammar {
    Color,
    Length,
    FontSize,
    FontFamily,
    TextDecoration,
    Keywords(&'static [&'static str]),
}

const FONT_SIZE_KEYWORDS: &[&str] = &[
    "xx-small", "x-small", "small", "medium", "large", "x-large", "xx-large", "smaller", "larger",
];

const TEXT_DECORATION_LINES: &[&str] = &["none", "underline", "line-through", "overline"];

const PROPERTIES: &[(&str, Grammar)] = &[
    ("color", Grammar::Color),
    ("background-color", Grammar::Color),
    ("font-size", Grammar::FontSize),
    ("font-family", Grammar::FontFamily),
    (
        "font-weight",
        Grammar::Keywords(&[
            "normal", "bold", "bolder", "lighter", "100", "200", "300", "400", "500", "600",
            "700", "800", "900",
        ]),
    ),
    (
        "font-style",
        Grammar::Keywords(&["normal", "italic", "oblique"]),
    ),
    (
        "text-align",
        Grammar::Keywords(&["left", "right", "center", "justify", "start", "end"]),
    ),
    ("text-decoration", Grammar::TextDecoration),
    (
        "white-space",
        Grammar::Keywords(&[
            "normal", "nowrap", "pre", "pre-wrap", "pre-line", "break-spaces",
        ]),
    ),
    (
        "vertical-align",
        Grammar::Keywords(&[
            "baseline", "sub", "super", "top", "middle", "bottom", "text-top", "text-bottom",
        ]),
    ),
    ("text-indent", Grammar::Length),
    ("padding-inline-start", Grammar::Length),
    ("width", Grammar::Length),
    ("height", Grammar::Length),
    ("max-width", Grammar::Length),
    ("border-radius", Grammar::Length),
];

impl Grammar {
    fn accepts(&self, value: &str) -> bool {
        match self {
            Grammar::Color => COLOR.is_match(value),
            Grammar::Length => LENGTH.is_match(value),
            Grammar::FontSize => LENGTH.is_match(value) || is_keyword(value, FONT_SIZE_KEYWORDS),
            Grammar::FontFamily => FONT_FAMILY.is_match(value),
            Grammar::TextDecoration => {
                let mut lines = value.split_ascii_whitespace().peekable();
                lines.peek().is_some() && lines.all(|l| is_keyword(l, TEXT_DECORATION_LINES))
            }
            Grammar::Keywords(keywords) => is_keyword(value, keywords),
        }
    }
}

fn is_keyword(value: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| k.eq_ignore_ascii_case(value))
}

/// Accept a `style` value only if every declaration is allow-listed.
pub fn validate_style(value: &str) -> Option<&str> {
    if value.len() > MAX_STYLE_LEN {
        return None;
    }
    let lower = value.to_ascii_lowercase();
    if FORBIDDEN.iter().any(|f| lower.contains(f)) {
        return None;
    }

    let mut declarations = 0;
    for declaration in value.split(';') {
        if declaration.trim().is_empty() {
            continue;
        }
        let (property, property_value) = declaration.split_once(':')?;
        let property = property.trim();
        let (_, grammar) = PROPERTIES
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(property))?;
        if !grammar.accepts(property_value.trim()) {
            return None;
        }
        declarations += 1;
    }

    (declarations > 0).then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_compact_declarations() {
        let style = "color:#ff0000;font-size:16px";
        assert_eq!(validate_style(style), Some(style));
    }

    #[test]
    fn keeps_editor_spacing_byte_for_byte() {
        for style in [
            "color: rgb(239, 68, 68); font-size: 16px;",
            "color: rgb(59, 130, 246);",
            "background-color: rgba(0, 0, 0, 0.5); white-space: pre-wrap;",
            "  text-align : center ;  ",
        ] {
            assert_eq!(validate_style(style), Some(style));
        }
    }

    #[test]
    fn accepts_property_grammars() {
        for style in [
            "color: #abc",
            "color: #AABBCCDD",
            "color: Red",
            "font-weight: 700",
            "font-weight: bold",
            "font-style: italic",
            "font-family: Arial, sans-serif",
            "font-size: 1.25em",
            "font-size: x-large",
            "text-decoration: underline line-through",
            "vertical-align: super",
            "max-width: 100%",
            "width: 0",
            "COLOR: blue",
        ] {
            assert_eq!(validate_style(style), Some(style), "{style:?}");
        }
    }

    #[test]
    fn url_expressions_drop_whole_attribute() {
        assert_eq!(
            validate_style("background-image:url(javascript:alert(1))"),
            None
        );
        assert_eq!(
            validate_style("color: red; background: URL(/x.png)"),
            None
        );
        assert_eq!(validate_style("width: expression(alert(1))"), None);
    }

    #[test]
    fn one_bad_declaration_drops_everything() {
        assert_eq!(validate_style("color: red; position: fixed"), None);
        assert_eq!(validate_style("color: red; font-size: huge"), None);
        assert_eq!(validate_style("color: red; font-size"), None);
        assert_eq!(validate_style("color: red !important"), None);
    }

    #[test]
    fn rejects_escapes_comments_and_quotes() {
        assert_eq!(validate_style("color: re\\64"), None);
        assert_eq!(validate_style("color: red/**/"), None);
        assert_eq!(validate_style("font-family: \"Comic Sans\""), None);
        assert_eq!(validate_style("color: red\"><script>"), None);
    }

    #[test]
    fn channels_must_be_numeric() {
        assert_eq!(validate_style("color: rgb(1, 2, 3)"), Some("color: rgb(1, 2, 3)"));
        assert_eq!(validate_style("color: rgb(a, 2, 3)"), None);
        assert_eq!(validate_style("color: rgb(1, 2)"), None);
    }

    #[test]
    fn empty_style_is_dropped() {
        assert_eq!(validate_style(""), None);
        assert_eq!(validate_style(" ; ;"), None);
    }
}
