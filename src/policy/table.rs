//! The rich-text editor's element table, as constant data.
//!
//! Adding an element or attribute is a one-line change here; the walker has
//! no per-element branches.

use crate::validate::Validator;

pub(crate) type AttributeRules = &'static [(&'static str, Validator)];

const LINK_TARGETS: &[&str] = &["_blank"];
const LINK_REL: &[&str] = &["noopener", "noreferrer", "nofollow", "ugc"];
const TEXT_DIRECTIONS: &[&str] = &["ltr", "rtl", "auto"];
const HEADER_SCOPES: &[&str] = &["row", "col", "rowgroup", "colgroup"];

const CODE_ATTRIBUTES: AttributeRules = &[
    ("data-language", Validator::Data),
    ("data-highlight-language", Validator::Data),
    ("data-theme", Validator::Data),
];

const CELL_ATTRIBUTES: AttributeRules = &[
    ("colspan", Validator::Number),
    ("rowspan", Validator::Number),
];

const HEADER_CELL_ATTRIBUTES: AttributeRules = &[
    ("colspan", Validator::Number),
    ("rowspan", Validator::Number),
    ("scope", Validator::Enum(HEADER_SCOPES)),
];

/// Attributes checked on every allowed element.
///
/// `data-*` metadata is bound per element in [`ALLOWED_ELEMENTS`]; add a global
/// one with `PolicyBuilder::allow_global_attribute`.
pub(crate) const GLOBAL_ATTRIBUTES: AttributeRules = &[
    ("class", Validator::Class),
    ("style", Validator::Style),
    ("dir", Validator::Enum(TEXT_DIRECTIONS)),
    ("title", Validator::Text),
];

/// Elements the editor emits, with the attributes each may carry.
pub(crate) const ALLOWED_ELEMENTS: &[(&str, AttributeRules)] = &[
    // blocks
    ("p", &[]),
    ("br", &[]),
    ("hr", &[]),
    ("blockquote", &[("cite", Validator::Url)]),
    ("h1", &[]),
    ("h2", &[]),
    ("h3", &[]),
    ("h4", &[]),
    ("h5", &[]),
    ("h6", &[]),
    ("figure", &[]),
    ("figcaption", &[]),
    // lists
    ("ul", &[]),
    ("ol", &[("start", Validator::Number)]),
    ("li", &[("value", Validator::Number)]),
    // inline
    ("strong", &[]),
    ("b", &[]),
    ("em", &[]),
    ("i", &[]),
    ("u", &[]),
    ("s", &[]),
    ("sub", &[]),
    ("sup", &[]),
    ("span", &[]),
    (
        "a",
        &[
            ("href", Validator::Url),
            ("target", Validator::Enum(LINK_TARGETS)),
            ("rel", Validator::Tokens(LINK_REL)),
        ],
    ),
    // code
    ("code", CODE_ATTRIBUTES),
    ("pre", CODE_ATTRIBUTES),
    // tables
    ("table", &[]),
    ("caption", &[]),
    ("colgroup", &[("span", Validator::Number)]),
    ("col", &[("span", Validator::Number)]),
    ("thead", &[]),
    ("tbody", &[]),
    ("tfoot", &[]),
    ("tr", &[]),
    ("th", HEADER_CELL_ATTRIBUTES),
    ("td", CELL_ATTRIBUTES),
    // media
    (
        "img",
        &[
            ("src", Validator::ImageUrl),
            ("alt", Validator::Text),
            ("width", Validator::Number),
            ("height", Validator::Number),
        ],
    ),
];

/// Elements removed together with everything inside them.
pub(crate) const STRIP_SUBTREE: &[&str] = &[
    "script", "style", "iframe", "frame", "frameset", "object", "embed", "applet", "form",
    "noscript", "noembed", "noframes", "template", "textarea", "select", "button", "input",
    "title", "xmp", "svg", "math", "head", "link", "meta", "base",
];

/// Attributes that are never allowed, whatever validator is offered.
pub(crate) const FORBIDDEN_ATTRIBUTES: &[&str] = &["srcdoc", "srcset"];

/// Attributes that hold a URL and must be bound to a URL validator.
pub(crate) const URL_ATTRIBUTES: &[&str] = &[
    "href",
    "src",
    "action",
    "formaction",
    "cite",
    "poster",
    "background",
    "ping",
];
