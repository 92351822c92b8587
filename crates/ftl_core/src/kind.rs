//! Token kinds: dot-namespaced semantic tags such as `keyword.operator.comparison`.
//!
//! A kind is an open set. The template layer uses the constants below, but a host markup grammar is free to
//! introduce its own tags, so [`Kind`] wraps a string rather than an enum.
//!
//! ## Notes
//! - Scopes are compared segment-wise: `keyword.operator` is a scope of `keyword.operator.comparison`, but
//!   `keyword.op` is not.

use std::borrow::Cow;
use std::fmt;

/// A dot-namespaced semantic tag attached to a token.
///
/// ## Examples
/// ```rust
/// use ftl_core::Kind;
///
/// let kind = Kind::COMPARISON;
/// assert_eq!(kind.as_str(), "keyword.operator.comparison");
/// assert!(kind.has_scope("keyword.operator"));
/// assert!(!kind.has_scope("keyword.op"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Kind(Cow<'static, str>);

impl Kind {
    // ========== Generic ==========
    pub const TEXT: Kind = Kind::from_static("text");
    pub const INVALID: Kind = Kind::from_static("invalid");
    pub const IDENTIFIER: Kind = Kind::from_static("identifier");

    // ========== Classified words ==========
    pub const SUPPORT_FUNCTION: Kind = Kind::from_static("support.function");
    pub const TAG_NAME: Kind = Kind::from_static("meta.tag.tag-name");
    pub const VARIABLE_LANGUAGE: Kind = Kind::from_static("variable.language");
    pub const BOOLEAN: Kind = Kind::from_static("constant.language.boolean");
    pub const COMPARISON: Kind = Kind::from_static("keyword.operator.comparison");
    pub const KEYWORD_OTHER: Kind = Kind::from_static("keyword.other");
    pub const DEPRECATED: Kind = Kind::from_static("invalid.deprecated");

    // ========== Expression syntax ==========
    pub const NUMERIC: Kind = Kind::from_static("constant.numeric");
    pub const ASSIGNMENT: Kind = Kind::from_static("keyword.operator.assignment");
    pub const ARITHMETIC: Kind = Kind::from_static("keyword.operator.arithmetic");
    pub const LOGICAL: Kind = Kind::from_static("keyword.operator.logical");
    pub const OPERATOR_OTHER: Kind = Kind::from_static("keyword.operator.other");
    pub const PUNCTUATION_OPERATOR: Kind = Kind::from_static("punctuation.operator");
    pub const LPAREN: Kind = Kind::from_static("paren.lparen");
    pub const RPAREN: Kind = Kind::from_static("paren.rparen");

    // ========== Strings ==========
    pub const STRING: Kind = Kind::from_static("string");
    pub const ESCAPE: Kind = Kind::from_static("constant.language.escape");

    // ========== Template delimiters ==========
    pub const COMMENT_BLOCK: Kind = Kind::from_static("comment.block.freemarker");
    pub const TAG_OPEN: Kind = Kind::from_static("meta.tag.ftl");
    pub const TAG_CLOSE: Kind = Kind::from_static("meta.tag.r.ftl");
    pub const DIRECTIVE_SIGIL: Kind = Kind::from_static("punctuation.definition.function.ftl");
    pub const INTERPOLATION: Kind = Kind::from_static("variable.other.readwrite.local.ftl");

    /// Create a kind from a static spelling (usable in `const` contexts).
    pub const fn from_static(tag: &'static str) -> Self {
        Kind(Cow::Borrowed(tag))
    }

    /// Create a kind from any spelling.
    pub fn new(tag: impl Into<Cow<'static, str>>) -> Self {
        Kind(tag.into())
    }

    /// Return the full dot-namespaced tag.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Iterate the dot-separated segments, outermost scope first.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('.')
    }

    /// Return `true` if `scope` equals this kind or is a segment-aligned prefix of it.
    pub fn has_scope(&self, scope: &str) -> bool {
        match self.0.strip_prefix(scope) {
            Some(rest) => rest.is_empty() || rest.starts_with('.'),
            None => false,
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for Kind {
    fn from(tag: &'static str) -> Self {
        Kind::from_static(tag)
    }
}

impl From<String> for Kind {
    fn from(tag: String) -> Self {
        Kind(Cow::Owned(tag))
    }
}

impl AsRef<str> for Kind {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}
