//! Shareable metadata for the `ftl_core::lang` word lists.
//!
//! ## Notes
//! - These types are `Copy` so the lists can live in `const` tables.
//! - Metadata is meant for classification and tooling; syntax rules live in `ftl_syntax`.

use crate::Kind;

/// Describe the lifecycle status of a vocabulary item.
///
/// ## Examples
/// ```rust
/// use ftl_core::lang::Stability;
///
/// let s = Stability::Deprecated;
/// assert_eq!(format!("{s:?}"), "Deprecated");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stability {
    Stable,
    Deprecated,
}

/// Semantic category of a template word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WordCategory {
    /// Builtins applied with `?`, e.g. `name?upper_case`.
    Builtin,
    /// Directive names following `<#` / `[#`.
    Directive,
    /// Implicitly scoped variables, e.g. `.now`.
    SpecialVariable,
    Boolean,
    /// Word spellings of comparison operators.
    Comparison,
    /// Remaining reserved connectives (`as`, `in`, `using`).
    ReservedOther,
    DeprecatedDirective,
    DeprecatedBuiltin,
}

impl WordCategory {
    /// Token kind reported for words in this category.
    pub const fn kind(self) -> Kind {
        match self {
            WordCategory::Builtin => Kind::SUPPORT_FUNCTION,
            WordCategory::Directive => Kind::TAG_NAME,
            WordCategory::SpecialVariable => Kind::VARIABLE_LANGUAGE,
            WordCategory::Boolean => Kind::BOOLEAN,
            WordCategory::Comparison => Kind::COMPARISON,
            WordCategory::ReservedOther => Kind::KEYWORD_OTHER,
            WordCategory::DeprecatedDirective | WordCategory::DeprecatedBuiltin => Kind::DEPRECATED,
        }
    }

    pub const fn stability(self) -> Stability {
        match self {
            WordCategory::DeprecatedDirective | WordCategory::DeprecatedBuiltin => Stability::Deprecated,
            _ => Stability::Stable,
        }
    }

    /// Short human-readable label (for docs and CLI output).
    pub const fn label(self) -> &'static str {
        match self {
            WordCategory::Builtin => "builtin",
            WordCategory::Directive => "directive",
            WordCategory::SpecialVariable => "special variable",
            WordCategory::Boolean => "boolean",
            WordCategory::Comparison => "comparison",
            WordCategory::ReservedOther => "reserved",
            WordCategory::DeprecatedDirective => "deprecated directive",
            WordCategory::DeprecatedBuiltin => "deprecated builtin",
        }
    }
}

/// One word list bound to its category.
#[derive(Debug, Clone, Copy)]
pub struct Vocabulary {
    pub category: WordCategory,
    pub words: &'static [&'static str],
}

impl Vocabulary {
    pub const fn new(category: WordCategory, words: &'static [&'static str]) -> Self {
        Self { category, words }
    }

    /// Case-sensitive membership check.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(&word)
    }
}
