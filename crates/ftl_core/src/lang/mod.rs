//! FreeMarker template vocabulary.
//!
//! This module is the “front door” for language-level words: builtins, directive names, special variables,
//! reserved names and deprecated spellings. Every list is a `const` table so it can be shared without allocation,
//! and [`VOCABULARY`] ties each list to its [`WordCategory`] in classification precedence order.
//!
//! ## Notes
//! - Lists are **case-sensitive** and hold plain identifier spellings (no `?`/`#` prefixes).
//! - The lists overlap (`lt`, `namespace`, `default`). [`VOCABULARY`] order decides which category wins.
//!
//! ## Examples
//! ```rust
//! use ftl_core::lang::{self, WordCategory};
//!
//! assert_eq!(lang::category_of("if"), Some(WordCategory::Directive));
//! assert_eq!(lang::category_of("lt"), Some(WordCategory::Comparison));
//! assert_eq!(lang::category_of("nope"), None);
//! ```

pub mod builtins;
pub mod directives;
pub mod registry;
pub mod reserved;
pub mod special_variables;

pub use registry::{Stability, Vocabulary, WordCategory};

/// All word lists, highest classification precedence first.
///
/// ## Notes
/// - Deprecated names come first so that a deprecated spelling is flagged even where it overlaps a current list.
pub const VOCABULARY: &[Vocabulary] = &[
    Vocabulary::new(WordCategory::DeprecatedDirective, directives::DEPRECATED_DIRECTIVES),
    Vocabulary::new(WordCategory::DeprecatedBuiltin, builtins::DEPRECATED_BUILT_INS),
    Vocabulary::new(WordCategory::ReservedOther, reserved::OTHERS),
    Vocabulary::new(WordCategory::Comparison, reserved::COMPARISONS),
    Vocabulary::new(WordCategory::Boolean, reserved::BOOLEANS),
    Vocabulary::new(WordCategory::SpecialVariable, special_variables::SPECIAL_VARIABLES),
    Vocabulary::new(WordCategory::Directive, directives::DIRECTIVES),
    Vocabulary::new(WordCategory::Builtin, builtins::BUILT_INS),
];

/// Resolve a spelling to the highest-precedence category containing it.
pub fn category_of(word: &str) -> Option<WordCategory> {
    VOCABULARY
        .iter()
        .find(|vocab| vocab.contains(word))
        .map(|vocab| vocab.category)
}

/// Return every category containing `word`, highest precedence first.
///
/// Useful for docs and guardrail tests that need to see overlaps rather than the resolved winner.
pub fn categories_of(word: &str) -> Vec<WordCategory> {
    VOCABULARY
        .iter()
        .filter(|vocab| vocab.contains(word))
        .map(|vocab| vocab.category)
        .collect()
}
