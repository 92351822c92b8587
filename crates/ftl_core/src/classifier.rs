//! Keyword classification for identifier-shaped tokens.
//!
//! The pattern layer only knows that some text *looks like* an identifier. A [`Classifier`] decides what the
//! identifier *means*: a builtin, a directive name, a deprecated spelling, or just a plain identifier.
//!
//! ## Notes
//! - Lookup is a single hash probe; precedence is resolved once, when the classifier is built.
//! - Categories registered earlier win over later ones. [`Classifier::freemarker`] registers deprecated names first.
//! - Classification is case-sensitive; no normalization is applied.
//!
//! ## Examples
//! ```rust
//! use ftl_core::{Classifier, Kind};
//!
//! let custom = Classifier::new(Kind::IDENTIFIER)
//!     .with_category(Kind::DEPRECATED, &["old"])
//!     .with_category(Kind::SUPPORT_FUNCTION, &["old", "new"]);
//!
//! assert_eq!(custom.classify("old"), Kind::DEPRECATED);
//! assert_eq!(custom.classify("new"), Kind::SUPPORT_FUNCTION);
//! assert_eq!(custom.classify("Old"), Kind::IDENTIFIER);
//! ```

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use crate::Kind;
use crate::lang::VOCABULARY;

/// Map from exact identifier spelling to a semantic [`Kind`], with a fallback for unknown words.
#[derive(Debug, Clone)]
pub struct Classifier {
    words: HashMap<String, Kind>,
    fallback: Kind,
}

impl Classifier {
    /// Create an empty classifier that reports `fallback` for every word.
    pub fn new(fallback: Kind) -> Self {
        Self {
            words: HashMap::new(),
            fallback,
        }
    }

    /// Register a category. Words already claimed by an earlier category keep their kind.
    pub fn with_category<S: AsRef<str>>(mut self, kind: Kind, words: &[S]) -> Self {
        for word in words {
            if let Entry::Vacant(slot) = self.words.entry(word.as_ref().to_string()) {
                slot.insert(kind.clone());
            }
        }
        self
    }

    /// The FreeMarker classifier built from [`crate::lang::VOCABULARY`], falling back to [`Kind::IDENTIFIER`].
    pub fn freemarker() -> Self {
        VOCABULARY.iter().fold(Self::new(Kind::IDENTIFIER), |classifier, vocab| {
            classifier.with_category(vocab.category.kind(), vocab.words)
        })
    }

    /// Classify an identifier spelling.
    pub fn classify(&self, word: &str) -> Kind {
        self.words.get(word).unwrap_or(&self.fallback).clone()
    }

    /// Return the kind for `word` only if some category claims it.
    pub fn lookup(&self, word: &str) -> Option<&Kind> {
        self.words.get(word)
    }

    pub fn fallback(&self) -> &Kind {
        &self.fallback
    }

    /// Number of distinct spellings known to this classifier.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::freemarker()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directive_names() {
        let c = Classifier::freemarker();
        assert_eq!(c.classify("if"), Kind::TAG_NAME);
        assert_eq!(c.classify("list"), Kind::TAG_NAME);
        assert_eq!(c.classify("macro"), Kind::TAG_NAME);
    }

    #[test]
    fn test_builtins_and_special_variables() {
        let c = Classifier::freemarker();
        assert_eq!(c.classify("upper_case"), Kind::SUPPORT_FUNCTION);
        assert_eq!(c.classify("has_content"), Kind::SUPPORT_FUNCTION);
        assert_eq!(c.classify("now"), Kind::VARIABLE_LANGUAGE);
    }

    #[test]
    fn test_reserved_words() {
        let c = Classifier::freemarker();
        assert_eq!(c.classify("true"), Kind::BOOLEAN);
        assert_eq!(c.classify("false"), Kind::BOOLEAN);
        assert_eq!(c.classify("gte"), Kind::COMPARISON);
        assert_eq!(c.classify("as"), Kind::KEYWORD_OTHER);
        assert_eq!(c.classify("using"), Kind::KEYWORD_OTHER);
    }

    #[test]
    fn test_deprecated_names() {
        let c = Classifier::freemarker();
        assert_eq!(c.classify("foreach"), Kind::DEPRECATED);
        assert_eq!(c.classify("web_safe"), Kind::DEPRECATED);
    }

    #[test]
    fn test_overlapping_lists_resolve_by_precedence() {
        let c = Classifier::freemarker();
        // directive + deprecated builtin
        assert_eq!(c.classify("default"), Kind::DEPRECATED);
        // directive + comparison
        assert_eq!(c.classify("lt"), Kind::COMPARISON);
        // builtin + special variable
        assert_eq!(c.classify("namespace"), Kind::VARIABLE_LANGUAGE);
    }

    #[test]
    fn test_unknown_and_case_sensitive() {
        let c = Classifier::freemarker();
        assert_eq!(c.classify("name"), Kind::IDENTIFIER);
        assert_eq!(c.classify("If"), Kind::IDENTIFIER);
        assert_eq!(c.classify("TRUE"), Kind::IDENTIFIER);
        assert!(c.lookup("name").is_none());
    }

    #[test]
    fn test_synthetic_overlap_deprecated_wins() {
        let c = Classifier::new(Kind::IDENTIFIER)
            .with_category(Kind::DEPRECATED, &["size", "legacy"])
            .with_category(Kind::SUPPORT_FUNCTION, &["size", "length"])
            .with_category(Kind::TAG_NAME, &["legacy"]);

        assert_eq!(c.classify("size"), Kind::DEPRECATED);
        assert_eq!(c.classify("legacy"), Kind::DEPRECATED);
        assert_eq!(c.classify("length"), Kind::SUPPORT_FUNCTION);
        assert_eq!(c.len(), 3);
    }

    #[test]
    fn test_custom_fallback() {
        let c = Classifier::new(Kind::TEXT);
        assert!(c.is_empty());
        assert_eq!(c.classify("anything"), Kind::TEXT);
        assert_eq!(c.fallback(), &Kind::TEXT);
    }
}
