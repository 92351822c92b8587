//! Rules shared by every template expression context (directive arguments and interpolations).

use std::sync::Arc;

use ftl_core::{Classifier, Kind};

use crate::diagnostics::GrammarError;
use crate::rule::Rule;

/// Identifier shape handed to the keyword classifier.
///
/// Word boundaries and digit classes are ASCII-only: `aé` lexes as the identifier `a` followed by `é`.
pub const IDENTIFIER_PATTERN: &str = r"[a-zA-Z_$][a-zA-Z0-9_$]*(?-u:\b)";

/// Expression rules, in priority order.
///
/// ## Notes
/// - Numbers come before identifiers and arithmetic, so `-1` is one numeric token.
/// - Two-character comparisons are listed before their one-character prefixes.
pub fn expression_rules(classifier: &Arc<Classifier>) -> Result<Vec<Rule>, GrammarError> {
    Ok(vec![
        // hex
        Rule::token(Kind::NUMERIC, r"0[xX][0-9a-fA-F]+(?-u:\b)")?,
        // int / float
        Rule::token(Kind::NUMERIC, r"[+-]?[0-9]+(?:(?:\.[0-9]*)?(?:[eE][+-]?[0-9]+)?)?(?-u:\b)")?,
        Rule::classify(Arc::clone(classifier), IDENTIFIER_PATTERN)?,
        Rule::token(Kind::COMPARISON, r"==|!=|>=|<=|<|>|&lt;|&gt;|\?lte?|\?gte?")?,
        Rule::token(Kind::ASSIGNMENT, "=")?,
        Rule::token(Kind::ARITHMETIC, r"\+|-|/|%|\*")?,
        Rule::token(Kind::LOGICAL, r"\|\||&&|!")?,
        Rule::token(Kind::OPERATOR_OTHER, r"\.\.|\|")?,
        Rule::token(Kind::PUNCTUATION_OPERATOR, r"[?:,;.]")?,
        Rule::token(Kind::LPAREN, r"[\[({]")?,
        Rule::token(Kind::RPAREN, r"[\])}]")?,
        Rule::token(Kind::TEXT, r"\s+")?,
    ])
}
