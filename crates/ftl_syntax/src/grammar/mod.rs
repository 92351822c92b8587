//! The FreeMarker template layer.
//!
//! [`augment_base_grammar`] splices template recognition into a host markup grammar:
//! - `start` gets template comment, directive and interpolation openers ahead of the host's own rules, so a
//!   template delimiter is never swallowed by the host's text rule,
//! - `comment` gets a template-aware closing rule, so `<#-- ... -->` returns to `start`,
//! - two expression contexts are defined: `directive-start` (closed by `>` / `]`, optionally `/>`) and
//!   `interpolation-start` (closed by `}`), each with its own escaped and raw string states.
//!
//! ## Module Structure
//!
//! - `expression` - Rules shared by both expression contexts
//! - `strings` - Quoted-string state factory
//! - `host` - Minimal stand-in host markup grammar
//!
//! ## Examples
//! ```rust
//! use ftl_syntax::grammar::{self, host};
//!
//! let builder = grammar::augment_base_grammar(host::minimal_markup().unwrap()).unwrap();
//! assert!(builder.contains(grammar::DIRECTIVE));
//! assert!(builder.contains("raw-string-double-interpolation-start"));
//! ```

pub mod expression;
pub mod host;
pub mod strings;

use std::sync::Arc;

use ftl_core::{Classifier, Kind};

use crate::diagnostics::GrammarError;
use crate::registry::{Grammar, GrammarBuilder, Position};
use crate::rule::Rule;

/// Host state the template layer starts in and returns to.
pub const START: &str = "start";
/// Host comment state the template comment shares.
pub const COMMENT: &str = "comment";
/// Inside `<#...>` / `[#...]` (and `<@...>` macro calls).
pub const DIRECTIVE: &str = "directive-start";
/// Inside `${...}`.
pub const INTERPOLATION: &str = "interpolation-start";

/// Layer the template grammar onto `base` using the standard FreeMarker classifier.
pub fn augment_base_grammar(base: GrammarBuilder) -> Result<GrammarBuilder, GrammarError> {
    augment_with_classifier(base, Arc::new(Classifier::freemarker()))
}

/// Layer the template grammar onto `base`, classifying identifiers with `classifier`.
///
/// ## Errors
/// - [`GrammarError::UnknownState`] if `base` lacks `start` or `comment`.
/// - [`GrammarError::DuplicateState`] if `base` already defines one of the template states.
#[tracing::instrument(skip_all, fields(base_states = base.state_names().count()))]
pub fn augment_with_classifier(
    mut base: GrammarBuilder,
    classifier: Arc<Classifier>,
) -> Result<GrammarBuilder, GrammarError> {
    base.extend_state(
        START,
        vec![
            Rule::token(Kind::COMMENT_BLOCK, r"[<\[]#--")?.next(COMMENT),
            Rule::groups(vec![Kind::TAG_OPEN, Kind::DIRECTIVE_SIGIL], r"([<\[]/?)(#|@)")?.next(DIRECTIVE),
            Rule::token(Kind::INTERPOLATION, r"\$\{")?.next(INTERPOLATION),
        ],
        Position::Prepend,
    )?;

    // Shortest body up to the first closing marker, so a later comment on the same line is not swallowed.
    base.extend_state(
        COMMENT,
        vec![Rule::token(Kind::COMMENT_BLOCK, r".*?--[>\]]")?.next(START)],
        Position::Prepend,
    )?;

    let common = expression::expression_rules(&classifier)?;

    let mut directive = vec![
        Rule::groups(vec![Kind::DIRECTIVE_SIGIL, Kind::TAG_CLOSE], r"(/)?([>\]])")?.next(START),
    ];
    directive.extend(common.iter().cloned());
    base.define_state(DIRECTIVE, directive)?;

    let mut interpolation = vec![Rule::token(Kind::INTERPOLATION, r"\}")?.next(START)];
    interpolation.extend(common);
    base.define_state(INTERPOLATION, interpolation)?;

    for context in [DIRECTIVE, INTERPOLATION] {
        strings::install_string_states(&mut base, context)?;
    }

    Ok(base)
}

/// The complete template grammar over [`host::minimal_markup`], frozen.
pub fn freemarker() -> Result<Grammar, GrammarError> {
    augment_base_grammar(host::minimal_markup()?)?.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::State;

    #[test]
    fn test_augment_requires_host_comment_state() {
        let mut base = GrammarBuilder::new(START);
        base.define_state(START, vec![Rule::token(Kind::TEXT, r"[^<$]+").unwrap()])
            .unwrap();
        let err = augment_base_grammar(base).unwrap_err();
        assert!(matches!(err, GrammarError::UnknownState { ref name } if name == COMMENT));
    }

    #[test]
    fn test_augment_rejects_existing_template_state() {
        let mut base = host::minimal_markup().unwrap();
        base.define(State::new(DIRECTIVE, vec![])).unwrap();
        let err = augment_base_grammar(base).unwrap_err();
        assert!(matches!(err, GrammarError::DuplicateState { ref name } if name == DIRECTIVE));
    }

    #[test]
    fn test_augment_prepends_template_openers() {
        let builder = augment_base_grammar(host::minimal_markup().unwrap()).unwrap();
        let start = builder.state(START).unwrap();
        assert_eq!(start.rules()[0].pattern().source(), r"[<\[]#--");
        // Host rules follow the template openers
        assert_eq!(start.rules()[3].pattern().source(), "<!--");
        assert_eq!(builder.state(COMMENT).unwrap().rules().len(), 2);
    }
}
