//! Errors raised while building a grammar or lexing with a strict configuration.
//!
//! Grammar errors are programmer errors and surface when a rule or state is registered, or at the latest when the
//! builder is frozen. Lex errors only exist under [`crate::UnmatchedPolicy::Fail`]; the default policy never fails.

use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

/// A malformed rule or an inconsistent state registry.
#[derive(Debug, Error, Diagnostic)]
pub enum GrammarError {
    #[error("invalid pattern `{pattern}`")]
    #[diagnostic(code(ftl::grammar::invalid_pattern))]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("pattern `{pattern}` has {groups} capturing group(s) but its rule takes a single kind")]
    #[diagnostic(
        code(ftl::grammar::unexpected_groups),
        help("use non-capturing groups `(?:...)`, or pair the pattern with one kind per group")
    )]
    UnexpectedGroups { pattern: String, groups: usize },

    #[error("pattern `{pattern}` has {groups} capturing group(s) but {kinds} kind(s) were given")]
    #[diagnostic(code(ftl::grammar::group_arity))]
    GroupArity { pattern: String, groups: usize, kinds: usize },

    #[error("pattern `{pattern}` was given an empty kind list")]
    #[diagnostic(code(ftl::grammar::empty_groups))]
    EmptyGroups { pattern: String },

    #[error("state `{name}` is already defined")]
    #[diagnostic(code(ftl::grammar::duplicate_state), help("use `extend_state` to add rules to an existing state"))]
    DuplicateState { name: String },

    #[error("state `{name}` is not defined")]
    #[diagnostic(code(ftl::grammar::unknown_state))]
    UnknownState { name: String },

    #[error("rule #{rule} of state `{state}` transitions to undefined state `{target}`")]
    #[diagnostic(code(ftl::grammar::unknown_transition_target))]
    UnknownTransitionTarget { state: String, rule: usize, target: String },

    #[error("start state `{name}` is not defined")]
    #[diagnostic(code(ftl::grammar::missing_start_state))]
    MissingStartState { name: String },
}

/// Failure to lex input under a strict configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum LexError {
    #[error("no rule in state `{state}` matches {found:?} at offset {offset}")]
    #[diagnostic(
        code(ftl::lex::unmatched_input),
        help("the default recovery policy would emit this character as an `invalid` token")
    )]
    UnmatchedInput {
        state: String,
        offset: usize,
        found: char,
        #[label("no rule matches here")]
        span: SourceSpan,
    },
}

impl LexError {
    pub(crate) fn unmatched(state: &str, offset: usize, found: char) -> Self {
        LexError::UnmatchedInput {
            state: state.to_string(),
            offset,
            found,
            span: (offset, found.len_utf8()).into(),
        }
    }

    /// Byte offset of the offending input.
    pub fn offset(&self) -> usize {
        match self {
            LexError::UnmatchedInput { offset, .. } => *offset,
        }
    }
}
