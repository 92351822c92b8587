//! Token types produced by the lexer.

use ftl_core::Kind;

use crate::state::StateId;

/// A byte range in the lexed input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// A classified slice of the input.
///
/// ## Notes
/// - `state` is the lexer state *after* this token; the last token's `state` is what a caller persists to lex the
///   next line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: Kind,
    pub text: &'a str,
    pub span: Span,
    pub state: StateId,
}

impl<'a> Token<'a> {
    /// Construct a new token covering `span` of `input`.
    pub fn new(kind: Kind, input: &'a str, span: Span, state: StateId) -> Self {
        Self {
            kind,
            text: &input[span.start..span.end],
            span,
            state,
        }
    }
}

/// Tokens for one buffer plus the state to resume from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineTokens<'a> {
    pub tokens: Vec<Token<'a>>,
    pub end_state: StateId,
}
