//! Lexer engine: drives a [`Grammar`] over a buffer.
//!
//! The engine holds no state of its own. A [`Tokens`] iterator owns the cursor (position + current state) for one
//! lexing session; the grammar is only read. Lexing is restartable: every call takes an explicit start state, and
//! the state after the last token is what a caller carries into the next call (typically the next line).
//!
//! ## Module Structure
//!
//! - `tokens` - Token types (Token, Span, LineTokens)
//!
//! ## Matching
//!
//! At each position the active state's rules are tried in order and the first match wins. If none matches:
//! - a state with a default kind emits the run of text up to the next position where some rule matches,
//! - otherwise the [`UnmatchedPolicy`] decides: one `invalid` character, or a [`LexError`].

pub mod tokens;

use std::collections::VecDeque;

use ftl_core::Kind;

pub use tokens::{LineTokens, Span, Token};

use crate::config::{LexerConfig, UnmatchedPolicy};
use crate::diagnostics::LexError;
use crate::registry::Grammar;
use crate::rule::Piece;
use crate::state::StateId;

// ============================================================================
// Single step
// ============================================================================

/// Result of one matching step: the kinded pieces, where the cursor ends up, and the state to continue in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub pieces: Vec<Piece>,
    pub end: usize,
    pub next: StateId,
    /// Index of the rule that matched, or `None` for a default-kind run.
    pub rule: Option<usize>,
}

impl Grammar {
    /// Match the next token(s) of `input` at `pos` in `state`.
    ///
    /// ## Returns
    /// - `Some(step)` with `step.end > pos` whenever `pos < input.len()` and something matched.
    /// - `None` if no rule matches and the state has no default kind, or if `pos` is at the end of input.
    ///
    /// ## Notes
    /// - Pure: the same arguments always give the same result.
    pub fn match_next(&self, state: StateId, input: &str, pos: usize) -> Option<Step> {
        self.match_next_cached(state, input, pos, &mut RunCache::default())
    }

    fn match_next_cached(&self, state: StateId, input: &str, pos: usize, cache: &mut RunCache) -> Option<Step> {
        if pos >= input.len() {
            return None;
        }
        let current = &self.states[state.0];

        for (i, rule) in current.rules().iter().enumerate() {
            if let Some(pieces) = rule.apply(input, pos) {
                let end = pieces.last().map_or(pos, |p| p.span.end);
                return Some(Step {
                    pieces,
                    end,
                    next: rule.target().unwrap_or(state),
                    rule: Some(i),
                });
            }
        }

        let kind = current.default_kind()?;
        let end = self.default_run_end(state, input, pos, cache);
        Some(Step {
            pieces: vec![Piece {
                kind: kind.clone(),
                span: Span::new(pos, end),
            }],
            end,
            next: state,
            rule: None,
        })
    }

    /// End of a default-kind run starting at `pos`: the nearest later position at which some rule matches.
    fn default_run_end(&self, state: StateId, input: &str, pos: usize, cache: &mut RunCache) -> usize {
        let rules = self.states[state.0].rules();
        let Some(first) = input[pos..].chars().next() else {
            return input.len();
        };
        let from = pos + first.len_utf8();
        cache.enter(state, rules.len());

        let mut end = input.len();
        for (slot, rule) in cache.next.iter_mut().zip(rules) {
            let cached = *slot;
            let found = match cached {
                Some(NextMatch::At(at)) if at >= from => Some(at),
                Some(NextMatch::Never) => None,
                _ => {
                    let found = rule.next_match_from(input, from);
                    *slot = Some(found.map_or(NextMatch::Never, NextMatch::At));
                    found
                }
            };
            if let Some(at) = found {
                end = end.min(at);
            }
        }
        end
    }

    /// Lex `input` from `start` with the default configuration.
    pub fn tokenize<'g, 'a>(&'g self, input: &'a str, start: StateId) -> Tokens<'g, 'a> {
        Tokens::new(self, input, start, LexerConfig::default())
    }

    /// Lex `input` from `start` with an explicit configuration.
    pub fn tokenize_with<'g, 'a>(&'g self, input: &'a str, start: StateId, config: LexerConfig) -> Tokens<'g, 'a> {
        Tokens::new(self, input, start, config)
    }

    /// Lex a whole buffer eagerly and return its tokens with the state to resume from.
    pub fn tokenize_line<'a>(&self, input: &'a str, start: StateId) -> Result<LineTokens<'a>, LexError> {
        self.tokenize_line_with(input, start, LexerConfig::default())
    }

    /// [`Grammar::tokenize_line`] with an explicit configuration.
    #[tracing::instrument(skip_all, fields(input_len = input.len(), start = %self.state_name(start)))]
    pub fn tokenize_line_with<'a>(
        &self,
        input: &'a str,
        start: StateId,
        config: LexerConfig,
    ) -> Result<LineTokens<'a>, LexError> {
        let mut session = self.tokenize_with(input, start, config);
        let tokens = session.by_ref().collect::<Result<Vec<_>, _>>()?;
        Ok(LineTokens {
            tokens,
            end_state: session.state(),
        })
    }
}

// ============================================================================
// Run cache
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NextMatch {
    At(usize),
    Never,
}

/// Next match position of each rule of one state, remembered across default-kind runs of a session.
///
/// ## Notes
/// - Valid because the cursor only moves forward: a rule with no match after some position has none after any
///   later one, and a known match stays the nearest until the cursor passes it.
/// - Cleared when a default-kind run happens in a different state than the previous one.
#[derive(Debug, Clone, Default)]
struct RunCache {
    state: Option<StateId>,
    next: Vec<Option<NextMatch>>,
}

impl RunCache {
    fn enter(&mut self, state: StateId, rules: usize) {
        if self.state != Some(state) {
            self.state = Some(state);
            self.next.clear();
            self.next.resize(rules, None);
        }
    }
}

// ============================================================================
// Lazy token stream
// ============================================================================

/// Lazy token stream over one buffer.
///
/// Dropping the iterator early is the only cancellation needed; it holds nothing but memory.
#[derive(Debug, Clone)]
pub struct Tokens<'g, 'a> {
    grammar: &'g Grammar,
    input: &'a str,
    pos: usize,
    state: StateId,
    config: LexerConfig,
    pending: VecDeque<Token<'a>>,
    emitted: usize,
    failed: bool,
    runs: RunCache,
}

impl<'g, 'a> Tokens<'g, 'a> {
    pub fn new(grammar: &'g Grammar, input: &'a str, start: StateId, config: LexerConfig) -> Self {
        Self {
            grammar,
            input,
            pos: 0,
            state: start,
            config,
            pending: VecDeque::new(),
            emitted: 0,
            failed: false,
            runs: RunCache::default(),
        }
    }

    /// Current state: after the iterator is exhausted, the state to resume from.
    pub fn state(&self) -> StateId {
        self.state
    }

    /// Byte offset of the cursor.
    pub fn position(&self) -> usize {
        self.pos
    }

    fn push(&mut self, kind: Kind, span: Span) {
        self.pending
            .push_back(Token::new(kind, self.input, span, self.state));
        self.emitted += 1;
    }

    fn over_limit(&self) -> bool {
        match self.config.token_limit {
            Some(limit) => self.emitted >= limit,
            None => false,
        }
    }
}

impl<'a> Iterator for Tokens<'_, 'a> {
    type Item = Result<Token<'a>, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(token) = self.pending.pop_front() {
            return Some(Ok(token));
        }
        if self.failed || self.pos >= self.input.len() {
            return None;
        }

        if self.over_limit() {
            tracing::debug!(emitted = self.emitted, "token limit reached; emitting remainder as text");
            self.state = self.grammar.start();
            let span = Span::new(self.pos, self.input.len());
            self.pos = self.input.len();
            self.push(Kind::TEXT, span);
            return self.pending.pop_front().map(Ok);
        }

        match self
            .grammar
            .match_next_cached(self.state, self.input, self.pos, &mut self.runs)
        {
            Some(step) => {
                tracing::trace!(
                    state = %self.grammar.state_name(step.next),
                    rule = ?step.rule,
                    end = step.end,
                    "step"
                );
                self.state = step.next;
                self.pos = step.end;
                for piece in step.pieces {
                    self.push(piece.kind, piece.span);
                }
            }
            None => {
                let found = self.input[self.pos..].chars().next()?;
                match self.config.unmatched {
                    UnmatchedPolicy::Recover => {
                        tracing::debug!(
                            state = %self.grammar.state_name(self.state),
                            offset = self.pos,
                            ?found,
                            "unmatched input"
                        );
                        let span = Span::new(self.pos, self.pos + found.len_utf8());
                        self.pos = span.end;
                        self.push(Kind::INVALID, span);
                    }
                    UnmatchedPolicy::Fail => {
                        self.failed = true;
                        return Some(Err(LexError::unmatched(
                            self.grammar.state_name(self.state),
                            self.pos,
                            found,
                        )));
                    }
                }
            }
        }
        self.pending.pop_front().map(Ok)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::GrammarBuilder;
    use crate::rule::Rule;
    use crate::state::State;

    /// `a` and `b` alternate states; `quote` has a default kind and closes on `"`.
    fn toy_grammar() -> Grammar {
        let mut b = GrammarBuilder::new("a");
        b.define_state(
            "a",
            vec![
                Rule::token(Kind::TAG_OPEN, "<").unwrap().next("b"),
                Rule::token(Kind::STRING, "\"").unwrap().next("quote"),
                Rule::token(Kind::TEXT, "[a-z ]+").unwrap(),
            ],
        )
        .unwrap();
        b.define_state(
            "b",
            vec![
                Rule::token(Kind::TAG_CLOSE, ">").unwrap().next("a"),
                Rule::token(Kind::IDENTIFIER, "[a-z]+").unwrap(),
            ],
        )
        .unwrap();
        b.define(
            State::new("quote", vec![Rule::token(Kind::STRING, "\"").unwrap().next("a")])
                .with_default_kind(Kind::STRING),
        )
        .unwrap();
        b.build().unwrap()
    }

    fn kinds_and_texts<'a>(line: &LineTokens<'a>) -> Vec<(String, &'a str)> {
        line.tokens.iter().map(|t| (t.kind.to_string(), t.text)).collect()
    }

    #[test]
    fn test_transitions_and_end_state() {
        let g = toy_grammar();
        let line = g.tokenize_line("hi <x", g.start()).unwrap();
        assert_eq!(
            kinds_and_texts(&line),
            [
                ("text".to_string(), "hi "),
                ("meta.tag.ftl".to_string(), "<"),
                ("identifier".to_string(), "x"),
            ]
        );
        assert_eq!(line.end_state, g.state_id("b").unwrap());
        assert_eq!(line.tokens[1].state, g.state_id("b").unwrap());
    }

    #[test]
    fn test_resume_from_persisted_state() {
        let g = toy_grammar();
        let first = g.tokenize_line("<tag", g.start()).unwrap();
        let second = g.tokenize_line("x>rest", first.end_state).unwrap();
        assert_eq!(second.tokens[0].kind, Kind::IDENTIFIER);
        assert_eq!(second.tokens[1].kind, Kind::TAG_CLOSE);
        assert_eq!(second.end_state, g.start());
    }

    #[test]
    fn test_default_kind_run_stops_at_next_rule() {
        let g = toy_grammar();
        let line = g.tokenize_line("\"a <b\" c", g.start()).unwrap();
        assert_eq!(
            kinds_and_texts(&line),
            [
                ("string".to_string(), "\""),
                ("string".to_string(), "a <b"),
                ("string".to_string(), "\""),
                ("text".to_string(), " c"),
            ]
        );
    }

    #[test]
    fn test_unmatched_input_recovers_one_char_at_a_time() {
        let g = toy_grammar();
        let line = g.tokenize_line("a!é", g.start()).unwrap();
        assert_eq!(
            kinds_and_texts(&line),
            [
                ("text".to_string(), "a"),
                ("invalid".to_string(), "!"),
                ("invalid".to_string(), "é"),
            ]
        );
        assert_eq!(line.end_state, g.start());
    }

    #[test]
    fn test_unmatched_input_fails_when_strict() {
        let g = toy_grammar();
        let err = g
            .tokenize_line_with("ab!c", g.start(), LexerConfig::strict())
            .unwrap_err();
        assert_eq!(err.offset(), 2);
        assert!(matches!(err, LexError::UnmatchedInput { ref state, found: '!', .. } if state == "a"));

        // The stream stops after the error.
        let mut session = g.tokenize_with("!a", g.start(), LexerConfig::strict());
        assert!(matches!(session.next(), Some(Err(_))));
        assert!(session.next().is_none());
    }

    #[test]
    fn test_token_limit_emits_remainder_and_resets_state() {
        let g = toy_grammar();
        let config = LexerConfig::new().with_token_limit(Some(2));
        let line = g.tokenize_line_with("<x y>", g.start(), config).unwrap();
        assert_eq!(
            kinds_and_texts(&line),
            [
                ("meta.tag.ftl".to_string(), "<"),
                ("identifier".to_string(), "x"),
                ("text".to_string(), " y>"),
            ]
        );
        assert_eq!(line.end_state, g.start());
    }

    #[test]
    fn test_lazy_stream_can_stop_early() {
        let g = toy_grammar();
        let mut session = g.tokenize("<x>abc", g.start());
        let first = session.next().unwrap().unwrap();
        assert_eq!(first.text, "<");
        assert_eq!(session.state(), g.state_id("b").unwrap());
        assert_eq!(session.position(), 1);
    }

    #[test]
    fn test_match_next_is_pure() {
        let g = toy_grammar();
        let a = g.match_next(g.start(), "<x>", 0);
        let b = g.match_next(g.start(), "<x>", 0);
        assert_eq!(a, b);
        assert!(g.match_next(g.start(), "<x>", 3).is_none());
    }

    #[test]
    fn test_empty_input() {
        let g = toy_grammar();
        let line = g.tokenize_line("", g.start()).unwrap();
        assert!(line.tokens.is_empty());
        assert_eq!(line.end_state, g.start());
    }
}
