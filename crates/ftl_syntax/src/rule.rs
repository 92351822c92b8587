//! Rules: one pattern bound to a token kind (or kinds, or a classifier) and an optional state transition.
//!
//! Rules are validated when they are constructed and never change afterwards. A rule is generic over how its
//! transition target is named: builders hold `Rule<String>`, a frozen [`crate::Grammar`] holds `Rule<StateId>`.
//!
//! ## Notes
//! - Patterns are anchored at the cursor. Ordering between rules is the only disambiguation: the first rule that
//!   matches wins, even if a later one would match more text.
//! - `Single` and `Classify` rules must not contain capturing groups; `Groups` rules must have exactly one capturing
//!   group per kind.
//!
//! ## Examples
//! ```rust
//! use ftl_core::Kind;
//! use ftl_syntax::Rule;
//!
//! let rule = Rule::groups(vec![Kind::TAG_OPEN, Kind::DIRECTIVE_SIGIL], r"([<\[]/?)(#|@)")
//!     .unwrap()
//!     .next("directive-start");
//! assert_eq!(rule.next_state().map(String::as_str), Some("directive-start"));
//!
//! assert!(Rule::token(Kind::TEXT, r"(a)").is_err());
//! ```

use std::sync::Arc;

use ftl_core::{Classifier, Kind};
use regex::Regex;

use crate::diagnostics::GrammarError;
use crate::lexer::Span;
use crate::state::StateId;

/// How a matched pattern is turned into token kinds.
#[derive(Debug, Clone)]
pub enum MatchKind {
    /// The whole match gets one kind.
    Single(Kind),
    /// Capturing groups are paired positionally with kinds.
    Groups(Vec<Kind>),
    /// The matched text is classified by a keyword classifier.
    Classify(Arc<Classifier>),
}

/// A regular expression anchored at the lexer cursor.
///
/// An unanchored copy is kept for forward searches, so the next position a rule can match is found in one pass.
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    regex: Regex,
    search: Regex,
}

impl Pattern {
    /// Compile `source`, anchored so it can only match at the start of the haystack.
    pub fn new(source: &str) -> Result<Self, GrammarError> {
        let compile = |pattern: &str| {
            Regex::new(pattern).map_err(|err| GrammarError::InvalidPattern {
                pattern: source.to_string(),
                source: err,
            })
        };
        let regex = compile(&format!(r"\A(?:{source})"))?;
        let search = compile(source)?;
        Ok(Self {
            source: source.to_string(),
            regex,
            search,
        })
    }

    /// The pattern as written, without the anchor.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Number of capturing groups (excluding the implicit whole-match group).
    pub fn group_count(&self) -> usize {
        self.regex.captures_len() - 1
    }

    /// Length of the match at the start of `haystack`, if any.
    pub fn match_len(&self, haystack: &str) -> Option<usize> {
        self.regex.find(haystack).map(|m| m.end())
    }

    /// Start of the leftmost match of the pattern at or after `from` in `input`.
    pub fn find_from(&self, input: &str, from: usize) -> Option<usize> {
        self.search.find_at(input, from).map(|m| m.start())
    }

    pub(crate) fn regex(&self) -> &Regex {
        &self.regex
    }
}

/// One piece of a rule match: a kind and the byte range it covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    pub kind: Kind,
    pub span: Span,
}

/// A single pattern-to-kind binding within a state's ordered rule table.
#[derive(Debug, Clone)]
pub struct Rule<N = String> {
    kind: MatchKind,
    pattern: Pattern,
    followed_by: Option<Pattern>,
    next: Option<N>,
}

impl Rule<String> {
    /// A rule emitting one token of `kind`.
    pub fn token(kind: Kind, pattern: &str) -> Result<Self, GrammarError> {
        let pattern = Pattern::new(pattern)?;
        expect_no_groups(&pattern)?;
        Ok(Self::from_parts(MatchKind::Single(kind), pattern))
    }

    /// A rule emitting one token per capturing group, paired positionally with `kinds`.
    pub fn groups(kinds: Vec<Kind>, pattern: &str) -> Result<Self, GrammarError> {
        let pattern = Pattern::new(pattern)?;
        if kinds.is_empty() {
            return Err(GrammarError::EmptyGroups {
                pattern: pattern.source.clone(),
            });
        }
        let groups = pattern.group_count();
        if groups != kinds.len() {
            return Err(GrammarError::GroupArity {
                pattern: pattern.source.clone(),
                groups,
                kinds: kinds.len(),
            });
        }
        Ok(Self::from_parts(MatchKind::Groups(kinds), pattern))
    }

    /// A rule whose kind is decided by `classifier` from the matched text.
    pub fn classify(classifier: Arc<Classifier>, pattern: &str) -> Result<Self, GrammarError> {
        let pattern = Pattern::new(pattern)?;
        expect_no_groups(&pattern)?;
        Ok(Self::from_parts(MatchKind::Classify(classifier), pattern))
    }

    /// Transition to `state` after this rule matches.
    pub fn next(mut self, state: impl Into<String>) -> Self {
        self.next = Some(state.into());
        self
    }

    /// Only match when the text after the match also matches `pattern` (which is not consumed).
    pub fn followed_by(mut self, pattern: &str) -> Result<Self, GrammarError> {
        self.followed_by = Some(Pattern::new(pattern)?);
        Ok(self)
    }
}

impl<N> Rule<N> {
    fn from_parts(kind: MatchKind, pattern: Pattern) -> Self {
        Self {
            kind,
            pattern,
            followed_by: None,
            next: None,
        }
    }

    pub fn match_kind(&self) -> &MatchKind {
        &self.kind
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    pub fn lookahead(&self) -> Option<&Pattern> {
        self.followed_by.as_ref()
    }

    pub fn next_state(&self) -> Option<&N> {
        self.next.as_ref()
    }

    /// Replace the transition target, keeping everything else.
    pub fn with_next<M>(self, next: Option<M>) -> Rule<M> {
        Rule {
            kind: self.kind,
            pattern: self.pattern,
            followed_by: self.followed_by,
            next,
        }
    }

    /// Rename the transition target through a fallible lookup.
    pub fn try_map_next<M, E>(self, f: impl FnOnce(N) -> Result<M, E>) -> Result<Rule<M>, E> {
        let Rule {
            kind,
            pattern,
            followed_by,
            next,
        } = self;
        let next = next.map(f).transpose()?;
        Ok(Rule {
            kind,
            pattern,
            followed_by,
            next,
        })
    }

    /// Return `true` if this rule matches at `pos`, lookahead included.
    pub fn matches_at(&self, input: &str, pos: usize) -> bool {
        let rest = &input[pos..];
        match self.pattern.match_len(rest) {
            Some(len) => self.lookahead_holds(rest, len) && (len > 0 || !rest.is_empty()),
            None => false,
        }
    }

    /// First position at or after `from` where this rule matches, lookahead included.
    pub fn next_match_from(&self, input: &str, from: usize) -> Option<usize> {
        let mut at = from;
        while at < input.len() {
            let start = self.pattern.find_from(input, at)?;
            if self.matches_at(input, start) {
                return Some(start);
            }
            at = start + input[start..].chars().next()?.len_utf8();
        }
        None
    }

    /// Match this rule at `pos` and split the match into kinded pieces.
    ///
    /// ## Notes
    /// - A zero-width match still consumes one character so the lexer always makes progress.
    /// - For `Groups` rules, groups that did not participate or matched nothing are skipped, and any matched text
    ///   not covered by a group is emitted as [`Kind::TEXT`] so the pieces always tile the match.
    pub fn apply(&self, input: &str, pos: usize) -> Option<Vec<Piece>> {
        let rest = &input[pos..];
        let len = self.pattern.match_len(rest)?;
        if !self.lookahead_holds(rest, len) {
            return None;
        }

        if len == 0 {
            let width = rest.chars().next()?.len_utf8();
            let kind = self.primary_kind(&rest[..width]);
            return Some(vec![Piece {
                kind,
                span: Span::new(pos, pos + width),
            }]);
        }

        let pieces = match &self.kind {
            MatchKind::Single(kind) => vec![Piece {
                kind: kind.clone(),
                span: Span::new(pos, pos + len),
            }],
            MatchKind::Classify(classifier) => vec![Piece {
                kind: classifier.classify(&rest[..len]),
                span: Span::new(pos, pos + len),
            }],
            MatchKind::Groups(kinds) => {
                let caps = self.pattern.regex().captures(rest)?;
                split_groups(&caps, kinds, pos, len)
            }
        };
        Some(pieces)
    }

    fn lookahead_holds(&self, rest: &str, len: usize) -> bool {
        match &self.followed_by {
            Some(lookahead) => lookahead.match_len(&rest[len..]).is_some(),
            None => true,
        }
    }

    fn primary_kind(&self, text: &str) -> Kind {
        match &self.kind {
            MatchKind::Single(kind) => kind.clone(),
            MatchKind::Groups(kinds) => kinds[0].clone(),
            MatchKind::Classify(classifier) => classifier.classify(text),
        }
    }
}

impl Rule<StateId> {
    pub(crate) fn target(&self) -> Option<StateId> {
        self.next
    }
}

fn expect_no_groups(pattern: &Pattern) -> Result<(), GrammarError> {
    match pattern.group_count() {
        0 => Ok(()),
        groups => Err(GrammarError::UnexpectedGroups {
            pattern: pattern.source.clone(),
            groups,
        }),
    }
}

fn split_groups(caps: &regex::Captures<'_>, kinds: &[Kind], pos: usize, len: usize) -> Vec<Piece> {
    let mut pieces = Vec::with_capacity(kinds.len());
    let mut cursor = 0;
    for (i, kind) in kinds.iter().enumerate() {
        let Some(group) = caps.get(i + 1) else {
            continue;
        };
        // Empty groups and groups nested inside an earlier one add nothing.
        if group.is_empty() || group.start() < cursor {
            continue;
        }
        if group.start() > cursor {
            pieces.push(Piece {
                kind: Kind::TEXT,
                span: Span::new(pos + cursor, pos + group.start()),
            });
        }
        pieces.push(Piece {
            kind: kind.clone(),
            span: Span::new(pos + group.start(), pos + group.end()),
        });
        cursor = group.end();
    }
    if cursor < len {
        pieces.push(Piece {
            kind: Kind::TEXT,
            span: Span::new(pos + cursor, pos + len),
        });
    }
    pieces
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts<'a>(input: &'a str, pieces: &[Piece]) -> Vec<(&'a str, String)> {
        pieces
            .iter()
            .map(|p| (&input[p.span.start..p.span.end], p.kind.to_string()))
            .collect()
    }

    #[test]
    fn test_single_rule_rejects_capturing_groups() {
        let err = Rule::token(Kind::TEXT, r"(ab)+").unwrap_err();
        assert!(matches!(err, GrammarError::UnexpectedGroups { groups: 1, .. }));
        assert!(Rule::token(Kind::TEXT, r"(?:ab)+").is_ok());
    }

    #[test]
    fn test_classifier_rule_rejects_capturing_groups() {
        let classifier = Arc::new(Classifier::freemarker());
        let err = Rule::classify(classifier, r"([a-z]+)").unwrap_err();
        assert!(matches!(err, GrammarError::UnexpectedGroups { .. }));
    }

    #[test]
    fn test_group_arity_must_match_kind_count() {
        let err = Rule::groups(vec![Kind::TAG_OPEN], r"(<)(#)").unwrap_err();
        assert!(matches!(err, GrammarError::GroupArity { groups: 2, kinds: 1, .. }));

        let err = Rule::groups(vec![], r"<#").unwrap_err();
        assert!(matches!(err, GrammarError::EmptyGroups { .. }));
    }

    #[test]
    fn test_invalid_pattern() {
        let err = Rule::token(Kind::TEXT, r"[unclosed").unwrap_err();
        assert!(matches!(err, GrammarError::InvalidPattern { .. }));
    }

    #[test]
    fn test_pattern_is_anchored() {
        let rule = Rule::token(Kind::NUMERIC, r"\d+").unwrap();
        assert!(rule.apply("ab12", 0).is_none());
        let pieces = rule.apply("ab12", 2).unwrap();
        assert_eq!(texts("ab12", &pieces), [("12", "constant.numeric".to_string())]);
    }

    #[test]
    fn test_groups_skip_absent_optional_group() {
        let rule = Rule::groups(vec![Kind::DIRECTIVE_SIGIL, Kind::TAG_CLOSE], r"(/)?([>\]])").unwrap();

        let pieces = rule.apply(">", 0).unwrap();
        assert_eq!(texts(">", &pieces), [(">", "meta.tag.r.ftl".to_string())]);

        let pieces = rule.apply("/]", 0).unwrap();
        assert_eq!(
            texts("/]", &pieces),
            [
                ("/", "punctuation.definition.function.ftl".to_string()),
                ("]", "meta.tag.r.ftl".to_string())
            ]
        );
    }

    #[test]
    fn test_groups_fill_uncovered_text() {
        let rule = Rule::groups(vec![Kind::TAG_OPEN, Kind::TAG_CLOSE], r"(<)-(>)").unwrap();
        let pieces = rule.apply("<->", 0).unwrap();
        assert_eq!(
            texts("<->", &pieces),
            [
                ("<", "meta.tag.ftl".to_string()),
                ("-", "text".to_string()),
                (">", "meta.tag.r.ftl".to_string())
            ]
        );
    }

    #[test]
    fn test_lookahead_is_not_consumed() {
        let rule = Rule::token(Kind::STRING, r#"r""#).unwrap().followed_by(".").unwrap();
        assert!(rule.apply(r#"r""#, 0).is_none());
        let pieces = rule.apply(r#"r"x"#, 0).unwrap();
        assert_eq!(pieces[0].span, Span::new(0, 2));
        assert!(rule.matches_at(r#"r"x"#, 0));
        assert!(!rule.matches_at(r#"r""#, 0));
    }

    #[test]
    fn test_zero_width_match_consumes_one_char() {
        let rule = Rule::token(Kind::TEXT, r"x*").unwrap();
        let pieces = rule.apply("éa", 0).unwrap();
        assert_eq!(pieces[0].span, Span::new(0, 'é'.len_utf8()));
        assert!(rule.apply("", 0).is_none());
        assert!(!rule.matches_at("", 0));
    }

    #[test]
    fn test_next_match_from_skips_failed_lookahead() {
        let rule = Rule::token(Kind::STRING, "'").unwrap().followed_by("x").unwrap();
        assert_eq!(rule.next_match_from("a'b'x", 0), Some(3));
        assert_eq!(rule.next_match_from("a'b'x", 4), None);
        assert_eq!(rule.next_match_from("a'b'", 0), None);
    }

    #[test]
    fn test_classify_rule() {
        let rule = Rule::classify(Arc::new(Classifier::freemarker()), r"[a-zA-Z_$][a-zA-Z0-9_$]*\b").unwrap();
        let pieces = rule.apply("list items", 0).unwrap();
        assert_eq!(pieces[0].kind, Kind::TAG_NAME);
        let pieces = rule.apply("list items", 5).unwrap();
        assert_eq!(pieces[0].kind, Kind::IDENTIFIER);
    }

    #[test]
    fn test_try_map_next() {
        let rule = Rule::token(Kind::TEXT, "a").unwrap().next("elsewhere");
        let mapped: Result<Rule<usize>, String> = rule.try_map_next(|name| Err(name));
        assert_eq!(mapped.unwrap_err(), "elsewhere");

        let rule = Rule::token(Kind::TEXT, "a").unwrap();
        let mapped: Result<Rule<usize>, String> = rule.try_map_next(|_| Ok(1));
        assert!(mapped.unwrap().next_state().is_none());
    }
}
