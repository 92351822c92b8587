//! Quoted string states.
//!
//! One factory, [`string_states`], materializes the body states for a given closing context and quote character,
//! so directive and interpolation strings share their rules without hand-copied tables. Each call yields two
//! siblings:
//! - an escaped string, where backslash sequences are [`Kind::ESCAPE`] tokens,
//! - a raw string (`r"..."`), where everything up to the closing quote is plain [`Kind::STRING`].
//!
//! Both close on the quote that opened them and return to the context that opened them.

use ftl_core::Kind;

use crate::diagnostics::GrammarError;
use crate::registry::{GrammarBuilder, Position};
use crate::rule::Rule;
use crate::state::State;

const ESCAPE_PATTERN: &str = r#"\\(?:[nrtvef\\"'$]|[0-7]{1,3}|x[0-9A-Fa-f]{1,2})"#;

/// String delimiter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quote {
    Double,
    Single,
}

impl Quote {
    pub const ALL: [Quote; 2] = [Quote::Double, Quote::Single];

    pub const fn as_char(self) -> char {
        match self {
            Quote::Double => '"',
            Quote::Single => '\'',
        }
    }

    /// Regex matching this quote literally.
    const fn pattern(self) -> &'static str {
        match self {
            Quote::Double => "\"",
            Quote::Single => "'",
        }
    }

    const fn label(self) -> &'static str {
        match self {
            Quote::Double => "double",
            Quote::Single => "single",
        }
    }
}

/// Name of the escaped-string state opened from `return_to`.
pub fn string_state_name(return_to: &str, quote: Quote) -> String {
    format!("string-{}-{return_to}", quote.label())
}

/// Name of the raw-string state opened from `return_to`.
pub fn raw_string_state_name(return_to: &str, quote: Quote) -> String {
    format!("raw-string-{}-{return_to}", quote.label())
}

/// The two sibling string states for one closing context and quote.
#[derive(Debug, Clone)]
pub struct StringStates {
    pub escaped: State,
    pub raw: State,
}

/// Build the escaped and raw string states that close on `quote` back into `return_to`.
pub fn string_states(return_to: &str, quote: Quote) -> Result<StringStates, GrammarError> {
    let escaped = State::new(
        string_state_name(return_to, quote),
        vec![Rule::token(Kind::ESCAPE, ESCAPE_PATTERN)?, close_rule(return_to, quote)?],
    )
    .with_default_kind(Kind::STRING);

    let raw = State::new(raw_string_state_name(return_to, quote), vec![close_rule(return_to, quote)?])
        .with_default_kind(Kind::STRING);

    Ok(StringStates { escaped, raw })
}

fn close_rule(return_to: &str, quote: Quote) -> Result<Rule, GrammarError> {
    Ok(Rule::token(Kind::STRING, quote.pattern())?.next(return_to))
}

/// Rules that open the strings of `return_to`: raw openers first, so `r"` is not read as an identifier.
///
/// ## Notes
/// - An opener only matches if at least one character follows it on the same line.
pub fn string_openers(return_to: &str) -> Result<Vec<Rule>, GrammarError> {
    let mut raw = Vec::with_capacity(Quote::ALL.len());
    let mut escaped = Vec::with_capacity(Quote::ALL.len());
    for quote in Quote::ALL {
        raw.push(
            Rule::token(Kind::STRING, &format!("r{}", quote.pattern()))?
                .followed_by(".")?
                .next(raw_string_state_name(return_to, quote)),
        );
        escaped.push(
            Rule::token(Kind::STRING, quote.pattern())?
                .followed_by(".")?
                .next(string_state_name(return_to, quote)),
        );
    }
    raw.extend(escaped);
    Ok(raw)
}

/// Define the string states for `return_to` and give it the rules that open them.
pub fn install_string_states(builder: &mut GrammarBuilder, return_to: &str) -> Result<(), GrammarError> {
    for quote in Quote::ALL {
        let StringStates { escaped, raw } = string_states(return_to, quote)?;
        builder.define(escaped)?;
        builder.define(raw)?;
    }
    builder.extend_state(return_to, string_openers(return_to)?, Position::Prepend)
}
