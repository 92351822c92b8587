//! State-machine rule engine and lexer for FreeMarker templates embedded in markup.
//!
//! The crate turns a line (or a whole document) plus a starting lexer state into classified tokens and the state to
//! resume from, so an editor can highlight line by line without re-lexing from the top.
//!
//! ## Notes
//! - Grammars are built once through [`registry::GrammarBuilder`] and frozen into an immutable [`Grammar`] that can be
//!   shared across threads. Each lexing session owns its cursor; nothing else is mutated while lexing.
//! - The template layer ([`grammar::augment_base_grammar`]) is spliced into a host markup grammar rather than
//!   replacing it. [`grammar::host::minimal_markup`] is a small stand-in host used by default.
//! - Vocabulary and token kinds come from `ftl_core`.
//!
//! ## Examples
//! ```rust
//! use ftl_core::Kind;
//! use ftl_syntax::grammar;
//!
//! let grammar = grammar::freemarker().unwrap();
//! let line = grammar.tokenize_line("${name}", grammar.start()).unwrap();
//! assert_eq!(line.tokens[1].kind, Kind::IDENTIFIER);
//! assert_eq!(line.end_state, grammar.start());
//! ```

pub mod config;
pub mod diagnostics;
pub mod grammar;
pub mod lexer;
pub mod registry;
pub mod rule;
pub mod state;

pub use config::{LexerConfig, UnmatchedPolicy};
pub use diagnostics::{GrammarError, LexError};
pub use lexer::{LineTokens, Span, Step, Token, Tokens};
pub use registry::{Grammar, GrammarBuilder, Position};
pub use rule::{MatchKind, Pattern, Piece, Rule};
pub use state::{State, StateId};
