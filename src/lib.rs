#![forbid(unsafe_code)]
//! FreeMarker template tokenizer
//!
//! Lexes FreeMarker Template Language embedded in markup into classified tokens, one line at a time, carrying the
//! lexer state across lines the way an editor highlighter does.
//!
//! ## Crates
//!
//! - `ftl_core` - Template vocabulary, token kinds and the keyword classifier
//! - `ftl_syntax` - Rule engine, grammar registry, the template grammar and the lexer
//!
//! ## Panic Policy
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` module enforces
//!   `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.

pub mod cli;

pub use ftl_core::{Classifier, Kind};
pub use ftl_syntax::{Grammar, GrammarBuilder, LexError, LexerConfig, LineTokens, Token, UnmatchedPolicy, grammar};
