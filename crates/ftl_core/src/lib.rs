//! Shared, pure vocabulary for the FreeMarker template tokenizer.
//!
//! This crate is intentionally small and dependency-free. It holds the pieces of the tokenizer that are pure data or
//! pure lookups, so the rule engine in `ftl_syntax` and any downstream tooling (themes, docs, diagnostics) agree on
//! them:
//! - [`Kind`]: the dot-namespaced semantic tag attached to every token,
//! - [`lang`]: the template language word lists (builtins, directives, special variables, reserved and deprecated
//!   names) with category/stability metadata,
//! - [`classifier`]: the keyword classifier that turns an identifier-shaped spelling into a fine-grained [`Kind`].
//!
//! ## Notes
//!
//! - No IO, no global mutable state, no regex. Classifiers are built once and shared immutably.
//!
//! ## Examples
//! ```rust
//! use ftl_core::{Kind, classifier::Classifier};
//!
//! let classifier = Classifier::freemarker();
//! assert_eq!(classifier.classify("gt"), Kind::COMPARISON);
//! assert_eq!(classifier.classify("name"), Kind::IDENTIFIER);
//! ```

pub mod classifier;
pub mod kind;
pub mod lang;

pub use classifier::Classifier;
pub use kind::Kind;
