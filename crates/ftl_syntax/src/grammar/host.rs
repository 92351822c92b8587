//! Minimal stand-in for a host markup grammar.
//!
//! The template layer never depends on a particular host; it only needs a `start` and a `comment` state to splice
//! into. This host provides exactly those, with just enough markup awareness (tag names, `<!-- -->` comments) to
//! make token streams readable. Editors bring their own full markup grammar instead.

use ftl_core::Kind;

use super::{COMMENT, START};
use crate::diagnostics::GrammarError;
use crate::registry::GrammarBuilder;
use crate::rule::Rule;
use crate::state::State;

pub const COMMENT_START: Kind = Kind::from_static("comment.start.xml");
pub const COMMENT_END: Kind = Kind::from_static("comment.end.xml");
pub const COMMENT_BODY: Kind = Kind::from_static("comment");
pub const TAG_NAME: Kind = Kind::from_static("meta.tag.tag-name.xml");

/// A host grammar with `start` (plain markup) and `comment` (`<!-- ... -->`) states.
pub fn minimal_markup() -> Result<GrammarBuilder, GrammarError> {
    let mut builder = GrammarBuilder::new(START);
    builder.define(
        State::new(
            START,
            vec![
                Rule::token(COMMENT_START, "<!--")?.next(COMMENT),
                Rule::token(TAG_NAME, r"</?[A-Za-z][-A-Za-z0-9_:.]*")?,
                Rule::token(Kind::TEXT, r"[^<\[$]+")?,
            ],
        )
        .with_default_kind(Kind::TEXT),
    )?;
    builder.define(
        State::new(COMMENT, vec![Rule::token(COMMENT_END, "-->")?.next(START)]).with_default_kind(COMMENT_BODY),
    )?;
    Ok(builder)
}
