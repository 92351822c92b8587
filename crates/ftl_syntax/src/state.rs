//! Lexer states: a name bound to an ordered rule table and an optional default kind.

use ftl_core::Kind;

use crate::rule::Rule;

/// Index of a state inside a frozen [`crate::Grammar`].
///
/// ## Notes
/// - Ids are only meaningful for the grammar that issued them. Persist [`crate::Grammar::state_name`] instead if a
///   state has to outlive the grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateId(pub(crate) usize);

impl StateId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A named lexer mode.
///
/// `N` names transition targets: `String` while building, [`StateId`] once frozen.
#[derive(Debug, Clone)]
pub struct State<N = String> {
    name: String,
    rules: Vec<Rule<N>>,
    default_kind: Option<Kind>,
}

impl<N> State<N> {
    pub fn new(name: impl Into<String>, rules: Vec<Rule<N>>) -> Self {
        Self {
            name: name.into(),
            rules,
            default_kind: None,
        }
    }

    /// Emit text no rule matches as `kind` instead of treating it as unmatched input.
    pub fn with_default_kind(mut self, kind: Kind) -> Self {
        self.default_kind = Some(kind);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rules(&self) -> &[Rule<N>] {
        &self.rules
    }

    pub fn default_kind(&self) -> Option<&Kind> {
        self.default_kind.as_ref()
    }

    pub(crate) fn rules_mut(&mut self) -> &mut Vec<Rule<N>> {
        &mut self.rules
    }

    pub(crate) fn into_parts(self) -> (String, Vec<Rule<N>>, Option<Kind>) {
        (self.name, self.rules, self.default_kind)
    }

    pub(crate) fn from_parts(name: String, rules: Vec<Rule<N>>, default_kind: Option<Kind>) -> Self {
        Self {
            name,
            rules,
            default_kind,
        }
    }
}
