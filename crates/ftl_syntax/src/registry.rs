//! State registry: a mutable build-time pipeline frozen into an immutable [`Grammar`].
//!
//! Grammars are composed by table transformation rather than inheritance: a host grammar is built (or handed in) as
//! a [`GrammarBuilder`], layers insert rules into its states or define new ones, and [`GrammarBuilder::build`]
//! validates every transition and freezes the result.
//!
//! ## Notes
//! - State order is registration order; it only matters for listing.
//! - Rule order inside a state is significant: the first matching rule wins.
//!
//! ## Examples
//! ```rust
//! use ftl_core::Kind;
//! use ftl_syntax::{GrammarBuilder, Position, Rule};
//!
//! let mut builder = GrammarBuilder::new("start");
//! builder.define_state("start", vec![Rule::token(Kind::TEXT, r"[^<]+").unwrap()]).unwrap();
//! builder
//!     .extend_state("start", vec![Rule::token(Kind::TAG_OPEN, "<").unwrap()], Position::Prepend)
//!     .unwrap();
//!
//! let grammar = builder.build().unwrap();
//! assert_eq!(grammar.state(grammar.start()).unwrap().rules().len(), 2);
//! ```

use std::collections::HashMap;

use crate::diagnostics::GrammarError;
use crate::rule::Rule;
use crate::state::{State, StateId};

/// Where [`GrammarBuilder::extend_state`] inserts new rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    /// Before the existing rules (higher priority), keeping the given order.
    Prepend,
    /// After the existing rules (lower priority).
    Append,
}

/// Mutable registry of named states, used while a grammar is being composed.
#[derive(Debug, Clone)]
pub struct GrammarBuilder {
    start: String,
    states: Vec<State>,
    index: HashMap<String, usize>,
}

impl GrammarBuilder {
    /// Create an empty registry whose lexing sessions begin in `start`.
    pub fn new(start: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            states: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn start(&self) -> &str {
        &self.start
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn state(&self, name: &str) -> Option<&State> {
        self.index.get(name).map(|&i| &self.states[i])
    }

    /// Names of all states, in registration order.
    pub fn state_names(&self) -> impl Iterator<Item = &str> {
        self.states.iter().map(State::name)
    }

    /// Register a fully formed state.
    pub fn define(&mut self, state: State) -> Result<(), GrammarError> {
        if self.contains(state.name()) {
            return Err(GrammarError::DuplicateState {
                name: state.name().to_string(),
            });
        }
        self.index.insert(state.name().to_string(), self.states.len());
        self.states.push(state);
        Ok(())
    }

    /// Register a new state with the given ordered rules.
    pub fn define_state(&mut self, name: impl Into<String>, rules: Vec<Rule>) -> Result<(), GrammarError> {
        self.define(State::new(name, rules))
    }

    /// Insert rules into an existing state.
    pub fn extend_state(&mut self, name: &str, rules: Vec<Rule>, position: Position) -> Result<(), GrammarError> {
        let state = self.state_mut(name)?;
        let table = state.rules_mut();
        match position {
            Position::Prepend => {
                table.splice(0..0, rules);
            }
            Position::Append => table.extend(rules),
        }
        Ok(())
    }

    /// Derive `new_name` from `source` by passing each of its rules through `transform`.
    ///
    /// The derived state keeps the source's default kind.
    pub fn clone_state_into(
        &mut self,
        source: &str,
        new_name: impl Into<String>,
        transform: impl FnMut(Rule) -> Rule,
    ) -> Result<(), GrammarError> {
        let (_, rules, default_kind) = self
            .state(source)
            .ok_or_else(|| GrammarError::UnknownState {
                name: source.to_string(),
            })?
            .clone()
            .into_parts();
        let rules = rules.into_iter().map(transform).collect();
        self.define(State::from_parts(new_name.into(), rules, default_kind))
    }

    fn state_mut(&mut self, name: &str) -> Result<&mut State, GrammarError> {
        match self.index.get(name) {
            Some(&i) => Ok(&mut self.states[i]),
            None => Err(GrammarError::UnknownState { name: name.to_string() }),
        }
    }

    /// Validate every transition target and freeze the registry.
    #[tracing::instrument(skip_all, fields(state_count = self.states.len(), start = %self.start))]
    pub fn build(self) -> Result<Grammar, GrammarError> {
        let Some(&start) = self.index.get(&self.start) else {
            return Err(GrammarError::MissingStartState { name: self.start });
        };

        let ids: HashMap<String, StateId> = self
            .index
            .iter()
            .map(|(name, &i)| (name.clone(), StateId(i)))
            .collect();

        let mut states = Vec::with_capacity(self.states.len());
        let mut rule_count = 0;
        for state in self.states {
            let (name, rules, default_kind) = state.into_parts();
            let rules = rules
                .into_iter()
                .enumerate()
                .map(|(i, rule)| {
                    rule.try_map_next(|target| {
                        ids.get(&target)
                            .copied()
                            .ok_or_else(|| GrammarError::UnknownTransitionTarget {
                                state: name.clone(),
                                rule: i,
                                target,
                            })
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            rule_count += rules.len();
            states.push(State::from_parts(name, rules, default_kind));
        }

        tracing::debug!(states = states.len(), rules = rule_count, "grammar built");
        Ok(Grammar {
            states,
            ids,
            start: StateId(start),
        })
    }
}

/// An immutable, validated set of states. Safe to share across threads and lexing sessions.
#[derive(Debug, Clone)]
pub struct Grammar {
    pub(crate) states: Vec<State<StateId>>,
    ids: HashMap<String, StateId>,
    start: StateId,
}

impl Grammar {
    /// The state lexing sessions begin in by default.
    pub fn start(&self) -> StateId {
        self.start
    }

    pub fn state_id(&self, name: &str) -> Option<StateId> {
        self.ids.get(name).copied()
    }

    pub fn state(&self, id: StateId) -> Option<&State<StateId>> {
        self.states.get(id.0)
    }

    /// Name of a state issued by this grammar.
    ///
    /// ## Panics
    /// - If `id` was issued by a different grammar with more states.
    pub fn state_name(&self, id: StateId) -> &str {
        self.states[id.0].name()
    }

    /// All states with their ids, in registration order.
    pub fn states(&self) -> impl Iterator<Item = (StateId, &State<StateId>)> {
        self.states.iter().enumerate().map(|(i, s)| (StateId(i), s))
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ftl_core::Kind;

    fn text_rule(pattern: &str) -> Rule {
        Rule::token(Kind::TEXT, pattern).unwrap()
    }

    fn sources(builder: &GrammarBuilder, name: &str) -> Vec<String> {
        builder
            .state(name)
            .unwrap()
            .rules()
            .iter()
            .map(|r| r.pattern().source().to_string())
            .collect()
    }

    #[test]
    fn test_define_rejects_duplicates() {
        let mut b = GrammarBuilder::new("start");
        b.define_state("start", vec![]).unwrap();
        let err = b.define_state("start", vec![]).unwrap_err();
        assert!(matches!(err, GrammarError::DuplicateState { name } if name == "start"));
    }

    #[test]
    fn test_extend_prepend_keeps_given_order() {
        let mut b = GrammarBuilder::new("start");
        b.define_state("start", vec![text_rule("c")]).unwrap();
        b.extend_state("start", vec![text_rule("a"), text_rule("b")], Position::Prepend)
            .unwrap();
        b.extend_state("start", vec![text_rule("d")], Position::Append).unwrap();
        assert_eq!(sources(&b, "start"), ["a", "b", "c", "d"]);
    }

    #[test]
    fn test_extend_unknown_state() {
        let mut b = GrammarBuilder::new("start");
        let err = b.extend_state("comment", vec![], Position::Prepend).unwrap_err();
        assert!(matches!(err, GrammarError::UnknownState { name } if name == "comment"));
    }

    #[test]
    fn test_clone_state_into_transforms_rules() {
        let mut b = GrammarBuilder::new("a");
        b.define(State::new("a", vec![text_rule("x").next("a")]).with_default_kind(Kind::STRING))
            .unwrap();
        b.define_state("b", vec![]).unwrap();
        b.clone_state_into("a", "a2", |rule| rule.next("b")).unwrap();

        let derived = b.state("a2").unwrap();
        assert_eq!(derived.default_kind(), Some(&Kind::STRING));
        assert_eq!(derived.rules()[0].next_state().map(String::as_str), Some("b"));
        // Source untouched
        assert_eq!(
            b.state("a").unwrap().rules()[0].next_state().map(String::as_str),
            Some("a")
        );
    }

    #[test]
    fn test_clone_unknown_source() {
        let mut b = GrammarBuilder::new("a");
        let err = b.clone_state_into("missing", "copy", |r| r).unwrap_err();
        assert!(matches!(err, GrammarError::UnknownState { .. }));
    }

    #[test]
    fn test_build_rejects_unknown_transition_target() {
        let mut b = GrammarBuilder::new("start");
        b.define_state("start", vec![text_rule("a"), text_rule("b").next("nowhere")])
            .unwrap();
        let err = b.build().unwrap_err();
        assert!(matches!(
            err,
            GrammarError::UnknownTransitionTarget { ref state, rule: 1, ref target }
                if state == "start" && target == "nowhere"
        ));
    }

    #[test]
    fn test_build_requires_start_state() {
        let mut b = GrammarBuilder::new("start");
        b.define_state("other", vec![]).unwrap();
        assert!(matches!(b.build(), Err(GrammarError::MissingStartState { .. })));
    }

    #[test]
    fn test_build_resolves_ids() {
        let mut b = GrammarBuilder::new("start");
        b.define_state("start", vec![text_rule("a").next("other")]).unwrap();
        b.define_state("other", vec![text_rule("b").next("start")]).unwrap();
        let g = b.build().unwrap();

        let other = g.state_id("other").unwrap();
        assert_eq!(g.state_name(other), "other");
        assert_eq!(g.state(g.start()).unwrap().rules()[0].target(), Some(other));
        assert_eq!(g.len(), 2);
        assert_eq!(g.states().count(), 2);
    }
}
