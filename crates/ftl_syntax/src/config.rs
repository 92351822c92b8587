//! Lexer configuration.

/// Per-line token cap editors commonly apply. Opt in with [`LexerConfig::with_token_limit`].
pub const DEFAULT_TOKEN_LIMIT: usize = 2000;

/// What to do when no rule of the active state matches and the state has no default kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnmatchedPolicy {
    /// Consume one character as an `invalid` token and keep going (interactive editors).
    #[default]
    Recover,
    /// Stop with a [`crate::LexError`] (standalone validation).
    Fail,
}

/// Lexer configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LexerConfig {
    /// Policy for input no rule matches
    pub unmatched: UnmatchedPolicy,
    /// Maximum tokens per call; once reached, the rest of the input is emitted as one `text` token and the lexer
    /// returns to the start state. `None` (the default) lexes to the end of input.
    pub token_limit: Option<usize>,
}

impl Default for LexerConfig {
    fn default() -> Self {
        Self {
            unmatched: UnmatchedPolicy::Recover,
            token_limit: None,
        }
    }
}

impl LexerConfig {
    /// Create a new config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail on unmatched input instead of recovering
    pub fn strict() -> Self {
        Self::default().with_unmatched(UnmatchedPolicy::Fail)
    }

    /// Set the unmatched-input policy
    pub fn with_unmatched(mut self, policy: UnmatchedPolicy) -> Self {
        self.unmatched = policy;
        self
    }

    /// Set the per-call token cap
    pub fn with_token_limit(mut self, limit: Option<usize>) -> Self {
        self.token_limit = limit;
        self
    }
}
