//! Reserved names that are never plain identifiers.

/// Boolean literals.
pub const BOOLEANS: &[&str] = &["true", "false"];

/// Word spellings of comparison operators (used where `<`/`>` would close a tag).
pub const COMPARISONS: &[&str] = &["gt", "gte", "lt", "lte"];

/// Connectives used by `list`, `import` and friends.
pub const OTHERS: &[&str] = &["as", "in", "using"];
