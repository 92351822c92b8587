//! Directive names, as written after `<#`, `</#`, `[#` or `[/#`.

/// Current directives.
pub const DIRECTIVES: &[&str] = &[
    "assign", "attempt", "break", "case", "compress", "default", "else", "elseif", "escape", "fallback", "function",
    "flush", "ftl", "global", "if", "import", "include", "list", "local", "lt", "macro", "nested", "noescape", "nt",
    "recover", "recurse", "return", "rt", "setting", "stop", "switch", "t", "visit",
];

/// Directives removed from the language but still seen in old templates.
pub const DEPRECATED_DIRECTIVES: &[&str] = &["call", "comment", "foreach", "transform"];

/// Return `true` if `name` is a current directive.
pub fn is_directive(name: &str) -> bool {
    DIRECTIVES.contains(&name)
}
