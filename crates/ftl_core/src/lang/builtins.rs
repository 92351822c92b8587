//! Builtin names (the part after `?` in `value?builtin`).
//!
//! ## See also
//! - <https://freemarker.apache.org/docs/ref_builtins.html>

/// Current builtins.
pub const BUILT_INS: &[&str] = &[
    "ancestors",
    "byte",
    "c",
    "cap_first",
    "capitalize",
    "ceiling",
    "children",
    "chop_linebreak",
    "chunk",
    "contains",
    "date",
    "datetime",
    "double",
    "ends_with",
    "eval",
    "first",
    "floor",
    "groups",
    "float",
    "has_content",
    "html",
    "index_of",
    "int",
    "interpret",
    "is_string",
    "is_number",
    "is_boolean",
    "is_date",
    "is_method",
    "is_transform",
    "is_macro",
    "is_hash",
    "is_hash_ex",
    "is_sequence",
    "is_collection",
    "is_enumerable",
    "is_indexable",
    "is_directive",
    "is_node",
    "j_string",
    "js_string",
    "keys",
    "last",
    "last_index_of",
    "left_pad",
    "length",
    "long",
    "lower_case",
    "matches",
    "namespace",
    "new",
    "node_namespace",
    "node_name",
    "node_type",
    "number",
    "number_to_date",
    "number_to_datetime",
    "number_to_time",
    "parent",
    "replace",
    "reverse",
    "right_pad",
    "round",
    "root",
    "rtf",
    "short",
    "size",
    "sort",
    "seq_contains",
    "seq_index_of",
    "seq_last_index_of",
    "sort_by",
    "split",
    "starts_with",
    "string",
    "substring",
    "time",
    "trim",
    "uncap_first",
    "upper_case",
    "url",
    "values",
    "word_list",
    "xhtml",
    "xml",
];

/// Builtins kept only for old templates.
pub const DEPRECATED_BUILT_INS: &[&str] = &["default", "exists", "if_exists", "web_safe"];

/// Return `true` if `name` is a current builtin.
pub fn is_builtin(name: &str) -> bool {
    BUILT_INS.contains(&name)
}
