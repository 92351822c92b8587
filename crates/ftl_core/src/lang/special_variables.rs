//! Special variables, accessed as `.name` (e.g. `.now`, `.locale`).

pub const SPECIAL_VARIABLES: &[&str] = &[
    "data_model",
    "error",
    "globals",
    "lang",
    "locale",
    "locals",
    "main",
    "namespace",
    "node",
    "now",
    "output_encoding",
    "template_name",
    "url_escaping_charset",
    "vars",
    "version",
];
