//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.
//!
//! Rendering is split from I/O: `render_tokens` and `render_states` are pure and return the text a command would
//! print, which is what the tests exercise.

use std::fmt::Write as _;
use std::fs;

use ftl_syntax::config::DEFAULT_TOKEN_LIMIT;
use ftl_syntax::{Grammar, LexerConfig, StateId, grammar};
use miette::{NamedSource, Report};
use serde_json::json;

use super::{CliError, CliResult, ExitCode};

/// Maximum source file size (16 MB)
const MAX_SOURCE_SIZE: u64 = 16 * 1024 * 1024;

/// Options for the `tokens` command.
#[derive(Debug, Clone, Default)]
pub struct TokenOptions {
    pub json: bool,
    pub strict: bool,
    /// State to start the first line in; the grammar's start state when `None`.
    pub state: Option<String>,
    /// Per-line token cap. `Some(0)` disables the cap, `None` applies [`DEFAULT_TOKEN_LIMIT`].
    pub token_limit: Option<usize>,
}

impl TokenOptions {
    fn lexer_config(&self) -> LexerConfig {
        let config = if self.strict {
            LexerConfig::strict()
        } else {
            LexerConfig::new()
        };
        match self.token_limit {
            Some(0) => config.with_token_limit(None),
            Some(n) => config.with_token_limit(Some(n)),
            None => config.with_token_limit(Some(DEFAULT_TOKEN_LIMIT)),
        }
    }
}

/// Build the template grammar over the default markup host.
pub fn load_grammar() -> CliResult<Grammar> {
    grammar::freemarker().map_err(|e| CliError::failure(format!("Error building template grammar: {}", e)))
}

/// Read source file contents.
///
/// ## Errors
///
/// Returns an error if:
/// - The file cannot be read (I/O error)
/// - The file exceeds `MAX_SOURCE_SIZE`
pub fn read_source(file_path: &str) -> CliResult<String> {
    let metadata =
        fs::metadata(file_path).map_err(|e| CliError::failure(format!("Cannot access file '{}': {}", file_path, e)))?;

    if metadata.len() > MAX_SOURCE_SIZE {
        return Err(CliError::failure(format!(
            "Source file '{}' is too large ({} bytes, max {} bytes)",
            file_path,
            metadata.len(),
            MAX_SOURCE_SIZE
        )));
    }

    fs::read_to_string(file_path).map_err(|e| CliError::failure(format!("Error reading file '{}': {}", file_path, e)))
}

fn resolve_state(grammar: &Grammar, name: Option<&str>) -> CliResult<StateId> {
    let Some(name) = name else {
        return Ok(grammar.start());
    };
    grammar.state_id(name).ok_or_else(|| {
        let known: Vec<&str> = grammar.states().map(|(_, s)| s.name()).collect();
        CliError::failure(format!("Unknown lexer state '{}' (known: {})", name, known.join(", ")))
    })
}

/// Lex `source` line by line, carrying each line's end state into the next, and render the tokens.
///
/// Text output has one token per line: `line:start-end<TAB>kind<TAB>text<TAB>state`, with 1-based line numbers,
/// byte offsets within the line and the state after the token. JSON output is an array of objects with the same
/// fields.
pub fn render_tokens(grammar: &Grammar, file_name: &str, source: &str, options: &TokenOptions) -> CliResult<String> {
    let config = options.lexer_config();
    let mut state = resolve_state(grammar, options.state.as_deref())?;

    let mut text = String::new();
    let mut records = Vec::new();
    for (index, line) in source.lines().enumerate() {
        let line_no = index + 1;
        let lexed = grammar.tokenize_line_with(line, state, config).map_err(|err| {
            let report = Report::new(err).with_source_code(NamedSource::new(file_name, line.to_string()));
            CliError::new(format!("{}:{}: {:?}", file_name, line_no, report), ExitCode::UNMATCHED)
        })?;

        for token in &lexed.tokens {
            let state_name = grammar.state_name(token.state);
            if options.json {
                records.push(json!({
                    "line": line_no,
                    "start": token.span.start,
                    "end": token.span.end,
                    "kind": token.kind.as_str(),
                    "text": token.text,
                    "state": state_name,
                }));
            } else {
                let _ = writeln!(
                    text,
                    "{}:{}-{}\t{}\t{:?}\t{}",
                    line_no, token.span.start, token.span.end, token.kind, token.text, state_name
                );
            }
        }
        state = lexed.end_state;
    }

    if options.json {
        serde_json::to_string_pretty(&records).map_err(|e| CliError::failure(format!("Error encoding JSON: {}", e)))
    } else {
        Ok(text)
    }
}

/// Render every registered state with its rule count and default kind.
pub fn render_states(grammar: &Grammar) -> String {
    let mut out = String::new();
    for (id, state) in grammar.states() {
        let marker = if id == grammar.start() { " (start)" } else { "" };
        let default = state.default_kind().map(|k| k.as_str()).unwrap_or("-");
        let _ = writeln!(
            out,
            "{}{}\trules={}\tdefault={}",
            state.name(),
            marker,
            state.rules().len(),
            default
        );
    }
    out
}

/// Lex a template file and print its tokens.
pub fn tokens_file(file_path: &str, options: &TokenOptions) -> CliResult<ExitCode> {
    let source = read_source(file_path)?;
    let grammar = load_grammar()?;
    tracing::debug!(file = file_path, lines = source.lines().count(), "lexing template");

    let rendered = render_tokens(&grammar, file_path, &source, options)?;
    if options.json {
        println!("{}", rendered);
    } else {
        print!("{}", rendered);
    }
    Ok(ExitCode::SUCCESS)
}

/// Print the registered lexer states.
pub fn list_states() -> CliResult<ExitCode> {
    let grammar = load_grammar()?;
    print!("{}", render_states(&grammar));
    Ok(ExitCode::SUCCESS)
}
