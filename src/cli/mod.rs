//! CLI module for the template tokenizer
//!
//! ## Commands
//!
//! - `tokens <file>` - Lex a template line by line and print the tokens
//! - `states` - List the registered lexer states
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
    /// Strict lexing hit input no rule matches.
    pub const UNMATCHED: ExitCode = ExitCode(2);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Context-sensitive FreeMarker template tokenizer
#[derive(Parser, Debug)]
#[command(name = "ftlex")]
#[command(version = VERSION)]
#[command(about = "Tokenize FreeMarker templates the way an editor highlighter sees them", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Lex a template line by line and print its tokens
    Tokens {
        /// Template file to lex
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Print tokens as JSON
        #[arg(long)]
        json: bool,
        /// Fail on input no rule matches instead of emitting `invalid` tokens
        #[arg(long)]
        strict: bool,
        /// State to start the first line in (default: start)
        #[arg(long, value_name = "NAME")]
        state: Option<String>,
        /// Maximum tokens per line (default 2000), 0 disables the cap
        #[arg(long, value_name = "N")]
        token_limit: Option<usize>,
    },

    /// List the registered lexer states
    States,
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the CLI command and return result.
fn execute(cli: Cli) -> CliResult<ExitCode> {
    match cli.command {
        Command::Tokens {
            file,
            json,
            strict,
            state,
            token_limit,
        } => {
            let options = commands::TokenOptions {
                json,
                strict,
                state,
                token_limit,
            };
            commands::tokens_file(&file.to_string_lossy(), &options)
        }
        Command::States => commands::list_states(),
    }
}

// ============================================================================
// Tests
// ============================================================================
