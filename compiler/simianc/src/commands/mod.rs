//! Command handlers for the `simian` binary.
//!
//! Handlers print their results to stdout and return a [`CommandError`] on
//! failure; `main` turns that into a message and a non-zero exit status.
//! Shared helpers like [`read_file`] live here in the module root.

mod debug;
mod repl;
mod run;

use std::io::IsTerminal;

use simian_eval::{EvalError, MacroError};

pub use debug::{expand_file, lex_file, parse_file};
pub use repl::{repl, PROMPT};
pub use run::run_file;

use crate::render_parse_errors;

/// Why a command failed.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("cannot find file '{path}'")]
    NotFound { path: String },

    #[error("permission denied reading '{path}'")]
    PermissionDenied { path: String },

    #[error("'{path}' contains invalid UTF-8 data")]
    InvalidUtf8 { path: String },

    #[error("error reading '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{count} parse error(s) in '{path}'")]
    Parse { path: String, count: usize },

    #[error(transparent)]
    Macro(#[from] MacroError),

    #[error("runtime error: {0}")]
    Runtime(EvalError),

    #[error("i/o error: {0}")]
    Output(#[from] std::io::Error),
}

/// Read a source file, mapping common failures to readable errors.
pub fn read_file(path: &str) -> Result<String, CommandError> {
    std::fs::read_to_string(path).map_err(|e| {
        let path = path.to_string();
        match e.kind() {
            std::io::ErrorKind::NotFound => CommandError::NotFound { path },
            std::io::ErrorKind::PermissionDenied => CommandError::PermissionDenied { path },
            std::io::ErrorKind::InvalidData => CommandError::InvalidUtf8 { path },
            _ => CommandError::Io { path, source: e },
        }
    })
}

/// Print parse errors for `path` to stderr and build the matching error.
fn report_parse_errors(
    path: &str,
    source: &str,
    errors: &[simian_parse::ParseError],
) -> CommandError {
    let color = std::io::stderr().is_terminal();
    eprint!("{}", render_parse_errors(path, source, errors, color));
    CommandError::Parse {
        path: path.to_string(),
        count: errors.len(),
    }
}
