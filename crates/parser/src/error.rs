//! Diagnostics and error types shared by the front-end phases.

use std::path::PathBuf;

use thiserror::Error;

/// A recoverable lexer or parser diagnostic with a 1-based source location.
///
/// Diagnostics are collected, not thrown: each phase accumulates them and
/// callers inspect the list once the phase has finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub message: String,
    pub line: u32,
    pub column: u32,
    /// Width of the offending lexeme in code points. The printer draws at
    /// least one caret even when this is zero.
    pub length: u32,
}

impl Diagnostic {
    pub fn new(message: impl Into<String>, line: u32, column: u32, length: u32) -> Self {
        Diagnostic {
            message: message.into(),
            line,
            column,
            length,
        }
    }
}

/// Errors raised while loading a dictionary file.
#[derive(Debug, Error)]
pub enum DictionaryError {
    #[error("failed to open dictionary file {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid dictionary entry in {}: {}", .path.display(), .line)]
    InvalidEntry { path: PathBuf, line: String },
}
