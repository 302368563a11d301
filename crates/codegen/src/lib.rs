//! Back end of the Singlish transpiler: the Go code generator, the
//! canonical-surface formatter, and the two driver entry points that
//! string the phases together.
//!
//! ```no_run
//! use singlish_codegen::transpile;
//! use singlish_parser::Dictionary;
//!
//! let dict = Dictionary::with_defaults();
//! let code = transpile("kampung main\ngong(\"hi\")", &dict)?;
//! # Ok::<(), singlish_codegen::TranspileError>(())
//! ```

mod format;
mod gen;
mod imports;

use std::collections::HashSet;

use thiserror::Error;

use singlish_parser::ast::Program;
use singlish_parser::dict::Dictionary;
use singlish_parser::error::Diagnostic;
use singlish_parser::{lex, Parser};

pub use format::emit as format_program;
pub use gen::generate;

/// Aggregated lexer and parser diagnostics from a failed run.
#[derive(Debug, Clone, Error)]
#[error("{}", summarize(.diagnostics))]
pub struct TranspileError {
    pub diagnostics: Vec<Diagnostic>,
}

fn summarize(diagnostics: &[Diagnostic]) -> String {
    match diagnostics {
        [] => "transpilation failed".to_string(),
        [first] => first.message.clone(),
        [first, rest @ ..] => format!("{} (and {} more errors)", first.message, rest.len()),
    }
}

/// Lex and parse `source`, collecting every diagnostic before failing.
fn parse_source(source: &str, dict: &Dictionary) -> Result<Program, TranspileError> {
    let keywords: HashSet<String> = dict.surface_keys().map(str::to_owned).collect();

    let (tokens, diagnostics) = lex(source, &keywords);
    if !diagnostics.is_empty() {
        return Err(TranspileError { diagnostics });
    }

    let mut parser = Parser::new(tokens, dict);
    let program = parser.parse_program();
    if parser.has_errors() {
        return Err(TranspileError {
            diagnostics: parser.into_errors(),
        });
    }

    Ok(program)
}

/// Convert surface source to Go source.
pub fn transpile(source: &str, dict: &Dictionary) -> Result<String, TranspileError> {
    let program = parse_source(source, dict)?;
    Ok(gen::generate(&program, dict))
}

/// Rewrite surface source in canonical surface form.
pub fn format(source: &str, dict: &Dictionary) -> Result<String, TranspileError> {
    let program = parse_source(source, dict)?;
    Ok(format::emit(&program, dict))
}
