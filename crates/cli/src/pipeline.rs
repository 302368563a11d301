//! Pipeline for processing Singlish files.
//!
//! Owns dictionary resolution, the transpile-to-temp-file step, and the
//! downstream `go` toolchain invocations. Temporary files live only as
//! long as the child process that consumes them; the `transpile`
//! subcommand persists its output explicitly because the printed path
//! must survive.

use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::Command;

use tempfile::{Builder, NamedTempFile};
use thiserror::Error;

use singlish_codegen::TranspileError;
use singlish_parser::error::DictionaryError;
use singlish_parser::reporting;
use singlish_parser::Dictionary;

/// Environment variable naming a dictionary file, consulted when no
/// `--dictionary` flag is given.
pub const KEYWORDS_ENV: &str = "SINGLISH_KEYWORDS";

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to load dictionary: {0}")]
    Dictionary(#[from] DictionaryError),

    /// Diagnostics were already printed with source context.
    #[error("transpilation failed: {0}")]
    Transpile(#[from] TranspileError),
}

/// Resolution order: explicit flag, then environment, then the embedded
/// defaults.
pub fn load_dictionary(flag: Option<&Path>) -> Result<Dictionary, DictionaryError> {
    if let Some(path) = flag {
        return Dictionary::load(path);
    }
    if let Ok(path) = std::env::var(KEYWORDS_ENV) {
        if !path.is_empty() {
            return Dictionary::load(Path::new(&path));
        }
    }
    Ok(Dictionary::with_defaults())
}

/// Read, transpile, and write the generated Go to a temporary file.
fn transpile_to_temp(
    input: &Path,
    dictionary: Option<&Path>,
) -> Result<NamedTempFile, PipelineError> {
    let source = fs::read_to_string(input)?;
    let dict = load_dictionary(dictionary)?;

    let code = match singlish_codegen::transpile(&source, &dict) {
        Ok(code) => code,
        Err(err) => {
            let _ = reporting::print_diagnostics(&mut std::io::stderr(), &source, &err.diagnostics);
            return Err(err.into());
        }
    };

    let mut file = Builder::new()
        .prefix("singlish_")
        .suffix(".go")
        .tempfile()?;
    file.write_all(code.as_bytes())?;
    Ok(file)
}

pub fn transpile_file(input: &Path, dictionary: Option<&Path>) -> i32 {
    match transpile_to_temp(input, dictionary) {
        Ok(file) => match file.keep() {
            Ok((_, path)) => {
                println!("{}", path.display());
                0
            }
            Err(err) => {
                eprintln!("Error: {err}");
                1
            }
        },
        Err(err) => report(err),
    }
}

pub fn build_file(input: &Path, dictionary: Option<&Path>) -> i32 {
    let file = match transpile_to_temp(input, dictionary) {
        Ok(file) => file,
        Err(err) => return report(err),
    };

    let output = output_name(input);
    let status = Command::new("go")
        .arg("build")
        .arg("-o")
        .arg(&output)
        .arg(file.path())
        .status();
    child_exit_code(status)
}

pub fn run_file(input: &Path, dictionary: Option<&Path>, args: &[String]) -> i32 {
    let file = match transpile_to_temp(input, dictionary) {
        Ok(file) => file,
        Err(err) => return report(err),
    };

    let status = Command::new("go")
        .arg("run")
        .arg(file.path())
        .args(args)
        .status();
    child_exit_code(status)
}

pub fn format_file(input: &Path, dictionary: Option<&Path>) -> i32 {
    let result = (|| -> Result<(), PipelineError> {
        let source = fs::read_to_string(input)?;
        let dict = load_dictionary(dictionary)?;

        let formatted = match singlish_codegen::format(&source, &dict) {
            Ok(formatted) => formatted,
            Err(err) => {
                let _ =
                    reporting::print_diagnostics(&mut std::io::stderr(), &source, &err.diagnostics);
                return Err(err.into());
            }
        };

        fs::write(input, formatted)?;
        Ok(())
    })();

    match result {
        Ok(()) => 0,
        Err(err) => report(err),
    }
}

/// Binary name for `build`: the input basename without its extension.
fn output_name(input: &Path) -> String {
    input
        .file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.is_empty())
        .unwrap_or("main")
        .to_string()
}

/// The child's exit status propagates to our own.
fn child_exit_code(status: std::io::Result<std::process::ExitStatus>) -> i32 {
    match status {
        Ok(status) => status.code().unwrap_or(1),
        Err(err) => {
            eprintln!("Error: {err}");
            1
        }
    }
}

fn report(err: PipelineError) -> i32 {
    match err {
        // Diagnostics already went to stderr with source context.
        PipelineError::Transpile(_) => 1,
        other => {
            eprintln!("Error: {other}");
            1
        }
    }
}
