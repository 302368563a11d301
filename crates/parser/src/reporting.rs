//! Rendering diagnostics with source context and a caret.

use std::io::{self, Write};

use crate::error::Diagnostic;

/// Print one diagnostic: a header, the offending source line, and a caret
/// line. The pad mirrors the leading characters of the source line (tabs
/// stay tabs, everything else becomes a space) so the caret lines up under
/// any indentation.
pub fn print_error_with_context(
    out: &mut dyn Write,
    source: &str,
    diag: &Diagnostic,
) -> io::Result<()> {
    writeln!(out, "Error on line {}: {}", diag.line, diag.message)?;

    let line = match diag
        .line
        .checked_sub(1)
        .and_then(|index| nth_line(source, index as usize))
    {
        Some(line) => line,
        None => return Ok(()),
    };

    writeln!(out, "{line}")?;

    let width = diag.column.saturating_sub(1) as usize;
    let chars: Vec<char> = line.chars().collect();
    let pad: String = if width <= chars.len() {
        chars[..width]
            .iter()
            .map(|&ch| if ch == '\t' { '\t' } else { ' ' })
            .collect()
    } else {
        " ".repeat(width)
    };

    let carets = "^".repeat(diag.length.max(1) as usize);
    writeln!(out, "{pad}{carets}")
}

/// Print diagnostics in order.
pub fn print_diagnostics(
    out: &mut dyn Write,
    source: &str,
    diags: &[Diagnostic],
) -> io::Result<()> {
    for diag in diags {
        print_error_with_context(out, source, diag)?;
    }
    Ok(())
}

/// The 0-based `index`th line of `source`, honoring `\n`, `\r` and `\r\n`
/// line breaks.
fn nth_line(source: &str, index: usize) -> Option<&str> {
    let bytes = source.as_bytes();
    let mut start = 0;
    let mut line_no = 0;
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'\n' || bytes[i] == b'\r' {
            if line_no == index {
                return Some(&source[start..i]);
            }
            if bytes[i] == b'\r' && bytes.get(i + 1) == Some(&b'\n') {
                i += 1;
            }
            i += 1;
            start = i;
            line_no += 1;
        } else {
            i += 1;
        }
    }

    (line_no == index).then(|| &source[start..])
}
