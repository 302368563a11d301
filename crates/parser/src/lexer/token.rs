//! Token definition and types.

use std::fmt;

/// Lexical class of a scanned token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Identifier,
    Keyword,
    Operator,
    Punctuation,
    String,
    Comment,
    Number,
    /// Synthesized by the parser once the token stream is exhausted.
    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Identifier => "identifier",
            TokenKind::Keyword => "keyword",
            TokenKind::Operator => "operator",
            TokenKind::Punctuation => "punctuation",
            TokenKind::String => "string",
            TokenKind::Comment => "comment",
            TokenKind::Number => "number",
            TokenKind::Eof => "EOF",
        };
        f.write_str(name)
    }
}

/// A scanned token with its original text and 1-based source location.
///
/// `column` counts code points; a tab advances the column by one. String
/// tokens keep their quotes in `text`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub line: u32,
    pub column: u32,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, line: u32, column: u32) -> Self {
        Token {
            kind,
            text: text.into(),
            line,
            column,
        }
    }

    pub fn eof() -> Self {
        Token {
            kind: TokenKind::Eof,
            text: String::new(),
            line: 0,
            column: 0,
        }
    }

    /// Width of the lexeme in code points, used for diagnostic carets.
    pub fn width(&self) -> u32 {
        self.text.chars().count() as u32
    }
}
