//! Scanner for Singlish source text.
//!
//! The keyword set is supplied by the caller because it comes from a
//! runtime-loaded dictionary; identifiers are reclassified after scanning.

mod token;

pub use token::{Token, TokenKind};

use std::collections::HashSet;

use crate::error::Diagnostic;

/// Operator table in longest-match order: three-character operators are
/// tried before two-character ones, and those before single characters.
const OPERATORS: &[&str] = &[
    "...", "<<=", ">>=", "&^=", "==", "!=", "<=", ">=", "<-", "&&", "||", "++", "--", "+=", "-=",
    "*=", "/=", "%=", "&=", "|=", "^=", "<<", ">>", "&^", ":=", "=", "+", "-", "*", "/", "%", "<",
    ">", "!", "&", "|", "^",
];

/// Scan `input` into tokens and diagnostics.
///
/// An identifier whose text is in `keywords` is classified as a keyword;
/// `ki` is always reserved for the pointer form regardless of the set.
/// Unterminated strings and block comments stop the scan; every other
/// diagnostic is recoverable.
pub fn lex(input: &str, keywords: &HashSet<String>) -> (Vec<Token>, Vec<Diagnostic>) {
    let mut lexer = Lexer::new(input, keywords);
    lexer.run();
    (lexer.tokens, lexer.diagnostics)
}

struct Lexer<'a> {
    src: Vec<char>,
    pos: usize,
    line: u32,
    column: u32,
    keywords: &'a HashSet<String>,
    tokens: Vec<Token>,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> Lexer<'a> {
    fn new(input: &str, keywords: &'a HashSet<String>) -> Self {
        Lexer {
            src: input.chars().collect(),
            pos: 0,
            line: 1,
            column: 1,
            keywords,
            tokens: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    fn run(&mut self) {
        while !self.eof() {
            let ch = self.peek();

            if is_whitespace(ch) {
                self.consume_whitespace();
                continue;
            }

            if ch == '/' {
                let next = self.peek_next();
                if next == '/' {
                    self.line_comment();
                    continue;
                }
                if next == '*' {
                    if !self.block_comment() {
                        return;
                    }
                    continue;
                }
            }

            if ch == '"' || ch == '`' {
                if !self.string(ch) {
                    return;
                }
                continue;
            }

            if is_identifier_start(ch) {
                self.identifier();
                continue;
            }

            if ch.is_ascii_digit() {
                self.number();
                continue;
            }

            if self.operator_or_punct() {
                continue;
            }

            self.diagnostics
                .push(Diagnostic::new("unexpected character", self.line, self.column, 1));
            self.advance();
        }
    }

    fn eof(&self) -> bool {
        self.pos >= self.src.len()
    }

    fn peek(&self) -> char {
        if self.eof() {
            '\0'
        } else {
            self.src[self.pos]
        }
    }

    fn peek_next(&self) -> char {
        if self.pos + 1 >= self.src.len() {
            '\0'
        } else {
            self.src[self.pos + 1]
        }
    }

    /// Consume one code point, folding `\r\n` into a single line break.
    fn advance(&mut self) -> char {
        if self.eof() {
            return '\0';
        }
        let ch = self.src[self.pos];
        self.pos += 1;
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
            return ch;
        }
        if ch == '\r' {
            if !self.eof() && self.src[self.pos] == '\n' {
                self.pos += 1;
            }
            self.line += 1;
            self.column = 1;
            return ch;
        }
        self.column += 1;
        ch
    }

    fn consume_whitespace(&mut self) {
        while !self.eof() && is_whitespace(self.peek()) {
            self.advance();
        }
    }

    fn text_from(&self, start: usize) -> String {
        self.src[start..self.pos].iter().collect()
    }

    fn identifier(&mut self) {
        let (line, column) = (self.line, self.column);
        let start = self.pos;
        self.advance();
        while !self.eof() && is_identifier_part(self.peek()) {
            self.advance();
        }
        let text = self.text_from(start);
        let kind = if self.keywords.contains(&text) || text == "ki" {
            TokenKind::Keyword
        } else {
            TokenKind::Identifier
        };
        self.tokens.push(Token::new(kind, text, line, column));
    }

    fn number(&mut self) {
        let (line, column) = (self.line, self.column);
        let start = self.pos;
        self.advance();
        while !self.eof() && self.peek().is_ascii_digit() {
            self.advance();
        }
        // The dot only belongs to the number when a digit follows it;
        // otherwise it starts a member access.
        if self.peek() == '.' && self.peek_next().is_ascii_digit() {
            self.advance();
            while !self.eof() && self.peek().is_ascii_digit() {
                self.advance();
            }
        }
        let text = self.text_from(start);
        self.tokens
            .push(Token::new(TokenKind::Number, text, line, column));
    }

    fn line_comment(&mut self) {
        let (line, column) = (self.line, self.column);
        let start = self.pos;
        self.advance();
        self.advance();
        while !self.eof() {
            let ch = self.peek();
            if ch == '\n' || ch == '\r' {
                break;
            }
            self.advance();
        }
        let text = self.text_from(start);
        self.tokens
            .push(Token::new(TokenKind::Comment, text, line, column));
    }

    fn block_comment(&mut self) -> bool {
        let (line, column) = (self.line, self.column);
        let start = self.pos;
        self.advance();
        self.advance();
        while !self.eof() {
            if self.peek() == '*' && self.peek_next() == '/' {
                self.advance();
                self.advance();
                let text = self.text_from(start);
                self.tokens
                    .push(Token::new(TokenKind::Comment, text, line, column));
                return true;
            }
            self.advance();
        }
        self.diagnostics
            .push(Diagnostic::new("unterminated block comment", line, column, 1));
        false
    }

    fn string(&mut self, quote: char) -> bool {
        let (line, column) = (self.line, self.column);
        let start = self.pos;
        self.advance();
        while !self.eof() {
            let ch = self.peek();

            if quote == '`' {
                if ch == '`' {
                    self.advance();
                    let text = self.text_from(start);
                    self.tokens
                        .push(Token::new(TokenKind::String, text, line, column));
                    return true;
                }
                self.advance();
                continue;
            }

            if ch == '\\' {
                // A backslash escapes whatever single character follows.
                self.advance();
                if !self.eof() {
                    self.advance();
                }
                continue;
            }

            if ch == '"' {
                self.advance();
                let text = self.text_from(start);
                self.tokens
                    .push(Token::new(TokenKind::String, text, line, column));
                return true;
            }

            if ch == '\n' || ch == '\r' {
                self.diagnostics
                    .push(Diagnostic::new("unterminated string literal", line, column, 1));
                return false;
            }

            self.advance();
        }

        self.diagnostics
            .push(Diagnostic::new("unterminated string literal", line, column, 1));
        false
    }

    fn operator_or_punct(&mut self) -> bool {
        let (line, column) = (self.line, self.column);

        if let Some(op) = self.match_operator() {
            self.tokens
                .push(Token::new(TokenKind::Operator, op, line, column));
            return true;
        }

        let ch = self.peek();
        if is_punctuation(ch) {
            self.advance();
            self.tokens
                .push(Token::new(TokenKind::Punctuation, ch, line, column));
            return true;
        }

        false
    }

    fn match_operator(&mut self) -> Option<&'static str> {
        for op in OPERATORS {
            let len = op.len();
            if self.pos + len > self.src.len() {
                continue;
            }
            if op
                .chars()
                .zip(&self.src[self.pos..self.pos + len])
                .all(|(a, &b)| a == b)
            {
                for _ in 0..len {
                    self.advance();
                }
                return Some(op);
            }
        }
        None
    }
}

fn is_whitespace(ch: char) -> bool {
    ch == ' ' || ch == '\t' || ch == '\n' || ch == '\r'
}

fn is_identifier_start(ch: char) -> bool {
    ch == '_' || ch.is_alphabetic()
}

fn is_identifier_part(ch: char) -> bool {
    ch == '_' || ch.is_alphabetic() || ch.is_ascii_digit()
}

fn is_punctuation(ch: char) -> bool {
    matches!(ch, '(' | ')' | '{' | '}' | '[' | ']' | ',' | ';' | ':' | '.')
}
