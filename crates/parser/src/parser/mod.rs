//! Pratt parser over the token stream.
//!
//! Every keyword decision goes through the dictionary: the token text is
//! canonicalized first and dispatch happens on the canonical string, so
//! parsing is driven entirely by the loaded keyword set. Recoverable
//! failures record a diagnostic and surface as `None`; callers drop the
//! statement and keep going so diagnostics accumulate.

mod expr;
mod stmt;
mod types;

pub(crate) use expr::Precedence;

use crate::ast::{Ident, Program, Stmt};
use crate::dict::Dictionary;
use crate::error::Diagnostic;
use crate::lexer::{Token, TokenKind};

pub struct Parser<'d> {
    tokens: Vec<Token>,
    dict: &'d Dictionary,
    pos: usize,
    current: Token,
    peek: Token,
    errors: Vec<Diagnostic>,
    /// Set while parsing if/for/switch headers and range iterables: a
    /// following `{` opens the body, never a composite literal.
    no_composite_literal: bool,
}

/// Cursor snapshot for the single rewindable probe (range vs. expression
/// in a `for` header).
struct Checkpoint {
    pos: usize,
    current: Token,
    peek: Token,
    error_count: usize,
}

impl<'d> Parser<'d> {
    pub fn new(tokens: Vec<Token>, dict: &'d Dictionary) -> Self {
        let mut parser = Parser {
            tokens,
            dict,
            pos: 0,
            current: Token::eof(),
            peek: Token::eof(),
            errors: Vec::new(),
            no_composite_literal: false,
        };
        // Prime current and peek.
        parser.next_token();
        parser.next_token();
        parser
    }

    pub fn parse_program(&mut self) -> Program {
        let mut statements: Vec<Stmt> = Vec::new();

        while self.current.kind != TokenKind::Eof {
            if let Some(stmt) = self.parse_statement() {
                if let Stmt::Package(pkg) = &stmt {
                    if statements.iter().any(|s| matches!(s, Stmt::Package(_))) {
                        self.errors.push(Diagnostic::new(
                            "duplicate package statement",
                            pkg.token.line,
                            pkg.token.column,
                            pkg.token.width(),
                        ));
                    } else if !statements.is_empty() {
                        self.errors.push(Diagnostic::new(
                            "package statement must be the first statement",
                            pkg.token.line,
                            pkg.token.column,
                            pkg.token.width(),
                        ));
                    }
                }
                statements.push(stmt);
            }
            self.next_token();
        }

        Program { statements }
    }

    pub fn errors(&self) -> &[Diagnostic] {
        &self.errors
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn into_errors(self) -> Vec<Diagnostic> {
        self.errors
    }

    /// Advance the cursor; comment tokens are skipped here, so the parser
    /// never sees them.
    fn next_token(&mut self) {
        self.current = std::mem::replace(&mut self.peek, Token::eof());
        loop {
            if self.pos < self.tokens.len() {
                self.peek = self.tokens[self.pos].clone();
                self.pos += 1;
            } else {
                self.peek = Token::eof();
            }
            if self.peek.kind != TokenKind::Comment {
                break;
            }
        }
    }

    fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            pos: self.pos,
            current: self.current.clone(),
            peek: self.peek.clone(),
            error_count: self.errors.len(),
        }
    }

    fn restore(&mut self, checkpoint: Checkpoint) {
        self.pos = checkpoint.pos;
        self.current = checkpoint.current;
        self.peek = checkpoint.peek;
        self.errors.truncate(checkpoint.error_count);
    }

    fn current_is(&self, kind: TokenKind) -> bool {
        self.current.kind == kind
    }

    fn peek_is(&self, kind: TokenKind) -> bool {
        self.peek.kind == kind
    }

    fn current_is_punct(&self, text: &str) -> bool {
        self.current.kind == TokenKind::Punctuation && self.current.text == text
    }

    fn peek_is_punct(&self, text: &str) -> bool {
        self.peek.kind == TokenKind::Punctuation && self.peek.text == text
    }

    fn peek_is_operator(&self, text: &str) -> bool {
        self.peek.kind == TokenKind::Operator && self.peek.text == text
    }

    /// Canonical form of the current token's text.
    fn current_canonical(&self) -> String {
        self.dict.canonical(&self.current.text).to_string()
    }

    fn current_canonical_is(&self, keyword: &str) -> bool {
        self.dict.canonical(&self.current.text) == keyword
    }

    fn peek_canonical_is(&self, keyword: &str) -> bool {
        self.dict.canonical(&self.peek.text) == keyword
    }

    fn current_ident(&self) -> Ident {
        Ident::from_token(self.current.clone())
    }

    /// Advance when the peek token matches kind and text; otherwise record
    /// an expectation diagnostic.
    fn expect_peek(&mut self, kind: TokenKind, text: &str) -> bool {
        if self.peek.kind == kind && self.peek.text == text {
            self.next_token();
            true
        } else {
            self.peek_error(kind, text);
            false
        }
    }

    fn expect_peek_kind(&mut self, kind: TokenKind) -> bool {
        if self.peek.kind == kind {
            self.next_token();
            true
        } else {
            self.peek_error(kind, "");
            false
        }
    }

    fn peek_error(&mut self, kind: TokenKind, expected: &str) {
        let message = format!(
            "expected next token to be {} ({}), got {} ({}) instead",
            kind, expected, self.peek.kind, self.peek.text
        );
        self.errors.push(Diagnostic::new(
            message,
            self.peek.line,
            self.peek.column,
            self.peek.width(),
        ));
    }

    fn error_at_current(&mut self, message: impl Into<String>) {
        self.errors.push(Diagnostic::new(
            message,
            self.current.line,
            self.current.column,
            self.current.width(),
        ));
    }
}
