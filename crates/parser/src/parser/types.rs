//! The context-sensitive type grammar.
//!
//! Types are represented as identifiers carrying their full textual form;
//! only the pointer prefix is parsed back out by the emitters. `parse_type`
//! consumes the type starting from the peek token.

use super::Parser;
use crate::ast::{Expr, Ident};
use crate::lexer::TokenKind;

impl<'d> Parser<'d> {
    pub(super) fn parse_type(&mut self) -> Option<Ident> {
        // Pointers: `ki T` or `*T`, nested.
        if self.peek.kind == TokenKind::Keyword && self.peek.text == "ki" {
            self.next_token();
            let inner = self.parse_type()?;
            return Some(Ident {
                token: self.current.clone(),
                value: format!("*{}", inner.value),
            });
        }
        if self.peek_is_operator("*") {
            self.next_token();
            let inner = self.parse_type()?;
            return Some(Ident {
                token: self.current.clone(),
                value: format!("*{}", inner.value),
            });
        }

        // Slices `[]T` and arrays `[N]T`.
        if self.peek_is_punct("[") {
            self.next_token(); // [
            if self.peek_is_punct("]") {
                self.next_token(); // ]
                let inner = self.parse_type()?;
                return Some(Ident {
                    token: self.current.clone(),
                    value: format!("[]{}", inner.value),
                });
            }
            if self.peek_is(TokenKind::Number) {
                self.next_token();
                let size = self.current.text.clone();
                if !self.expect_peek(TokenKind::Punctuation, "]") {
                    return None;
                }
                let inner = self.parse_type()?;
                return Some(Ident {
                    token: self.current.clone(),
                    value: format!("[{}]{}", size, inner.value),
                });
            }
        }

        self.next_token();
        let mut canonical = self.current_canonical();

        // Qualified type: pkg.Name
        if self.peek_is_punct(".") {
            self.next_token(); // .
            self.next_token(); // type name
            canonical = format!("{}.{}", canonical, self.current.text);
        }

        if canonical == "map" {
            if !self.expect_peek(TokenKind::Punctuation, "[") {
                return Some(Ident {
                    token: self.current.clone(),
                    value: canonical,
                });
            }
            let key = self.parse_type()?;
            if !self.expect_peek(TokenKind::Punctuation, "]") {
                return Some(Ident {
                    token: self.current.clone(),
                    value: canonical,
                });
            }
            let value = self.parse_type()?;
            return Some(Ident {
                token: self.current.clone(),
                value: format!("map[{}]{}", key.value, value.value),
            });
        }

        if canonical == "chan" {
            // Surface variant chan<T> alongside the standard chan T.
            if self.peek_is_operator("<") {
                self.next_token(); // <
                let elem = self.parse_type()?;
                if self.peek_is_operator(">") {
                    self.next_token();
                }
                return Some(Ident {
                    token: self.current.clone(),
                    value: format!("chan {}", elem.value),
                });
            }
            let elem = self.parse_type()?;
            return Some(Ident {
                token: self.current.clone(),
                value: format!("chan {}", elem.value),
            });
        }

        if canonical == "interface" && self.peek_is_punct("{") {
            self.next_token(); // {
            if self.peek_is_punct("}") {
                self.next_token(); // }
                return Some(Ident {
                    token: self.current.clone(),
                    value: "interface{}".to_string(),
                });
            }
        }

        Some(Ident {
            token: self.current.clone(),
            value: canonical,
        })
    }

    /// A type, optionally preceded by `...` for variadic parameters.
    pub(super) fn parse_type_expression(&mut self) -> Option<Expr> {
        if self.peek_is_operator("...") {
            self.next_token();
            let inner = self.parse_type()?;
            return Some(Expr::Ident(Ident {
                token: self.current.clone(),
                value: format!("...{}", inner.value),
            }));
        }
        self.parse_type().map(Expr::Ident)
    }
}
