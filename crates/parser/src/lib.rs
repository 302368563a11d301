//! Front end of the Singlish to Go transpiler: keyword dictionary, lexer,
//! AST, and a Pratt parser whose keyword dispatch is driven entirely by
//! the dictionary. Diagnostics are collected per phase and rendered with
//! source context by [`reporting`].

pub mod ast;
pub mod dict;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod reporting;

pub use dict::Dictionary;
pub use error::{Diagnostic, DictionaryError};
pub use lexer::{lex, Token, TokenKind};
pub use parser::Parser;
