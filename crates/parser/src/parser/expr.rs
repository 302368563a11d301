//! Pratt expression parsing.
//!
//! One prefix handler and one infix handler dispatch on the token kind
//! and the dictionary-canonicalized token text, so keyword aliases with
//! operator semantics (`pass` → `<-`, `ki` → `*`) parse exactly like the
//! operators they map to.

use super::Parser;
use crate::ast::*;
use crate::lexer::TokenKind;

/// Binding strength, ascending. Operands are parsed up to a precedence
/// floor with a strict `<` comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum Precedence {
    Lowest,
    Assign,
    Send,
    LogicalOr,
    LogicalAnd,
    Equals,
    LessGreater,
    Sum,
    Product,
    Prefix,
    Call,
    Index,
    Postfix,
}

fn precedence_of(op: &str) -> Precedence {
    match op {
        "=" | ":=" | "+=" | "-=" | "*=" | "/=" | "%=" | "&=" | "|=" | "^=" => Precedence::Assign,
        "<-" => Precedence::Send,
        "||" => Precedence::LogicalOr,
        "&&" => Precedence::LogicalAnd,
        "==" | "!=" => Precedence::Equals,
        "<" | ">" | "<=" | ">=" => Precedence::LessGreater,
        "+" | "-" => Precedence::Sum,
        "*" | "/" | "%" => Precedence::Product,
        "(" | "{" => Precedence::Call,
        "[" | "." => Precedence::Index,
        "++" | "--" => Precedence::Postfix,
        _ => Precedence::Lowest,
    }
}

impl<'d> Parser<'d> {
    fn peek_precedence(&self) -> Precedence {
        precedence_of(self.dict.canonical(&self.peek.text))
    }

    fn current_precedence(&self) -> Precedence {
        precedence_of(self.dict.canonical(&self.current.text))
    }

    pub(super) fn parse_expression(&mut self, precedence: Precedence) -> Option<Expr> {
        let mut left = self.parse_prefix()?;

        while !self.peek_is(TokenKind::Eof) && precedence < self.peek_precedence() {
            if self.peek_is_punct("{") && self.blocks_composite_literal(&left) {
                return Some(left);
            }
            self.next_token();
            left = self.parse_infix(left)?;
        }

        Some(left)
    }

    /// Whether a following `{` must open a block rather than a composite
    /// literal after `left`.
    fn blocks_composite_literal(&self, left: &Expr) -> bool {
        if self.no_composite_literal {
            return true;
        }
        match left {
            Expr::IncDec(_)
            | Expr::Index(_)
            | Expr::Slice(_)
            | Expr::Call(_)
            | Expr::Int(_)
            | Expr::Float(_)
            | Expr::Str(_) => true,
            Expr::Infix(infix) => infix.operator != ".",
            Expr::Prefix(prefix) => prefix.operator != "&" && prefix.operator != "*",
            Expr::Ident(ident) => matches!(ident.value.as_str(), "true" | "false" | "nil"),
            _ => false,
        }
    }

    fn parse_prefix(&mut self) -> Option<Expr> {
        match self.current.kind {
            TokenKind::Identifier | TokenKind::Keyword => self.parse_identifier_expression(),
            TokenKind::Number => self.parse_number_literal(),
            TokenKind::String => Some(Expr::Str(StrLit {
                token: self.current.clone(),
                value: self.current.text.clone(),
            })),
            TokenKind::Operator => self.parse_prefix_operator(),
            TokenKind::Punctuation => self.parse_grouped_expression(),
            _ => {
                self.no_prefix_error();
                None
            }
        }
    }

    fn no_prefix_error(&mut self) {
        let message = format!("no prefix parse function for {} found", self.current.kind);
        self.error_at_current(message);
    }

    fn parse_infix(&mut self, left: Expr) -> Option<Expr> {
        match self.current.kind {
            TokenKind::Punctuation => self.parse_call_or_group(left),
            // Operators, plus keywords and identifiers acting as operators
            // through the dictionary.
            _ => self.parse_infix_operator(left),
        }
    }

    fn parse_prefix_operator(&mut self) -> Option<Expr> {
        if !matches!(self.current.text.as_str(), "-" | "!" | "&" | "*" | "<-") {
            self.no_prefix_error();
            return None;
        }
        let token = self.current.clone();
        let operator = token.text.clone();
        self.next_token();
        let right = self.parse_expression(Precedence::Prefix)?;
        Some(Expr::Prefix(PrefixExpr {
            token,
            operator,
            right: Box::new(right),
        }))
    }

    fn parse_infix_operator(&mut self, left: Expr) -> Option<Expr> {
        if self.current.text == "++" || self.current.text == "--" {
            return Some(Expr::IncDec(IncDecExpr {
                token: self.current.clone(),
                left: Box::new(left),
                operator: self.current.text.clone(),
            }));
        }

        let token = self.current.clone();
        let operator = self.current_canonical();
        let precedence = self.current_precedence();
        self.next_token();
        let right = self.parse_expression(precedence)?;

        Some(Expr::Infix(InfixExpr {
            token,
            left: Box::new(left),
            operator,
            right: Box::new(right),
        }))
    }

    fn parse_identifier_expression(&mut self) -> Option<Expr> {
        let canonical = self.current_canonical();
        match canonical.as_str() {
            "struct" => self.parse_struct_literal(),
            "interface" => self.parse_interface_literal(),
            "func" => self
                .parse_function_literal()
                .map(|lit| Expr::Function(Box::new(lit))),
            // Pointer dereference (ki) and channel receive (catch) behave
            // as prefix operators.
            "*" | "<-" => {
                let token = self.current.clone();
                self.next_token();
                let right = self.parse_expression(Precedence::Prefix)?;
                Some(Expr::Prefix(PrefixExpr {
                    token,
                    operator: canonical,
                    right: Box::new(right),
                }))
            }
            // Channel and map types showing up in expression position,
            // e.g. as the first argument of make().
            "chan" => {
                let token = self.current.clone();
                let mut value = canonical;
                if self.peek_is_operator("<") {
                    self.next_token();
                    let elem = self.parse_type()?;
                    if self.peek_is_operator(">") {
                        self.next_token();
                    }
                    value = format!("chan {}", elem.value);
                } else if self.peek_is(TokenKind::Identifier) || self.peek_is(TokenKind::Keyword) {
                    let elem = self.parse_type()?;
                    value = format!("chan {}", elem.value);
                }
                Some(Expr::Ident(Ident { token, value }))
            }
            "map" => {
                let token = self.current.clone();
                let mut value = canonical;
                if self.peek_is_punct("[") {
                    self.next_token();
                    let key = self.parse_type()?;
                    if !self.expect_peek(TokenKind::Punctuation, "]") {
                        return None;
                    }
                    let elem = self.parse_type()?;
                    value = format!("map[{}]{}", key.value, elem.value);
                }
                Some(Expr::Ident(Ident { token, value }))
            }
            _ => Some(Expr::Ident(Ident {
                token: self.current.clone(),
                value: canonical,
            })),
        }
    }

    fn parse_number_literal(&mut self) -> Option<Expr> {
        let token = self.current.clone();
        if token.text.contains('.') {
            match token.text.parse::<f64>() {
                Ok(value) => Some(Expr::Float(FloatLit { token, value })),
                Err(_) => {
                    let message = format!("could not parse {:?} as float", token.text);
                    self.error_at_current(message);
                    None
                }
            }
        } else {
            match token.text.parse::<i64>() {
                Ok(value) => Some(Expr::Int(IntLit { token, value })),
                Err(_) => {
                    let message = format!("could not parse {:?} as integer", token.text);
                    self.error_at_current(message);
                    None
                }
            }
        }
    }

    fn parse_grouped_expression(&mut self) -> Option<Expr> {
        match self.current.text.as_str() {
            "(" => {
                self.next_token();
                let expr = self.parse_expression(Precedence::Lowest)?;
                if !self.expect_peek(TokenKind::Punctuation, ")") {
                    return None;
                }
                Some(expr)
            }
            "{" => self.parse_composite_literal(None),
            "[" => self.parse_slice_type_expression(),
            _ => None,
        }
    }

    /// `[]T` or `[N]T` in expression position (composite literal types).
    fn parse_slice_type_expression(&mut self) -> Option<Expr> {
        if self.peek_is_punct("]") {
            self.next_token(); // ]
            let elem = self.parse_type()?;
            return Some(Expr::Ident(Ident {
                token: self.current.clone(),
                value: format!("[]{}", elem.value),
            }));
        }
        if self.peek_is(TokenKind::Number) {
            self.next_token();
            let size = self.current.text.clone();
            if !self.expect_peek(TokenKind::Punctuation, "]") {
                return None;
            }
            let elem = self.parse_type()?;
            return Some(Expr::Ident(Ident {
                token: self.current.clone(),
                value: format!("[{}]{}", size, elem.value),
            }));
        }
        // Unrecognized size expression: skip to the closing bracket.
        while !self.current_is_punct("]") {
            if self.current_is(TokenKind::Eof) {
                return None;
            }
            self.next_token();
        }
        let elem = self.parse_type()?;
        Some(Expr::Ident(Ident {
            token: self.current.clone(),
            value: format!("[]{}", elem.value),
        }))
    }

    fn parse_call_or_group(&mut self, left: Expr) -> Option<Expr> {
        match self.current.text.as_str() {
            "(" => self.parse_call_expression(left),
            "." => {
                if self.peek_is_punct("(") {
                    // Type assertion x.(T)
                    let token = self.current.clone();
                    self.next_token(); // (
                    let ty = self.parse_type_expression()?;
                    if !self.expect_peek(TokenKind::Punctuation, ")") {
                        return None;
                    }
                    Some(Expr::TypeAssert(TypeAssertExpr {
                        token,
                        left: Box::new(left),
                        ty: Box::new(ty),
                    }))
                } else {
                    self.parse_infix_operator(left)
                }
            }
            "[" => self.parse_index_expression(left),
            "{" => self.parse_composite_literal(Some(left)),
            _ => None,
        }
    }

    /// Index or slice, disambiguated by the `:` after `[`.
    fn parse_index_expression(&mut self, left: Expr) -> Option<Expr> {
        let token = self.current.clone();

        // No low bound: a[:] or a[:high]
        if self.peek_is_punct(":") {
            self.next_token(); // :
            let mut high = None;
            if !self.peek_is_punct("]") {
                self.next_token();
                high = Some(Box::new(self.parse_expression(Precedence::Lowest)?));
            }
            if !self.expect_peek(TokenKind::Punctuation, "]") {
                return None;
            }
            return Some(Expr::Slice(SliceExpr {
                token,
                left: Box::new(left),
                low: None,
                high,
            }));
        }

        self.next_token();
        let index = self.parse_expression(Precedence::Lowest)?;

        if self.peek_is_punct(":") {
            self.next_token(); // :
            let mut high = None;
            if !self.peek_is_punct("]") {
                self.next_token();
                high = Some(Box::new(self.parse_expression(Precedence::Lowest)?));
            }
            if !self.expect_peek(TokenKind::Punctuation, "]") {
                return None;
            }
            return Some(Expr::Slice(SliceExpr {
                token,
                left: Box::new(left),
                low: Some(Box::new(index)),
                high,
            }));
        }

        if !self.expect_peek(TokenKind::Punctuation, "]") {
            return None;
        }
        Some(Expr::Index(IndexExpr {
            token,
            left: Box::new(left),
            index: Box::new(index),
        }))
    }

    fn parse_composite_literal(&mut self, ty: Option<Expr>) -> Option<Expr> {
        let token = self.current.clone();
        let elements = self.parse_composite_elements()?;
        Some(Expr::Composite(CompositeLit {
            token,
            ty: ty.map(Box::new),
            elements,
        }))
    }

    fn parse_composite_elements(&mut self) -> Option<Vec<Expr>> {
        let mut list = Vec::new();

        if self.peek_is_punct("}") {
            self.next_token();
            return Some(list);
        }

        self.next_token();
        loop {
            let mut element = self.parse_expression(Precedence::Lowest)?;

            if self.peek_is_punct(":") {
                self.next_token(); // :
                let colon = self.current.clone();
                self.next_token();
                let value = self.parse_expression(Precedence::Lowest)?;
                element = Expr::KeyValue(KeyValueExpr {
                    token: colon,
                    key: Box::new(element),
                    value: Box::new(value),
                });
            }

            list.push(element);

            if self.peek_is_punct("}") {
                break;
            }
            if !self.expect_peek(TokenKind::Punctuation, ",") {
                return None;
            }
            // Trailing comma.
            if self.peek_is_punct("}") {
                break;
            }
            self.next_token();
        }

        if !self.expect_peek(TokenKind::Punctuation, "}") {
            return None;
        }
        Some(list)
    }

    fn parse_call_expression(&mut self, function: Expr) -> Option<Expr> {
        let token = self.current.clone();
        let arguments = self.parse_call_arguments()?;
        Some(Expr::Call(CallExpr {
            token,
            function: Box::new(function),
            arguments,
        }))
    }

    fn parse_call_arguments(&mut self) -> Option<Vec<Expr>> {
        let mut args = Vec::new();

        if self.peek_is_punct(")") {
            self.next_token();
            return Some(args);
        }

        self.next_token();
        args.push(self.parse_call_argument()?);

        while self.peek_is_punct(",") {
            self.next_token();
            self.next_token();
            args.push(self.parse_call_argument()?);
        }

        if !self.expect_peek(TokenKind::Punctuation, ")") {
            return None;
        }
        Some(args)
    }

    fn parse_call_argument(&mut self) -> Option<Expr> {
        let arg = self.parse_expression(Precedence::Lowest)?;
        // Variadic expansion: the argument keeps its textual form.
        if self.peek_is_operator("...") {
            self.next_token();
            return Some(Expr::Ident(Ident {
                token: self.current.clone(),
                value: format!("{arg}..."),
            }));
        }
        Some(arg)
    }

    fn parse_struct_literal(&mut self) -> Option<Expr> {
        let token = self.current.clone();
        if !self.expect_peek(TokenKind::Punctuation, "{") {
            return None;
        }
        let fields = self.parse_struct_fields();
        Some(Expr::Struct(StructLit { token, fields }))
    }

    fn parse_struct_fields(&mut self) -> Vec<Field> {
        let mut fields = Vec::new();

        self.next_token();
        while !self.current_is_punct("}") && !self.current_is(TokenKind::Eof) {
            // A leading `var` keyword before a field is tolerated.
            if self.current_canonical_is("var") {
                self.next_token();
            }

            if !self.current_is(TokenKind::Identifier) && !self.current_is(TokenKind::Keyword) {
                self.next_token();
                continue;
            }

            let name = self.current_ident();
            self.next_token();
            let ty = self.parse_expression(Precedence::Lowest);

            let mut tag = None;
            if self.peek_is(TokenKind::String) {
                self.next_token();
                tag = Some(StrLit {
                    token: self.current.clone(),
                    value: self.current.text.clone(),
                });
            }

            fields.push(Field {
                name: Some(name),
                ty,
                tag,
            });

            if self.peek_is_punct(";") {
                self.next_token();
            }
            self.next_token();
        }

        fields
    }

    fn parse_interface_literal(&mut self) -> Option<Expr> {
        let token = self.current.clone();
        if !self.expect_peek(TokenKind::Punctuation, "{") {
            return None;
        }
        let methods = self.parse_interface_methods()?;
        Some(Expr::Interface(InterfaceLit { token, methods }))
    }

    fn parse_interface_methods(&mut self) -> Option<Vec<Method>> {
        let mut methods = Vec::new();

        self.next_token();
        while !self.current_is_punct("}") && !self.current_is(TokenKind::Eof) {
            // A leading `func` keyword before a method is tolerated.
            if self.current_canonical_is("func") {
                self.next_token();
            }

            if !self.current_is(TokenKind::Identifier) && !self.current_is(TokenKind::Keyword) {
                self.next_token();
                continue;
            }

            let name = self.current_ident();
            if !self.expect_peek(TokenKind::Punctuation, "(") {
                return None;
            }
            let params = self.parse_method_parameters()?;

            let mut ret = None;
            if !self.peek_is(TokenKind::Punctuation) && !self.peek_is(TokenKind::Operator) {
                self.next_token();
                ret = self.parse_expression(Precedence::Lowest);
            }

            methods.push(Method { name, params, ret });

            if self.peek_is_punct(";") {
                self.next_token();
            }
            self.next_token();
        }

        Some(methods)
    }

    fn parse_method_parameters(&mut self) -> Option<Vec<Field>> {
        let mut params = Vec::new();

        if self.peek_is_punct(")") {
            self.next_token();
            return Some(params);
        }

        self.next_token();
        loop {
            let name = self.current_ident();
            self.next_token();
            let ty = self.parse_expression(Precedence::Lowest);

            params.push(Field {
                name: Some(name),
                ty,
                tag: None,
            });

            if self.peek_is_punct(")") {
                break;
            }
            if self.peek_is_punct(",") {
                self.next_token();
                self.next_token();
                continue;
            }
            break;
        }

        if !self.expect_peek(TokenKind::Punctuation, ")") {
            return None;
        }
        Some(params)
    }

    pub(super) fn parse_function_literal(&mut self) -> Option<FunctionLit> {
        let token = self.current.clone();

        if !self.expect_peek(TokenKind::Punctuation, "(") {
            return None;
        }
        let params = self.parse_function_parameters()?;

        let mut ret = None;
        if !self.peek_is_punct("{") {
            ret = self.parse_type().map(Expr::Ident);
        }

        if !self.expect_peek(TokenKind::Punctuation, "{") {
            return None;
        }
        let body = self.parse_block_statement();

        Some(FunctionLit {
            token,
            params,
            ret,
            body,
        })
    }
}
