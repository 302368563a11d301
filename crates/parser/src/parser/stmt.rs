//! Statement parsing.

use smallvec::SmallVec;

use super::{Parser, Precedence};
use crate::ast::*;
use crate::error::Diagnostic;
use crate::lexer::TokenKind;

impl<'d> Parser<'d> {
    pub(super) fn parse_statement(&mut self) -> Option<Stmt> {
        let canonical = self.current_canonical();
        match canonical.as_str() {
            "package" => self.parse_package_statement().map(Stmt::Package),
            "import" => self.parse_import_statement().map(Stmt::Import),
            "var" | "const" | "let" => self.parse_let_statement().map(Stmt::Let),
            "return" => self.parse_return_statement().map(Stmt::Return),
            "func" => self.parse_function_statement().map(Stmt::Function),
            "type" => self.parse_type_statement().map(Stmt::Type),
            "if" => self.parse_if_statement().map(Stmt::If),
            "for" => self.parse_for_statement().map(Stmt::For),
            "go" => self.parse_go_statement().map(Stmt::Go),
            "defer" => self.parse_defer_statement().map(Stmt::Defer),
            "switch" => self.parse_switch_statement().map(Stmt::Switch),
            "select" => self.parse_select_statement().map(Stmt::Select),
            _ => self.parse_expression_statement().map(Stmt::Expr),
        }
    }

    fn parse_package_statement(&mut self) -> Option<PackageStmt> {
        let token = self.current.clone();
        if !self.expect_peek_kind(TokenKind::Identifier) {
            return None;
        }
        Some(PackageStmt {
            token,
            name: self.current_ident(),
        })
    }

    fn parse_import_statement(&mut self) -> Option<ImportStmt> {
        let token = self.current.clone();
        let mut paths = Vec::new();

        if self.peek_is_punct("(") {
            // Grouped form: import ( "a" "b" )
            self.next_token();
            while self.peek_is(TokenKind::String) {
                self.next_token();
                paths.push(StrLit {
                    token: self.current.clone(),
                    value: self.current.text.clone(),
                });
            }
            if !self.expect_peek(TokenKind::Punctuation, ")") {
                return None;
            }
        } else {
            if !self.expect_peek_kind(TokenKind::String) {
                return None;
            }
            paths.push(StrLit {
                token: self.current.clone(),
                value: self.current.text.clone(),
            });
        }

        Some(ImportStmt { token, paths })
    }

    fn parse_let_statement(&mut self) -> Option<LetStmt> {
        let token = self.current.clone();

        let names = self.parse_let_names()?;

        // Optional type annotation: identifier, keyword, `[` (slice/array)
        // or `*` (pointer).
        let mut ty = None;
        if self.peek_is(TokenKind::Identifier)
            || self.peek_is(TokenKind::Keyword)
            || self.peek_is_punct("[")
            || self.peek_is_operator("*")
        {
            ty = self.parse_type();
        }

        let mut value = None;
        if self.peek_is_operator("=") || self.peek_is_operator(":=") {
            self.next_token();
            self.next_token();
            value = self.parse_expression(Precedence::Lowest);
        }

        if self.peek_is_punct(";") {
            self.next_token();
        }

        Some(LetStmt {
            token,
            names,
            ty,
            value,
        })
    }

    fn parse_let_names(&mut self) -> Option<Vec<Ident>> {
        let mut names: SmallVec<[Ident; 2]> = SmallVec::new();

        if self.peek_is(TokenKind::Identifier) || self.peek_is(TokenKind::Keyword) {
            self.next_token();
        } else {
            self.peek_error(TokenKind::Identifier, "");
            return None;
        }
        names.push(self.current_ident());

        while self.peek_is_punct(",") {
            self.next_token();
            if self.peek_is(TokenKind::Identifier) || self.peek_is(TokenKind::Keyword) {
                self.next_token();
            } else {
                self.peek_error(TokenKind::Identifier, "");
                return None;
            }
            names.push(self.current_ident());
        }

        Some(names.into_vec())
    }

    fn parse_return_statement(&mut self) -> Option<ReturnStmt> {
        let token = self.current.clone();
        let mut values = Vec::new();

        // Bare return: a following `}`, case label, or end of input ends
        // the statement and stays where it is; a `;` is consumed.
        if self.peek_is(TokenKind::Eof)
            || self.peek_is_punct("}")
            || self.peek_canonical_is("case")
            || self.peek_canonical_is("default")
        {
            return Some(ReturnStmt { token, values });
        }
        if self.peek_is_punct(";") {
            self.next_token();
            return Some(ReturnStmt { token, values });
        }

        self.next_token();
        loop {
            if let Some(value) = self.parse_expression(Precedence::Lowest) {
                values.push(value);
            }
            if !self.peek_is_punct(",") {
                break;
            }
            self.next_token();
            self.next_token();
        }

        if self.peek_is_punct(";") {
            self.next_token();
        }

        Some(ReturnStmt { token, values })
    }

    pub(super) fn parse_expression_statement(&mut self) -> Option<ExprStmt> {
        let token = self.current.clone();
        let expr = self.parse_expression(Precedence::Lowest)?;

        if self.peek_is_punct(";") {
            self.next_token();
        }

        Some(ExprStmt { token, expr })
    }

    fn parse_type_statement(&mut self) -> Option<TypeStmt> {
        let token = self.current.clone();

        if !self.expect_peek_kind(TokenKind::Identifier) {
            return None;
        }
        let name = self.current_ident();

        let mut is_alias = false;
        if self.peek_is_operator("=") {
            self.next_token();
            is_alias = true;
        }

        self.next_token();
        let value = self.parse_expression(Precedence::Lowest)?;

        Some(TypeStmt {
            token,
            name,
            is_alias,
            value,
        })
    }

    fn parse_function_statement(&mut self) -> Option<FunctionStmt> {
        let token = self.current.clone();

        // Receiver method: func (recv T) Name(...)
        let mut receiver = None;
        if self.peek_is_punct("(") {
            self.next_token(); // (
            self.next_token(); // receiver name
            let name = self.current_ident();
            let ty = self.parse_type();
            receiver = Some(Field {
                name: Some(name),
                ty: ty.map(Expr::Ident),
                tag: None,
            });
            if !self.expect_peek(TokenKind::Punctuation, ")") {
                return None;
            }
        }

        // Keywords are allowed as names, so aliases like `boss` work.
        if !self.peek_is(TokenKind::Identifier) && !self.peek_is(TokenKind::Keyword) {
            self.peek_error(TokenKind::Identifier, "identifier");
            return None;
        }
        self.next_token();
        let name = self.current_ident();

        if !self.expect_peek(TokenKind::Punctuation, "(") {
            return None;
        }
        let params = self.parse_function_parameters()?;

        let mut ret = None;
        if !self.peek_is_punct("{") {
            if self.peek_is_punct("(") {
                ret = self.parse_grouped_return_types();
                ret.as_ref()?;
            } else {
                ret = self.parse_type_expression();
            }
        }

        if !self.expect_peek(TokenKind::Punctuation, "{") {
            return None;
        }
        let body = self.parse_block_statement();

        Some(FunctionStmt {
            token,
            receiver,
            name,
            params,
            ret,
            body,
        })
    }

    /// A parenthesized return-type list `(T, U, …)`, carried textually.
    fn parse_grouped_return_types(&mut self) -> Option<Expr> {
        self.next_token(); // (
        let mut parts: Vec<String> = Vec::new();
        loop {
            let ty = self.parse_type_expression()?;
            parts.push(ty.to_string());
            if !self.peek_is_punct(",") {
                break;
            }
            self.next_token();
        }
        if !self.expect_peek(TokenKind::Punctuation, ")") {
            return None;
        }
        Some(Expr::Ident(Ident {
            token: self.current.clone(),
            value: format!("({})", parts.join(", ")),
        }))
    }

    pub(super) fn parse_function_parameters(&mut self) -> Option<Vec<Field>> {
        let mut params: Vec<Field> = Vec::new();

        if self.peek_is_punct(")") {
            self.next_token();
            return Some(params);
        }

        self.next_token();
        loop {
            let name = self.current_ident();
            let mut field = Field {
                name: Some(name),
                ty: None,
                tag: None,
            };

            // A bare name here either shares the next parameter's type or
            // is itself an unnamed type; both are resolved by back-fill.
            if !self.peek_is_punct(",") && !self.peek_is_punct(")") {
                field.ty = self.parse_type_expression();
            }

            params.push(field);

            if self.peek_is_punct(",") {
                self.next_token();
                self.next_token();
            } else {
                break;
            }
        }

        if !self.expect_peek(TokenKind::Punctuation, ")") {
            return None;
        }

        // Back-fill grouped parameter types from the right.
        let mut last_ty: Option<Expr> = None;
        for field in params.iter_mut().rev() {
            if field.ty.is_some() {
                last_ty = field.ty.clone();
            } else if let Some(ty) = &last_ty {
                field.ty = Some(ty.clone());
            } else {
                field.ty = field.name.take().map(Expr::Ident);
            }
        }

        Some(params)
    }

    fn parse_if_statement(&mut self) -> Option<IfStmt> {
        let token = self.current.clone();
        self.next_token();

        self.no_composite_literal = true;
        let condition = self.parse_expression(Precedence::Lowest);
        self.no_composite_literal = false;
        let condition = condition?;

        if !self.expect_peek(TokenKind::Punctuation, "{") {
            return None;
        }
        let consequence = self.parse_block_statement();

        let mut alternative = None;
        if self.peek_canonical_is("else") {
            self.next_token(); // else
            if self.peek_is_punct("{") {
                self.next_token();
                alternative = Some(Box::new(Stmt::Block(self.parse_block_statement())));
            } else if self.peek_canonical_is("if") {
                self.next_token();
                alternative = self
                    .parse_if_statement()
                    .map(|stmt| Box::new(Stmt::If(stmt)));
            }
        }

        Some(IfStmt {
            token,
            condition,
            consequence,
            alternative,
        })
    }

    fn parse_for_statement(&mut self) -> Option<ForStmt> {
        let token = self.current.clone();
        self.next_token();

        // Infinite loop: for { ... }
        if self.current_is_punct("{") {
            let body = self.parse_block_statement();
            return Some(ForStmt {
                token,
                header: ForHeader::Loop,
                body,
            });
        }

        // Probe for a range form: idents (= | :=) range iterable { ... }
        if self.current_is(TokenKind::Identifier) || self.current_is(TokenKind::Keyword) {
            let checkpoint = self.checkpoint();
            if let Some(idents) = self.parse_identifier_list() {
                if (self.current.text == "=" || self.current.text == ":=")
                    && self.peek_canonical_is("range")
                {
                    let mut idents = idents.into_iter();
                    let key = idents.next();
                    let value = idents.next();

                    self.next_token(); // = / :=
                    self.next_token(); // range

                    self.no_composite_literal = true;
                    let iterable = self.parse_expression(Precedence::Lowest);
                    self.no_composite_literal = false;
                    let iterable = iterable?;

                    if !self.expect_peek(TokenKind::Punctuation, "{") {
                        return None;
                    }
                    let body = self.parse_block_statement();
                    return Some(ForStmt {
                        token,
                        header: ForHeader::Range {
                            key,
                            value,
                            iterable,
                        },
                        body,
                    });
                }
            }
            self.restore(checkpoint);
        }

        // C-style or while: parse one statement and look for `;`.
        self.no_composite_literal = true;
        let first = self.parse_statement();
        self.no_composite_literal = false;

        if self.current_is_punct(";") {
            let init = first.map(Box::new);

            let mut condition = None;
            if !self.peek_is_punct(";") {
                self.next_token();
                self.no_composite_literal = true;
                condition = self.parse_expression(Precedence::Lowest);
                self.no_composite_literal = false;
            }

            if !self.expect_peek(TokenKind::Punctuation, ";") {
                return None;
            }

            let mut post = None;
            if !self.peek_is_punct("{") {
                self.next_token();
                post = self.parse_statement().map(Box::new);
            }

            if !self.expect_peek(TokenKind::Punctuation, "{") {
                return None;
            }
            let body = self.parse_block_statement();
            return Some(ForStmt {
                token,
                header: ForHeader::CStyle {
                    init,
                    condition,
                    post,
                },
                body,
            });
        }

        // While shape: the parsed statement is the condition.
        if self.peek_is_punct("{") {
            let header = match first {
                Some(Stmt::Expr(stmt)) => ForHeader::While(stmt.expr),
                _ => ForHeader::Loop,
            };
            self.next_token(); // {
            let body = self.parse_block_statement();
            return Some(ForStmt {
                token,
                header,
                body,
            });
        }

        None
    }

    /// Comma-separated identifier list used by the range probe. Leaves the
    /// cursor on the token after the list.
    fn parse_identifier_list(&mut self) -> Option<Vec<Ident>> {
        if !self.current_is(TokenKind::Identifier) && !self.current_is(TokenKind::Keyword) {
            return None;
        }

        let mut list: SmallVec<[Ident; 2]> = SmallVec::new();
        list.push(self.current_ident());

        while self.peek_is_punct(",") {
            self.next_token();
            if self.peek_is(TokenKind::Identifier) || self.peek_is(TokenKind::Keyword) {
                self.next_token();
            } else {
                self.peek_error(TokenKind::Identifier, "");
                return None;
            }
            list.push(self.current_ident());
        }

        self.next_token();
        Some(list.into_vec())
    }

    fn parse_go_statement(&mut self) -> Option<GoStmt> {
        let token = self.current.clone();
        self.next_token();

        let expr = self.parse_expression(Precedence::Lowest)?;
        match expr {
            Expr::Call(call) => Some(GoStmt { token, call }),
            other => {
                self.errors.push(Diagnostic::new(
                    format!("expected function call after go, got {}", other.kind_name()),
                    token.line,
                    token.column,
                    token.width(),
                ));
                None
            }
        }
    }

    fn parse_defer_statement(&mut self) -> Option<DeferStmt> {
        let token = self.current.clone();
        self.next_token();

        let expr = self.parse_expression(Precedence::Lowest)?;
        match expr {
            Expr::Call(call) => Some(DeferStmt { token, call }),
            other => {
                self.errors.push(Diagnostic::new(
                    format!(
                        "expected function call after defer, got {}",
                        other.kind_name()
                    ),
                    token.line,
                    token.column,
                    token.width(),
                ));
                None
            }
        }
    }

    fn parse_switch_statement(&mut self) -> Option<SwitchStmt> {
        let token = self.current.clone();
        self.next_token();

        let mut scrutinee = None;
        if !self.current_is_punct("{") {
            self.no_composite_literal = true;
            scrutinee = self.parse_expression(Precedence::Lowest);
            self.no_composite_literal = false;
            if !self.expect_peek(TokenKind::Punctuation, "{") {
                return None;
            }
        }

        let mut cases = Vec::new();
        while self.peek_canonical_is("case") || self.peek_canonical_is("default") {
            cases.push(self.parse_case_clause());
        }

        if !self.expect_peek(TokenKind::Punctuation, "}") {
            return None;
        }

        Some(SwitchStmt {
            token,
            scrutinee,
            cases,
        })
    }

    fn parse_case_clause(&mut self) -> CaseClause {
        self.next_token(); // case/default keyword
        let token = self.current.clone();
        let is_default = self.current_canonical_is("default");

        let mut values = Vec::new();
        if !is_default {
            self.next_token();
            loop {
                if let Some(value) = self.parse_expression(Precedence::Lowest) {
                    values.push(value);
                }
                if !self.peek_is_punct(",") {
                    break;
                }
                self.next_token();
                self.next_token();
            }
        }

        if !self.expect_peek(TokenKind::Punctuation, ":") {
            return CaseClause {
                token: token.clone(),
                is_default,
                values,
                body: BlockStmt {
                    token,
                    statements: Vec::new(),
                },
            };
        }

        let body = self.parse_case_body();
        CaseClause {
            token,
            is_default,
            values,
            body,
        }
    }

    /// Statements of a case body, up to the next case label or `}`.
    fn parse_case_body(&mut self) -> BlockStmt {
        let token = self.current.clone();
        let mut statements = Vec::new();
        loop {
            if self.peek_is_punct("}") || self.peek_is(TokenKind::Eof) {
                break;
            }
            if self.peek_canonical_is("case") || self.peek_canonical_is("default") {
                break;
            }
            self.next_token();
            if let Some(stmt) = self.parse_statement() {
                statements.push(stmt);
            }
        }
        BlockStmt { token, statements }
    }

    fn parse_select_statement(&mut self) -> Option<SelectStmt> {
        let token = self.current.clone();

        if !self.expect_peek(TokenKind::Punctuation, "{") {
            return None;
        }

        let mut cases = Vec::new();
        while self.peek_canonical_is("case") || self.peek_canonical_is("default") {
            cases.push(self.parse_select_case());
        }

        if !self.expect_peek(TokenKind::Punctuation, "}") {
            return None;
        }

        Some(SelectStmt { token, cases })
    }

    fn parse_select_case(&mut self) -> SelectCase {
        self.next_token(); // case/default keyword
        let token = self.current.clone();
        let is_default = self.current_canonical_is("default");

        // The communication clause parses as an expression statement,
        // which covers sends, receives, and assignment receives.
        let mut comm = None;
        if !is_default {
            self.next_token();
            comm = self
                .parse_expression_statement()
                .map(|stmt| Box::new(Stmt::Expr(stmt)));
        }

        if !self.expect_peek(TokenKind::Punctuation, ":") {
            return SelectCase {
                token: token.clone(),
                is_default,
                comm,
                body: BlockStmt {
                    token,
                    statements: Vec::new(),
                },
            };
        }

        let body = self.parse_case_body();
        SelectCase {
            token,
            is_default,
            comm,
            body,
        }
    }

    pub(super) fn parse_block_statement(&mut self) -> BlockStmt {
        let token = self.current.clone();
        let mut statements = Vec::new();

        self.next_token();
        while !self.current_is_punct("}") && !self.current_is(TokenKind::Eof) {
            if let Some(stmt) = self.parse_statement() {
                statements.push(stmt);
            }
            self.next_token();
        }

        BlockStmt { token, statements }
    }
}
