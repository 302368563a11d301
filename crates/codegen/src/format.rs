//! Canonical-surface formatting: the alternate emitter behind `fmt`.
//!
//! Walks the same tree as the Go emitter and re-emits surface source.
//! Keywords go through two-step canonicalization: a surface alias maps to
//! its canonical Go form and back to the first-declared alias for that
//! form; a raw Go keyword reverse-maps directly; unknown text passes
//! through untouched.

use singlish_parser::ast::*;
use singlish_parser::dict::Dictionary;

/// Emit canonical surface source for `program`.
pub fn emit(program: &Program, dict: &Dictionary) -> String {
    let mut formatter = Formatter {
        dict,
        out: String::new(),
        indent: 0,
    };
    formatter.emit_program(program);
    formatter.out
}

struct Formatter<'d> {
    dict: &'d Dictionary,
    out: String,
    indent: usize,
}

impl<'d> Formatter<'d> {
    /// Preferred surface spelling for a keyword or identifier text.
    fn canonicalize(&self, text: &str) -> String {
        if let Some(go_keyword) = self.dict.lookup(text) {
            return match self.dict.reverse_lookup(go_keyword) {
                Some(surface) => surface.to_string(),
                None => text.to_string(),
            };
        }
        if let Some(surface) = self.dict.reverse_lookup(text) {
            return surface.to_string();
        }
        text.to_string()
    }

    /// Surface alias for a canonical Go keyword, or the keyword itself.
    fn surface_keyword(&self, canonical: &str) -> String {
        self.dict
            .reverse_lookup(canonical)
            .unwrap_or(canonical)
            .to_string()
    }

    /// Canonicalize a textual type or identifier value, preserving a
    /// pointer prefix.
    fn surface_value(&self, value: &str) -> String {
        let (prefix, base) = match value.strip_prefix('*') {
            Some(base) => ("*", base),
            None => ("", value),
        };
        format!("{}{}", prefix, self.canonicalize(base))
    }

    fn push_indent(&mut self) {
        for _ in 0..self.indent {
            self.out.push('\t');
        }
    }

    fn emit_program(&mut self, program: &Program) {
        if let Some(pkg) = program.statements.iter().find_map(|stmt| match stmt {
            Stmt::Package(pkg) => Some(pkg),
            _ => None,
        }) {
            let keyword = self.canonicalize(&pkg.token.text);
            self.out.push_str(&keyword);
            self.out.push(' ');
            self.out.push_str(&pkg.name.value);
            self.out.push_str("\n\n");
        }

        let paths: Vec<&StrLit> = program
            .statements
            .iter()
            .filter_map(|stmt| match stmt {
                Stmt::Import(import) => Some(&import.paths),
                _ => None,
            })
            .flatten()
            .collect();
        self.emit_imports(&paths);

        for stmt in &program.statements {
            if matches!(stmt, Stmt::Package(_) | Stmt::Import(_)) {
                continue;
            }
            self.emit_stmt(stmt);
            self.out.push('\n');
        }
    }

    /// One import becomes a bare statement; several are grouped into a
    /// single block regardless of the input grouping.
    fn emit_imports(&mut self, paths: &[&StrLit]) {
        if paths.is_empty() {
            return;
        }
        let keyword = self.surface_keyword("import");
        self.out.push_str(&keyword);

        match paths {
            [single] => {
                self.out.push(' ');
                self.out.push_str(&single.value);
                self.out.push_str("\n\n");
            }
            paths => {
                self.out.push_str(" (\n");
                for path in paths {
                    self.out.push('\t');
                    self.out.push_str(&path.value);
                    self.out.push('\n');
                }
                self.out.push_str(")\n\n");
            }
        }
    }

    fn emit_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Package(_) | Stmt::Import(_) => {}
            Stmt::Let(stmt) => self.emit_let(stmt),
            Stmt::Return(stmt) => self.emit_return(stmt),
            Stmt::Expr(stmt) => self.emit_expr(&stmt.expr),
            Stmt::Block(block) => self.emit_block(block),
            Stmt::Function(stmt) => self.emit_function(stmt),
            Stmt::Type(stmt) => self.emit_type(stmt),
            Stmt::If(stmt) => self.emit_if(stmt),
            Stmt::For(stmt) => self.emit_for(stmt),
            Stmt::Go(stmt) => {
                let keyword = self.canonicalize(&stmt.token.text);
                self.out.push_str(&keyword);
                self.out.push(' ');
                self.emit_call(&stmt.call);
            }
            Stmt::Defer(stmt) => {
                let keyword = self.canonicalize(&stmt.token.text);
                self.out.push_str(&keyword);
                self.out.push(' ');
                self.emit_call(&stmt.call);
            }
            Stmt::Switch(stmt) => self.emit_switch(stmt),
            Stmt::Select(stmt) => self.emit_select(stmt),
        }
    }

    fn emit_let(&mut self, stmt: &LetStmt) {
        let keyword = self.canonicalize(&stmt.token.text);
        self.out.push_str(&keyword);
        self.out.push(' ');

        let names = stmt
            .names
            .iter()
            .map(|name| name.value.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        self.out.push_str(&names);

        if let Some(ty) = &stmt.ty {
            self.out.push(' ');
            let rendered = self.surface_value(&ty.value);
            self.out.push_str(&rendered);
        }

        if let Some(value) = &stmt.value {
            self.out.push_str(" = ");
            self.emit_expr(value);
        }
    }

    fn emit_return(&mut self, stmt: &ReturnStmt) {
        let keyword = self.canonicalize(&stmt.token.text);
        self.out.push_str(&keyword);
        for (i, value) in stmt.values.iter().enumerate() {
            self.out.push_str(if i == 0 { " " } else { ", " });
            self.emit_expr(value);
        }
    }

    fn emit_function(&mut self, stmt: &FunctionStmt) {
        let keyword = self.canonicalize(&stmt.token.text);
        self.out.push_str(&keyword);
        self.out.push(' ');

        if let Some(receiver) = &stmt.receiver {
            self.out.push('(');
            if let Some(name) = &receiver.name {
                self.out.push_str(&name.value);
                self.out.push(' ');
            }
            if let Some(ty) = &receiver.ty {
                self.emit_expr(ty);
            }
            self.out.push_str(") ");
        }

        self.out.push_str(&stmt.name.value);
        self.emit_params(&stmt.params);

        if let Some(ret) = &stmt.ret {
            self.out.push(' ');
            self.emit_expr(ret);
        }

        self.out.push(' ');
        self.emit_block(&stmt.body);
    }

    fn emit_params(&mut self, params: &[Field]) {
        self.out.push('(');
        for (i, param) in params.iter().enumerate() {
            if i > 0 {
                self.out.push_str(", ");
            }
            if let Some(name) = &param.name {
                self.out.push_str(&name.value);
                self.out.push(' ');
            }
            if let Some(ty) = &param.ty {
                self.emit_expr(ty);
            }
        }
        self.out.push(')');
    }

    fn emit_block(&mut self, block: &BlockStmt) {
        self.out.push_str("{\n");
        self.indent += 1;
        for stmt in &block.statements {
            self.push_indent();
            self.emit_stmt(stmt);
            self.out.push('\n');
        }
        self.indent -= 1;
        self.push_indent();
        self.out.push('}');
    }

    fn emit_type(&mut self, stmt: &TypeStmt) {
        let keyword = self.canonicalize(&stmt.token.text);
        self.out.push_str(&keyword);
        self.out.push(' ');
        self.out.push_str(&stmt.name.value);
        if stmt.is_alias {
            self.out.push_str(" = ");
        } else {
            self.out.push(' ');
        }
        self.emit_expr(&stmt.value);
    }

    fn emit_if(&mut self, stmt: &IfStmt) {
        let keyword = self.canonicalize(&stmt.token.text);
        self.out.push_str(&keyword);
        self.out.push(' ');
        self.emit_expr(&stmt.condition);
        self.out.push(' ');
        self.emit_block(&stmt.consequence);

        if let Some(alternative) = &stmt.alternative {
            let else_keyword = self.surface_keyword("else");
            self.out.push(' ');
            self.out.push_str(&else_keyword);
            self.out.push(' ');
            self.emit_stmt(alternative);
        }
    }

    fn emit_for(&mut self, stmt: &ForStmt) {
        let keyword = self.canonicalize(&stmt.token.text);
        self.out.push_str(&keyword);
        self.out.push(' ');
        match &stmt.header {
            ForHeader::Loop => {}
            ForHeader::While(condition) => {
                self.emit_expr(condition);
                self.out.push(' ');
            }
            ForHeader::CStyle {
                init,
                condition,
                post,
            } => {
                if let Some(init) = init {
                    self.emit_stmt(init);
                }
                self.out.push_str("; ");
                if let Some(condition) = condition {
                    self.emit_expr(condition);
                }
                self.out.push_str("; ");
                if let Some(post) = post {
                    self.emit_stmt(post);
                    self.out.push(' ');
                }
            }
            ForHeader::Range {
                key,
                value,
                iterable,
            } => {
                let range_keyword = self.surface_keyword("range");
                if let Some(key) = key {
                    self.out.push_str(&key.value);
                    if let Some(value) = value {
                        self.out.push_str(", ");
                        self.out.push_str(&value.value);
                    }
                    self.out.push_str(" = ");
                }
                self.out.push_str(&range_keyword);
                self.out.push(' ');
                self.emit_expr(iterable);
                self.out.push(' ');
            }
        }
        self.emit_block(&stmt.body);
    }

    fn emit_switch(&mut self, stmt: &SwitchStmt) {
        let keyword = self.canonicalize(&stmt.token.text);
        self.out.push_str(&keyword);
        self.out.push(' ');
        if let Some(scrutinee) = &stmt.scrutinee {
            self.emit_expr(scrutinee);
            self.out.push(' ');
        }
        self.out.push_str("{\n");
        for case in &stmt.cases {
            self.push_indent();
            if case.is_default {
                let default_keyword = self.surface_keyword("default");
                self.out.push_str(&default_keyword);
                self.out.push_str(":\n");
            } else {
                let case_keyword = self.surface_keyword("case");
                self.out.push_str(&case_keyword);
                self.out.push(' ');
                for (i, value) in case.values.iter().enumerate() {
                    if i > 0 {
                        self.out.push_str(", ");
                    }
                    self.emit_expr(value);
                }
                self.out.push_str(":\n");
            }
            self.indent += 1;
            for inner in &case.body.statements {
                self.push_indent();
                self.emit_stmt(inner);
                self.out.push('\n');
            }
            self.indent -= 1;
        }
        self.push_indent();
        self.out.push('}');
    }

    fn emit_select(&mut self, stmt: &SelectStmt) {
        let keyword = self.canonicalize(&stmt.token.text);
        self.out.push_str(&keyword);
        self.out.push_str(" {\n");
        for case in &stmt.cases {
            self.push_indent();
            if case.is_default {
                let default_keyword = self.surface_keyword("default");
                self.out.push_str(&default_keyword);
                self.out.push_str(":\n");
            } else {
                let case_keyword = self.surface_keyword("case");
                self.out.push_str(&case_keyword);
                self.out.push(' ');
                if let Some(comm) = &case.comm {
                    self.emit_stmt(comm);
                }
                self.out.push_str(":\n");
            }
            self.indent += 1;
            for inner in &case.body.statements {
                self.push_indent();
                self.emit_stmt(inner);
                self.out.push('\n');
            }
            self.indent -= 1;
        }
        self.push_indent();
        self.out.push('}');
    }

    fn emit_call(&mut self, call: &CallExpr) {
        self.emit_expr(&call.function);
        self.out.push('(');
        for (i, arg) in call.arguments.iter().enumerate() {
            if i > 0 {
                self.out.push_str(", ");
            }
            self.emit_expr(arg);
        }
        self.out.push(')');
    }

    fn emit_expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Ident(ident) => {
                let rendered = self.surface_value(&ident.value);
                self.out.push_str(&rendered);
            }
            Expr::Int(lit) => self.out.push_str(&lit.token.text),
            Expr::Float(lit) => self.out.push_str(&lit.token.text),
            Expr::Str(lit) => self.out.push_str(&lit.token.text),
            Expr::Prefix(prefix) => {
                self.out.push('(');
                self.out.push_str(&prefix.operator);
                self.emit_expr(&prefix.right);
                self.out.push(')');
            }
            Expr::Infix(infix) => self.emit_infix(infix),
            Expr::Call(call) => self.emit_call(call),
            Expr::Index(index) => {
                self.emit_expr(&index.left);
                self.out.push('[');
                self.emit_expr(&index.index);
                self.out.push(']');
            }
            Expr::Slice(slice) => {
                self.emit_expr(&slice.left);
                self.out.push('[');
                if let Some(low) = &slice.low {
                    self.emit_expr(low);
                }
                self.out.push(':');
                if let Some(high) = &slice.high {
                    self.emit_expr(high);
                }
                self.out.push(']');
            }
            Expr::Composite(composite) => {
                if let Some(ty) = &composite.ty {
                    self.emit_expr(ty);
                }
                self.out.push('{');
                for (i, element) in composite.elements.iter().enumerate() {
                    if i > 0 {
                        self.out.push_str(", ");
                    }
                    self.emit_expr(element);
                }
                self.out.push('}');
            }
            Expr::KeyValue(kv) => {
                self.emit_expr(&kv.key);
                self.out.push_str(": ");
                self.emit_expr(&kv.value);
            }
            Expr::Struct(lit) => self.emit_struct_literal(lit),
            Expr::Interface(lit) => self.emit_interface_literal(lit),
            Expr::Function(lit) => self.emit_function_literal(lit),
            Expr::TypeAssert(assert) => {
                self.emit_expr(&assert.left);
                self.out.push_str(".(");
                self.emit_expr(&assert.ty);
                self.out.push(')');
            }
            Expr::IncDec(incdec) => {
                self.emit_expr(&incdec.left);
                self.out.push_str(&incdec.operator);
            }
        }
    }

    fn emit_infix(&mut self, infix: &InfixExpr) {
        if infix.operator == "." {
            // Channel-send sugar keeps its surface spelling: the receive
            // prefix on the right side becomes a `.pass(value)` call when
            // the dictionary has an alias for `<-`.
            if let Expr::Prefix(prefix) = infix.right.as_ref() {
                if prefix.operator == "<-" {
                    let alias = self.dict.reverse_lookup("<-").map(str::to_string);
                    self.emit_expr(&infix.left);
                    match &alias {
                        Some(alias) => {
                            self.out.push('.');
                            self.out.push_str(alias);
                            self.out.push('(');
                        }
                        // No alias: fall back to a plain send.
                        None => self.out.push_str(" <- "),
                    }
                    match prefix.right.as_ref() {
                        Expr::Call(call) => {
                            if let Some(first) = call.arguments.first() {
                                self.emit_expr(first);
                            }
                        }
                        other => self.emit_expr(other),
                    }
                    if alias.is_some() {
                        self.out.push(')');
                    }
                    return;
                }
            }
            self.emit_expr(&infix.left);
            self.out.push('.');
            self.emit_expr(&infix.right);
            return;
        }

        self.out.push('(');
        self.emit_expr(&infix.left);
        self.out.push(' ');
        self.out.push_str(&infix.operator);
        self.out.push(' ');
        self.emit_expr(&infix.right);
        self.out.push(')');
    }

    fn emit_struct_literal(&mut self, lit: &StructLit) {
        let keyword = self.canonicalize(&lit.token.text);
        self.out.push_str(&keyword);
        self.out.push_str(" {\n");
        self.indent += 1;
        for field in &lit.fields {
            self.push_indent();
            if let Some(name) = &field.name {
                self.out.push_str(&name.value);
            }
            if let Some(ty) = &field.ty {
                self.out.push(' ');
                self.emit_expr(ty);
            }
            if let Some(tag) = &field.tag {
                self.out.push(' ');
                self.out.push_str(&tag.value);
            }
            self.out.push('\n');
        }
        self.indent -= 1;
        self.push_indent();
        self.out.push('}');
    }

    fn emit_interface_literal(&mut self, lit: &InterfaceLit) {
        let keyword = self.canonicalize(&lit.token.text);
        self.out.push_str(&keyword);
        self.out.push_str(" {\n");
        self.indent += 1;
        for method in &lit.methods {
            self.push_indent();
            self.out.push_str(&method.name.value);
            self.emit_params(&method.params);
            if let Some(ret) = &method.ret {
                self.out.push(' ');
                self.emit_expr(ret);
            }
            self.out.push('\n');
        }
        self.indent -= 1;
        self.push_indent();
        self.out.push('}');
    }

    fn emit_function_literal(&mut self, lit: &FunctionLit) {
        let keyword = self.canonicalize(&lit.token.text);
        self.out.push_str(&keyword);
        self.emit_params(&lit.params);
        self.out.push(' ');
        if let Some(ret) = &lit.ret {
            self.emit_expr(ret);
            self.out.push(' ');
        }
        self.emit_block(&lit.body);
    }
}
