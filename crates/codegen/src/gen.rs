//! Go source emission: the generator's second pass.
//!
//! The emitter is total. Indentation is one tab per level, imports come as
//! one sorted grouped block, and the file always ends with a newline.

use indexmap::IndexSet;
use singlish_parser::ast::*;
use singlish_parser::dict::Dictionary;

use crate::imports;

const ASSIGN_OPERATORS: &[&str] = &[
    ":=", "=", "+=", "-=", "*=", "/=", "%=", "&=", "|=", "^=",
];

/// Emit Go source for `program`.
pub fn generate(program: &Program, dict: &Dictionary) -> String {
    let mut generator = Generator {
        dict,
        out: String::new(),
        indent: 0,
        imports: imports::collect(program, dict),
    };
    generator.emit_program(program);
    generator.out
}

struct Generator<'d> {
    dict: &'d Dictionary,
    out: String,
    indent: usize,
    imports: IndexSet<String>,
}

impl<'d> Generator<'d> {
    fn emit_program(&mut self, program: &Program) {
        let package = program.statements.iter().find_map(|stmt| match stmt {
            Stmt::Package(pkg) => Some(pkg),
            _ => None,
        });

        match package {
            Some(pkg) => {
                self.out.push_str("package ");
                self.out.push_str(&pkg.name.value);
                self.out.push_str("\n\n");
            }
            None => self.out.push_str("package main\n\n"),
        }

        self.emit_imports();

        for stmt in &program.statements {
            if matches!(stmt, Stmt::Package(_) | Stmt::Import(_)) {
                continue;
            }
            self.emit_stmt(stmt);
            self.out.push('\n');
        }
    }

    fn emit_imports(&mut self) {
        if self.imports.is_empty() {
            return;
        }
        let mut paths: Vec<String> = self.imports.iter().cloned().collect();
        paths.sort();

        self.out.push_str("import (\n");
        for path in paths {
            self.out.push('\t');
            self.out.push('"');
            self.out.push_str(&path);
            self.out.push_str("\"\n");
        }
        self.out.push_str(")\n\n");
    }

    fn push_indent(&mut self) {
        for _ in 0..self.indent {
            self.out.push('\t');
        }
    }

    fn emit_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            // Handled at program level; nothing to emit in nested position.
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
                self.out.push_str("go ");
                self.emit_call(&stmt.call);
            }
            Stmt::Defer(stmt) => {
                self.out.push_str("defer ");
                self.emit_call(&stmt.call);
            }
            Stmt::Switch(stmt) => self.emit_switch(stmt),
            Stmt::Select(stmt) => self.emit_select(stmt),
        }
    }

    fn emit_let(&mut self, stmt: &LetStmt) {
        let keyword = match self.dict.lookup(&stmt.token.text) {
            Some(canonical) => canonical.to_string(),
            // `let` has no Go counterpart; it declares a variable.
            None if stmt.token.text == "let" => "var".to_string(),
            None => stmt.token.text.clone(),
        };
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
            let rendered = self.render_type(&ty.value);
            self.out.push_str(&rendered);
        }

        if let Some(value) = &stmt.value {
            self.out.push_str(" = ");
            self.emit_expr(value);
        }
    }

    /// Canonicalize a textual type, preserving a pointer prefix.
    fn render_type(&self, value: &str) -> String {
        let (prefix, base) = match value.strip_prefix('*') {
            Some(base) => ("*", base),
            None => ("", value),
        };
        let base = self.dict.lookup(base).unwrap_or(base);
        format!("{prefix}{base}")
    }

    fn emit_return(&mut self, stmt: &ReturnStmt) {
        let keyword = self.dict.lookup("return").unwrap_or("return").to_string();
        self.out.push_str(&keyword);
        for (i, value) in stmt.values.iter().enumerate() {
            self.out.push_str(if i == 0 { " " } else { ", " });
            self.emit_expr(value);
        }
    }

    fn emit_function(&mut self, stmt: &FunctionStmt) {
        self.out.push_str("func ");

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

        let name = self
            .dict
            .lookup(&stmt.name.value)
            .unwrap_or(&stmt.name.value)
            .to_string();
        self.out.push_str(&name);

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

    /// Conditions and scrutinees drop the outermost grouping parentheses
    /// that ordinary infix emission would add.
    fn emit_condition(&mut self, expr: &Expr) {
        if let Expr::Infix(infix) = expr {
            let grouped = infix.operator != "."
                && infix.operator != "<-"
                && !ASSIGN_OPERATORS.contains(&infix.operator.as_str());
            if grouped {
                self.emit_expr(&infix.left);
                self.out.push(' ');
                self.out.push_str(&infix.operator);
                self.out.push(' ');
                self.emit_expr(&infix.right);
                return;
            }
        }
        self.emit_expr(expr);
    }

    fn emit_type(&mut self, stmt: &TypeStmt) {
        self.out.push_str("type ");
        self.out.push_str(&stmt.name.value);
        if stmt.is_alias {
            self.out.push_str(" = ");
        } else {
            self.out.push(' ');
        }
        self.emit_expr(&stmt.value);
    }

    fn emit_if(&mut self, stmt: &IfStmt) {
        self.out.push_str("if ");
        self.emit_condition(&stmt.condition);
        self.out.push(' ');
        self.emit_block(&stmt.consequence);

        if let Some(alternative) = &stmt.alternative {
            self.out.push_str(" else ");
            self.emit_stmt(alternative);
        }
    }

    fn emit_for(&mut self, stmt: &ForStmt) {
        self.out.push_str("for ");
        match &stmt.header {
            ForHeader::Loop => {}
            ForHeader::While(condition) => {
                self.emit_condition(condition);
                self.out.push(' ');
            }
            ForHeader::CStyle {
                init,
                condition,
                post,
            } => {
                if let Some(init) = init {
                    self.emit_for_init(init);
                }
                self.out.push_str("; ");
                if let Some(condition) = condition {
                    self.emit_condition(condition);
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
                if let Some(key) = key {
                    self.out.push_str(&key.value);
                    if let Some(value) = value {
                        self.out.push_str(", ");
                        self.out.push_str(&value.value);
                    }
                    self.out.push_str(" := range ");
                } else {
                    self.out.push_str("range ");
                }
                self.emit_expr(iterable);
                self.out.push(' ');
            }
        }
        self.emit_block(&stmt.body);
    }

    /// The init clause takes a short variable declaration, not `var`.
    fn emit_for_init(&mut self, init: &Stmt) {
        match init {
            Stmt::Let(stmt) => {
                let names = stmt
                    .names
                    .iter()
                    .map(|name| name.value.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");
                self.out.push_str(&names);
                self.out.push_str(" := ");
                if let Some(value) = &stmt.value {
                    self.emit_expr(value);
                }
            }
            other => self.emit_stmt(other),
        }
    }

    fn emit_switch(&mut self, stmt: &SwitchStmt) {
        self.out.push_str("switch ");
        if let Some(scrutinee) = &stmt.scrutinee {
            self.emit_condition(scrutinee);
            self.out.push(' ');
        }
        self.out.push_str("{\n");
        // Case labels sit at the switch's own level, per the target
        // formatter's conventions.
        for case in &stmt.cases {
            self.push_indent();
            if case.is_default {
                self.out.push_str("default:\n");
            } else {
                self.out.push_str("case ");
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
        self.out.push_str("select {\n");
        for case in &stmt.cases {
            self.push_indent();
            if case.is_default {
                self.out.push_str("default:\n");
            } else {
                self.out.push_str("case ");
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
                let rendered = self.render_type(&ident.value);
                self.out.push_str(&rendered);
            }
            Expr::Int(lit) => self.out.push_str(&lit.token.text),
            Expr::Float(lit) => self.out.push_str(&lit.token.text),
            // Strings keep their original quotes.
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
            // Channel-send sugar: chan.pass(value) parses as a dot whose
            // right side is a receive prefix; it emits a plain send.
            if let Expr::Prefix(prefix) = infix.right.as_ref() {
                if prefix.operator == "<-" {
                    self.emit_expr(&infix.left);
                    self.out.push_str(" <- ");
                    match prefix.right.as_ref() {
                        Expr::Call(call) => {
                            if let Some(first) = call.arguments.first() {
                                self.emit_expr(first);
                            }
                        }
                        other => self.emit_expr(other),
                    }
                    return;
                }
            }
            self.emit_expr(&infix.left);
            self.out.push('.');
            self.emit_expr(&infix.right);
            return;
        }

        if ASSIGN_OPERATORS.contains(&infix.operator.as_str()) {
            self.emit_expr(&infix.left);
            self.out.push(' ');
            self.out.push_str(&infix.operator);
            self.out.push(' ');
            self.emit_expr(&infix.right);
            return;
        }

        if infix.operator == "<-" {
            self.emit_expr(&infix.left);
            self.out.push_str(" <- ");
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
        self.out.push_str("struct {\n");
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
        self.out.push_str("interface {\n");
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
        self.out.push_str("func");
        self.emit_params(&lit.params);
        self.out.push(' ');
        if let Some(ret) = &lit.ret {
            self.emit_expr(ret);
            self.out.push(' ');
        }
        self.emit_block(&lit.body);
    }
}
