//! Import collection: the generator's first pass.
//!
//! Walks the tree for explicit import statements (quotes stripped) and for
//! identifiers whose canonical form lives in a well-known standard-library
//! package, which activates that package's import implicitly.

use indexmap::IndexSet;
use singlish_parser::ast::*;
use singlish_parser::dict::Dictionary;

/// Packages whose members can be reached through dictionary aliases.
const WELL_KNOWN_PACKAGES: &[&str] = &["fmt"];

pub(crate) fn collect(program: &Program, dict: &Dictionary) -> IndexSet<String> {
    let mut imports = IndexSet::new();
    for stmt in &program.statements {
        walk_stmt(stmt, dict, &mut imports);
    }
    imports
}

fn note_identifier(value: &str, dict: &Dictionary, imports: &mut IndexSet<String>) {
    let resolved = dict.lookup(value).unwrap_or(value);
    for pkg in WELL_KNOWN_PACKAGES {
        if resolved.starts_with(pkg) && resolved[pkg.len()..].starts_with('.') {
            imports.insert((*pkg).to_string());
        }
    }
}

fn walk_stmt(stmt: &Stmt, dict: &Dictionary, imports: &mut IndexSet<String>) {
    match stmt {
        Stmt::Package(_) => {}
        Stmt::Import(import) => {
            for path in &import.paths {
                let trimmed = path.value.trim_matches(|c| c == '"' || c == '`');
                imports.insert(trimmed.to_string());
            }
        }
        Stmt::Let(stmt) => {
            if let Some(value) = &stmt.value {
                walk_expr(value, dict, imports);
            }
        }
        Stmt::Return(stmt) => {
            for value in &stmt.values {
                walk_expr(value, dict, imports);
            }
        }
        Stmt::Expr(stmt) => walk_expr(&stmt.expr, dict, imports),
        Stmt::Block(block) => {
            for stmt in &block.statements {
                walk_stmt(stmt, dict, imports);
            }
        }
        Stmt::Function(stmt) => {
            for stmt in &stmt.body.statements {
                walk_stmt(stmt, dict, imports);
            }
        }
        Stmt::Type(stmt) => walk_expr(&stmt.value, dict, imports),
        Stmt::If(stmt) => {
            walk_expr(&stmt.condition, dict, imports);
            for stmt in &stmt.consequence.statements {
                walk_stmt(stmt, dict, imports);
            }
            if let Some(alternative) = &stmt.alternative {
                walk_stmt(alternative, dict, imports);
            }
        }
        Stmt::For(stmt) => {
            match &stmt.header {
                ForHeader::Loop => {}
                ForHeader::While(cond) => walk_expr(cond, dict, imports),
                ForHeader::CStyle {
                    init,
                    condition,
                    post,
                } => {
                    if let Some(init) = init {
                        walk_stmt(init, dict, imports);
                    }
                    if let Some(condition) = condition {
                        walk_expr(condition, dict, imports);
                    }
                    if let Some(post) = post {
                        walk_stmt(post, dict, imports);
                    }
                }
                ForHeader::Range { iterable, .. } => walk_expr(iterable, dict, imports),
            }
            for stmt in &stmt.body.statements {
                walk_stmt(stmt, dict, imports);
            }
        }
        Stmt::Go(stmt) => walk_expr(&Expr::Call(stmt.call.clone()), dict, imports),
        Stmt::Defer(stmt) => walk_expr(&Expr::Call(stmt.call.clone()), dict, imports),
        Stmt::Switch(stmt) => {
            if let Some(scrutinee) = &stmt.scrutinee {
                walk_expr(scrutinee, dict, imports);
            }
            for case in &stmt.cases {
                for value in &case.values {
                    walk_expr(value, dict, imports);
                }
                for stmt in &case.body.statements {
                    walk_stmt(stmt, dict, imports);
                }
            }
        }
        Stmt::Select(stmt) => {
            for case in &stmt.cases {
                if let Some(comm) = &case.comm {
                    walk_stmt(comm, dict, imports);
                }
                for stmt in &case.body.statements {
                    walk_stmt(stmt, dict, imports);
                }
            }
        }
    }
}

fn walk_expr(expr: &Expr, dict: &Dictionary, imports: &mut IndexSet<String>) {
    match expr {
        Expr::Ident(ident) => note_identifier(&ident.value, dict, imports),
        Expr::Int(_) | Expr::Float(_) | Expr::Str(_) => {}
        Expr::Prefix(prefix) => walk_expr(&prefix.right, dict, imports),
        Expr::Infix(infix) => {
            if infix.operator == "." {
                if let Expr::Ident(left) = infix.left.as_ref() {
                    let resolved = dict.lookup(&left.value).unwrap_or(&left.value);
                    for pkg in WELL_KNOWN_PACKAGES {
                        if resolved == *pkg {
                            imports.insert((*pkg).to_string());
                        }
                    }
                }
            }
            walk_expr(&infix.left, dict, imports);
            walk_expr(&infix.right, dict, imports);
        }
        Expr::Index(index) => {
            walk_expr(&index.left, dict, imports);
            walk_expr(&index.index, dict, imports);
        }
        Expr::Slice(slice) => {
            walk_expr(&slice.left, dict, imports);
            if let Some(low) = &slice.low {
                walk_expr(low, dict, imports);
            }
            if let Some(high) = &slice.high {
                walk_expr(high, dict, imports);
            }
        }
        Expr::Call(call) => {
            walk_expr(&call.function, dict, imports);
            for arg in &call.arguments {
                walk_expr(arg, dict, imports);
            }
        }
        Expr::Composite(composite) => {
            if let Some(ty) = &composite.ty {
                walk_expr(ty, dict, imports);
            }
            for element in &composite.elements {
                walk_expr(element, dict, imports);
            }
        }
        Expr::KeyValue(kv) => {
            walk_expr(&kv.key, dict, imports);
            walk_expr(&kv.value, dict, imports);
        }
        Expr::Struct(lit) => {
            for field in &lit.fields {
                if let Some(ty) = &field.ty {
                    walk_expr(ty, dict, imports);
                }
            }
        }
        Expr::Interface(lit) => {
            for method in &lit.methods {
                for param in &method.params {
                    if let Some(ty) = &param.ty {
                        walk_expr(ty, dict, imports);
                    }
                }
                if let Some(ret) = &method.ret {
                    walk_expr(ret, dict, imports);
                }
            }
        }
        Expr::Function(lit) => {
            for stmt in &lit.body.statements {
                walk_stmt(stmt, dict, imports);
            }
        }
        Expr::TypeAssert(assert) => {
            walk_expr(&assert.left, dict, imports);
            walk_expr(&assert.ty, dict, imports);
        }
        Expr::IncDec(incdec) => walk_expr(&incdec.left, dict, imports),
    }
}
