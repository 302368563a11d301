//! Textual rendering of AST nodes.
//!
//! These renderings feed the parser's synthesized identifiers (variadic
//! arguments, grouped return types) and test assertions; neither emitter
//! goes through them for final output.

use std::fmt;

use super::*;

fn join<T: fmt::Display>(items: &[T], sep: &str) -> String {
    items
        .iter()
        .map(|item| item.to_string())
        .collect::<Vec<_>>()
        .join(sep)
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for stmt in &self.statements {
            write!(f, "{stmt}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stmt::Package(s) => write!(f, "{} {}", s.token.text, s.name),
            Stmt::Import(s) => match s.paths.as_slice() {
                [single] => write!(f, "{} {}", s.token.text, single),
                paths => write!(f, "{} ({})", s.token.text, join(paths, " ")),
            },
            Stmt::Let(s) => {
                write!(f, "{} {}", s.token.text, join(&s.names, ", "))?;
                if let Some(ty) = &s.ty {
                    write!(f, " {ty}")?;
                }
                if let Some(value) = &s.value {
                    write!(f, " = {value}")?;
                }
                Ok(())
            }
            Stmt::Return(s) => {
                write!(f, "{} ", s.token.text)?;
                write!(f, "{}", join(&s.values, ", "))
            }
            Stmt::Expr(s) => write!(f, "{}", s.expr),
            Stmt::Block(s) => {
                for stmt in &s.statements {
                    write!(f, "{stmt}")?;
                }
                Ok(())
            }
            Stmt::Function(s) => {
                write!(f, "{} ", s.token.text)?;
                if let Some(receiver) = &s.receiver {
                    write!(f, "({receiver}) ")?;
                }
                write!(f, "{}({}) ", s.name, join(&s.params, ", "))?;
                if let Some(ret) = &s.ret {
                    write!(f, "{ret} ")?;
                }
                write!(f, "{}", Stmt::Block(s.body.clone()))
            }
            Stmt::Type(s) => {
                if s.is_alias {
                    write!(f, "{} {} = {}", s.token.text, s.name, s.value)
                } else {
                    write!(f, "{} {} {}", s.token.text, s.name, s.value)
                }
            }
            Stmt::If(s) => {
                write!(f, "if {} ", s.condition)?;
                write!(f, "{}", Stmt::Block(s.consequence.clone()))?;
                if let Some(alternative) = &s.alternative {
                    write!(f, " else {alternative}")?;
                }
                Ok(())
            }
            Stmt::For(s) => {
                write!(f, "for ")?;
                match &s.header {
                    ForHeader::Loop => {}
                    ForHeader::While(cond) => write!(f, "{cond}")?,
                    ForHeader::CStyle {
                        init,
                        condition,
                        post,
                    } => {
                        if let Some(init) = init {
                            write!(f, "{init}; ")?;
                        }
                        if let Some(condition) = condition {
                            write!(f, "{condition}")?;
                        }
                        if let Some(post) = post {
                            write!(f, "; {post}")?;
                        }
                    }
                    ForHeader::Range {
                        key,
                        value,
                        iterable,
                    } => {
                        if let Some(key) = key {
                            write!(f, "{key}")?;
                            if let Some(value) = value {
                                write!(f, ", {value}")?;
                            }
                            write!(f, " = range ")?;
                        }
                        write!(f, "{iterable}")?;
                    }
                }
                write!(f, " {}", Stmt::Block(s.body.clone()))
            }
            Stmt::Go(s) => write!(f, "go {}", Expr::Call(s.call.clone())),
            Stmt::Defer(s) => write!(f, "defer {}", Expr::Call(s.call.clone())),
            Stmt::Switch(s) => {
                write!(f, "switch ")?;
                if let Some(scrutinee) = &s.scrutinee {
                    write!(f, "{scrutinee}")?;
                }
                write!(f, " {{")?;
                for case in &s.cases {
                    if case.is_default {
                        write!(f, "default:")?;
                    } else {
                        write!(f, "case {}:", join(&case.values, ", "))?;
                    }
                    write!(f, "{}", Stmt::Block(case.body.clone()))?;
                }
                write!(f, "}}")
            }
            Stmt::Select(s) => {
                write!(f, "select {{")?;
                for case in &s.cases {
                    if case.is_default {
                        write!(f, "default:")?;
                    } else {
                        write!(f, "case ")?;
                        if let Some(comm) = &case.comm {
                            write!(f, "{comm}")?;
                        }
                        write!(f, ":")?;
                    }
                    write!(f, "{}", Stmt::Block(case.body.clone()))?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Ident(e) => f.write_str(&e.value),
            Expr::Int(e) => f.write_str(&e.token.text),
            Expr::Float(e) => f.write_str(&e.token.text),
            Expr::Str(e) => f.write_str(&e.token.text),
            Expr::Prefix(e) => write!(f, "({}{})", e.operator, e.right),
            Expr::Infix(e) => write!(f, "({} {} {})", e.left, e.operator, e.right),
            Expr::Index(e) => write!(f, "({}[{}])", e.left, e.index),
            Expr::Slice(e) => {
                write!(f, "({}[", e.left)?;
                if let Some(low) = &e.low {
                    write!(f, "{low}")?;
                }
                write!(f, ":")?;
                if let Some(high) = &e.high {
                    write!(f, "{high}")?;
                }
                write!(f, "])")
            }
            Expr::Call(e) => write!(f, "{}({})", e.function, join(&e.arguments, ", ")),
            Expr::Composite(e) => {
                if let Some(ty) = &e.ty {
                    write!(f, "{ty}")?;
                }
                write!(f, "{{{}}}", join(&e.elements, ", "))
            }
            Expr::KeyValue(e) => write!(f, "{}: {}", e.key, e.value),
            Expr::Struct(e) => {
                write!(f, "{} {{", e.token.text)?;
                for field in &e.fields {
                    write!(f, " {field};")?;
                }
                write!(f, " }}")
            }
            Expr::Interface(e) => {
                write!(f, "{} {{", e.token.text)?;
                for method in &e.methods {
                    write!(f, " {method};")?;
                }
                write!(f, " }}")
            }
            Expr::Function(e) => {
                write!(f, "{}({}) ", e.token.text, join(&e.params, ", "))?;
                if let Some(ret) = &e.ret {
                    write!(f, "{ret} ")?;
                }
                write!(f, "{}", Stmt::Block(e.body.clone()))
            }
            Expr::TypeAssert(e) => write!(f, "{}.({})", e.left, e.ty),
            Expr::IncDec(e) => write!(f, "{}{}", e.left, e.operator),
        }
    }
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl fmt::Display for StrLit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = &self.name {
            write!(f, "{name}")?;
            if self.ty.is_some() {
                write!(f, " ")?;
            }
        }
        if let Some(ty) = &self.ty {
            write!(f, "{ty}")?;
        }
        if let Some(tag) = &self.tag {
            write!(f, " {tag}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name, join(&self.params, ", "))?;
        if let Some(ret) = &self.ret {
            write!(f, " {ret}")?;
        }
        Ok(())
    }
}
