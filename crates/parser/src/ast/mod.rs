//! Abstract syntax tree for the surface language.
//!
//! Every node keeps its originating token so diagnostics and the
//! canonical-surface formatter can recover the source spelling. The tree
//! is strictly acyclic; the parser builds it once and hands it to an
//! emitter by reference.

mod display;

use crate::lexer::Token;

/// Root node: the ordered statement list of one source file.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub statements: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Package(PackageStmt),
    Import(ImportStmt),
    Let(LetStmt),
    Return(ReturnStmt),
    Expr(ExprStmt),
    Block(BlockStmt),
    Function(FunctionStmt),
    Type(TypeStmt),
    If(IfStmt),
    For(ForStmt),
    Go(GoStmt),
    Defer(DeferStmt),
    Switch(SwitchStmt),
    Select(SelectStmt),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PackageStmt {
    pub token: Token,
    pub name: Ident,
}

/// An import declaration. The grouped form `import ( "a" "b" )` carries
/// several paths; the bare form carries one.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportStmt {
    pub token: Token,
    pub paths: Vec<StrLit>,
}

/// A `var`/`const`/`let`-shaped declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct LetStmt {
    pub token: Token,
    pub names: Vec<Ident>,
    pub ty: Option<Ident>,
    pub value: Option<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStmt {
    pub token: Token,
    pub values: Vec<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExprStmt {
    pub token: Token,
    pub expr: Expr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BlockStmt {
    pub token: Token,
    pub statements: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionStmt {
    pub token: Token,
    /// Method receiver: a single named field with a possibly-pointer type.
    pub receiver: Option<Field>,
    pub name: Ident,
    pub params: Vec<Field>,
    /// Single type, or a parenthesized group carried textually.
    pub ret: Option<Expr>,
    pub body: BlockStmt,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeStmt {
    pub token: Token,
    pub name: Ident,
    /// `type N = T` (alias) rather than `type N T` (definition).
    pub is_alias: bool,
    pub value: Expr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub token: Token,
    pub condition: Expr,
    pub consequence: BlockStmt,
    /// Either a `Stmt::Block` (plain else) or a nested `Stmt::If`.
    pub alternative: Option<Box<Stmt>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForStmt {
    pub token: Token,
    pub header: ForHeader,
    pub body: BlockStmt,
}

/// The four surface shapes of a `for` loop.
#[derive(Debug, Clone, PartialEq)]
pub enum ForHeader {
    /// `for { … }`
    Loop,
    /// `for cond { … }`
    While(Expr),
    /// `for init; cond; post { … }`
    CStyle {
        init: Option<Box<Stmt>>,
        condition: Option<Expr>,
        post: Option<Box<Stmt>>,
    },
    /// `for k, v = range it { … }` — at least one variable is bound when
    /// the parser produces this.
    Range {
        key: Option<Ident>,
        value: Option<Ident>,
        iterable: Expr,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct GoStmt {
    pub token: Token,
    pub call: CallExpr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeferStmt {
    pub token: Token,
    pub call: CallExpr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SwitchStmt {
    pub token: Token,
    pub scrutinee: Option<Expr>,
    pub cases: Vec<CaseClause>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CaseClause {
    pub token: Token,
    pub is_default: bool,
    pub values: Vec<Expr>,
    pub body: BlockStmt,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectStmt {
    pub token: Token,
    pub cases: Vec<SelectCase>,
}

/// A select case; `comm` is an expression statement holding a send or a
/// receive (possibly inside an assignment).
#[derive(Debug, Clone, PartialEq)]
pub struct SelectCase {
    pub token: Token,
    pub is_default: bool,
    pub comm: Option<Box<Stmt>>,
    pub body: BlockStmt,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Ident(Ident),
    Int(IntLit),
    Float(FloatLit),
    Str(StrLit),
    Prefix(PrefixExpr),
    Infix(InfixExpr),
    Index(IndexExpr),
    Slice(SliceExpr),
    Call(CallExpr),
    Composite(CompositeLit),
    KeyValue(KeyValueExpr),
    Struct(StructLit),
    Interface(InterfaceLit),
    Function(Box<FunctionLit>),
    TypeAssert(TypeAssertExpr),
    IncDec(IncDecExpr),
}

impl Expr {
    /// Short description used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Expr::Ident(_) => "identifier",
            Expr::Int(_) => "integer literal",
            Expr::Float(_) => "float literal",
            Expr::Str(_) => "string literal",
            Expr::Prefix(_) => "prefix expression",
            Expr::Infix(_) => "infix expression",
            Expr::Index(_) => "index expression",
            Expr::Slice(_) => "slice expression",
            Expr::Call(_) => "call expression",
            Expr::Composite(_) => "composite literal",
            Expr::KeyValue(_) => "key-value expression",
            Expr::Struct(_) => "struct literal",
            Expr::Interface(_) => "interface literal",
            Expr::Function(_) => "function literal",
            Expr::TypeAssert(_) => "type assertion",
            Expr::IncDec(_) => "increment/decrement",
        }
    }
}

/// Identifier expression. `value` is the dictionary-canonicalized text;
/// the original surface spelling stays on the token.
#[derive(Debug, Clone, PartialEq)]
pub struct Ident {
    pub token: Token,
    pub value: String,
}

impl Ident {
    pub fn from_token(token: Token) -> Self {
        let value = token.text.clone();
        Ident { token, value }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IntLit {
    pub token: Token,
    pub value: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FloatLit {
    pub token: Token,
    pub value: f64,
}

/// String literal; `value` keeps the original quotes.
#[derive(Debug, Clone, PartialEq)]
pub struct StrLit {
    pub token: Token,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PrefixExpr {
    pub token: Token,
    pub operator: String,
    pub right: Box<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InfixExpr {
    pub token: Token,
    pub left: Box<Expr>,
    pub operator: String,
    pub right: Box<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndexExpr {
    pub token: Token,
    pub left: Box<Expr>,
    pub index: Box<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SliceExpr {
    pub token: Token,
    pub left: Box<Expr>,
    pub low: Option<Box<Expr>>,
    pub high: Option<Box<Expr>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CallExpr {
    pub token: Token,
    pub function: Box<Expr>,
    pub arguments: Vec<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompositeLit {
    pub token: Token,
    /// Absent for a bare `{ … }` literal.
    pub ty: Option<Box<Expr>>,
    pub elements: Vec<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct KeyValueExpr {
    pub token: Token,
    pub key: Box<Expr>,
    pub value: Box<Expr>,
}

/// A named field: struct members, parameters, and receivers. Unnamed
/// parameters carry only a type.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: Option<Ident>,
    pub ty: Option<Expr>,
    pub tag: Option<StrLit>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StructLit {
    pub token: Token,
    pub fields: Vec<Field>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Method {
    pub name: Ident,
    pub params: Vec<Field>,
    pub ret: Option<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InterfaceLit {
    pub token: Token,
    pub methods: Vec<Method>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionLit {
    pub token: Token,
    pub params: Vec<Field>,
    pub ret: Option<Expr>,
    pub body: BlockStmt,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeAssertExpr {
    pub token: Token,
    pub left: Box<Expr>,
    pub ty: Box<Expr>,
}

/// `x++` / `x--`; a statement in the target language but usable in the
/// post clause of a `for`, so it lives on the expression side and reaches
/// statement position through `ExprStmt`.
#[derive(Debug, Clone, PartialEq)]
pub struct IncDecExpr {
    pub token: Token,
    pub left: Box<Expr>,
    pub operator: String,
}
