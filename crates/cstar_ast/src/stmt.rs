//! Statement and declaration AST nodes.

use cstar_source::{IStr, NodeFlags, Range};
use cstar_types::{Type, AUTO, VOID};

use crate::expr::Expr;

/// A statement node.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Declaration(DeclarationStmt),
    Parameter(ParameterStmt),
    Expression(ExpressionStmt),
    If(IfStmt),
    While(WhileStmt),
    For(ForStmt),
    Block(Block),
    Function(FunctionDecl),
}

impl Stmt {
    pub fn range(&self) -> &Range {
        match self {
            Stmt::Declaration(s) => &s.range,
            Stmt::Parameter(s) => &s.range,
            Stmt::Expression(s) => &s.range,
            Stmt::If(s) => &s.range,
            Stmt::While(s) => &s.range,
            Stmt::For(s) => &s.range,
            Stmt::Block(s) => &s.range,
            Stmt::Function(s) => &s.range,
        }
    }

    pub fn range_mut(&mut self) -> &mut Range {
        match self {
            Stmt::Declaration(s) => &mut s.range,
            Stmt::Parameter(s) => &mut s.range,
            Stmt::Expression(s) => &mut s.range,
            Stmt::If(s) => &mut s.range,
            Stmt::While(s) => &mut s.range,
            Stmt::For(s) => &mut s.range,
            Stmt::Block(s) => &mut s.range,
            Stmt::Function(s) => &mut s.range,
        }
    }

    pub fn flags(&self) -> NodeFlags {
        match self {
            Stmt::Declaration(s) => s.flags,
            Stmt::Parameter(s) => s.flags,
            Stmt::Expression(s) => s.flags,
            Stmt::If(s) => s.flags,
            Stmt::While(s) => s.flags,
            Stmt::For(s) => s.flags,
            Stmt::Block(s) => s.flags,
            Stmt::Function(s) => s.flags,
        }
    }

    pub fn flags_mut(&mut self) -> &mut NodeFlags {
        match self {
            Stmt::Declaration(s) => &mut s.flags,
            Stmt::Parameter(s) => &mut s.flags,
            Stmt::Expression(s) => &mut s.flags,
            Stmt::If(s) => &mut s.flags,
            Stmt::While(s) => &mut s.flags,
            Stmt::For(s) => &mut s.flags,
            Stmt::Block(s) => &mut s.flags,
            Stmt::Function(s) => &mut s.flags,
        }
    }
}

/// The root of a compilation unit: an ordered sequence of top-level
/// statements.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub stmts: Vec<Stmt>,
    pub range: Range,
}

impl Program {
    pub fn new() -> Program {
        Program::default()
    }

    pub fn insert(&mut self, stmt: Stmt) {
        self.stmts.push(stmt);
    }
}

/// A brace-delimited statement sequence opening a scope.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub stmts: Vec<Stmt>,
    pub range: Range,
    pub flags: NodeFlags,
}

impl Block {
    pub fn new(range: Range) -> Block {
        Block {
            stmts: Vec::new(),
            range,
            flags: NodeFlags::NONE,
        }
    }

    pub fn insert(&mut self, stmt: Stmt) {
        self.stmts.push(stmt);
    }
}

/// An ordered statement list that is not a scope (parameter lists).
#[derive(Debug, Clone, PartialEq)]
pub struct StatementList {
    pub stmts: Vec<Stmt>,
    pub range: Range,
}

impl StatementList {
    pub fn new(range: Range) -> StatementList {
        StatementList {
            stmts: Vec::new(),
            range,
        }
    }

    pub fn add(&mut self, stmt: Stmt) {
        self.stmts.push(stmt);
    }
}

/// `func name(params) body` — the return type defaults to `void`.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDecl {
    pub name: IStr,
    pub return_type: &'static Type,
    pub params: Option<StatementList>,
    pub body: Option<Box<Stmt>>,
    pub range: Range,
    pub flags: NodeFlags,
}

impl FunctionDecl {
    pub fn new(name: IStr, range: Range) -> FunctionDecl {
        FunctionDecl {
            name,
            return_type: &VOID,
            params: None,
            body: None,
            range,
            flags: NodeFlags::NONE,
        }
    }
}

/// `imm|mut name [: type] [= value];` — immutability is carried on the
/// flags as `IS_IMMUTABLE`.
#[derive(Debug, Clone, PartialEq)]
pub struct DeclarationStmt {
    pub name: IStr,
    pub ty: &'static Type,
    pub value: Option<Expr>,
    pub range: Range,
    pub flags: NodeFlags,
}

impl DeclarationStmt {
    pub fn new(name: IStr, immutable: bool, range: Range) -> DeclarationStmt {
        let mut flags = NodeFlags::NONE;
        if immutable {
            flags.insert(NodeFlags::IS_IMMUTABLE);
        }
        DeclarationStmt {
            name,
            ty: &AUTO,
            value: None,
            range,
            flags,
        }
    }

    pub fn is_immutable(&self) -> bool {
        self.flags.contains(NodeFlags::IS_IMMUTABLE)
    }
}

/// A function parameter: a declaration with an optional default and a
/// variadic marker on the flags.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterStmt {
    pub name: IStr,
    pub ty: &'static Type,
    pub default: Option<Expr>,
    pub range: Range,
    pub flags: NodeFlags,
}

impl ParameterStmt {
    pub fn new(name: IStr, range: Range) -> ParameterStmt {
        ParameterStmt {
            name,
            ty: &AUTO,
            default: None,
            range,
            flags: NodeFlags::NONE,
        }
    }

    pub fn is_variadic(&self) -> bool {
        self.flags.contains(NodeFlags::IS_VARIADIC)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionStmt {
    pub expr: Expr,
    pub range: Range,
    pub flags: NodeFlags,
}

impl ExpressionStmt {
    pub fn new(expr: Expr, range: Range) -> ExpressionStmt {
        ExpressionStmt {
            expr,
            range,
            flags: NodeFlags::NONE,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub condition: Expr,
    pub then: Option<Box<Stmt>>,
    pub otherwise: Option<Box<Stmt>>,
    pub range: Range,
    pub flags: NodeFlags,
}

impl IfStmt {
    pub fn new(condition: Expr, range: Range) -> IfStmt {
        IfStmt {
            condition,
            then: None,
            otherwise: None,
            range,
            flags: NodeFlags::NONE,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhileStmt {
    pub condition: Expr,
    pub body: Option<Box<Stmt>>,
    pub range: Range,
    pub flags: NodeFlags,
}

impl WhileStmt {
    pub fn new(condition: Expr, range: Range) -> WhileStmt {
        WhileStmt {
            condition,
            body: None,
            range,
            flags: NodeFlags::NONE,
        }
    }
}

/// `for (init; cond; update) body` — every clause is optional.
#[derive(Debug, Clone, PartialEq)]
pub struct ForStmt {
    pub init: Option<Box<Stmt>>,
    pub condition: Option<Expr>,
    pub update: Option<Expr>,
    pub body: Option<Box<Stmt>>,
    pub range: Range,
    pub flags: NodeFlags,
}

impl ForStmt {
    pub fn new(range: Range) -> ForStmt {
        ForStmt {
            init: None,
            condition: None,
            update: None,
            body: None,
            range,
            flags: NodeFlags::NONE,
        }
    }
}
