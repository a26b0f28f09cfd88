//! Expression AST nodes.
//!
//! One struct per variant; every expression carries its source range and
//! a type attribute that starts out as `auto` (literals default to their
//! natural built-in).

use cstar_lexer::TokenKind;
use cstar_source::{IStr, Range};
use cstar_types::{Type, AUTO, BOOL, CHAR, F64, I32, STRING};

/// An expression node.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Bool(BoolExpr),
    Char(CharExpr),
    Integer(IntegerExpr),
    Float(FloatExpr),
    Str(StringExpr),
    Variable(VariableExpr),
    Grouping(GroupingExpr),
    Unary(UnaryExpr),
    Prefix(PrefixExpr),
    Postfix(PostfixExpr),
    Binary(BinaryExpr),
    Assignment(AssignmentExpr),
    Ternary(TernaryExpr),
    NullishCoalescing(NullishCoalescingExpr),
    Call(CallExpr),
    StringExpression(StringExpressionExpr),
}

impl Expr {
    pub fn range(&self) -> &Range {
        match self {
            Expr::Bool(e) => &e.range,
            Expr::Char(e) => &e.range,
            Expr::Integer(e) => &e.range,
            Expr::Float(e) => &e.range,
            Expr::Str(e) => &e.range,
            Expr::Variable(e) => &e.range,
            Expr::Grouping(e) => &e.range,
            Expr::Unary(e) => &e.range,
            Expr::Prefix(e) => &e.range,
            Expr::Postfix(e) => &e.range,
            Expr::Binary(e) => &e.range,
            Expr::Assignment(e) => &e.range,
            Expr::Ternary(e) => &e.range,
            Expr::NullishCoalescing(e) => &e.range,
            Expr::Call(e) => &e.range,
            Expr::StringExpression(e) => &e.range,
        }
    }

    pub fn range_mut(&mut self) -> &mut Range {
        match self {
            Expr::Bool(e) => &mut e.range,
            Expr::Char(e) => &mut e.range,
            Expr::Integer(e) => &mut e.range,
            Expr::Float(e) => &mut e.range,
            Expr::Str(e) => &mut e.range,
            Expr::Variable(e) => &mut e.range,
            Expr::Grouping(e) => &mut e.range,
            Expr::Unary(e) => &mut e.range,
            Expr::Prefix(e) => &mut e.range,
            Expr::Postfix(e) => &mut e.range,
            Expr::Binary(e) => &mut e.range,
            Expr::Assignment(e) => &mut e.range,
            Expr::Ternary(e) => &mut e.range,
            Expr::NullishCoalescing(e) => &mut e.range,
            Expr::Call(e) => &mut e.range,
            Expr::StringExpression(e) => &mut e.range,
        }
    }

    /// The expression's type attribute.
    pub fn ty(&self) -> &'static Type {
        match self {
            Expr::Bool(e) => e.ty,
            Expr::Char(e) => e.ty,
            Expr::Integer(e) => e.ty,
            Expr::Float(e) => e.ty,
            Expr::Str(e) => e.ty,
            Expr::Variable(e) => e.ty,
            Expr::Grouping(e) => e.ty,
            Expr::Unary(e) => e.ty,
            Expr::Prefix(e) => e.ty,
            Expr::Postfix(e) => e.ty,
            Expr::Binary(e) => e.ty,
            Expr::Assignment(e) => e.ty,
            Expr::Ternary(e) => e.ty,
            Expr::NullishCoalescing(e) => e.ty,
            Expr::Call(e) => e.ty,
            Expr::StringExpression(e) => e.ty,
        }
    }
}

/// A list of expressions (call arguments, interpolation parts).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExpressionList {
    pub exprs: Vec<Expr>,
    pub range: Range,
}

impl ExpressionList {
    pub fn new(range: Range) -> ExpressionList {
        ExpressionList {
            exprs: Vec::new(),
            range,
        }
    }

    pub fn add(&mut self, expr: Expr) {
        self.exprs.push(expr);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoolExpr {
    pub value: bool,
    pub ty: &'static Type,
    pub range: Range,
}

impl BoolExpr {
    pub fn new(value: bool, range: Range) -> BoolExpr {
        BoolExpr {
            value,
            ty: &BOOL,
            range,
        }
    }
}

/// A character literal; the value is a 32-bit scalar.
#[derive(Debug, Clone, PartialEq)]
pub struct CharExpr {
    pub value: u32,
    pub ty: &'static Type,
    pub range: Range,
}

impl CharExpr {
    pub fn new(value: u32, range: Range) -> CharExpr {
        CharExpr {
            value,
            ty: &CHAR,
            range,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IntegerExpr {
    pub value: u64,
    pub ty: &'static Type,
    pub range: Range,
}

impl IntegerExpr {
    pub fn new(value: u64, range: Range) -> IntegerExpr {
        IntegerExpr {
            value,
            ty: &I32,
            range,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FloatExpr {
    pub value: f64,
    pub ty: &'static Type,
    pub range: Range,
}

impl FloatExpr {
    pub fn new(value: f64, range: Range) -> FloatExpr {
        FloatExpr {
            value,
            ty: &F64,
            range,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StringExpr {
    pub value: IStr,
    pub ty: &'static Type,
    pub range: Range,
}

impl StringExpr {
    pub fn new(value: IStr, range: Range) -> StringExpr {
        StringExpr {
            value,
            ty: &STRING,
            range,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VariableExpr {
    pub name: IStr,
    pub ty: &'static Type,
    pub range: Range,
}

impl VariableExpr {
    pub fn new(name: IStr, range: Range) -> VariableExpr {
        VariableExpr {
            name,
            ty: &AUTO,
            range,
        }
    }
}

/// A parenthesized expression.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupingExpr {
    pub expr: Box<Expr>,
    pub ty: &'static Type,
    pub range: Range,
}

impl GroupingExpr {
    pub fn new(expr: Expr, range: Range) -> GroupingExpr {
        GroupingExpr {
            expr: Box::new(expr),
            ty: &AUTO,
            range,
        }
    }
}

/// `-x`, `+x`, `!x`, `~x`.
#[derive(Debug, Clone, PartialEq)]
pub struct UnaryExpr {
    pub op: TokenKind,
    pub operand: Box<Expr>,
    pub ty: &'static Type,
    pub range: Range,
}

impl UnaryExpr {
    pub fn new(op: TokenKind, operand: Expr, range: Range) -> UnaryExpr {
        UnaryExpr {
            op,
            operand: Box::new(operand),
            ty: &AUTO,
            range,
        }
    }
}

/// `++x`, `--x`.
#[derive(Debug, Clone, PartialEq)]
pub struct PrefixExpr {
    pub op: TokenKind,
    pub operand: Box<Expr>,
    pub ty: &'static Type,
    pub range: Range,
}

impl PrefixExpr {
    pub fn new(op: TokenKind, operand: Expr, range: Range) -> PrefixExpr {
        PrefixExpr {
            op,
            operand: Box::new(operand),
            ty: &AUTO,
            range,
        }
    }
}

/// `x++`, `x--`.
#[derive(Debug, Clone, PartialEq)]
pub struct PostfixExpr {
    pub op: TokenKind,
    pub operand: Box<Expr>,
    pub ty: &'static Type,
    pub range: Range,
}

impl PostfixExpr {
    pub fn new(op: TokenKind, operand: Expr, range: Range) -> PostfixExpr {
        PostfixExpr {
            op,
            operand: Box::new(operand),
            ty: &AUTO,
            range,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpr {
    pub left: Box<Expr>,
    pub op: TokenKind,
    pub right: Box<Expr>,
    pub ty: &'static Type,
    pub range: Range,
}

impl BinaryExpr {
    pub fn new(left: Expr, op: TokenKind, right: Expr, range: Range) -> BinaryExpr {
        BinaryExpr {
            left: Box::new(left),
            op,
            right: Box::new(right),
            ty: &AUTO,
            range,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentExpr {
    pub assignee: Box<Expr>,
    pub value: Box<Expr>,
    pub ty: &'static Type,
    pub range: Range,
}

impl AssignmentExpr {
    pub fn new(assignee: Expr, value: Expr, range: Range) -> AssignmentExpr {
        AssignmentExpr {
            assignee: Box::new(assignee),
            value: Box::new(value),
            ty: &AUTO,
            range,
        }
    }
}

/// `cond ? then : otherwise`.
#[derive(Debug, Clone, PartialEq)]
pub struct TernaryExpr {
    pub condition: Box<Expr>,
    pub if_true: Box<Expr>,
    pub if_false: Box<Expr>,
    pub ty: &'static Type,
    pub range: Range,
}

impl TernaryExpr {
    pub fn new(condition: Expr, if_true: Expr, if_false: Expr, range: Range) -> TernaryExpr {
        TernaryExpr {
            condition: Box::new(condition),
            if_true: Box::new(if_true),
            if_false: Box::new(if_false),
            ty: &AUTO,
            range,
        }
    }
}

/// `lhs ?? rhs`.
#[derive(Debug, Clone, PartialEq)]
pub struct NullishCoalescingExpr {
    pub lhs: Box<Expr>,
    pub rhs: Box<Expr>,
    pub ty: &'static Type,
    pub range: Range,
}

impl NullishCoalescingExpr {
    pub fn new(lhs: Expr, rhs: Expr, range: Range) -> NullishCoalescingExpr {
        NullishCoalescingExpr {
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
            ty: &AUTO,
            range,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CallExpr {
    pub callee: Box<Expr>,
    pub arguments: Option<ExpressionList>,
    pub ty: &'static Type,
    pub range: Range,
}

impl CallExpr {
    pub fn new(callee: Expr, range: Range) -> CallExpr {
        CallExpr {
            callee: Box::new(callee),
            arguments: None,
            ty: &AUTO,
            range,
        }
    }
}

/// An interpolated string `f"…${expr}…"`: an ordered list of parts.
#[derive(Debug, Clone, PartialEq)]
pub struct StringExpressionExpr {
    pub parts: ExpressionList,
    pub ty: &'static Type,
    pub range: Range,
}

impl StringExpressionExpr {
    pub fn new(range: Range) -> StringExpressionExpr {
        StringExpressionExpr {
            parts: ExpressionList::new(range.clone()),
            ty: &STRING,
            range,
        }
    }

    pub fn add_part(&mut self, expr: Expr) {
        self.parts.add(expr);
    }
}
