//! The AST traversal protocol.
//!
//! Every node variant has a dedicated handler on `Visitor`, all of which
//! default to no-ops; `accept` dispatches a node to its precise handler.
//! The `walk_*` helpers visit a node's children, tolerating absent ones,
//! so handlers can opt into recursion.

use cstar_types::Type;

use crate::expr::*;
use crate::stmt::*;

pub trait Visitor {
    // Containers
    fn visit_program(&mut self, _node: &Program) {}
    fn visit_block(&mut self, _node: &Block) {}
    fn visit_statement_list(&mut self, _node: &StatementList) {}
    fn visit_expression_list(&mut self, _node: &ExpressionList) {}

    // Declarations
    fn visit_function_decl(&mut self, _node: &FunctionDecl) {}

    // Statements
    fn visit_declaration_stmt(&mut self, _node: &DeclarationStmt) {}
    fn visit_parameter_stmt(&mut self, _node: &ParameterStmt) {}
    fn visit_expression_stmt(&mut self, _node: &ExpressionStmt) {}
    fn visit_if_stmt(&mut self, _node: &IfStmt) {}
    fn visit_while_stmt(&mut self, _node: &WhileStmt) {}
    fn visit_for_stmt(&mut self, _node: &ForStmt) {}

    // Expressions
    fn visit_bool_expr(&mut self, _node: &BoolExpr) {}
    fn visit_char_expr(&mut self, _node: &CharExpr) {}
    fn visit_integer_expr(&mut self, _node: &IntegerExpr) {}
    fn visit_float_expr(&mut self, _node: &FloatExpr) {}
    fn visit_string_expr(&mut self, _node: &StringExpr) {}
    fn visit_variable_expr(&mut self, _node: &VariableExpr) {}
    fn visit_grouping_expr(&mut self, _node: &GroupingExpr) {}
    fn visit_unary_expr(&mut self, _node: &UnaryExpr) {}
    fn visit_prefix_expr(&mut self, _node: &PrefixExpr) {}
    fn visit_postfix_expr(&mut self, _node: &PostfixExpr) {}
    fn visit_binary_expr(&mut self, _node: &BinaryExpr) {}
    fn visit_assignment_expr(&mut self, _node: &AssignmentExpr) {}
    fn visit_ternary_expr(&mut self, _node: &TernaryExpr) {}
    fn visit_nullish_coalescing_expr(&mut self, _node: &NullishCoalescingExpr) {}
    fn visit_call_expr(&mut self, _node: &CallExpr) {}
    fn visit_string_expression_expr(&mut self, _node: &StringExpressionExpr) {}

    // Types
    fn visit_builtin_type(&mut self, _node: &cstar_types::BuiltinType) {}
    fn visit_bool_type(&mut self) {}
    fn visit_char_type(&mut self) {}
    fn visit_string_type(&mut self) {}
    fn visit_integer_type(&mut self, _node: &cstar_types::IntegerType) {}
    fn visit_float_type(&mut self, _node: &cstar_types::FloatType) {}
}

impl Program {
    pub fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        visitor.visit_program(self);
    }
}

impl Stmt {
    pub fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        match self {
            Stmt::Declaration(node) => visitor.visit_declaration_stmt(node),
            Stmt::Parameter(node) => visitor.visit_parameter_stmt(node),
            Stmt::Expression(node) => visitor.visit_expression_stmt(node),
            Stmt::If(node) => visitor.visit_if_stmt(node),
            Stmt::While(node) => visitor.visit_while_stmt(node),
            Stmt::For(node) => visitor.visit_for_stmt(node),
            Stmt::Block(node) => visitor.visit_block(node),
            Stmt::Function(node) => visitor.visit_function_decl(node),
        }
    }
}

impl Expr {
    pub fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        match self {
            Expr::Bool(node) => visitor.visit_bool_expr(node),
            Expr::Char(node) => visitor.visit_char_expr(node),
            Expr::Integer(node) => visitor.visit_integer_expr(node),
            Expr::Float(node) => visitor.visit_float_expr(node),
            Expr::Str(node) => visitor.visit_string_expr(node),
            Expr::Variable(node) => visitor.visit_variable_expr(node),
            Expr::Grouping(node) => visitor.visit_grouping_expr(node),
            Expr::Unary(node) => visitor.visit_unary_expr(node),
            Expr::Prefix(node) => visitor.visit_prefix_expr(node),
            Expr::Postfix(node) => visitor.visit_postfix_expr(node),
            Expr::Binary(node) => visitor.visit_binary_expr(node),
            Expr::Assignment(node) => visitor.visit_assignment_expr(node),
            Expr::Ternary(node) => visitor.visit_ternary_expr(node),
            Expr::NullishCoalescing(node) => visitor.visit_nullish_coalescing_expr(node),
            Expr::Call(node) => visitor.visit_call_expr(node),
            Expr::StringExpression(node) => visitor.visit_string_expression_expr(node),
        }
    }
}

/// Dispatch a type singleton to its visitor handler.
pub fn accept_type<V: Visitor + ?Sized>(visitor: &mut V, ty: &'static Type) {
    match ty {
        Type::Builtin(node) => visitor.visit_builtin_type(node),
        Type::Bool => visitor.visit_bool_type(),
        Type::Char => visitor.visit_char_type(),
        Type::String => visitor.visit_string_type(),
        Type::Integer(node) => visitor.visit_integer_type(node),
        Type::Float(node) => visitor.visit_float_type(node),
    }
}

// === Walk helpers ===

pub fn walk_program<V: Visitor + ?Sized>(visitor: &mut V, node: &Program) {
    for stmt in &node.stmts {
        stmt.accept(visitor);
    }
}

pub fn walk_block<V: Visitor + ?Sized>(visitor: &mut V, node: &Block) {
    for stmt in &node.stmts {
        stmt.accept(visitor);
    }
}

pub fn walk_statement_list<V: Visitor + ?Sized>(visitor: &mut V, node: &StatementList) {
    for stmt in &node.stmts {
        stmt.accept(visitor);
    }
}

pub fn walk_expression_list<V: Visitor + ?Sized>(visitor: &mut V, node: &ExpressionList) {
    for expr in &node.exprs {
        expr.accept(visitor);
    }
}

pub fn walk_function_decl<V: Visitor + ?Sized>(visitor: &mut V, node: &FunctionDecl) {
    if let Some(params) = &node.params {
        visitor.visit_statement_list(params);
    }
    if let Some(body) = &node.body {
        body.accept(visitor);
    }
}

pub fn walk_if_stmt<V: Visitor + ?Sized>(visitor: &mut V, node: &IfStmt) {
    node.condition.accept(visitor);
    if let Some(then) = &node.then {
        then.accept(visitor);
    }
    if let Some(otherwise) = &node.otherwise {
        otherwise.accept(visitor);
    }
}

pub fn walk_while_stmt<V: Visitor + ?Sized>(visitor: &mut V, node: &WhileStmt) {
    node.condition.accept(visitor);
    if let Some(body) = &node.body {
        body.accept(visitor);
    }
}

pub fn walk_for_stmt<V: Visitor + ?Sized>(visitor: &mut V, node: &ForStmt) {
    if let Some(init) = &node.init {
        init.accept(visitor);
    }
    if let Some(condition) = &node.condition {
        condition.accept(visitor);
    }
    if let Some(update) = &node.update {
        update.accept(visitor);
    }
    if let Some(body) = &node.body {
        body.accept(visitor);
    }
}
