//! Tests for AST construction, the visitor protocol and the dumper.

use cstar_lexer::TokenKind;
use cstar_source::{NodeFlags, Range, Strings};
use cstar_types::{AUTO, I32, VOID};

use crate::dump;
use crate::expr::*;
use crate::stmt::*;
use crate::visit::{self, Visitor};

fn integer(value: u64) -> Expr {
    Expr::Integer(IntegerExpr::new(value, Range::none()))
}

fn variable(name: &str) -> Expr {
    Expr::Variable(VariableExpr::new(Strings::intern(name), Range::none()))
}

fn binary(left: Expr, op: TokenKind, right: Expr) -> Expr {
    Expr::Binary(BinaryExpr::new(left, op, right, Range::none()))
}

fn expr_stmt(expr: Expr) -> Stmt {
    Stmt::Expression(ExpressionStmt::new(expr, Range::none()))
}

fn program(stmts: Vec<Stmt>) -> Program {
    let mut program = Program::new();
    for stmt in stmts {
        program.insert(stmt);
    }
    program
}

// ========================================================
// Node defaults
// ========================================================

#[test]
fn expressions_default_to_their_literal_types() {
    assert_eq!(integer(1).ty().name(), "i32");
    assert_eq!(Expr::Bool(BoolExpr::new(true, Range::none())).ty().name(), "bool");
    assert_eq!(Expr::Char(CharExpr::new(65, Range::none())).ty().name(), "char");
    assert_eq!(
        Expr::Float(FloatExpr::new(0.5, Range::none())).ty().name(),
        "f64"
    );
    assert_eq!(variable("x").ty().name(), "auto");
    assert!(variable("x").ty().is_auto());
}

#[test]
fn declaration_defaults_to_auto_type() {
    let decl = DeclarationStmt::new(Strings::intern("x"), false, Range::none());
    assert!(std::ptr::eq(decl.ty, &AUTO));
    assert!(!decl.is_immutable());

    let decl = DeclarationStmt::new(Strings::intern("y"), true, Range::none());
    assert!(decl.is_immutable());
}

#[test]
fn function_defaults_to_void_return() {
    let func = FunctionDecl::new(Strings::intern("main"), Range::none());
    assert!(std::ptr::eq(func.return_type, &VOID));
    assert!(func.params.is_none());
    assert!(func.body.is_none());
}

#[test]
fn parameter_variadic_flag() {
    let mut param = ParameterStmt::new(Strings::intern("rest"), Range::none());
    assert!(!param.is_variadic());
    param.flags.insert(NodeFlags::IS_VARIADIC);
    assert!(param.is_variadic());
}

// ========================================================
// Visitor protocol
// ========================================================

/// Counts visited expression leaves, recursing via the walk helpers.
#[derive(Default)]
struct LeafCounter {
    integers: u32,
    variables: u32,
}

impl Visitor for LeafCounter {
    fn visit_program(&mut self, node: &Program) {
        visit::walk_program(self, node);
    }

    fn visit_block(&mut self, node: &Block) {
        visit::walk_block(self, node);
    }

    fn visit_expression_stmt(&mut self, node: &ExpressionStmt) {
        node.expr.accept(self);
    }

    fn visit_if_stmt(&mut self, node: &IfStmt) {
        visit::walk_if_stmt(self, node);
    }

    fn visit_binary_expr(&mut self, node: &BinaryExpr) {
        node.left.accept(self);
        node.right.accept(self);
    }

    fn visit_integer_expr(&mut self, _node: &IntegerExpr) {
        self.integers += 1;
    }

    fn visit_variable_expr(&mut self, _node: &VariableExpr) {
        self.variables += 1;
    }
}

#[test]
fn visitor_dispatches_to_precise_handlers() {
    let tree = program(vec![expr_stmt(binary(
        integer(1),
        TokenKind::Plus,
        binary(variable("x"), TokenKind::Mult, integer(2)),
    ))]);

    let mut counter = LeafCounter::default();
    tree.accept(&mut counter);
    assert_eq!(counter.integers, 2);
    assert_eq!(counter.variables, 1);
}

#[test]
fn walk_helpers_tolerate_absent_children() {
    let mut stmt = IfStmt::new(variable("cond"), Range::none());
    stmt.then = Some(Box::new(expr_stmt(integer(1))));
    // No else branch.
    let tree = program(vec![Stmt::If(stmt)]);

    let mut counter = LeafCounter::default();
    tree.accept(&mut counter);
    assert_eq!(counter.integers, 1);
    assert_eq!(counter.variables, 1);
}

#[test]
fn default_handlers_are_no_ops() {
    struct Inert;
    impl Visitor for Inert {}

    let tree = program(vec![expr_stmt(integer(7))]);
    tree.accept(&mut Inert);
}

// ========================================================
// Dumper
// ========================================================

#[test]
fn dump_expression_statement() {
    let tree = program(vec![expr_stmt(integer(42))]);
    assert_eq!(dump::dump(&tree), " - ExpressionStmt: 42\n\n");
}

#[test]
fn dump_nested_binary_parenthesizes() {
    let tree = program(vec![expr_stmt(binary(
        integer(1),
        TokenKind::Plus,
        binary(integer(2), TokenKind::Mult, integer(3)),
    ))]);
    assert_eq!(dump::dump(&tree), " - ExpressionStmt: (1 + (2 * 3))\n\n");
}

#[test]
fn dump_function_declaration() {
    let mut func = FunctionDecl::new(Strings::intern("main"), Range::none());
    let mut block = Block::new(Range::none());
    block.insert(expr_stmt(integer(42)));
    func.body = Some(Box::new(Stmt::Block(block)));

    let tree = program(vec![Stmt::Function(func)]);
    assert_eq!(
        dump::dump(&tree),
        " - FunctionDecl:\n\
         \x20 - returns: void\n\
         \x20 - name: main\n\
         \x20 - body: \n\
         \x20   - Block\n\
         \x20     - ExpressionStmt: 42\n\n"
    );
}

#[test]
fn dump_declaration_statement() {
    let mut decl = DeclarationStmt::new(Strings::intern("x"), true, Range::none());
    decl.ty = &I32;
    decl.value = Some(integer(1));

    let tree = program(vec![Stmt::Declaration(decl)]);
    assert_eq!(
        dump::dump(&tree),
        " - DeclarationStmt:\n\
         \x20 - immutable\n\
         \x20 - type: i32\n\
         \x20 - name: x\n\
         \x20 - value: 1\n\n"
    );
}

#[test]
fn dump_unary_prefix_postfix() {
    let unary = Expr::Unary(UnaryExpr::new(TokenKind::Minus, integer(5), Range::none()));
    let prefix = Expr::Prefix(PrefixExpr::new(
        TokenKind::PlusPlus,
        variable("i"),
        Range::none(),
    ));
    let postfix = Expr::Postfix(PostfixExpr::new(
        TokenKind::MinusMinus,
        variable("j"),
        Range::none(),
    ));
    let tree = program(vec![expr_stmt(unary), expr_stmt(prefix), expr_stmt(postfix)]);
    assert_eq!(
        dump::dump(&tree),
        " - ExpressionStmt: (-5)\n - ExpressionStmt: (++i)\n - ExpressionStmt: (j--)\n\n"
    );
}

#[test]
fn dump_ternary_and_nullish() {
    let ternary = Expr::Ternary(TernaryExpr::new(
        variable("c"),
        integer(1),
        integer(0),
        Range::none(),
    ));
    let nullish = Expr::NullishCoalescing(NullishCoalescingExpr::new(
        variable("a"),
        variable("b"),
        Range::none(),
    ));
    let tree = program(vec![expr_stmt(ternary), expr_stmt(nullish)]);
    assert_eq!(
        dump::dump(&tree),
        " - ExpressionStmt: (c ? 1 : 0)\n - ExpressionStmt: (a ?? b)\n\n"
    );
}

#[test]
fn dump_char_encodes_utf8() {
    let tree = program(vec![expr_stmt(Expr::Char(CharExpr::new(
        0xE9,
        Range::none(),
    )))]);
    assert_eq!(dump::dump(&tree), " - ExpressionStmt: 'é'\n\n");
}

#[test]
fn dump_interpolated_string() {
    let mut parts = StringExpressionExpr::new(Range::none());
    parts.add_part(Expr::Str(StringExpr::new(
        Strings::intern("x = "),
        Range::none(),
    )));
    parts.add_part(variable("x"));

    let tree = program(vec![expr_stmt(Expr::StringExpression(parts))]);
    assert_eq!(
        dump::dump(&tree),
        " - ExpressionStmt: f\"${\"x = \"}${x}\"\n\n"
    );
}

#[test]
fn dump_is_deterministic() {
    let build = || {
        program(vec![expr_stmt(binary(
            integer(1),
            TokenKind::Plus,
            variable("x"),
        ))])
    };
    assert_eq!(dump::dump(&build()), dump::dump(&build()));
}
