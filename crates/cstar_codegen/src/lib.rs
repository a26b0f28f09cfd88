//! C-style code emitter.
//!
//! A visitor that renders the AST as readable C-like text: function
//! headers, tab-indented statement bodies, `const` for immutable
//! declarations. A pure function of the tree — emitting the same AST
//! twice yields byte-identical output.

use std::fmt::Write;

use cstar_ast::visit::Visitor;
use cstar_ast::{
    AssignmentExpr, BinaryExpr, Block, BoolExpr, CallExpr, CharExpr, DeclarationStmt, Expr,
    ExpressionList, ExpressionStmt, FloatExpr, ForStmt, FunctionDecl, GroupingExpr, IfStmt,
    IntegerExpr, NullishCoalescingExpr, PostfixExpr, PrefixExpr, Program, Stmt, StringExpr,
    StringExpressionExpr, TernaryExpr, UnaryExpr, VariableExpr, WhileStmt,
};
use cstar_source::encoding::write_utf8;


/// Emits C-like source text into an internal buffer.
pub struct Codegen {
    out: String,
    level: u32,
}

impl Codegen {
    pub fn new() -> Codegen {
        Codegen {
            out: String::new(),
            level: 0,
        }
    }

    pub fn generate(&mut self, program: &Program) -> &str {
        self.out.push_str("// Generated code\n");
        self.nl();
        program.accept(self);
        self.nl();
        &self.out
    }

    pub fn output(&self) -> &str {
        &self.out
    }

    fn tab(&mut self) {
        for _ in 0..self.level {
            self.out.push(' ');
        }
    }

    fn nl(&mut self) {
        self.out.push('\n');
    }

    fn text(&mut self, text: &str) {
        self.out.push_str(text);
    }

    /// Emit a loop or branch body on the next line. A single expression
    /// statement indents one level deeper; other statements (blocks in
    /// particular) bring their own indentation. An absent body renders
    /// as a bare semicolon.
    fn emit_body(&mut self, body: Option<&Stmt>) {
        match body {
            Some(stmt @ Stmt::Expression(_)) => {
                self.level += 2;
                stmt.accept(self);
                self.level -= 2;
            }
            Some(stmt) => stmt.accept(self),
            None => self.text(";"),
        }
    }
}

impl Default for Codegen {
    fn default() -> Self {
        Codegen::new()
    }
}

/// Emit a program to a string.
pub fn generate(program: &Program) -> String {
    let mut codegen = Codegen::new();
    codegen.generate(program);
    codegen.out
}

impl Visitor for Codegen {
    fn visit_program(&mut self, node: &Program) {
        for stmt in &node.stmts {
            stmt.accept(self);
            // Functions terminate their own line.
            if !matches!(stmt, Stmt::Function(_)) {
                self.nl();
            }
        }
    }

    fn visit_function_decl(&mut self, node: &FunctionDecl) {
        self.tab();
        let _ = write!(self.out, "{} {}()", node.return_type.name(), node.name);
        self.nl();
        if let Some(body) = &node.body {
            body.accept(self);
        }
        self.nl();
    }

    fn visit_block(&mut self, node: &Block) {
        self.tab();
        self.text("{");
        self.level += 2;
        for stmt in &node.stmts {
            self.nl();
            stmt.accept(self);
        }
        self.level -= 2;
        self.nl();
        self.tab();
        self.text("}");
    }

    fn visit_declaration_stmt(&mut self, node: &DeclarationStmt) {
        self.tab();
        if node.is_immutable() {
            self.text("const ");
        }
        let _ = write!(self.out, "{} {}", node.ty.name(), node.name);
        if let Some(value) = &node.value {
            self.text(" = ");
            value.accept(self);
        }
        self.text(";");
    }

    fn visit_expression_stmt(&mut self, node: &ExpressionStmt) {
        self.tab();
        node.expr.accept(self);
        self.text(";");
    }

    fn visit_if_stmt(&mut self, node: &IfStmt) {
        self.tab();
        self.text("if (");
        node.condition.accept(self);
        self.text(")\n");
        self.emit_body(node.then.as_deref());

        if let Some(otherwise) = &node.otherwise {
            self.nl();
            self.tab();
            self.text("else\n");
            self.emit_body(Some(otherwise));
        }
    }

    fn visit_while_stmt(&mut self, node: &WhileStmt) {
        self.tab();
        self.text("while (");
        node.condition.accept(self);
        self.text(")\n");
        self.emit_body(node.body.as_deref());
    }

    fn visit_for_stmt(&mut self, node: &ForStmt) {
        self.tab();
        self.text("for (");

        // Clauses render inline, so suppress indentation inside.
        let level = self.level;
        self.level = 0;
        match &node.init {
            Some(init) => {
                init.accept(self);
                self.text(" ");
            }
            None => self.text("; "),
        }
        self.level = level;

        if let Some(condition) = &node.condition {
            condition.accept(self);
        }
        self.text("; ");

        if let Some(update) = &node.update {
            update.accept(self);
        }
        self.text(")\n");

        self.emit_body(node.body.as_deref());
    }

    // === Expressions ===

    fn visit_expression_list(&mut self, node: &ExpressionList) {
        let mut first = true;
        for expr in &node.exprs {
            if !first {
                self.text(", ");
            }
            expr.accept(self);
            first = false;
        }
    }

    fn visit_unary_expr(&mut self, node: &UnaryExpr) {
        self.text(node.op.lexeme_stripped());
        node.operand.accept(self);
    }

    fn visit_prefix_expr(&mut self, node: &PrefixExpr) {
        self.text(node.op.lexeme_stripped());
        node.operand.accept(self);
    }

    fn visit_postfix_expr(&mut self, node: &PostfixExpr) {
        node.operand.accept(self);
        self.text(node.op.lexeme_stripped());
    }

    fn visit_binary_expr(&mut self, node: &BinaryExpr) {
        node.left.accept(self);
        let _ = write!(self.out, " {} ", node.op.lexeme_stripped());
        node.right.accept(self);
    }

    fn visit_grouping_expr(&mut self, node: &GroupingExpr) {
        self.text("(");
        node.expr.accept(self);
        self.text(")");
    }

    fn visit_variable_expr(&mut self, node: &VariableExpr) {
        self.text(node.name);
    }

    fn visit_bool_expr(&mut self, node: &BoolExpr) {
        self.text(if node.value { "1" } else { "0" });
    }

    fn visit_char_expr(&mut self, node: &CharExpr) {
        write_utf8(&mut self.out, node.value);
    }

    fn visit_integer_expr(&mut self, node: &IntegerExpr) {
        let _ = write!(self.out, "{}", node.value);
    }

    fn visit_float_expr(&mut self, node: &FloatExpr) {
        let _ = write!(self.out, "{}", node.value);
    }

    fn visit_string_expr(&mut self, node: &StringExpr) {
        self.text(node.value);
    }

    fn visit_assignment_expr(&mut self, node: &AssignmentExpr) {
        node.assignee.accept(self);
        self.text(" = ");
        node.value.accept(self);
    }

    fn visit_ternary_expr(&mut self, node: &TernaryExpr) {
        node.condition.accept(self);
        self.text(" ? ");
        node.if_true.accept(self);
        self.text(" : ");
        node.if_false.accept(self);
    }

    fn visit_nullish_coalescing_expr(&mut self, node: &NullishCoalescingExpr) {
        node.lhs.accept(self);
        self.text(" ?? ");
        node.rhs.accept(self);
    }

    fn visit_call_expr(&mut self, node: &CallExpr) {
        node.callee.accept(self);
        self.text("(");
        if let Some(args) = &node.arguments {
            self.visit_expression_list(args);
        }
        self.text(")");
    }

    fn visit_string_expression_expr(&mut self, node: &StringExpressionExpr) {
        for part in &node.parts.exprs {
            part.accept(self);
        }
    }
}

// Stmt/Expr dispatch uses the enum accept; a convenience for emitting a
// bare expression (used by tests and the interpolation case above).
impl Codegen {
    pub fn emit_expr(&mut self, expr: &Expr) -> &str {
        expr.accept(self);
        &self.out
    }
}
