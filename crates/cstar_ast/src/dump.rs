//! AST dumper — prints an indented `- Kind` / `- field: value` tree for
//! diagnostics and tests. Deterministic for a given tree.

use std::fmt::Write;

use cstar_source::encoding::write_utf8;

use crate::expr::*;
use crate::stmt::*;
use crate::visit::{accept_type, Visitor};

/// Dumps a program into an internal buffer. Children indent by two
/// columns per level.
pub struct AstDump {
    out: String,
    level: u32,
}

impl AstDump {
    pub fn new() -> AstDump {
        AstDump {
            out: String::new(),
            level: 0,
        }
    }

    pub fn dump(&mut self, program: &Program) -> &str {
        program.accept(self);
        self.out.push('\n');
        &self.out
    }

    pub fn output(&self) -> &str {
        &self.out
    }

    fn tab(&mut self) {
        for _ in 0..self.level.max(1) {
            self.out.push(' ');
        }
        self.out.push_str("- ");
    }

    fn text(&mut self, text: &str) {
        self.out.push_str(text);
    }

    fn nl(&mut self) {
        self.out.push('\n');
    }
}

impl Default for AstDump {
    fn default() -> Self {
        AstDump::new()
    }
}

/// Dump a program to a string.
pub fn dump(program: &Program) -> String {
    let mut dumper = AstDump::new();
    dumper.dump(program);
    dumper.out
}

impl Visitor for AstDump {
    fn visit_program(&mut self, node: &Program) {
        for stmt in &node.stmts {
            stmt.accept(self);
            self.nl();
        }
    }

    fn visit_block(&mut self, node: &Block) {
        self.tab();
        self.text("Block");
        self.level += 2;
        for stmt in &node.stmts {
            self.nl();
            stmt.accept(self);
        }
        self.level -= 2;
    }

    fn visit_statement_list(&mut self, node: &StatementList) {
        for stmt in &node.stmts {
            self.nl();
            stmt.accept(self);
        }
    }

    fn visit_expression_list(&mut self, node: &ExpressionList) {
        for expr in &node.exprs {
            self.nl();
            self.tab();
            expr.accept(self);
        }
    }

    fn visit_function_decl(&mut self, node: &FunctionDecl) {
        self.tab();
        self.text("FunctionDecl:\n");
        self.level += 2;

        self.tab();
        self.text("returns: ");
        accept_type(self, node.return_type);

        self.nl();
        self.tab();
        let _ = write!(self.out, "name: {}", node.name);

        if let Some(params) = &node.params {
            self.nl();
            self.tab();
            self.text("params:");
            self.level += 2;
            self.visit_statement_list(params);
            self.level -= 2;
        }

        if let Some(body) = &node.body {
            self.nl();
            self.tab();
            self.text("body: \n");
            self.level += 2;
            body.accept(self);
            self.level -= 2;
        }
        self.level -= 2;
    }

    fn visit_declaration_stmt(&mut self, node: &DeclarationStmt) {
        self.tab();
        self.text("DeclarationStmt:");
        self.level += 2;
        if node.is_immutable() {
            self.nl();
            self.tab();
            self.text("immutable");
        }

        self.nl();
        self.tab();
        self.text("type: ");
        accept_type(self, node.ty);

        self.nl();
        self.tab();
        let _ = write!(self.out, "name: {}", node.name);

        if let Some(value) = &node.value {
            self.nl();
            self.tab();
            self.text("value: ");
            value.accept(self);
        }
        self.level -= 2;
    }

    fn visit_parameter_stmt(&mut self, node: &ParameterStmt) {
        self.tab();
        self.text("ParameterStmt:");
        self.level += 2;

        self.nl();
        self.tab();
        self.text("type: ");
        accept_type(self, node.ty);

        self.nl();
        self.tab();
        let dots = if node.is_variadic() { "..." } else { "" };
        let _ = write!(self.out, "name: {}{}", dots, node.name);

        if let Some(default) = &node.default {
            self.nl();
            self.tab();
            self.text("value: ");
            default.accept(self);
        }
        self.level -= 2;
    }

    fn visit_expression_stmt(&mut self, node: &ExpressionStmt) {
        self.tab();
        self.text("ExpressionStmt: ");
        node.expr.accept(self);
    }

    fn visit_if_stmt(&mut self, node: &IfStmt) {
        self.tab();
        self.text("IfStmt\n");
        self.level += 2;
        self.tab();
        self.text("cond: ");
        node.condition.accept(self);

        if let Some(then) = &node.then {
            self.nl();
            self.tab();
            self.text("then: \n");
            self.level += 2;
            then.accept(self);
            self.level -= 2;
        }
        if let Some(otherwise) = &node.otherwise {
            self.nl();
            self.tab();
            self.text("else: \n");
            self.level += 2;
            otherwise.accept(self);
            self.level -= 2;
        }
        self.level -= 2;
    }

    fn visit_while_stmt(&mut self, node: &WhileStmt) {
        self.tab();
        self.text("WhileStmt:\n");
        self.level += 2;
        self.tab();
        self.text("cond: ");
        node.condition.accept(self);

        if let Some(body) = &node.body {
            self.nl();
            self.tab();
            self.text("body:\n");
            self.level += 2;
            body.accept(self);
            self.level -= 2;
        }
        self.level -= 2;
    }

    fn visit_for_stmt(&mut self, node: &ForStmt) {
        self.tab();
        self.text("ForStmt:\n");
        self.level += 2;

        if let Some(init) = &node.init {
            self.tab();
            self.text("init:\n");
            self.level += 2;
            init.accept(self);
            self.level -= 2;
        }
        if let Some(condition) = &node.condition {
            self.nl();
            self.tab();
            self.text("cond: ");
            condition.accept(self);
        }
        if let Some(update) = &node.update {
            self.nl();
            self.tab();
            self.text("update: ");
            update.accept(self);
        }
        if let Some(body) = &node.body {
            self.nl();
            self.tab();
            self.text("body:\n");
            self.level += 2;
            body.accept(self);
            self.level -= 2;
        }
        self.level -= 2;
    }

    // === Expressions ===

    fn visit_bool_expr(&mut self, node: &BoolExpr) {
        self.text(if node.value { "true" } else { "false" });
    }

    fn visit_char_expr(&mut self, node: &CharExpr) {
        self.out.push('\'');
        write_utf8(&mut self.out, node.value);
        self.out.push('\'');
    }

    fn visit_integer_expr(&mut self, node: &IntegerExpr) {
        let _ = write!(self.out, "{}", node.value);
    }

    fn visit_float_expr(&mut self, node: &FloatExpr) {
        let _ = write!(self.out, "{}", node.value);
    }

    fn visit_string_expr(&mut self, node: &StringExpr) {
        let _ = write!(self.out, "\"{}\"", node.value);
    }

    fn visit_variable_expr(&mut self, node: &VariableExpr) {
        self.text(node.name);
    }

    fn visit_grouping_expr(&mut self, node: &GroupingExpr) {
        self.out.push('(');
        node.expr.accept(self);
        self.out.push(')');
    }

    fn visit_unary_expr(&mut self, node: &UnaryExpr) {
        self.out.push('(');
        self.text(node.op.lexeme_stripped());
        node.operand.accept(self);
        self.out.push(')');
    }

    fn visit_prefix_expr(&mut self, node: &PrefixExpr) {
        self.out.push('(');
        self.text(node.op.lexeme_stripped());
        node.operand.accept(self);
        self.out.push(')');
    }

    fn visit_postfix_expr(&mut self, node: &PostfixExpr) {
        self.out.push('(');
        node.operand.accept(self);
        self.text(node.op.lexeme_stripped());
        self.out.push(')');
    }

    fn visit_binary_expr(&mut self, node: &BinaryExpr) {
        self.out.push('(');
        node.left.accept(self);
        self.out.push(' ');
        self.text(node.op.lexeme_stripped());
        self.out.push(' ');
        node.right.accept(self);
        self.out.push(')');
    }

    fn visit_assignment_expr(&mut self, node: &AssignmentExpr) {
        self.text("AssignmentExpr:\n");
        self.level += 2;
        self.tab();
        self.text("lhs: ");
        node.assignee.accept(self);
        self.nl();
        self.tab();
        self.text("rhs: ");
        node.value.accept(self);
        self.level -= 2;
    }

    fn visit_ternary_expr(&mut self, node: &TernaryExpr) {
        self.out.push('(');
        node.condition.accept(self);
        self.text(" ? ");
        node.if_true.accept(self);
        self.text(" : ");
        node.if_false.accept(self);
        self.out.push(')');
    }

    fn visit_nullish_coalescing_expr(&mut self, node: &NullishCoalescingExpr) {
        self.out.push('(');
        node.lhs.accept(self);
        self.text(" ?? ");
        node.rhs.accept(self);
        self.out.push(')');
    }

    fn visit_call_expr(&mut self, node: &CallExpr) {
        self.text("CallExpr:\n");
        self.level += 2;
        self.tab();
        self.text("callee: ");
        node.callee.accept(self);
        self.nl();
        self.tab();
        self.text("args: ");
        if let Some(args) = &node.arguments {
            self.level += 2;
            self.visit_expression_list(args);
            self.level -= 2;
        }
        self.level -= 2;
    }

    fn visit_string_expression_expr(&mut self, node: &StringExpressionExpr) {
        self.text("f\"");
        for part in &node.parts.exprs {
            self.text("${");
            part.accept(self);
            self.out.push('}');
        }
        self.out.push('"');
    }

    // === Types ===

    fn visit_builtin_type(&mut self, node: &cstar_types::BuiltinType) {
        self.text(node.name);
    }

    fn visit_bool_type(&mut self) {
        self.text("bool");
    }

    fn visit_char_type(&mut self) {
        self.text("char");
    }

    fn visit_string_type(&mut self) {
        self.text("string");
    }

    fn visit_integer_type(&mut self, node: &cstar_types::IntegerType) {
        self.text(node.name);
    }

    fn visit_float_type(&mut self, node: &cstar_types::FloatType) {
        self.text(node.name);
    }
}
