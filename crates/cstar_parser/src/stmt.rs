//! Declaration and statement parsing.

use cstar_ast::{
    Block, DeclarationStmt, ExpressionStmt, ForStmt, FunctionDecl, IfStmt, ParameterStmt,
    StatementList, Stmt, WhileStmt,
};
use cstar_lexer::TokenKind;
use cstar_source::{IStr, NodeFlags, Range};
use cstar_types::Type;

use crate::parser::{PResult, Parser, Synchronize};
use crate::symbol::SymbolKind;

/// What the previous parameter looked like; drives the variadic and
/// default-argument ordering rules.
struct PrevParam {
    variadic: bool,
    has_default: bool,
    range: Range,
    name: IStr,
}

impl PrevParam {
    fn of(param: &ParameterStmt) -> PrevParam {
        PrevParam {
            variadic: param.is_variadic(),
            has_default: param.default.is_some(),
            range: param.range.clone(),
            name: param.name,
        }
    }
}

impl Parser<'_> {
    /// One top-level or block-level declaration. Catches the synchronize
    /// signal, recovers, and returns `None` for the failed statement.
    pub(crate) fn declaration(&mut self) -> Option<Stmt> {
        match self.declaration_inner() {
            Ok(stmt) => Some(stmt),
            Err(Synchronize) => {
                self.synchronize();
                None
            }
        }
    }

    fn declaration_inner(&mut self) -> PResult<Stmt> {
        let is_comptime = self.eat(TokenKind::At);

        let mut stmt = match self.kind() {
            TokenKind::Mut | TokenKind::Imm => self.variable_decl()?,
            TokenKind::Func => self.function()?,
            _ => self.statement()?,
        };

        if is_comptime {
            stmt.flags_mut().insert(NodeFlags::IS_COMPTIME);
        }
        Ok(stmt)
    }

    pub(crate) fn statement(&mut self) -> PResult<Stmt> {
        match self.kind() {
            TokenKind::If => self.if_stmt(),
            TokenKind::While => self.while_stmt(),
            TokenKind::For => self.for_stmt(),
            TokenKind::LBrace => self.block(),
            _ => self.expression_stmt(),
        }
    }

    // ---- Functions ----

    fn function(&mut self) -> PResult<Stmt> {
        let fn_tok = self.consume(
            TokenKind::Func,
            "expecting a 'func' keyword to start a function",
        )?;
        let name = self.consume(TokenKind::Identifier, "expecting the name of the function")?;
        let name_str = self.intern(&name);

        let mut func = FunctionDecl::new(name_str, fn_tok.range.clone());

        self.scopes.push();
        let result = self.function_rest(&mut func);
        self.scopes.pop();
        result?;

        Ok(Stmt::Function(func))
    }

    fn function_rest(&mut self, func: &mut FunctionDecl) -> PResult<()> {
        self.consume(TokenKind::LParen, "expecting an opening paren '('")?;

        if !self.at(TokenKind::RParen) {
            let mut params = StatementList::new(self.prev_range());
            let mut prev: Option<PrevParam> = None;
            loop {
                let param = self.parameter(prev.as_ref())?;
                prev = Some(PrevParam::of(&param));
                params.range.extend(&param.range);
                params.add(Stmt::Parameter(param));
                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
            func.params = Some(params);
        }

        self.consume(TokenKind::RParen, "expecting a closing paren ')'")?;

        if self.eat(TokenKind::RArrow) {
            // `-> expr;` sugar: a block holding one expression statement.
            let stmt = self.expression_stmt()?;
            let mut block = Block::new(stmt.range().clone());
            block.insert(stmt);
            func.body = Some(Box::new(Stmt::Block(block)));
        } else {
            func.body = Some(Box::new(self.block()?));
        }

        let body_range = func.body.as_ref().expect("body was just set").range().clone();
        func.range.extend(&body_range);
        Ok(())
    }

    fn parameter(&mut self, prev: Option<&PrevParam>) -> PResult<ParameterStmt> {
        if let Some(prev) = prev {
            if prev.variadic {
                let range = prev.range.clone();
                let message = format!(
                    "parameter '{}' cannot be a variadic parameter, it is followed by another parameter",
                    prev.name
                );
                return Err(self.error(range, message));
            }
        }

        let mut range = self.current_range();
        let is_elipsis = self.eat(TokenKind::Elipsis);

        let name = self.consume(TokenKind::Identifier, "expecting the name of the parameter")?;
        if is_elipsis {
            range.extend(&name.range);
        }
        let name_str = self.intern(&name);

        if is_elipsis && prev.is_some_and(|p| p.has_default) {
            let message = format!(
                "variadic parameter '{name_str}' not allowed after parameters with default arguments"
            );
            return Err(self.error(range, message));
        }

        if self.scopes.find(name_str, 0).is_some() {
            let message = format!("parameter '{name_str}' already defined in the parameter list");
            return Err(self.error(range, message));
        }

        self.consume(
            TokenKind::Colon,
            "expecting a colon ':' after a parameter name and before the parameter type",
        )?;

        let mut param = ParameterStmt::new(name_str, range);
        param.ty = self.expression_type()?;
        let type_range = self.prev_range();
        param.range.extend(&type_range);

        if self.eat(TokenKind::Assign) {
            if is_elipsis {
                let range = param.range.clone();
                return Err(self.error(
                    range,
                    "default parameter arguments cannot be assigned to variadic parameters",
                ));
            }
            let default = self.expression()?;
            let default_range = default.range().clone();
            param.range.extend(&default_range);
            param.default = Some(default);
        } else if prev.is_some_and(|p| p.has_default) {
            let range = param.range.clone();
            let message = format!("default argument missing for parameter '{name_str}'");
            return Err(self.error(range, message));
        }

        if is_elipsis {
            param.flags.insert(NodeFlags::IS_VARIADIC);
        }

        self.scopes
            .define(name_str, None, param.range.clone(), SymbolKind::Variable);

        Ok(param)
    }

    // ---- Variable declarations ----

    pub(crate) fn variable_decl(&mut self) -> PResult<Stmt> {
        let modifier = self.advance();
        let name = self.consume(TokenKind::Identifier, "expecting the name of the variable")?;
        let name_str = self.intern(&name);

        let mut decl = DeclarationStmt::new(
            name_str,
            modifier.kind == TokenKind::Imm,
            modifier.range.merge(&name.range),
        );

        if self.scopes.find(name_str, 0).is_some() {
            let range = name.range.clone();
            let message = format!("variable '{name_str}' already defined in current scope");
            return Err(self.error(range, message));
        }

        if self.eat(TokenKind::Colon) {
            decl.ty = self.expression_type()?;
            let type_range = self.prev_range();
            decl.range.extend(&type_range);
        }

        if self.eat(TokenKind::Assign) {
            let value = self.expression()?;
            let value_range = value.range().clone();
            decl.range.extend(&value_range);
            decl.value = Some(value);
        }

        if decl.value.is_none() && decl.ty.is_auto() {
            let range = decl.range.clone();
            return Err(self.error(
                range,
                "an explicit type must be assigned to an uninitialized variable",
            ));
        }

        self.scopes.define(
            name_str,
            decl.value.clone(),
            name.range.clone(),
            SymbolKind::Variable,
        );

        self.consume(
            TokenKind::Semicolon,
            "expecting a semicolon ';' after a variable declaration expression",
        )?;
        Ok(Stmt::Declaration(decl))
    }

    /// A type annotation: a name resolved against the built-in registry.
    fn expression_type(&mut self) -> PResult<&'static Type> {
        let tok = self.consume(TokenKind::Identifier, "expecting a type name")?;
        match cstar_types::builtin(tok.range.text()) {
            Some(ty) => Ok(ty),
            None => Err(self.error(tok.range, "unknown type name")),
        }
    }

    // ---- Blocks ----

    pub(crate) fn block(&mut self) -> PResult<Stmt> {
        let lb = self.consume(TokenKind::LBrace, "expecting an opening brace '{'")?;

        self.scopes.push();
        let result = self.block_body(lb.range.clone());
        self.scopes.pop();
        result
    }

    fn block_body(&mut self, start: Range) -> PResult<Stmt> {
        let mut block = Block::new(start);
        while !self.eof() && !self.at(TokenKind::RBrace) {
            if let Some(stmt) = self.declaration() {
                block.insert(stmt);
            }
        }
        let rb = self.consume(TokenKind::RBrace, "expecting a closing brace '}'")?;
        block.range.extend(&rb.range);
        Ok(Stmt::Block(block))
    }

    // ---- Simple statements ----

    pub(crate) fn expression_stmt(&mut self) -> PResult<Stmt> {
        let expr = self.expression()?;
        let range = expr.range().clone();
        let stmt = ExpressionStmt::new(expr, range);
        self.consume(
            TokenKind::Semicolon,
            "expecting a semicolon ';' after a statement",
        )?;
        Ok(Stmt::Expression(stmt))
    }

    fn if_stmt(&mut self) -> PResult<Stmt> {
        let start = self.consume(TokenKind::If, "expecting an 'if' statement")?;
        self.consume(
            TokenKind::LParen,
            "expecting an opening paren '(' after an 'if' keyword",
        )?;
        let condition = self.expression()?;
        self.consume(
            TokenKind::RParen,
            "expect a closing paren ')' after an if condition",
        )?;

        let mut stmt = IfStmt::new(condition, start.range.clone());
        stmt.then = Some(Box::new(self.statement()?));

        if self.eat(TokenKind::Else) {
            let otherwise = self.statement()?;
            let range = otherwise.range().clone();
            stmt.otherwise = Some(Box::new(otherwise));
            stmt.range.extend(&range);
        } else {
            let range = stmt.then.as_ref().expect("then was just set").range().clone();
            stmt.range.extend(&range);
        }

        Ok(Stmt::If(stmt))
    }

    fn while_stmt(&mut self) -> PResult<Stmt> {
        let start = self.consume(
            TokenKind::While,
            "expecting a 'while' keyword to start a while statement",
        )?;
        self.consume(
            TokenKind::LParen,
            "expecting an opening paren '(' after 'while' keyword",
        )?;
        let condition = self.expression()?;
        let mut stmt = WhileStmt::new(condition, start.range.clone());
        self.consume(
            TokenKind::RParen,
            "expecting a closing paren ')' after a 'while' statement condition",
        )?;

        if !self.eat(TokenKind::Semicolon) {
            let body = self.statement()?;
            let range = body.range().clone();
            stmt.body = Some(Box::new(body));
            stmt.range.extend(&range);
        } else {
            // `while (cond);` — an empty body.
            let range = self.prev_range();
            stmt.range.extend(&range);
        }

        Ok(Stmt::While(stmt))
    }

    fn for_stmt(&mut self) -> PResult<Stmt> {
        let start = self.consume(
            TokenKind::For,
            "expecting a 'for' keyword to start a 'for' statement",
        )?;
        self.consume(
            TokenKind::LParen,
            "expecting an opening paren '(' to start for loop clauses",
        )?;

        let mut stmt = ForStmt::new(start.range.clone());

        // The init clause declares into the loop's own scope.
        self.scopes.push();
        let result = self.for_clauses(&mut stmt);
        self.scopes.pop();
        result?;

        Ok(Stmt::For(stmt))
    }

    fn for_clauses(&mut self, stmt: &mut ForStmt) -> PResult<()> {
        if !self.eat(TokenKind::Semicolon) {
            if self.at_any(&[TokenKind::Mut, TokenKind::Imm]) {
                stmt.init = Some(Box::new(self.variable_decl()?));
            } else {
                stmt.init = Some(Box::new(self.expression_stmt()?));
            }
        }

        if !self.at(TokenKind::Semicolon) {
            stmt.condition = Some(self.expression()?);
        }
        self.consume(
            TokenKind::Semicolon,
            "expecting a semicolon ';' after loop condition.",
        )?;

        if !self.at(TokenKind::RParen) {
            stmt.update = Some(self.expression()?);
        }
        self.consume(
            TokenKind::RParen,
            "expecting a closing paren ')' to close for loop clauses.",
        )?;

        if !self.eat(TokenKind::Semicolon) {
            let body = self.statement()?;
            let range = body.range().clone();
            stmt.body = Some(Box::new(body));
            stmt.range.extend(&range);
        } else {
            let range = self.prev_range();
            stmt.range.extend(&range);
        }
        Ok(())
    }
}
