//! Expression parsing — the precedence cascade.
//!
//! Lowest to highest: assignment, ternary, nullish coalescing, logical
//! or/and, bitwise or/xor/and, equality, comparison, additive,
//! multiplicative, logical/bitwise not, sign, prefix/postfix, call,
//! primary. Assignment and ternary are right-associative; the binary
//! tiers are left-associative.

use cstar_ast::{
    AssignmentExpr, BinaryExpr, BoolExpr, CallExpr, CharExpr, Expr, ExpressionList, FloatExpr,
    GroupingExpr, IntegerExpr, NullishCoalescingExpr, PostfixExpr, PrefixExpr, StringExpr,
    StringExpressionExpr, TernaryExpr, UnaryExpr, VariableExpr,
};
use cstar_lexer::TokenKind;

use crate::parser::{PResult, Parser};

/// The binary operator a compound assignment desugars through.
fn compound_op(kind: TokenKind) -> Option<TokenKind> {
    match kind {
        TokenKind::PlusAssign => Some(TokenKind::Plus),
        TokenKind::MinusAssign => Some(TokenKind::Minus),
        TokenKind::MultAssign => Some(TokenKind::Mult),
        TokenKind::DivAssign => Some(TokenKind::Div),
        TokenKind::ModAssign => Some(TokenKind::Mod),
        TokenKind::ShlAssign => Some(TokenKind::Shl),
        TokenKind::ShrAssign => Some(TokenKind::Shr),
        TokenKind::BitAndAssign => Some(TokenKind::BitAnd),
        TokenKind::BitOrAssign => Some(TokenKind::BitOr),
        TokenKind::BitXorAssign => Some(TokenKind::BitXor),
        TokenKind::CompAssign => Some(TokenKind::Complement),
        _ => None,
    }
}

impl Parser<'_> {
    pub(crate) fn expression(&mut self) -> PResult<Expr> {
        self.assignment()
    }

    fn assignment(&mut self) -> PResult<Expr> {
        let expr = self.ternary()?;

        if self.at(TokenKind::Assign) {
            self.advance();
            let value = self.assignment()?;
            let mut range = expr.range().clone();
            range.extend(value.range());
            return Ok(Expr::Assignment(AssignmentExpr::new(expr, value, range)));
        }

        if let Some(op) = compound_op(self.kind()) {
            self.advance();
            let rhs = self.assignment()?;
            let rhs_range = rhs.range().clone();
            // The left-hand side is shared syntactically between the
            // assignment target and the desugared binary value.
            let value = Expr::Binary(BinaryExpr::new(expr.clone(), op, rhs, rhs_range.clone()));
            let mut range = expr.range().clone();
            range.extend(&rhs_range);
            return Ok(Expr::Assignment(AssignmentExpr::new(expr, value, range)));
        }

        Ok(expr)
    }

    fn ternary(&mut self) -> PResult<Expr> {
        let expr = self.coalescing()?;

        if self.eat(TokenKind::Question) {
            let if_true = self.ternary()?;
            self.consume(
                TokenKind::Colon,
                "expecting a colon ':' to separate a ternary expression.",
            )?;
            let if_false = self.ternary()?;
            let mut range = expr.range().clone();
            range.extend(if_false.range());
            return Ok(Expr::Ternary(TernaryExpr::new(
                expr, if_true, if_false, range,
            )));
        }

        Ok(expr)
    }

    fn coalescing(&mut self) -> PResult<Expr> {
        let expr = self.lor()?;

        if self.eat(TokenKind::QuestionQuestion) {
            let rhs = self.lor()?;
            let mut range = expr.range().clone();
            range.extend(rhs.range());
            return Ok(Expr::NullishCoalescing(NullishCoalescingExpr::new(
                expr, rhs, range,
            )));
        }

        Ok(expr)
    }

    /// One left-associative binary tier.
    fn binary_tier(
        &mut self,
        ops: &[TokenKind],
        next: fn(&mut Self) -> PResult<Expr>,
    ) -> PResult<Expr> {
        let mut expr = next(self)?;
        while self.at_any(ops) {
            let op = self.advance().kind;
            let right = next(self)?;
            let mut range = expr.range().clone();
            range.extend(right.range());
            expr = Expr::Binary(BinaryExpr::new(expr, op, right, range));
        }
        Ok(expr)
    }

    fn lor(&mut self) -> PResult<Expr> {
        self.binary_tier(&[TokenKind::LOr], Self::land)
    }

    fn land(&mut self) -> PResult<Expr> {
        self.binary_tier(&[TokenKind::LAnd], Self::bor)
    }

    fn bor(&mut self) -> PResult<Expr> {
        self.binary_tier(&[TokenKind::BitOr], Self::bxor)
    }

    fn bxor(&mut self) -> PResult<Expr> {
        self.binary_tier(&[TokenKind::BitXor], Self::band)
    }

    fn band(&mut self) -> PResult<Expr> {
        self.binary_tier(&[TokenKind::BitAnd], Self::equality)
    }

    fn equality(&mut self) -> PResult<Expr> {
        self.binary_tier(&[TokenKind::Neq, TokenKind::Equal], Self::comparison)
    }

    fn comparison(&mut self) -> PResult<Expr> {
        self.binary_tier(
            &[TokenKind::Gt, TokenKind::Gte, TokenKind::Lt, TokenKind::Lte],
            Self::terminal,
        )
    }

    fn terminal(&mut self) -> PResult<Expr> {
        self.binary_tier(&[TokenKind::Minus, TokenKind::Plus], Self::factor)
    }

    fn factor(&mut self) -> PResult<Expr> {
        self.binary_tier(&[TokenKind::Div, TokenKind::Mult], Self::nots)
    }

    fn nots(&mut self) -> PResult<Expr> {
        if self.at_any(&[TokenKind::Complement, TokenKind::Not]) {
            let op = self.advance();
            let right = self.nots()?;
            let mut range = op.range.clone();
            range.extend(right.range());
            return Ok(Expr::Unary(UnaryExpr::new(op.kind, right, range)));
        }
        self.unary()
    }

    fn unary(&mut self) -> PResult<Expr> {
        if self.at_any(&[TokenKind::Plus, TokenKind::Minus]) {
            let op = self.advance();
            let right = self.unary()?;
            let mut range = op.range.clone();
            range.extend(right.range());
            return Ok(Expr::Unary(UnaryExpr::new(op.kind, right, range)));
        }
        self.prefix()
    }

    fn prefix(&mut self) -> PResult<Expr> {
        if self.at_any(&[TokenKind::MinusMinus, TokenKind::PlusPlus]) {
            let op = self.advance();
            let right = self.prefix()?;
            let mut range = op.range.clone();
            range.extend(right.range());
            return Ok(Expr::Prefix(PrefixExpr::new(op.kind, right, range)));
        }

        let mut expr = self.call()?;
        while self.at_any(&[TokenKind::PlusPlus, TokenKind::MinusMinus]) {
            let op = self.advance();
            let mut range = expr.range().clone();
            range.extend(&op.range);
            expr = Expr::Postfix(PostfixExpr::new(op.kind, expr, range));
        }
        Ok(expr)
    }

    fn call(&mut self) -> PResult<Expr> {
        let mut expr = self.primary()?;

        while self.at(TokenKind::LParen) {
            self.advance();
            let mut arguments = ExpressionList::new(self.prev_range());
            if !self.at(TokenKind::RParen) {
                loop {
                    let arg = self.expression()?;
                    arguments.range.extend(arg.range());
                    arguments.add(arg);
                    if !self.eat(TokenKind::Comma) {
                        break;
                    }
                }
            }

            let rp = self.consume(
                TokenKind::RParen,
                "expecting a closing paren ')' to end function arguments",
            )?;
            arguments.range.extend(&rp.range);

            let mut range = expr.range().clone();
            range.extend(&rp.range);
            let mut call = CallExpr::new(expr, range);
            call.arguments = Some(arguments);
            expr = Expr::Call(call);
        }

        Ok(expr)
    }

    fn primary(&mut self) -> PResult<Expr> {
        if let Some(expr) = self.literal() {
            self.advance();
            return Ok(expr);
        }

        if self.at(TokenKind::LStrExpr) {
            let start = self.advance();
            let mut expr = StringExpressionExpr::new(start.range.clone());
            while !self.eat(TokenKind::RStrExpr) {
                let part = self.expression()?;
                expr.add_part(part);
            }
            let end = self.prev_range();
            expr.range.extend(&end);
            return Ok(Expr::StringExpression(expr));
        }

        if self.at(TokenKind::Identifier) {
            let tok = self.advance();
            let name = self.intern(&tok);
            if self.scopes.find_default(name).is_none() {
                // Diagnosed but not fatal: the variable expression is
                // still produced and parsing continues.
                self.log.error(
                    tok.range.clone(),
                    format!("accessing an undefined variable '{name}'"),
                );
            }
            return Ok(Expr::Variable(VariableExpr::new(name, tok.range)));
        }

        let mut range = self.current_range();
        if self.eat(TokenKind::LParen) {
            let expr = self.expression()?;
            let close = self.current_range();
            range.extend(&close);
            self.consume(TokenKind::RParen, "expecting a closing ')' after expression.")?;
            return Ok(Expr::Grouping(GroupingExpr::new(expr, range)));
        }

        Err(self.error_here("unexpected token, expecting an expression"))
    }

    /// Build a literal expression from the current token without
    /// consuming it.
    fn literal(&mut self) -> Option<Expr> {
        let tok = self.current();
        let range = tok.range.clone();
        match tok.kind {
            TokenKind::True | TokenKind::False => {
                let value = tok
                    .value
                    .as_bool()
                    .unwrap_or(tok.kind == TokenKind::True);
                Some(Expr::Bool(BoolExpr::new(value, range)))
            }
            TokenKind::Char => Some(Expr::Char(CharExpr::new(
                tok.value.as_char().unwrap_or(0),
                range,
            ))),
            TokenKind::Integer => Some(Expr::Integer(IntegerExpr::new(
                tok.value.as_int().unwrap_or(0),
                range,
            ))),
            TokenKind::Float => Some(Expr::Float(FloatExpr::new(
                tok.value.as_float().unwrap_or(0.0),
                range,
            ))),
            TokenKind::String => Some(Expr::Str(StringExpr::new(
                tok.value.as_str().unwrap_or(""),
                range,
            ))),
            _ => None,
        }
    }
}
