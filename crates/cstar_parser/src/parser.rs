//! Parser infrastructure — token navigation, error reporting and
//! panic-mode synchronization.
//!
//! Sub-parsers log a diagnostic and return the `Synchronize` signal;
//! the recovery boundaries (the top-level loop and the block loop) catch
//! it, advance past the next statement boundary and resume.

use cstar_ast::Program;
use cstar_lexer::{Token, TokenKind};
use cstar_source::{IStr, Log, Range, Strings};

use crate::symbol::SymbolTable;

/// The panic-mode recovery signal.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Synchronize;

pub(crate) type PResult<T> = Result<T, Synchronize>;

/// The cstar parser. Holds the token vector with an integer cursor and
/// the scope chain used for name resolution during parsing.
pub struct Parser<'a> {
    pub(crate) log: &'a mut Log,
    tokens: Vec<Token>,
    pos: usize,
    pub(crate) scopes: SymbolTable,
}

impl<'a> Parser<'a> {
    /// `tokens` must be a lexer-produced stream: non-empty, terminated
    /// by `Eof`.
    pub fn new(log: &'a mut Log, tokens: Vec<Token>, scopes: SymbolTable) -> Self {
        debug_assert!(matches!(
            tokens.last().map(|t| t.kind),
            Some(TokenKind::Eof)
        ));
        Self {
            log,
            tokens,
            pos: 0,
            scopes,
        }
    }

    /// Parse the whole stream into `program`. Returns true iff no errors
    /// were logged.
    pub fn parse(&mut self, program: &mut Program) -> bool {
        while !self.eof() {
            if let Some(stmt) = self.declaration() {
                program.insert(stmt);
            }
        }
        !self.log.has_errors()
    }

    /// The symbol table, exposed for callers that seed the root scope.
    pub fn symbols(&self) -> &SymbolTable {
        &self.scopes
    }

    // ---- Token navigation ----

    pub(crate) fn current(&self) -> &Token {
        self.tokens
            .get(self.pos)
            .unwrap_or_else(|| self.tokens.last().expect("token stream is never empty"))
    }

    pub(crate) fn kind(&self) -> TokenKind {
        self.current().kind
    }

    pub(crate) fn eof(&self) -> bool {
        self.current().kind == TokenKind::Eof
    }

    pub(crate) fn advance(&mut self) -> Token {
        let token = self.current().clone();
        if token.kind != TokenKind::Eof {
            self.pos += 1;
        }
        token
    }

    pub(crate) fn prev_range(&self) -> Range {
        let index = self.pos.saturating_sub(1);
        self.tokens[index].range.clone()
    }

    pub(crate) fn current_range(&self) -> Range {
        self.current().range.clone()
    }

    // ---- Matching helpers ----

    pub(crate) fn at(&self, kind: TokenKind) -> bool {
        !self.eof() && self.current().kind == kind
    }

    pub(crate) fn at_any(&self, kinds: &[TokenKind]) -> bool {
        !self.eof() && kinds.contains(&self.current().kind)
    }

    pub(crate) fn eat(&mut self, kind: TokenKind) -> bool {
        if self.at(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Intern the source text under a token's range.
    pub(crate) fn intern(&self, token: &Token) -> IStr {
        Strings::intern(token.range.text())
    }

    // ---- Error handling ----

    /// Log an error and produce the synchronize signal for the caller
    /// to propagate.
    pub(crate) fn error(&mut self, range: Range, message: impl Into<String>) -> Synchronize {
        self.log.error(range, message);
        Synchronize
    }

    pub(crate) fn error_here(&mut self, message: impl Into<String>) -> Synchronize {
        let range = self.current_range();
        self.error(range, message)
    }

    /// Require `kind` at the cursor without consuming it.
    #[allow(dead_code)]
    pub(crate) fn expect(&mut self, kind: TokenKind, message: &str) -> PResult<Token> {
        if self.at(kind) {
            Ok(self.current().clone())
        } else {
            Err(self.error_here(message))
        }
    }

    /// Require `kind` at the cursor and consume it.
    pub(crate) fn consume(&mut self, kind: TokenKind, message: &str) -> PResult<Token> {
        if self.at(kind) {
            Ok(self.advance())
        } else {
            Err(self.error_here(message))
        }
    }

    // ---- Error recovery ----

    /// Advance past the next semicolon, or stop before a keyword that
    /// anchors a statement.
    pub(crate) fn synchronize(&mut self) {
        self.advance();

        while !self.eof() {
            if self.at(TokenKind::Semicolon) {
                self.advance();
                return;
            }
            match self.kind() {
                TokenKind::Struct
                | TokenKind::Func
                | TokenKind::Imm
                | TokenKind::Mut
                | TokenKind::For
                | TokenKind::If
                | TokenKind::While
                | TokenKind::Union
                | TokenKind::Return => return,
                _ => {
                    self.advance();
                }
            }
        }
    }
}
