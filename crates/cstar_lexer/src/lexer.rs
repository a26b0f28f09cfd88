//! Core lexer implementation.
//!
//! Scans cstar source byte by byte, producing a token stream terminated
//! by a single `Eof` token. Handles maximal-munch punctuators, numeric
//! literals in four bases, escape sequences, nested comments and
//! interpolated strings (`f"…${expr}…"`).

use std::rc::Rc;

use cstar_source::encoding::{read_rune, write_utf8, write_utf8_checked};
use cstar_source::{LineColumn, Log, NodeFlags, Position, Range, Source, Strings};

use crate::token::{Token, TokenKind, TokenValue};

fn is_oct(byte: u8) -> bool {
    (b'0'..=b'7').contains(&byte)
}

/// A decoded rune is usable in source text if it is not a surrogate and
/// is either at or above U+00A0 or one of `$`, `@`, `` ` ``.
fn is_valid_ucn(rune: u32) -> bool {
    if (0xD800..=0xDFFF).contains(&rune) {
        return false;
    }
    rune >= 0xA0 || rune == '$' as u32 || rune == '@' as u32 || rune == '`' as u32
}

/// The cstar lexer.
pub struct Lexer<'a> {
    log: &'a mut Log,
    src: Rc<Source>,
    flags: NodeFlags,
    tokens: Vec<Token>,
    idx: u32,
    pos: LineColumn,
    /// True while scanning the raw-text portions of an interpolated
    /// string; a bare `}` then resumes string scanning instead of
    /// producing `RBrace`.
    in_str_expr: bool,
    failed: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(log: &'a mut Log, src: Rc<Source>, flags: NodeFlags) -> Self {
        Self {
            log,
            src,
            flags,
            tokens: Vec::new(),
            idx: 0,
            pos: LineColumn::default(),
            in_str_expr: false,
            failed: false,
        }
    }

    /// Tokenize the whole source. Returns false when a fatal condition
    /// was hit (unknown byte, malformed escape, unterminated construct);
    /// scanning still continues so several diagnostics can be reported,
    /// and the `Eof` token is appended on every path.
    pub fn tokenize(&mut self) -> bool {
        while let Some(c) = self.peek(0) {
            if c.is_ascii_whitespace() {
                self.eat_whitespace();
                continue;
            }
            self.scan(c);
        }
        let pos = self.mark();
        self.add(TokenKind::Eof, pos, pos.index);
        !self.failed
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn into_tokens(self) -> Vec<Token> {
        self.tokens
    }

    // === Character navigation ===

    fn peek(&self, n: u32) -> Option<u8> {
        self.src.byte(self.idx + n)
    }

    /// Advance `n` bytes, updating line/column; newlines reset the
    /// column. Returns the previous byte index.
    fn advance(&mut self, n: u32) -> u32 {
        let src = Rc::clone(&self.src);
        let bytes = src.contents().as_bytes();
        let ret = self.idx;
        let end = (self.idx + n).min(src.size());
        for i in ret..end {
            if bytes[i as usize] == b'\n' {
                self.pos.line += 1;
                self.pos.column = 0;
            } else {
                self.pos.column += 1;
            }
        }
        self.idx = end;
        ret
    }

    fn mark(&self) -> Position {
        Position {
            index: self.idx,
            coord: self.pos,
        }
    }

    fn eat_whitespace(&mut self) {
        while self.peek(0).is_some_and(|b| b.is_ascii_whitespace()) {
            self.advance(1);
        }
    }

    fn eat_digits(&mut self) {
        while self.peek(0).is_some_and(|b| b.is_ascii_digit()) {
            self.advance(1);
        }
    }

    // === Token construction ===

    fn range(&self, pos: Position, end: u32) -> Range {
        Range::at(Rc::clone(&self.src), pos, end)
    }

    fn range_from(&self, pos: Position) -> Range {
        self.range(pos, self.idx)
    }

    fn add(&mut self, kind: TokenKind, pos: Position, end: u32) {
        let range = self.range(pos, end);
        self.tokens.push(Token::new(kind, range));
    }

    fn add_value(&mut self, kind: TokenKind, pos: Position, end: u32, value: TokenValue) {
        let range = self.range(pos, end);
        self.tokens.push(Token::with_value(kind, range, value));
    }

    /// Consume `n` bytes and emit a punctuator covering them.
    fn punct(&mut self, pos: Position, n: u32, kind: TokenKind) {
        self.advance(n);
        self.add(kind, pos, self.idx);
    }

    /// `<c>=` pairs: emit `two` when the next byte is `=`, else `one`.
    fn punct_eq(&mut self, pos: Position, two: TokenKind, one: TokenKind) {
        if self.peek(1) == Some(b'=') {
            self.punct(pos, 2, two);
        } else {
            self.punct(pos, 1, one);
        }
    }

    // === Main dispatch ===

    fn scan(&mut self, c: u8) {
        use TokenKind::*;

        let cc = self.peek(1);
        let ccc = self.peek(2);
        let pos = self.mark();

        match c {
            b'%' => self.punct_eq(pos, ModAssign, Mod),
            b'/' => {
                if cc == Some(b'=') {
                    self.punct(pos, 2, DivAssign);
                } else if cc == Some(b'*') || cc == Some(b'/') {
                    self.tok_comment();
                } else {
                    self.punct(pos, 1, Div);
                }
            }
            b'*' => {
                if cc == Some(b'*') {
                    self.punct(pos, 2, Exponent);
                } else {
                    self.punct_eq(pos, MultAssign, Mult);
                }
            }
            b'+' => {
                if cc == Some(b'+') {
                    self.punct(pos, 2, PlusPlus);
                } else {
                    self.punct_eq(pos, PlusAssign, Plus);
                }
            }
            b'-' => {
                if cc == Some(b'-') {
                    self.punct(pos, 2, MinusMinus);
                } else if cc == Some(b'>') {
                    self.punct(pos, 2, RArrow);
                } else {
                    self.punct_eq(pos, MinusAssign, Minus);
                }
            }
            b'|' => {
                if cc == Some(b'|') {
                    self.punct(pos, 2, LOr);
                } else {
                    self.punct_eq(pos, BitOrAssign, BitOr);
                }
            }
            b'&' => {
                if cc == Some(b'&') {
                    self.punct(pos, 2, LAnd);
                } else {
                    self.punct_eq(pos, BitAndAssign, BitAnd);
                }
            }
            b'^' => self.punct_eq(pos, BitXorAssign, BitXor),
            b'~' => self.punct_eq(pos, CompAssign, Complement),
            b'>' => {
                if cc == Some(b'>') {
                    if ccc == Some(b'=') {
                        self.punct(pos, 3, ShrAssign);
                    } else {
                        self.punct(pos, 2, Shr);
                    }
                } else {
                    self.punct_eq(pos, Gte, Gt);
                }
            }
            b'<' => {
                if cc == Some(b'-') {
                    self.punct(pos, 2, LArrow);
                } else if cc == Some(b'<') {
                    if ccc == Some(b'=') {
                        self.punct(pos, 3, ShlAssign);
                    } else {
                        self.punct(pos, 2, Shl);
                    }
                } else {
                    self.punct_eq(pos, Lte, Lt);
                }
            }
            b'=' => self.punct_eq(pos, Equal, Assign),
            b'.' => {
                if cc.is_some_and(|b| b.is_ascii_digit()) {
                    // Floats may start with a bare '.'
                    self.tok_number();
                } else if cc == Some(b'.') {
                    if ccc == Some(b'.') {
                        self.punct(pos, 3, Elipsis);
                    } else {
                        self.punct(pos, 2, DotDot);
                    }
                } else {
                    self.punct(pos, 1, Dot);
                }
            }
            b':' => {
                if cc == Some(b':') {
                    self.punct(pos, 2, DColon);
                } else {
                    self.punct(pos, 1, Colon);
                }
            }
            b'!' => self.punct_eq(pos, Neq, Not),
            b'{' => self.punct(pos, 1, LBrace),
            b'}' => {
                if self.in_str_expr {
                    self.advance(1);
                    self.tok_string();
                } else {
                    self.punct(pos, 1, RBrace);
                }
            }
            b'[' => self.punct(pos, 1, LBracket),
            b']' => self.punct(pos, 1, RBracket),
            b'(' => self.punct(pos, 1, LParen),
            b')' => self.punct(pos, 1, RParen),
            b'@' => self.punct(pos, 1, At),
            b'#' => self.punct(pos, 1, Hash),
            b'?' => {
                if cc == Some(b'?') {
                    self.punct(pos, 2, QuestionQuestion);
                } else {
                    self.punct(pos, 1, Question);
                }
            }
            b'`' => self.punct(pos, 1, BackQuote),
            b';' => self.punct(pos, 1, Semicolon),
            b',' => self.punct(pos, 1, Comma),
            b'\'' => self.tok_character(),
            b'"' => {
                self.advance(1);
                self.tok_string();
            }
            b'f' if cc == Some(b'"') => {
                self.in_str_expr = true;
                self.advance(2);
                self.add(LStrExpr, pos, self.idx);
                self.tok_string();
            }
            b'0'..=b'9' => self.tok_number(),
            b'_' | b'a'..=b'z' | b'A'..=b'Z' => self.tok_identifier(),
            _ => {
                self.advance(1);
                self.log.error(self.range_from(pos), "unknown token");
                self.failed = true;
            }
        }
    }

    // === Escape sequences ===

    fn tok_escaped_char(&mut self) -> u32 {
        let c = self.peek(0);
        self.advance(1);
        match c {
            Some(b @ (b'\'' | b'"' | b'?' | b'\\' | b'$')) => b as u32,
            Some(b'a') => 0x07,
            Some(b'b') => 0x08,
            Some(b'f') => 0x0C,
            Some(b'n') => b'\n' as u32,
            Some(b'r') => b'\r' as u32,
            Some(b't') => b'\t' as u32,
            Some(b'v') => 0x0B,
            Some(b'e') => 0x1B,
            Some(b'x') => self.tok_hex_char(),
            Some(b'u') => self.tok_universal_char(4),
            Some(b'U') => self.tok_universal_char(8),
            Some(b @ b'0'..=b'7') => self.tok_octal_char(b),
            Some(other) => {
                let pos = self.mark();
                self.log.warning(
                    self.range(pos, self.idx),
                    format!("unknown escape character: \\{}", other as char),
                );
                other as u32
            }
            None => 0,
        }
    }

    fn tok_octal_char(&mut self, first: u8) -> u32 {
        let mut value = u32::from(first - b'0');
        for _ in 0..2 {
            match self.peek(0) {
                Some(b) if is_oct(b) => {
                    self.advance(1);
                    value = (value << 3) | u32::from(b - b'0');
                }
                _ => break,
            }
        }
        value
    }

    fn tok_hex_char(&mut self) -> u32 {
        if !self.peek(0).is_some_and(|b| b.is_ascii_hexdigit()) {
            let pos = self.mark();
            self.log.error(
                self.range(pos, self.idx),
                "\\x is not followed by a hexadecimal literal",
            );
            self.failed = true;
            return 0;
        }

        let mut value: u32 = 0;
        while let Some(b) = self.peek(0) {
            let digit = match b {
                b'0'..=b'9' => u32::from(b - b'0'),
                b'a'..=b'f' => u32::from(b - b'a' + 10),
                b'A'..=b'F' => u32::from(b - b'A' + 10),
                _ => break,
            };
            value = (value << 4) | digit;
            self.advance(1);
        }
        value
    }

    fn tok_universal_char(&mut self, len: u32) -> u32 {
        let start = Position {
            index: self.idx.saturating_sub(1),
            coord: self.pos,
        };
        let mut value: u32 = 0;
        for _ in 0..len {
            let digit = match self.peek(0) {
                Some(b @ b'0'..=b'9') => u32::from(b - b'0'),
                Some(b @ b'a'..=b'f') => u32::from(b - b'a' + 10),
                Some(b @ b'A'..=b'F') => u32::from(b - b'A' + 10),
                _ => {
                    self.log
                        .error(self.range_from(start), "invalid universal character");
                    self.failed = true;
                    return value;
                }
            };
            value = (value << 4) | digit;
            self.advance(1);
        }

        if !is_valid_ucn(value) {
            self.log
                .error(self.range_from(start), "invalid universal character");
            self.failed = true;
        }
        value
    }

    // === Character literals ===

    fn tok_character(&mut self) {
        let pos = self.mark();
        let c = self.peek(1);
        self.advance(2); // opening quote plus the first content byte

        let chr: u32 = match c {
            Some(b'\\') => self.tok_escaped_char(),
            Some(b) if b >= 0x80 => {
                // A UTF-8 rune: consume up to the closing quote, decode.
                while !matches!(self.peek(0), Some(b'\'') | None) {
                    self.advance(1);
                }
                let range = self.range(
                    Position {
                        index: pos.index + 1,
                        coord: pos.coord,
                    },
                    self.idx,
                );
                match read_rune(self.log, &range) {
                    Some((_, rune)) => rune,
                    None => {
                        self.failed = true;
                        0
                    }
                }
            }
            Some(b) => u32::from(b),
            None => 0,
        };

        if self.peek(0) != Some(b'\'') {
            self.log
                .error(self.range_from(pos), "unterminated character sequence");
            self.failed = true;
        } else {
            self.advance(1);
            self.add_value(TokenKind::Char, pos, self.idx, TokenValue::Char(chr));
        }
    }

    // === String literals ===

    /// Scan string content up to the closing quote, a `${` break while
    /// inside an interpolated string, or an unterminated end. The opening
    /// quote (or the `}` resuming interpolation) is already consumed.
    fn tok_string(&mut self) {
        let pos = self.mark();
        let was_in_expr = self.in_str_expr;
        let mut buf: Vec<u8> = Vec::new();
        // The byte that ended the scan: '"', '$', '\n', or None at EOF.
        let mut stop: Option<u8> = None;

        while let Some(c) = self.peek(0) {
            if c == b'"' {
                self.in_str_expr = false;
                stop = Some(b'"');
                break;
            }
            if c == b'\n' {
                stop = Some(b'\n');
                break;
            }
            self.advance(1);

            if self.in_str_expr && c == b'$' && self.peek(0) == Some(b'{') {
                stop = Some(b'$');
                break;
            }

            if c != b'\\' {
                buf.push(c);
                continue;
            }

            let is_ucn = matches!(self.peek(0), Some(b'u') | Some(b'U'));
            let escape_start = self.mark();
            let chr = self.tok_escaped_char();
            let mut encoded = String::new();
            if is_ucn {
                let range = self.range(escape_start, self.idx);
                write_utf8_checked(&mut encoded, self.log, &range, chr);
            } else {
                write_utf8(&mut encoded, chr);
            }
            buf.extend_from_slice(encoded.as_bytes());
        }

        match stop {
            Some(b'"') | Some(b'$') => {
                let close = self.mark();
                self.advance(1); // the quote, or the '{' of '${'
                if !was_in_expr || self.idx - pos.index > 1 {
                    let value = Strings::intern(&String::from_utf8_lossy(&buf));
                    self.add_value(TokenKind::String, pos, self.idx, TokenValue::Str(value));
                }
                if was_in_expr && stop == Some(b'"') {
                    self.add(TokenKind::RStrExpr, close, self.idx);
                }
            }
            _ => {
                self.log
                    .error(self.range_from(pos), "unterminated string literal");
                self.failed = true;
                self.in_str_expr = false;
            }
        }
    }

    // === Numeric literals ===

    fn tok_number(&mut self) {
        let c = self.peek(0);
        let cc = self.peek(1).map(|b| b.to_ascii_uppercase());
        let ccc = self.peek(2);

        if c == Some(b'0') {
            match cc {
                Some(b'X') if ccc.is_some_and(|b| b.is_ascii_hexdigit()) => self.tok_hex_number(),
                Some(b'B') if matches!(ccc, Some(b'0') | Some(b'1')) => self.tok_binary_number(),
                Some(b'.') | Some(b'E') => {
                    let pos = self.mark();
                    self.advance(1);
                    self.tok_floating_point(pos);
                }
                _ => self.tok_octal_number(),
            }
        } else {
            self.tok_decimal_number();
        }
    }

    fn tok_hex_number(&mut self) {
        let pos = self.mark();
        self.advance(2); // 0x
        while self.peek(0).is_some_and(|b| b.is_ascii_hexdigit()) {
            self.advance(1);
        }

        if self.peek(0).map(|b| b.to_ascii_uppercase()) == Some(b'P') {
            self.tok_hex_float(pos);
        } else {
            self.parse_integer(pos, 16);
        }
    }

    /// Hex floats: `0x<mantissa>p<signed decimal exponent>`, value
    /// `mantissa * 2^exponent`.
    fn tok_hex_float(&mut self, start: Position) {
        let src = Rc::clone(&self.src);
        let mantissa_text = &src.contents()[(start.index + 2) as usize..self.idx as usize];
        let mantissa = u64::from_str_radix(mantissa_text, 16).unwrap_or(u64::MAX);

        self.advance(1); // p
        let mut negative = false;
        if let Some(sign @ (b'+' | b'-')) = self.peek(0) {
            negative = sign == b'-';
            self.advance(1);
        }
        if !self.peek(0).is_some_and(|b| b.is_ascii_digit()) {
            self.log
                .error(self.range_from(start), "exponent has no digits");
            return;
        }
        let exp_start = self.idx;
        self.eat_digits();
        let exponent: i32 = src.contents()[exp_start as usize..self.idx as usize]
            .parse::<i64>()
            .unwrap_or(i64::from(i32::MAX))
            .clamp(0, i64::from(i32::MAX)) as i32;

        let signed_exp = if negative { -exponent } else { exponent };
        let value = mantissa as f64 * 2f64.powi(signed_exp);
        if value.is_infinite() {
            self.log
                .error(self.range_from(start), "number too large to parse");
        }
        self.add_value(
            TokenKind::Float,
            start,
            self.idx,
            TokenValue::Float(if value.is_finite() { value } else { 0.0 }),
        );
    }

    fn tok_binary_number(&mut self) {
        let pos = self.mark();
        self.advance(2); // 0b
        while matches!(self.peek(0), Some(b'0') | Some(b'1')) {
            self.advance(1);
        }

        if let Some(junk) = self.peek(0).filter(|b| b.is_ascii_digit()) {
            let junk_pos = self.mark();
            self.eat_digits();
            self.log.error(
                self.range_from(junk_pos),
                format!("invalid digit in a binary number '{}'", junk as char),
            );
        } else {
            self.parse_integer(pos, 2);
        }
    }

    fn tok_octal_number(&mut self) {
        let pos = self.mark();
        while self.peek(0).is_some_and(is_oct) {
            self.advance(1);
        }

        if let Some(junk) = self.peek(0).filter(|b| b.is_ascii_digit()) {
            // An 8 or 9 after octal digits: this may still be the integer
            // part of a float.
            self.eat_digits();
            match self.peek(0) {
                Some(b'.') | Some(b'e') | Some(b'E') => self.tok_floating_point(pos),
                _ => self.log.error(
                    self.range_from(pos),
                    format!("'{}' is not a valid octal digit", junk as char),
                ),
            }
        } else {
            self.parse_integer(pos, 8);
        }
    }

    fn tok_decimal_number(&mut self) {
        let pos = self.mark();
        self.eat_digits();
        match self.peek(0).map(|b| b.to_ascii_uppercase()) {
            Some(b'.') | Some(b'E') => self.tok_floating_point(pos),
            _ => self.parse_integer(pos, 10),
        }
    }

    /// The float tail: the current byte is `.`, `e` or `E`; the integer
    /// part (possibly empty) has been consumed starting at `start`.
    fn tok_floating_point(&mut self, start: Position) {
        let mut c = self.peek(0).map(|b| b.to_ascii_uppercase());
        if c == Some(b'.') {
            self.advance(1);
            self.eat_digits();
            c = self.peek(0).map(|b| b.to_ascii_uppercase());
        }
        if c == Some(b'E') {
            self.advance(1);
            if matches!(self.peek(0), Some(b'+') | Some(b'-')) {
                self.advance(1);
            }
            if !self.peek(0).is_some_and(|b| b.is_ascii_digit()) {
                self.log
                    .error(self.range_from(start), "exponent has no digits");
                return;
            }
            self.eat_digits();
        }

        let src = Rc::clone(&self.src);
        let text = &src.contents()[start.index as usize..self.idx as usize];
        let value = text.parse::<f64>().unwrap_or(0.0);
        if value.is_infinite() {
            self.log
                .error(self.range_from(start), "number too large to parse");
        }
        self.add_value(
            TokenKind::Float,
            start,
            self.idx,
            TokenValue::Float(if value.is_finite() { value } else { 0.0 }),
        );
    }

    fn parse_integer(&mut self, start: Position, base: u32) {
        let src = Rc::clone(&self.src);
        let skip = if base == 16 || base == 2 { 2 } else { 0 };
        let text = &src.contents()[(start.index + skip) as usize..self.idx as usize];

        let value = match u64::from_str_radix(text, base) {
            Ok(value) => value,
            Err(_) => {
                self.log
                    .error(self.range_from(start), "number too large to parse");
                0
            }
        };
        self.add_value(TokenKind::Integer, start, self.idx, TokenValue::Int(value));
    }

    // === Identifiers and keywords ===

    fn tok_identifier(&mut self) {
        let pos = self.mark();
        while self
            .peek(0)
            .is_some_and(|b| b == b'_' || b == b'$' || b.is_ascii_alphanumeric())
        {
            self.advance(1);
        }

        let src = Rc::clone(&self.src);
        let text = &src.contents()[pos.index as usize..self.idx as usize];
        match TokenKind::keyword(text) {
            Some(kind) => {
                let value = match kind {
                    TokenKind::True => TokenValue::Bool(true),
                    TokenKind::False => TokenValue::Bool(false),
                    _ => TokenValue::None,
                };
                self.add_value(kind, pos, self.idx, value);
            }
            None => self.add(TokenKind::Identifier, pos, self.idx),
        }
    }

    // === Comments ===

    fn tok_comment(&mut self) {
        let pos = self.mark();
        self.advance(1); // the leading '/'
        let multiline = self.peek(0) == Some(b'*');
        let mut depth: u32 = 1;
        self.advance(1);

        while let Some(c) = self.peek(0) {
            self.advance(1);
            if c == b'\n' && !multiline {
                break;
            }
            let cc = self.peek(0);
            if c == b'*' && cc == Some(b'/') {
                self.advance(1);
                depth -= 1;
                if depth == 0 {
                    break;
                }
            }
            if c == b'/' && cc == Some(b'*') {
                depth += 1;
            }
        }

        if multiline && depth != 0 {
            self.log
                .error(self.range_from(pos), "unterminated multiline comment");
            self.failed = true;
        } else if !self.flags.contains(NodeFlags::LEXER_SKIP_COMMENTS) {
            self.add_value(
                TokenKind::Comment,
                pos,
                self.idx,
                TokenValue::Bool(multiline),
            );
        }
    }
}
