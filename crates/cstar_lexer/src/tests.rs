//! Lexer test suite.

use cstar_source::{Log, NodeFlags, Source};

use crate::lexer::Lexer;
use crate::token::{Token, TokenKind};

fn lex(source: &str) -> (Vec<Token>, Log) {
    let mut log = Log::new();
    let src = Source::new("test.cstr", source);
    let mut lexer = Lexer::new(&mut log, src, NodeFlags::NONE);
    lexer.tokenize();
    (lexer.into_tokens(), log)
}

/// Tokenize and return kinds, excluding the trailing Eof.
fn kinds(source: &str) -> Vec<TokenKind> {
    let (tokens, log) = lex(source);
    assert!(
        !log.has_errors(),
        "unexpected errors: {:?}",
        log.diagnostics()
    );
    tokens
        .into_iter()
        .map(|t| t.kind)
        .filter(|k| *k != TokenKind::Eof)
        .collect()
}

/// Tokenize a single-token source and return it.
fn single(source: &str) -> Token {
    let (tokens, log) = lex(source);
    assert!(
        !log.has_errors(),
        "unexpected errors: {:?}",
        log.diagnostics()
    );
    assert_eq!(tokens.len(), 2, "expected one token plus Eof: {tokens:?}");
    tokens.into_iter().next().unwrap()
}

fn error_messages(source: &str) -> Vec<String> {
    let (_, log) = lex(source);
    log.diagnostics()
        .iter()
        .map(|d| d.message.clone())
        .collect()
}

// ========================================================
// Empty and trivial inputs
// ========================================================

#[test]
fn empty_source_is_one_eof() {
    let (tokens, log) = lex("");
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::Eof);
    assert!(log.diagnostics().is_empty());
}

#[test]
fn whitespace_only_is_one_eof() {
    let (tokens, _) = lex("  \t\n  \r\n ");
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::Eof);
}

#[test]
fn every_stream_ends_with_exactly_one_eof() {
    for source in ["", "mut x;", "1 + 2", "@!", "\"unterminated"] {
        let (tokens, _) = lex(source);
        let eofs = tokens.iter().filter(|t| t.kind == TokenKind::Eof).count();
        assert_eq!(eofs, 1, "source: {source:?}");
        assert_eq!(tokens.last().unwrap().kind, TokenKind::Eof);
    }
}

// ========================================================
// Punctuators
// ========================================================

#[test]
fn maximal_munch_punctuators() {
    use TokenKind::*;
    assert_eq!(
        kinds("= == & && &= | || |= ^ ^= ~ ~= < <= << <<= <- > >= >> >>= ->"),
        vec![
            Assign, Equal, BitAnd, LAnd, BitAndAssign, BitOr, LOr, BitOrAssign, BitXor,
            BitXorAssign, Complement, CompAssign, Lt, Lte, Shl, ShlAssign, LArrow, Gt, Gte, Shr,
            ShrAssign, RArrow,
        ]
    );
}

#[test]
fn arithmetic_punctuators() {
    use TokenKind::*;
    assert_eq!(
        kinds("+ ++ += - -- -= * ** *= / /= % %= ! !="),
        vec![
            Plus, PlusPlus, PlusAssign, Minus, MinusMinus, MinusAssign, Mult, Exponent, MultAssign,
            Div, DivAssign, Mod, ModAssign, Not, Neq,
        ]
    );
}

#[test]
fn dots_colons_questions() {
    use TokenKind::*;
    assert_eq!(
        kinds(". .. ... : :: ? ?? ; , @ # `"),
        vec![
            Dot, DotDot, Elipsis, Colon, DColon, Question, QuestionQuestion, Semicolon, Comma, At,
            Hash, BackQuote,
        ]
    );
}

#[test]
fn brackets() {
    use TokenKind::*;
    assert_eq!(
        kinds("{ } [ ] ( )"),
        vec![LBrace, RBrace, LBracket, RBracket, LParen, RParen]
    );
}

#[test]
fn token_ranges_round_trip_lexemes() {
    let (tokens, _) = lex("mut counter = value + 41;");
    let texts: Vec<&str> = tokens
        .iter()
        .filter(|t| t.kind != TokenKind::Eof)
        .map(|t| t.range.text())
        .collect();
    assert_eq!(texts, ["mut", "counter", "=", "value", "+", "41", ";"]);
}

#[test]
fn token_ranges_are_ordered_and_bounded() {
    let (tokens, _) = lex("func main() { return 42; }");
    for token in &tokens {
        assert!(token.range.start <= token.range.end);
        assert!(token.range.end <= 26);
    }
    for pair in tokens.windows(2) {
        assert!(pair[0].range.start <= pair[1].range.start);
    }
}

// ========================================================
// Keywords and identifiers
// ========================================================

#[test]
fn keywords_resolve() {
    use TokenKind::*;
    assert_eq!(
        kinds("func imm mut if else while for return struct union auto void null true false"),
        vec![
            Func, Imm, Mut, If, Else, While, For, Return, Struct, Union, Auto, Void, Nil, True,
            False,
        ]
    );
}

#[test]
fn and_or_alias_to_logical_operators() {
    assert_eq!(kinds("a and b or c"), vec![
        TokenKind::Identifier,
        TokenKind::LAnd,
        TokenKind::Identifier,
        TokenKind::LOr,
        TokenKind::Identifier,
    ]);
}

#[test]
fn builtin_keywords_resolve_and_render_with_at() {
    use TokenKind::*;
    assert_eq!(kinds("line column file arg opaque"), vec![
        Line, Column, FileExpr, ArgExpr, Opaque
    ]);
    assert_eq!(Line.lexeme(), "@line");
    assert_eq!(Opaque.lexeme(), "@opaque");
}

#[test]
fn keyword_prefix_is_identifier() {
    assert_eq!(kinds("formula"), vec![TokenKind::Identifier]);
    assert_eq!(kinds("iffy"), vec![TokenKind::Identifier]);
    assert_eq!(kinds("mutable"), vec![TokenKind::Identifier]);
}

#[test]
fn identifiers_allow_underscore_and_dollar() {
    let (tokens, _) = lex("_x x$1 money$ _");
    let texts: Vec<&str> = tokens[..tokens.len() - 1]
        .iter()
        .map(|t| t.range.text())
        .collect();
    assert_eq!(texts, ["_x", "x$1", "money$", "_"]);
}

#[test]
fn true_false_carry_values() {
    assert_eq!(single("true").value.as_bool(), Some(true));
    assert_eq!(single("false").value.as_bool(), Some(false));
}

#[test]
fn f_alone_is_an_identifier() {
    let token = single("f");
    assert_eq!(token.kind, TokenKind::Identifier);
    assert_eq!(token.range.text(), "f");
}

// ========================================================
// Integer literals
// ========================================================

#[test]
fn decimal_integers() {
    assert_eq!(single("0").value.as_int(), Some(0));
    assert_eq!(single("42").value.as_int(), Some(42));
    assert_eq!(single("1234567890").value.as_int(), Some(1234567890));
}

#[test]
fn hex_integers() {
    let token = single("0xDEAD");
    assert_eq!(token.kind, TokenKind::Integer);
    assert_eq!(token.value.as_int(), Some(57005));
    assert_eq!(single("0Xff").value.as_int(), Some(255));
}

#[test]
fn binary_integers() {
    let token = single("0b1010");
    assert_eq!(token.kind, TokenKind::Integer);
    assert_eq!(token.value.as_int(), Some(10));
    assert_eq!(single("0B11").value.as_int(), Some(3));
}

#[test]
fn octal_integers() {
    let token = single("0777");
    assert_eq!(token.kind, TokenKind::Integer);
    assert_eq!(token.value.as_int(), Some(511));
    assert_eq!(single("0").value.as_int(), Some(0));
}

#[test]
fn invalid_binary_digit_is_reported() {
    let messages = error_messages("0b102");
    assert_eq!(messages, ["invalid digit in a binary number '2'"]);
}

#[test]
fn invalid_octal_digit_is_reported() {
    let messages = error_messages("089");
    assert_eq!(messages, ["'8' is not a valid octal digit"]);
}

#[test]
fn integer_overflow_is_reported_with_default_value() {
    let (tokens, log) = lex("99999999999999999999999999");
    assert!(log.has_errors());
    assert_eq!(tokens[0].kind, TokenKind::Integer);
    assert_eq!(tokens[0].value.as_int(), Some(0));
}

// ========================================================
// Float literals
// ========================================================

#[test]
fn simple_floats() {
    assert_eq!(single("1.5").value.as_float(), Some(1.5));
    assert_eq!(single("0.25").value.as_float(), Some(0.25));
    assert_eq!(single(".5").value.as_float(), Some(0.5));
}

#[test]
fn floats_with_exponents() {
    assert_eq!(single("0.5e-3").value.as_float(), Some(0.0005));
    assert_eq!(single("1e3").value.as_float(), Some(1000.0));
    assert_eq!(single("2.5E+2").value.as_float(), Some(250.0));
    assert_eq!(single("0e0").value.as_float(), Some(0.0));
}

#[test]
fn octal_looking_float_reroutes() {
    assert_eq!(single("08.5").value.as_float(), Some(8.5));
    assert_eq!(single("09e1").value.as_float(), Some(90.0));
}

#[test]
fn hex_float_with_binary_exponent() {
    // 0x10p2 = 16 * 2^2
    assert_eq!(single("0x10p2").value.as_float(), Some(64.0));
    assert_eq!(single("0x1P-1").value.as_float(), Some(0.5));
}

#[test]
fn empty_exponent_is_reported() {
    let messages = error_messages("1e+;");
    assert_eq!(messages, ["exponent has no digits"]);
}

// ========================================================
// Character literals
// ========================================================

#[test]
fn plain_characters() {
    assert_eq!(single("'a'").value.as_char(), Some('a' as u32));
    assert_eq!(single("'0'").value.as_char(), Some('0' as u32));
    assert_eq!(single("' '").value.as_char(), Some(' ' as u32));
}

#[test]
fn escaped_characters() {
    assert_eq!(single(r"'\''").value.as_char(), Some(0x27));
    assert_eq!(single(r"'\n'").value.as_char(), Some(0x0A));
    assert_eq!(single(r"'\t'").value.as_char(), Some(0x09));
    assert_eq!(single(r"'\\'").value.as_char(), Some(0x5C));
    assert_eq!(single(r"'\0'").value.as_char(), Some(0));
    // The non-standard ESC escape.
    assert_eq!(single(r"'\e'").value.as_char(), Some(0x1B));
}

#[test]
fn hex_and_octal_escapes() {
    assert_eq!(single(r"'\x41'").value.as_char(), Some(0x41));
    assert_eq!(single(r"'\xFF'").value.as_char(), Some(0xFF));
    assert_eq!(single(r"'\101'").value.as_char(), Some(0o101));
    assert_eq!(single(r"'\7'").value.as_char(), Some(7));
}

#[test]
fn universal_character_escapes() {
    assert_eq!(single(r"'\u00E9'").value.as_char(), Some(0xE9));
    assert_eq!(single(r"'\U0001F389'").value.as_char(), Some(0x1F389));
    assert_eq!(single(r"'é'").value.as_char(), Some(0xE9));
}

#[test]
fn utf8_character_literal() {
    assert_eq!(single("'é'").value.as_char(), Some(0xE9));
    assert_eq!(single("'🎉'").value.as_char(), Some(0x1F389));
}

#[test]
fn unterminated_character_is_reported() {
    let messages = error_messages("'a");
    assert_eq!(messages, ["unterminated character sequence"]);
}

#[test]
fn surrogate_universal_char_is_reported() {
    let messages = error_messages(r"'\uD800'");
    assert!(messages.contains(&"invalid universal character".to_string()));
}

// ========================================================
// String literals
// ========================================================

#[test]
fn plain_string() {
    let token = single(r#""hello""#);
    assert_eq!(token.kind, TokenKind::String);
    assert_eq!(token.value.as_str(), Some("hello"));
}

#[test]
fn empty_string() {
    assert_eq!(single(r#""""#).value.as_str(), Some(""));
}

#[test]
fn string_escapes() {
    assert_eq!(single(r#""a\tb\nc""#).value.as_str(), Some("a\tb\nc"));
    assert_eq!(single(r#""say \"hi\"""#).value.as_str(), Some("say \"hi\""));
    assert_eq!(single(r#""back\\slash""#).value.as_str(), Some("back\\slash"));
}

#[test]
fn string_unicode_escapes_encode_utf8() {
    assert_eq!(single(r#""café""#).value.as_str(), Some("café"));
    assert_eq!(single(r#""\U0001F389""#).value.as_str(), Some("🎉"));
}

#[test]
fn string_escape_beyond_scalar_range_is_reported() {
    // 0x110000 is past the last Unicode scalar value; the escape is
    // rejected rather than encoded.
    let messages = error_messages(r#""\U00110000""#);
    assert_eq!(messages, ["invalid UCS character: \\U00110000"]);
}

#[test]
fn string_values_are_interned() {
    let a = single(r#""shared text""#).value.as_str().unwrap();
    let b = single(r#""shared text""#).value.as_str().unwrap();
    assert!(std::ptr::eq(a.as_ptr(), b.as_ptr()));
}

#[test]
fn unterminated_string_at_newline() {
    let messages = error_messages("\"oops\nmut x;");
    assert!(messages.contains(&"unterminated string literal".to_string()));
}

#[test]
fn unterminated_string_at_eof() {
    let messages = error_messages("\"oops");
    assert_eq!(messages, ["unterminated string literal"]);
}

// ========================================================
// Interpolated strings
// ========================================================

#[test]
fn interpolated_string_tokens() {
    use TokenKind::*;
    let (tokens, log) = lex(r#"f"x = ${x}!""#);
    assert!(!log.has_errors(), "{:?}", log.diagnostics());
    let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
    assert_eq!(kinds, vec![LStrExpr, String, Identifier, String, RStrExpr, Eof]);
    assert_eq!(tokens[1].value.as_str(), Some("x = "));
    assert_eq!(tokens[3].value.as_str(), Some("!"));
}

#[test]
fn interpolation_with_empty_tail() {
    use TokenKind::*;
    let (tokens, log) = lex(r#"f"v: ${value}""#);
    assert!(!log.has_errors());
    let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
    // No empty tail string is emitted before the terminator.
    assert_eq!(kinds, vec![LStrExpr, String, Identifier, RStrExpr, Eof]);
}

#[test]
fn interpolation_with_multiple_parts() {
    use TokenKind::*;
    let (tokens, log) = lex(r#"f"${a} + ${b} = ${c}""#);
    assert!(!log.has_errors());
    let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            LStrExpr, String, Identifier, String, Identifier, String, Identifier, RStrExpr, Eof,
        ]
    );
}

#[test]
fn interpolated_expression_tokens_flow_through() {
    use TokenKind::*;
    let (tokens, log) = lex(r#"f"${1 + 2}""#);
    assert!(!log.has_errors());
    let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![LStrExpr, String, Integer, Plus, Integer, RStrExpr, Eof]
    );
}

// ========================================================
// Comments
// ========================================================

#[test]
fn line_comment_token() {
    let (tokens, log) = lex("// a comment\nmut");
    assert!(!log.has_errors());
    assert_eq!(tokens[0].kind, TokenKind::Comment);
    assert_eq!(tokens[0].value.as_bool(), Some(false));
    assert_eq!(tokens[1].kind, TokenKind::Mut);
}

#[test]
fn line_comment_at_eof_without_newline() {
    let (tokens, log) = lex("// trailing");
    assert!(!log.has_errors());
    assert_eq!(tokens[0].kind, TokenKind::Comment);
    assert_eq!(tokens[1].kind, TokenKind::Eof);
}

#[test]
fn multiline_comment_token() {
    let (tokens, log) = lex("/* one\ntwo */ mut");
    assert!(!log.has_errors());
    assert_eq!(tokens[0].kind, TokenKind::Comment);
    assert_eq!(tokens[0].value.as_bool(), Some(true));
    assert_eq!(tokens[1].kind, TokenKind::Mut);
}

#[test]
fn nested_multiline_comment() {
    let (tokens, log) = lex("/* /* inner */ */ imm");
    assert!(!log.has_errors(), "{:?}", log.diagnostics());
    assert_eq!(tokens[0].kind, TokenKind::Comment);
    assert_eq!(tokens[1].kind, TokenKind::Imm);
}

#[test]
fn unterminated_multiline_comment_is_reported() {
    let messages = error_messages("/* never closed");
    assert_eq!(messages, ["unterminated multiline comment"]);
}

#[test]
fn skip_comments_flag_discards_them() {
    let mut log = Log::new();
    let src = Source::new("test.cstr", "// gone\nmut /* also gone */ x;");
    let mut lexer = Lexer::new(&mut log, src, NodeFlags::LEXER_SKIP_COMMENTS);
    assert!(lexer.tokenize());
    let kinds: Vec<TokenKind> = lexer.tokens().iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Mut,
            TokenKind::Identifier,
            TokenKind::Semicolon,
            TokenKind::Eof,
        ]
    );
}

// ========================================================
// Errors and positions
// ========================================================

#[test]
fn unknown_byte_is_reported_and_skipped() {
    let (tokens, log) = lex("mut \u{1}\u{1} x;");
    assert!(log.has_errors());
    let messages: Vec<&str> = log.diagnostics().iter().map(|d| d.message.as_str()).collect();
    assert_eq!(messages, ["unknown token", "unknown token"]);
    // Scanning continued past the junk.
    assert!(tokens.iter().any(|t| t.kind == TokenKind::Semicolon));
}

#[test]
fn tokenize_returns_false_on_unknown_byte() {
    let mut log = Log::new();
    let src = Source::new("test.cstr", "\u{1}");
    let mut lexer = Lexer::new(&mut log, src, NodeFlags::NONE);
    assert!(!lexer.tokenize());
}

#[test]
fn line_and_column_tracking() {
    let (tokens, _) = lex("one\n  two");
    assert_eq!(tokens[0].range.position.line, 0);
    assert_eq!(tokens[0].range.position.column, 0);
    assert_eq!(tokens[1].range.position.line, 1);
    assert_eq!(tokens[1].range.position.column, 2);
}

#[test]
fn diagnostic_positions_are_one_based_when_rendered() {
    let (_, log) = lex("\n\n  \u{1}");
    let text = format!("{}", log.diagnostics()[0]);
    assert!(text.starts_with("test.cstr:3:3: error: unknown token"), "{text}");
}

// ========================================================
// Token display and predicates
// ========================================================

#[test]
fn token_display_forms() {
    assert_eq!(format!("{}", single("42")), "<integer: 42>");
    assert_eq!(format!("{}", single("id")), "<ident: id>");
    assert_eq!(format!("{}", single("+")), "'+'");
    assert_eq!(format!("{}", single("while")), "while");
}

#[test]
fn kind_predicates() {
    assert!(TokenKind::While.is_keyword());
    assert!(TokenKind::Alignof.is_keyword());
    assert!(TokenKind::Void.is_keyword());
    assert!(!TokenKind::Identifier.is_keyword());
    assert!(!TokenKind::Line.is_keyword());

    assert!(TokenKind::Plus.is_binary_operator());
    assert!(TokenKind::ShlAssign.is_binary_operator());
    assert!(!TokenKind::Question.is_binary_operator());
    assert!(TokenKind::Question.is_ternary_operator());

    assert!(TokenKind::PlusPlus.is_unary_operator());
    assert!(TokenKind::LAnd.is_logical_operator());
    assert!(TokenKind::Integer.is_comptime_literal());
    assert!(TokenKind::Func.is_statement_boundary());
    assert!(!TokenKind::Mut.is_statement_boundary());
}

#[test]
fn lexeme_stripping() {
    assert_eq!(TokenKind::Plus.lexeme(), "'+'");
    assert_eq!(TokenKind::Plus.lexeme_stripped(), "+");
    assert_eq!(TokenKind::Shl.lexeme_stripped(), "<<");
    assert_eq!(TokenKind::While.lexeme_stripped(), "while");
}

// ========================================================
// Larger round trips
// ========================================================

#[test]
fn lex_function_declaration() {
    use TokenKind::*;
    assert_eq!(
        kinds("func main() -> 42;"),
        vec![Func, Identifier, LParen, RParen, RArrow, Integer, Semicolon]
    );
}

#[test]
fn lex_variable_declaration() {
    use TokenKind::*;
    assert_eq!(
        kinds("mut x: i32 = 1 + 2 * 3;"),
        vec![
            Mut, Identifier, Colon, Identifier, Assign, Integer, Plus, Integer, Mult, Integer,
            Semicolon,
        ]
    );
}

#[test]
fn non_comment_bytes_survive_with_skip_flag() {
    let source = "imm limit /*note*/ = 10; // tail";
    let mut log = Log::new();
    let src = Source::new("test.cstr", source);
    let mut lexer = Lexer::new(&mut log, src, NodeFlags::LEXER_SKIP_COMMENTS);
    assert!(lexer.tokenize());
    let rendered: Vec<&str> = lexer
        .tokens()
        .iter()
        .filter(|t| t.kind != TokenKind::Eof)
        .map(|t| t.range.text())
        .collect();
    assert_eq!(rendered, ["imm", "limit", "=", "10", ";"]);
}
