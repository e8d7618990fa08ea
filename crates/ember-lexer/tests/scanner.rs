use ember_lexer::{tokenize, tokenize_with, Scanner, ScannerOptions, Token, TokenKind};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

/// Jetons hors `Eof` final.
fn significant(src: &str) -> Vec<Token<'_>> {
    let mut toks = tokenize(src);
    assert_eq!(toks.pop().map(|t| t.kind), Some(TokenKind::Eof));
    toks
}

#[test]
fn decimal_number_spans_whole_input() {
    let toks = significant("123.45");
    assert_eq!(toks.len(), 1);
    assert_eq!(toks[0].kind, TokenKind::Number);
    assert_eq!(toks[0].lexeme, "123.45");
    assert_eq!(toks[0].span.len(), 6);
}

#[test]
fn string_literal_keeps_quotes() {
    let toks = significant("\"hello\"");
    assert_eq!(toks.len(), 1);
    assert_eq!(toks[0].kind, TokenKind::String);
    assert_eq!(toks[0].lexeme, "\"hello\"");
}

#[test]
fn unterminated_string_is_an_error_token() {
    let toks = significant("\"unterminated");
    assert_eq!(toks.len(), 1);
    assert_eq!(toks[0].kind, TokenKind::Error);
    assert_eq!(toks[0].lexeme, "unterminated string");
}

#[test]
fn keyword_needs_exact_length() {
    assert_eq!(significant("for")[0].kind, TokenKind::For);
    assert_eq!(significant("fore")[0].kind, TokenKind::Identifier);
}

#[test]
fn comment_then_number_on_line_two() {
    let toks = significant("// comment\n123");
    assert_eq!(toks.len(), 1);
    assert_eq!(toks[0].kind, TokenKind::Number);
    assert_eq!(toks[0].lexeme, "123");
    assert_eq!(toks[0].line, 2);
}

#[test]
fn one_and_two_character_operators() {
    for (src, kind) in [
        ("!=", TokenKind::BangEqual),
        ("!", TokenKind::Bang),
        ("==", TokenKind::EqualEqual),
        ("=", TokenKind::Equal),
        ("<=", TokenKind::LessEqual),
        ("<", TokenKind::Less),
        (">=", TokenKind::GreaterEqual),
        (">", TokenKind::Greater),
    ] {
        let toks = significant(src);
        assert_eq!(toks.len(), 1, "{src}");
        assert_eq!(toks[0].kind, kind, "{src}");
        assert_eq!(toks[0].lexeme, src);
    }
}

#[test]
fn eof_is_idempotent() {
    let mut sc = Scanner::new("x");
    assert_eq!(sc.next_token().kind, TokenKind::Identifier);
    let offset = sc.offset();
    for _ in 0..5 {
        let t = sc.next_token();
        assert_eq!(t.kind, TokenKind::Eof);
        assert_eq!(t.lexeme, "");
        assert_eq!(sc.offset(), offset);
    }
}

#[test]
fn empty_and_blank_sources() {
    assert!(significant("").is_empty());
    assert!(significant(" \t\r\n\n// only a comment").is_empty());
    let eof = tokenize("\n\n").pop().unwrap();
    assert_eq!(eof.line, 3);
}

#[test]
fn fun_keyword_option() {
    let default = tokenize("fun");
    assert_eq!(default[0].kind, TokenKind::For);
    let flagged = tokenize_with("fun", ScannerOptions { distinct_fun: true });
    assert_eq!(flagged[0].kind, TokenKind::Fun);
}

#[test]
fn small_program() {
    use TokenKind::*;
    let src = "\
class Point {
  init(x) { this.x = x; }
}
var p = Point(1.5);
if (p.x >= 1 and !nil) print \"ok\"; // fini
";
    let got: Vec<(TokenKind, u32)> = significant(src).iter().map(|t| (t.kind, t.line)).collect();
    let expected = vec![
        (Class, 1), (Identifier, 1), (LeftBrace, 1),
        (Identifier, 2), (LeftParen, 2), (Identifier, 2), (RightParen, 2), (LeftBrace, 2),
        (This, 2), (Dot, 2), (Identifier, 2), (Equal, 2), (Identifier, 2), (Semicolon, 2),
        (RightBrace, 2),
        (RightBrace, 3),
        (Var, 4), (Identifier, 4), (Equal, 4), (Identifier, 4), (LeftParen, 4), (Number, 4),
        (RightParen, 4), (Semicolon, 4),
        (If, 5), (LeftParen, 5), (Identifier, 5), (Dot, 5), (Identifier, 5), (GreaterEqual, 5),
        (Number, 5), (And, 5), (Bang, 5), (Nil, 5), (RightParen, 5), (Print, 5), (String, 5),
        (Semicolon, 5),
    ];
    assert_eq!(got, expected);
}

proptest! {
    // Entrée arbitraire : pas de panique, le curseur avance, un seul Eof final.
    #[test]
    fn any_input_terminates(src in "\\PC{0,200}") {
        let toks = tokenize(&src);
        prop_assert!(toks.len() <= src.len() + 1);
        prop_assert!(toks.last().is_some_and(Token::is_eof));
        let mut prev_end = 0;
        let mut prev_line = 1;
        for t in &toks {
            prop_assert!(t.span.start.index() >= prev_end);
            prop_assert!(t.line >= prev_line || t.is_error());
            prev_end = t.span.end.index();
            prev_line = t.line;
            if !t.is_error() {
                prop_assert_eq!(&src[t.span.range()], t.lexeme);
            }
        }
    }

    #[test]
    fn identifiers_round_trip(name in "[a-z_][a-z0-9_]{0,12}") {
        let toks = tokenize(&name);
        prop_assert_eq!(toks.len(), 2);
        prop_assert_eq!(toks[0].lexeme, name.as_str());
        prop_assert!(toks[0].kind == TokenKind::Identifier || toks[0].kind.is_keyword());
    }
}
