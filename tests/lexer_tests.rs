//! Lexer tests

use glenisp::lexer::{TokenKind, lex};

fn kinds(source: &str) -> Vec<TokenKind> {
    lex(source).unwrap().into_iter().map(|t| t.kind).collect()
}

#[test]
fn test_lex_empty() {
    let tokens = lex("").unwrap();
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::Eof);
}

#[test]
fn test_lex_whitespace() {
    let tokens = lex("   \t\n  ").unwrap();
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::Eof);
}

#[test]
fn test_lex_sexp() {
    let tokens = lex("(+ 1 -2)").unwrap();
    assert_eq!(tokens[0].kind, TokenKind::LParen);
    assert_eq!(tokens[1].kind, TokenKind::Symbol);
    assert_eq!(tokens[1].text, "+");
    assert_eq!(tokens[2].kind, TokenKind::Number);
    assert_eq!(tokens[2].text, "1");
    assert_eq!(tokens[3].kind, TokenKind::Number);
    assert_eq!(tokens[3].text, "-2");
    assert_eq!(tokens[4].kind, TokenKind::RParen);
    assert_eq!(tokens[5].kind, TokenKind::Eof);
}

#[test]
fn test_lex_qexp() {
    assert_eq!(
        kinds("{a b}"),
        vec![
            TokenKind::LBrace,
            TokenKind::Symbol,
            TokenKind::Symbol,
            TokenKind::RBrace,
            TokenKind::Eof
        ]
    );
}

#[test]
fn test_lex_booleans() {
    let tokens = lex("#t #f").unwrap();
    assert_eq!(tokens[0].kind, TokenKind::Boolean);
    assert_eq!(tokens[0].text, "#t");
    assert_eq!(tokens[1].kind, TokenKind::Boolean);
    assert_eq!(tokens[1].text, "#f");
}

#[test]
fn test_lex_operator_symbols() {
    let source = "+ - * / % ^ < <= > >= = != ! \\ & min_max";
    let tokens = lex(source).unwrap();
    let texts: Vec<&str> = tokens
        .iter()
        .filter(|t| t.kind == TokenKind::Symbol)
        .map(|t| t.text.as_str())
        .collect();
    assert_eq!(
        texts,
        vec![
            "+", "-", "*", "/", "%", "^", "<", "<=", ">", ">=", "=", "!=", "!", "\\", "&",
            "min_max"
        ]
    );
}

#[test]
fn test_lex_digits_then_letters_is_symbol() {
    let tokens = lex("2x").unwrap();
    assert_eq!(tokens[0].kind, TokenKind::Symbol);
    assert_eq!(tokens[0].text, "2x");
}

#[test]
fn test_lex_comments() {
    assert_eq!(
        kinds("; a comment\n42 ; trailing"),
        vec![TokenKind::Number, TokenKind::Eof]
    );
}

#[test]
fn test_lex_spans() {
    let tokens = lex("(head xs)").unwrap();
    assert_eq!(tokens[1].span.start, 1);
    assert_eq!(tokens[1].span.end, 5);
    assert_eq!(tokens[2].span.start, 6);
    assert_eq!(tokens.last().unwrap().span.start, 9);
}

#[test]
fn test_lex_unexpected_char() {
    let err = lex("(+ 1 \"two\")").unwrap_err();
    assert_eq!(err.kind(), "unexpected_char");
}

#[test]
fn test_lex_unknown_hash_form() {
    assert!(lex("#x").is_err());
}
