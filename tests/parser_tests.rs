//! Parser tests

use glenisp::lexer::lex;
use glenisp::parser::{
    ANCHOR_TAG, BOOLEAN_TAG, CHAR_TAG, NUMBER_TAG, ParseNode, QEXP_TAG, ROOT_TAG, SEXP_TAG,
    SYMBOL_TAG, parse, parse_program,
};
use pretty_assertions::assert_eq;

fn parse_str(source: &str) -> ParseNode {
    let tokens = lex(source).unwrap();
    parse(&tokens, source).unwrap()
}

fn parse_err(source: &str) -> &'static str {
    let tokens = lex(source).unwrap();
    parse(&tokens, source).unwrap_err().kind()
}

#[test]
fn test_parse_atom_root() {
    let root = parse_str("42");
    assert_eq!(root.tag, ROOT_TAG);
    assert!(root.is_root());
    assert_eq!(root.children.len(), 3);
    assert_eq!(root.children[0].tag, ANCHOR_TAG);
    assert_eq!(root.children[1], ParseNode::leaf(NUMBER_TAG, "42"));
    assert_eq!(root.children[2].tag, ANCHOR_TAG);
}

#[test]
fn test_parse_atom_kinds() {
    assert_eq!(parse_str("#t").children[1].tag, BOOLEAN_TAG);
    assert_eq!(parse_str("head").children[1].tag, SYMBOL_TAG);
    assert_eq!(parse_str("-7").children[1].tag, NUMBER_TAG);
}

#[test]
fn test_parse_sexp() {
    let root = parse_str("(+ 1 2)");
    let sexp = &root.children[1];
    assert_eq!(sexp.tag, SEXP_TAG);
    assert_eq!(sexp.contents, "");
    assert_eq!(
        sexp.children,
        vec![
            ParseNode::leaf(CHAR_TAG, "("),
            ParseNode::leaf(SYMBOL_TAG, "+"),
            ParseNode::leaf(NUMBER_TAG, "1"),
            ParseNode::leaf(NUMBER_TAG, "2"),
            ParseNode::leaf(CHAR_TAG, ")"),
        ]
    );
}

#[test]
fn test_parse_nested() {
    let root = parse_str("(def {x} (list 1 {2}))");
    let sexp = &root.children[1];
    assert_eq!(sexp.children[2].tag, QEXP_TAG);
    let inner = &sexp.children[3];
    assert_eq!(inner.tag, SEXP_TAG);
    assert_eq!(inner.children[3].tag, QEXP_TAG);
    // root, 2 anchors, outer sexp (2 brackets, def, qexp (2 brackets, x),
    // inner sexp (2 brackets, list, 1, qexp (2 brackets, 2)))
    assert_eq!(root.node_count(), 20);
}

#[test]
fn test_parse_empty_groups() {
    let root = parse_str("()");
    assert_eq!(root.children[1].tag, SEXP_TAG);
    assert_eq!(root.children[1].children.len(), 2);

    let root = parse_str("{}");
    assert_eq!(root.children[1].tag, QEXP_TAG);
    assert_eq!(root.children[1].children.len(), 2);
}

#[test]
fn test_parse_tree_display() {
    let root = parse_str("(x)");
    assert_eq!(
        root.to_string(),
        "> \n  regex ''\n  expr|sexp|> \n    char '('\n    expr|symbol|regex 'x'\n    char ')'\n  regex ''\n"
    );
}

#[test]
fn test_parse_errors() {
    assert_eq!(parse_err("(+ 1 2"), "unclosed_delimiter");
    assert_eq!(parse_err("{1 (2}"), "unexpected_token");
    assert_eq!(parse_err(")"), "unexpected_token");
    assert_eq!(parse_err(""), "unexpected_eof");
    assert_eq!(parse_err("1 2"), "trailing_input");
}

#[test]
fn test_parse_program() {
    let source = "(def {x} 1)\n; comment\n(+ x 1)\n#t";
    let tokens = lex(source).unwrap();
    let forms = parse_program(&tokens, source).unwrap();
    assert_eq!(forms.len(), 3);
    assert!(forms.iter().all(ParseNode::is_root));
    assert_eq!(forms[2].children[1].tag, BOOLEAN_TAG);
}

#[test]
fn test_parse_program_empty() {
    let tokens = lex("").unwrap();
    assert!(parse_program(&tokens, "").unwrap().is_empty());
}

#[test]
fn test_parse_program_unclosed() {
    let source = "(+ 1 2)\n(head {1 2}";
    let tokens = lex(source).unwrap();
    let err = parse_program(&tokens, source).unwrap_err();
    assert_eq!(err.kind(), "unclosed_delimiter");
}
