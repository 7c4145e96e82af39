//! Parser for gLenISP
//!
//! A recursive descent parser that turns a token stream into a generic
//! labeled tree. The grammar is
//!
//! ```text
//! number  : /-?[0-9]+/ ;
//! boolean : "#t" | "#f" ;
//! symbol  : /[a-zA-Z0-9_+\-*\/\\=<>!&^%]+/ ;
//! sexp    : '(' <expr>* ')' ;
//! qexp    : '{' <expr>* '}' ;
//! expr    : <number> | <boolean> | <symbol> | <sexp> | <qexp> ;
//! program : /^/ <expr> /$/ ;
//! ```

mod node;

pub use node::{
    ANCHOR_TAG, BOOLEAN_TAG, CHAR_TAG, NUMBER_TAG, ParseNode, QEXP_TAG, ROOT_TAG, SEXP_TAG,
    SYMBOL_TAG,
};

use crate::diagnostics::{STDIN, SourceFile, SyntaxError};
use crate::lexer::{Token, TokenKind};

/// Parse exactly one form (one REPL line)
pub fn parse(tokens: &[Token], source: &str) -> Result<ParseNode, SyntaxError> {
    let mut parser = Parser::new(tokens, SourceFile::new(STDIN, source));
    parser.parse_line()
}

/// Parse every form in a file, each wrapped in its own root node
pub fn parse_program(tokens: &[Token], source: &str) -> Result<Vec<ParseNode>, SyntaxError> {
    parse_program_named(STDIN, tokens, source)
}

/// Like [`parse_program`], reporting errors against the given source name
pub fn parse_program_named(
    name: &str,
    tokens: &[Token],
    source: &str,
) -> Result<Vec<ParseNode>, SyntaxError> {
    let mut parser = Parser::new(tokens, SourceFile::new(name, source));
    parser.parse_program()
}

/// Parser state
struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    source: SourceFile,
    /// Synthetic end token used when the stream is missing its `Eof`
    eof: Token,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token], source: SourceFile) -> Self {
        let end = source.content.len();
        Self {
            tokens,
            pos: 0,
            eof: Token {
                kind: TokenKind::Eof,
                span: crate::common::Span::point(end),
                text: String::new(),
            },
            source,
        }
    }

    fn current(&self) -> &Token {
        self.tokens.get(self.pos).unwrap_or(&self.eof)
    }

    fn peek(&self) -> TokenKind {
        self.current().kind
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.peek() == kind
    }

    fn advance(&mut self) -> Token {
        let tok = self.current().clone();
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        tok
    }

    fn unexpected(&self, expected: &str) -> SyntaxError {
        let tok = self.current();
        if tok.kind == TokenKind::Eof {
            return SyntaxError::UnexpectedEof {
                span: tok.span.into(),
                src: self.source.to_named_source(),
            };
        }
        SyntaxError::UnexpectedToken {
            expected: expected.to_string(),
            found: tok.text.clone(),
            span: tok.span.into(),
            src: self.source.to_named_source(),
        }
    }

    // ==================== PROGRAM ====================

    fn parse_line(&mut self) -> Result<ParseNode, SyntaxError> {
        let form = self.parse_expr()?;
        if !self.at(TokenKind::Eof) {
            return Err(SyntaxError::TrailingInput {
                span: self.current().span.into(),
                src: self.source.to_named_source(),
            });
        }
        Ok(ParseNode::root(form))
    }

    fn parse_program(&mut self) -> Result<Vec<ParseNode>, SyntaxError> {
        let mut forms = Vec::new();
        while !self.at(TokenKind::Eof) {
            forms.push(ParseNode::root(self.parse_expr()?));
        }
        Ok(forms)
    }

    // ==================== EXPRESSIONS ====================

    fn parse_expr(&mut self) -> Result<ParseNode, SyntaxError> {
        match self.peek() {
            TokenKind::Number => Ok(ParseNode::leaf(NUMBER_TAG, self.advance().text)),
            TokenKind::Boolean => Ok(ParseNode::leaf(BOOLEAN_TAG, self.advance().text)),
            TokenKind::Symbol => Ok(ParseNode::leaf(SYMBOL_TAG, self.advance().text)),
            TokenKind::LParen => self.parse_group(SEXP_TAG),
            TokenKind::LBrace => self.parse_group(QEXP_TAG),
            _ => Err(self.unexpected("an expression")),
        }
    }

    fn parse_group(&mut self, tag: &str) -> Result<ParseNode, SyntaxError> {
        let open = self.advance();
        let close = open.kind.closing().unwrap_or(TokenKind::RParen);

        let mut children = vec![ParseNode::leaf(CHAR_TAG, open.text.clone())];
        loop {
            let kind = self.peek();
            if kind == close {
                break;
            }
            if kind == TokenKind::Eof {
                return Err(SyntaxError::UnclosedDelimiter {
                    open: open.text,
                    close: close.as_str().to_string(),
                    open_span: open.span.into(),
                    end_span: self.current().span.into(),
                    src: self.source.to_named_source(),
                });
            }
            if kind.is_close() {
                return Err(self.unexpected(&format!("`{}`", close)));
            }
            children.push(self.parse_expr()?);
        }

        let end = self.advance();
        children.push(ParseNode::leaf(CHAR_TAG, end.text));
        Ok(ParseNode::branch(tag, children))
    }
}
