//! Lexer for gLenISP source text

mod tokens;

pub use tokens::{Token, TokenKind};

use logos::Logos;

use crate::common::Span;
use crate::diagnostics::{STDIN, SourceFile, SyntaxError};

/// Lex source text into tokens, terminated by a single `Eof`
pub fn lex(source: &str) -> Result<Vec<Token>, SyntaxError> {
    lex_named(STDIN, source)
}

/// Like [`lex`], reporting errors against the given source name
pub fn lex_named(name: &str, source: &str) -> Result<Vec<Token>, SyntaxError> {
    let mut tokens = Vec::new();
    let mut lexer = TokenKind::lexer(source);

    while let Some(result) = lexer.next() {
        let span = Span::from(lexer.span());
        match result {
            Ok(kind) => tokens.push(Token {
                kind,
                span,
                text: lexer.slice().to_string(),
            }),
            Err(()) => {
                return Err(SyntaxError::UnexpectedChar {
                    found: lexer.slice().to_string(),
                    span: span.into(),
                    src: SourceFile::new(name, source).to_named_source(),
                });
            }
        }
    }

    tokens.push(Token {
        kind: TokenKind::Eof,
        span: Span::point(source.len()),
        text: String::new(),
    });

    tracing::trace!("lexed {} tokens", tokens.len());
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        lex(source).unwrap().into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_number_beats_symbol() {
        assert_eq!(kinds("42"), vec![TokenKind::Number, TokenKind::Eof]);
        assert_eq!(kinds("-7"), vec![TokenKind::Number, TokenKind::Eof]);
    }

    #[test]
    fn test_lone_minus_is_symbol() {
        assert_eq!(kinds("-"), vec![TokenKind::Symbol, TokenKind::Eof]);
    }

    #[test]
    fn test_comment_skipped() {
        assert_eq!(
            kinds("(+ 1 2) ; trailing words"),
            vec![
                TokenKind::LParen,
                TokenKind::Symbol,
                TokenKind::Number,
                TokenKind::Number,
                TokenKind::RParen,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_eof_span_at_end() {
        let tokens = lex("abc ").unwrap();
        assert_eq!(tokens.last().unwrap().span, Span::point(4));
    }
}
