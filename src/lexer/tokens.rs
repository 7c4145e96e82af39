//! Token definitions for the gLenISP lexer

use crate::common::Span;
use logos::Logos;
use serde::{Deserialize, Serialize};

/// A token with its kind, span, and text
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    pub text: String,
}

/// Token kinds recognized by the lexer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Logos, Serialize, Deserialize)]
#[logos(skip r"[ \t\r\n\f]+")]
#[logos(skip r";[^\n]*")]
pub enum TokenKind {
    // Literals
    #[regex(r"-?[0-9]+", priority = 3)]
    Number,
    #[token("#t")]
    #[token("#f")]
    Boolean,
    #[regex(r"[a-zA-Z0-9_+\-*/\\=<>!&\^%]+", priority = 2)]
    Symbol,

    // Delimiters
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,

    // Special
    Eof,
}

impl TokenKind {
    /// Check if this token opens a group
    pub fn is_open(&self) -> bool {
        matches!(self, TokenKind::LParen | TokenKind::LBrace)
    }

    /// Check if this token closes a group
    pub fn is_close(&self) -> bool {
        matches!(self, TokenKind::RParen | TokenKind::RBrace)
    }

    /// Check if this token is a self-contained literal
    pub fn is_atom(&self) -> bool {
        matches!(
            self,
            TokenKind::Number | TokenKind::Boolean | TokenKind::Symbol
        )
    }

    /// The delimiter closing a group opened by this token
    pub fn closing(&self) -> Option<TokenKind> {
        match self {
            TokenKind::LParen => Some(TokenKind::RParen),
            TokenKind::LBrace => Some(TokenKind::RBrace),
            _ => None,
        }
    }

    /// Get the string representation of the token
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Number => "<number>",
            TokenKind::Boolean => "<boolean>",
            TokenKind::Symbol => "<symbol>",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::Eof => "<eof>",
        }
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
