//! Diagnostic reporting with source locations
//!
//! Syntax errors are ordinary Rust errors rendered through miette. Errors
//! raised while *evaluating* a form are not here: they are values
//! (see [`crate::interp::EvalError`]).

use crate::common::Span;
use miette::{Diagnostic, NamedSource, SourceSpan};
use std::sync::Arc;
use thiserror::Error;

/// Source text for error reporting
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub name: String,
    pub content: Arc<str>,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: Arc::from(content.into()),
        }
    }

    pub fn to_named_source(&self) -> NamedSource<String> {
        NamedSource::new(self.name.clone(), self.content.to_string())
    }
}

/// Convert our Span to miette's SourceSpan
impl From<Span> for SourceSpan {
    fn from(span: Span) -> Self {
        SourceSpan::new(span.start.into(), span.len())
    }
}

/// Name used for sources that did not come from a file
pub const STDIN: &str = "<stdin>";

/// Lexing and parsing failure
#[derive(Error, Debug, Diagnostic, Clone)]
pub enum SyntaxError {
    #[error("Unexpected character `{found}`")]
    #[diagnostic(
        code(lex::unexpected_char),
        help("symbols may contain letters, digits and `_+-*/\\=<>!&^%`")
    )]
    UnexpectedChar {
        found: String,
        #[label("not valid here")]
        span: SourceSpan,
        #[source_code]
        src: NamedSource<String>,
    },

    #[error("Unexpected token: expected {expected}, found `{found}`")]
    #[diagnostic(code(parse::unexpected_token))]
    UnexpectedToken {
        expected: String,
        found: String,
        #[label("unexpected token here")]
        span: SourceSpan,
        #[source_code]
        src: NamedSource<String>,
    },

    #[error("Unclosed `{open}`")]
    #[diagnostic(code(parse::unclosed_delimiter), help("add a matching `{close}`"))]
    UnclosedDelimiter {
        open: String,
        close: String,
        #[label("opened here")]
        open_span: SourceSpan,
        #[label("input ends here")]
        end_span: SourceSpan,
        #[source_code]
        src: NamedSource<String>,
    },

    #[error("Unexpected end of input")]
    #[diagnostic(code(parse::unexpected_eof), help("expected an expression"))]
    UnexpectedEof {
        #[label("expected more tokens")]
        span: SourceSpan,
        #[source_code]
        src: NamedSource<String>,
    },

    #[error("Only one expression is allowed per line")]
    #[diagnostic(code(parse::trailing_input))]
    TrailingInput {
        #[label("extra input starts here")]
        span: SourceSpan,
        #[source_code]
        src: NamedSource<String>,
    },
}

impl SyntaxError {
    /// Short code, used by tests and log events
    pub fn kind(&self) -> &'static str {
        match self {
            SyntaxError::UnexpectedChar { .. } => "unexpected_char",
            SyntaxError::UnexpectedToken { .. } => "unexpected_token",
            SyntaxError::UnclosedDelimiter { .. } => "unclosed_delimiter",
            SyntaxError::UnexpectedEof { .. } => "unexpected_eof",
            SyntaxError::TrailingInput { .. } => "trailing_input",
        }
    }
}

/// Render a diagnostic the way the CLI prints it
pub fn render(error: SyntaxError) -> String {
    format!("{:?}", miette::Report::new(error))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_conversion() {
        let span: SourceSpan = Span::new(3, 7).into();
        assert_eq!(span.offset(), 3);
        assert_eq!(span.len(), 4);
    }

    #[test]
    fn test_error_message() {
        let src = SourceFile::new(STDIN, "(+ 1 $)");
        let err = SyntaxError::UnexpectedChar {
            found: "$".to_string(),
            span: Span::new(5, 6).into(),
            src: src.to_named_source(),
        };
        assert_eq!(err.to_string(), "Unexpected character `$`");
        assert_eq!(err.kind(), "unexpected_char");
    }
}
