//! gLenISP: a small Lisp interpreter
//!
//! A tree-walking interpreter for a Lisp dialect with integers, booleans,
//! symbols, quoted lists (Q-expressions), builtins and curried, variadic
//! lambdas.
//!
//! # Architecture
//!
//! ```text
//! Source → Lexer → Parser → ParseNode → Reader → Value → Evaluator → Value
//! ```
//!
//! Evaluation never fails with a Rust error: every failure is a
//! [`interp::Value::Error`] that propagates through the enclosing expression.
//!
//! # Example
//!
//! ```
//! let interp = glenisp::interp::Interpreter::new();
//! interp.eval_line("(def {add} (\\ {a b} {+ a b}))").unwrap();
//! let v = interp.eval_line("((add 1) 2)").unwrap();
//! assert_eq!(v.to_string(), "3");
//! ```

pub mod common;
pub mod config;
pub mod diagnostics;
pub mod interp;
pub mod lexer;
pub mod parser;
pub mod repl;

// Re-export diagnostics for convenience
pub use diagnostics::{SourceFile, SyntaxError};

// Re-exports for convenience
pub use interp::{Interpreter, Value};
pub use parser::ParseNode;

/// Interpreter version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Parse one line of source into its parse tree
pub fn parse(source: &str) -> Result<ParseNode, SyntaxError> {
    let tokens = lexer::lex(source)?;
    parser::parse(&tokens, source)
}

/// Evaluate one line of source in a fresh interpreter
pub fn interpret(source: &str) -> Result<Value, SyntaxError> {
    Interpreter::new().eval_line(source)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_interpret() {
        assert_eq!(interpret("(+ 1 2 3)").unwrap(), Value::Number(6));
    }
}
