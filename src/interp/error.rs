//! Evaluation errors
//!
//! These never unwind: an `EvalError` is wrapped in [`Value::Error`] and
//! flows through evaluation like any other value.
//!
//! [`Value::Error`]: super::Value::Error

use thiserror::Error;

/// Reason a form failed to evaluate
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    #[error("Unbound symbol '{0}'")]
    UnboundSymbol(String),

    #[error("Unknown number {0}")]
    BadNumber(String),

    #[error("Unexpected node: {0}")]
    MalformedNode(String),

    #[error("Wrong arg count for '{func}'. Got {got}, expected {expected}")]
    WrongArgCount {
        func: String,
        got: usize,
        expected: usize,
    },

    #[error("Wrong type for arg {index} in '{func}'. Got {got}, expected {expected}")]
    WrongArgType {
        func: String,
        index: usize,
        got: &'static str,
        expected: &'static str,
    },

    #[error("'{func}' expects arg {index} to be a non-empty qexp")]
    NonEmptyQexpRequired { func: String, index: usize },

    #[error("Division by 0")]
    DivisionByZero,

    #[error("'{0}' needs at least one argument")]
    NoArguments(String),

    #[error("Unknown operator {0}")]
    UnknownOperator(String),

    #[error("Expected sexp to begin with Function, got {0}")]
    NotCallable(&'static str),

    #[error("Cannot redefine builtin function '{0}'")]
    RedefineBuiltin(String),

    #[error("Function passed too many arguments. Got {got}, expected {expected}")]
    TooManyArguments { got: usize, expected: usize },

    #[error("Function format invalid. Symbol '&' not followed by single symbol")]
    MalformedVariadic,
}

impl EvalError {
    pub fn wrong_count(func: &str, got: usize, expected: usize) -> Self {
        EvalError::WrongArgCount {
            func: func.to_string(),
            got,
            expected,
        }
    }

    pub fn wrong_type(func: &str, index: usize, got: &'static str, expected: &'static str) -> Self {
        EvalError::WrongArgType {
            func: func.to_string(),
            index,
            got,
            expected,
        }
    }

    pub fn non_empty(func: &str, index: usize) -> Self {
        EvalError::NonEmptyQexpRequired {
            func: func.to_string(),
            index,
        }
    }
}
