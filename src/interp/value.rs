//! Runtime values for the interpreter

use std::fmt;

use super::env::{Env, Environment};
use super::error::EvalError;

/// Native operation behind a builtin. It receives the calling frame and
/// owns the already-evaluated arguments.
pub type BuiltinFn = fn(&Env, Vec<Value>) -> Value;

/// Parameter marking a variadic rest parameter
pub const VARIADIC: &str = "&";

/// Runtime value
///
/// Values are never shared: cloning is a deep copy, and every value stored
/// into an environment or captured by a lambda is such a copy.
#[derive(Clone)]
pub enum Value {
    /// Failed evaluation, propagated instead of being evaluated further
    Error(EvalError),
    /// 64-bit signed integer
    Number(i64),
    /// Unresolved identifier
    Symbol(String),
    /// Boolean, written `#t` / `#f`
    Boolean(bool),
    /// Builtin or lambda
    Function(Function),
    /// Expression to be evaluated
    Sexp(Vec<Value>),
    /// Quoted list, never evaluated implicitly
    Qexp(Vec<Value>),
}

/// Callable value
#[derive(Clone)]
pub enum Function {
    Builtin { name: String, op: BuiltinFn },
    Lambda(Lambda),
}

/// User-defined function
#[derive(Clone)]
pub struct Lambda {
    /// Private frame receiving the bound arguments
    pub env: Environment,
    /// Parameter symbols still to be bound, possibly ending in `& rest`
    pub params: Vec<String>,
    /// Unevaluated body
    pub body: Vec<Value>,
}

impl Lambda {
    /// Build a lambda from a parameter list and a body, checking that every
    /// parameter is a symbol and that `&` is followed by exactly one symbol.
    pub fn new(params: Vec<Value>, body: Vec<Value>) -> Result<Self, EvalError> {
        let mut names = Vec::with_capacity(params.len());
        for (index, param) in params.into_iter().enumerate() {
            match param {
                Value::Symbol(name) => names.push(name),
                other => {
                    return Err(EvalError::wrong_type(
                        "\\",
                        index,
                        other.type_name(),
                        "Symbol",
                    ));
                }
            }
        }

        if let Some(pos) = names.iter().position(|n| n == VARIADIC) {
            let rest = &names[pos + 1..];
            if rest.len() != 1 || rest[0] == VARIADIC {
                return Err(EvalError::MalformedVariadic);
            }
        }

        Ok(Lambda {
            env: Environment::new(),
            params: names,
            body,
        })
    }
}

impl Value {
    pub fn sexp() -> Self {
        Value::Sexp(Vec::new())
    }

    pub fn qexp() -> Self {
        Value::Qexp(Vec::new())
    }

    pub fn builtin(name: &str, op: BuiltinFn) -> Self {
        Value::Function(Function::Builtin {
            name: name.to_string(),
            op,
        })
    }

    pub fn lambda(lambda: Lambda) -> Self {
        Value::Function(Function::Lambda(lambda))
    }

    /// Get the type name of this value
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Error(_) => "Error",
            Value::Number(_) => "Number",
            Value::Symbol(_) => "Symbol",
            Value::Boolean(_) => "Boolean",
            Value::Function(_) => "Function",
            Value::Sexp(_) => "Sexp",
            Value::Qexp(_) => "Qexp",
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Value::Error(_))
    }

    pub fn is_builtin(&self) -> bool {
        matches!(self, Value::Function(Function::Builtin { .. }))
    }

    /// Try to get as integer
    pub fn as_number(&self) -> Option<i64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Try to get as bool
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to get the error carried by this value
    pub fn as_error(&self) -> Option<&EvalError> {
        match self {
            Value::Error(e) => Some(e),
            _ => None,
        }
    }

    /// Items of a Sexp or Qexp
    pub fn items(&self) -> Option<&[Value]> {
        match self {
            Value::Sexp(items) | Value::Qexp(items) => Some(items),
            _ => None,
        }
    }
}

impl From<EvalError> for Value {
    fn from(error: EvalError) -> Self {
        Value::Error(error)
    }
}

fn write_seq(f: &mut fmt::Formatter<'_>, open: char, items: &[Value], close: char) -> fmt::Result {
    write!(f, "{}", open)?;
    for (i, v) in items.iter().enumerate() {
        if i > 0 {
            write!(f, " ")?;
        }
        write!(f, "{}", v)?;
    }
    write!(f, "{}", close)
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Error(e) => write!(f, "Error: {}", e),
            Value::Number(n) => write!(f, "{}", n),
            Value::Symbol(s) => write!(f, "{}", s),
            Value::Boolean(true) => write!(f, "#t"),
            Value::Boolean(false) => write!(f, "#f"),
            Value::Function(func) => write!(f, "{}", func),
            Value::Sexp(items) => write_seq(f, '(', items, ')'),
            Value::Qexp(items) => write_seq(f, '{', items, '}'),
        }
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Function::Builtin { name, .. } => write!(f, "<fn {}>", name),
            Function::Lambda(lambda) => {
                write!(f, "(\\ {{{}}} ", lambda.params.join(" "))?;
                write_seq(f, '{', &lambda.body, '}')?;
                write!(f, ")")
            }
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Error(e) => write!(f, "Error({:?})", e),
            Value::Symbol(s) => write!(f, "Symbol({})", s),
            Value::Sexp(items) => f.debug_tuple("Sexp").field(items).finish(),
            Value::Qexp(items) => f.debug_tuple("Qexp").field(items).finish(),
            other => write!(f, "{}", other),
        }
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Symbol(a), Value::Symbol(b)) => a == b,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Function(a), Value::Function(b)) => a == b,
            (Value::Sexp(a), Value::Sexp(b)) => a == b,
            (Value::Qexp(a), Value::Qexp(b)) => a == b,
            // Errors are never equal, not even to themselves
            _ => false,
        }
    }
}

impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Function::Builtin { op: a, .. }, Function::Builtin { op: b, .. }) => {
                std::ptr::fn_addr_eq(*a, *b)
            }
            (Function::Lambda(a), Function::Lambda(b)) => {
                a.params == b.params && a.body == b.body
            }
            _ => false,
        }
    }
}
