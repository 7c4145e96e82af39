//! Tree-walking evaluator

use std::rc::Rc;

use crate::diagnostics::SyntaxError;
use crate::lexer;
use crate::parser;

use super::builtins;
use super::env::{Env, Environment};
use super::error::EvalError;
use super::read::read;
use super::value::{Function, Lambda, VARIADIC, Value};

/// Reduce a value to normal form in `env`
pub fn eval(env: &Env, value: Value) -> Value {
    match value {
        Value::Symbol(name) => {
            tracing::trace!(%name, "lookup");
            let found = env.borrow().get(&name);
            found.unwrap_or_else(Value::Error)
        }
        Value::Sexp(items) => eval_sexp(env, items),
        other => other,
    }
}

/// Evaluate the items of an S-expression and apply the head to the rest
pub fn eval_sexp(env: &Env, items: Vec<Value>) -> Value {
    let mut items: Vec<Value> = items.into_iter().map(|item| eval(env, item)).collect();

    if let Some(pos) = items.iter().position(Value::is_error) {
        return items.swap_remove(pos);
    }

    if items.is_empty() {
        return Value::Sexp(items);
    }

    // A lone non-function is the value of the whole expression: `(x)` is x
    if items.len() == 1 && !matches!(items[0], Value::Function(_)) {
        return items.swap_remove(0);
    }

    let head = items.remove(0);
    match head {
        Value::Function(func) => apply(env, func, items),
        other => Value::Error(EvalError::NotCallable(other.type_name())),
    }
}

/// Apply a function to already-evaluated arguments
pub fn apply(env: &Env, func: Function, args: Vec<Value>) -> Value {
    match func {
        Function::Builtin { name, op } => {
            tracing::debug!(builtin = %name, argc = args.len(), "apply");
            op(env, args)
        }
        Function::Lambda(lambda) => call_lambda(env, lambda, args),
    }
}

fn call_lambda(env: &Env, mut lambda: Lambda, args: Vec<Value>) -> Value {
    let given = args.len();
    let total = lambda.params.len();
    tracing::debug!(given, total, "apply lambda");

    let mut params = std::mem::take(&mut lambda.params).into_iter();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        let Some(param) = params.next() else {
            return Value::Error(EvalError::TooManyArguments {
                got: given,
                expected: total,
            });
        };

        if param == VARIADIC {
            let Some(rest) = params.next() else {
                return Value::Error(EvalError::MalformedVariadic);
            };
            let mut collected = vec![arg];
            collected.extend(args.by_ref());
            lambda.env.put(&rest, Value::Qexp(collected));
            break;
        }

        lambda.env.put(&param, arg);
    }

    let mut remaining: Vec<String> = params.collect();

    // A variadic tail with nothing left to collect binds an empty list
    if remaining.first().map(String::as_str) == Some(VARIADIC) {
        if remaining.len() != 2 {
            return Value::Error(EvalError::MalformedVariadic);
        }
        let rest = remaining.remove(1);
        lambda.env.put(&rest, Value::qexp());
        remaining.clear();
    }

    if !remaining.is_empty() {
        // Partial application
        lambda.params = remaining;
        return Value::lambda(lambda);
    }

    let Lambda {
        env: mut frame,
        body,
        ..
    } = lambda;
    frame.set_parent(Rc::clone(env));
    eval_sexp(&frame.into_env(), body)
}

/// Owns the root frame and drives the lex → parse → read → eval pipeline
pub struct Interpreter {
    env: Env,
}

impl Interpreter {
    /// Create an interpreter whose root frame holds every builtin
    pub fn new() -> Self {
        let mut root = Environment::new();
        builtins::register(&mut root);
        Interpreter {
            env: root.into_env(),
        }
    }

    /// The root frame
    pub fn env(&self) -> &Env {
        &self.env
    }

    /// Evaluate a value against the root frame
    pub fn eval(&self, value: Value) -> Value {
        eval(&self.env, value)
    }

    /// Evaluate a single line of source text
    pub fn eval_line(&self, source: &str) -> Result<Value, SyntaxError> {
        let tokens = lexer::lex(source)?;
        let node = parser::parse(&tokens, source)?;
        Ok(self.eval(read(&node)))
    }

    /// Evaluate every form in `source` in order, returning each result
    pub fn eval_program(&self, source: &str) -> Result<Vec<Value>, SyntaxError> {
        let tokens = lexer::lex(source)?;
        let forms = parser::parse_program(&tokens, source)?;
        Ok(forms.iter().map(|node| self.eval(read(node))).collect())
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(interp: &Interpreter, source: &str) -> Value {
        interp.eval_line(source).unwrap()
    }

    #[test]
    fn test_empty_sexp_self_evaluates() {
        let interp = Interpreter::new();
        assert_eq!(run(&interp, "()"), Value::sexp());
    }

    #[test]
    fn test_first_error_wins() {
        let interp = Interpreter::new();
        let v = run(&interp, "(+ nope (/ 1 0))");
        assert_eq!(
            v.as_error(),
            Some(&EvalError::UnboundSymbol("nope".to_string()))
        );
    }

    #[test]
    fn test_not_callable() {
        let interp = Interpreter::new();
        let v = run(&interp, "(1 2 3)");
        assert_eq!(v.as_error(), Some(&EvalError::NotCallable("Number")));
    }

    #[test]
    fn test_single_item_sexp() {
        let interp = Interpreter::new();
        assert_eq!(run(&interp, "((+ 1 2))"), Value::Number(3));
        assert_eq!(run(&interp, "({a})").to_string(), "{a}");
        // A lone function is called with no arguments
        assert_eq!(
            run(&interp, "(+)").as_error(),
            Some(&EvalError::NoArguments("+".to_string()))
        );
    }

    #[test]
    fn test_lambda_sees_call_site_frame() {
        let interp = Interpreter::new();
        run(&interp, "(def {f} (\\ {} {id y}))");
        run(&interp, "(def {g} (\\ {y} {f}))");
        // `y` in f resolves through g's frame because f is called from it
        assert_eq!(run(&interp, "(g 5)"), Value::Number(5));
    }
}
