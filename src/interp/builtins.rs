//! Builtin library
//!
//! Every builtin takes the calling frame and owns its evaluated arguments.
//! Failures come back as [`Value::Error`].

use super::env::{Env, Environment, define_global, root};
use super::error::EvalError;
use super::eval::{eval, eval_sexp};
use super::value::{BuiltinFn, Lambda, Value};

/// Name and native operation of every builtin, in registration order
pub const BUILTINS: &[(&str, BuiltinFn)] = &[
    // Arithmetic
    ("+", builtin_add),
    ("-", builtin_sub),
    ("*", builtin_mul),
    ("/", builtin_div),
    ("%", builtin_mod),
    ("^", builtin_pow),
    ("min", builtin_min),
    ("max", builtin_max),
    // Comparison
    ("<", builtin_lt),
    ("<=", builtin_le),
    (">", builtin_gt),
    (">=", builtin_ge),
    ("=", builtin_eq),
    ("!=", builtin_ne),
    ("!", builtin_not),
    // Lists
    ("list", builtin_list),
    ("head", builtin_head),
    ("tail", builtin_tail),
    ("last", builtin_last),
    ("init", builtin_init),
    ("join", builtin_join),
    ("cons", builtin_cons),
    ("len", builtin_len),
    // Evaluation and control
    ("eval", builtin_eval),
    ("id", builtin_id),
    ("if", builtin_if),
    // Definitions
    ("def", builtin_def),
    ("\\", builtin_lambda),
    // Session
    ("env", builtin_env),
    ("exit", builtin_exit),
];

/// Bind every builtin in `env`
pub fn register(env: &mut Environment) {
    for (name, op) in BUILTINS {
        env.put(name, Value::builtin(name, *op));
    }
    tracing::debug!(count = BUILTINS.len(), "registered builtins");
}

/// Run a fallible builtin body, turning its error into an error value
fn checked(body: impl FnOnce() -> Result<Value, EvalError>) -> Value {
    body().unwrap_or_else(Value::Error)
}

fn expect_count(func: &str, args: &[Value], expected: usize) -> Result<(), EvalError> {
    if args.len() == expected {
        Ok(())
    } else {
        Err(EvalError::wrong_count(func, args.len(), expected))
    }
}

/// Take the list out of argument `index`, which must be a Qexp
fn take_qexp(func: &str, arg: Value, index: usize) -> Result<Vec<Value>, EvalError> {
    match arg {
        Value::Qexp(items) => Ok(items),
        other => Err(EvalError::wrong_type(func, index, other.type_name(), "Qexp")),
    }
}

/// Like [`take_qexp`], also rejecting the empty list
fn take_non_empty(func: &str, arg: Value, index: usize) -> Result<Vec<Value>, EvalError> {
    match arg {
        Value::Qexp(items) if !items.is_empty() => Ok(items),
        _ => Err(EvalError::non_empty(func, index)),
    }
}

/// The single argument of a one-argument builtin
fn single(func: &str, args: Vec<Value>) -> Result<Value, EvalError> {
    expect_count(func, &args, 1)?;
    let mut args = args.into_iter();
    args.next()
        .ok_or_else(|| EvalError::wrong_count(func, 0, 1))
}

fn take_numbers(func: &str, args: Vec<Value>) -> Result<Vec<i64>, EvalError> {
    args.into_iter()
        .enumerate()
        .map(|(i, arg)| match arg {
            Value::Number(n) => Ok(n),
            other => Err(EvalError::wrong_type(func, i, other.type_name(), "Number")),
        })
        .collect()
}

// ==================== ARITHMETIC ====================

fn arithmetic(op: &str, args: Vec<Value>) -> Result<Value, EvalError> {
    let numbers = take_numbers(op, args)?;
    let mut numbers = numbers.into_iter();
    let Some(first) = numbers.next() else {
        return Err(EvalError::NoArguments(op.to_string()));
    };

    if numbers.len() == 0 {
        return Ok(Value::Number(if op == "-" {
            first.wrapping_neg()
        } else {
            first
        }));
    }

    numbers
        .try_fold(first, |acc, n| binary(op, acc, n))
        .map(Value::Number)
}

fn binary(op: &str, a: i64, b: i64) -> Result<i64, EvalError> {
    match op {
        "+" => Ok(a.wrapping_add(b)),
        "-" => Ok(a.wrapping_sub(b)),
        "*" => Ok(a.wrapping_mul(b)),
        "^" => power(a, b),
        "min" => Ok(a.min(b)),
        "max" => Ok(a.max(b)),
        "/" if b == 0 => Err(EvalError::DivisionByZero),
        "/" => Ok(a.wrapping_div(b)),
        "%" if b == 0 => Err(EvalError::DivisionByZero),
        "%" => Ok(a.wrapping_rem(b)),
        _ => Err(EvalError::UnknownOperator(op.to_string())),
    }
}

/// Integer exponentiation; negative exponents truncate toward zero
fn power(base: i64, exp: i64) -> Result<i64, EvalError> {
    if exp < 0 {
        return match base {
            0 => Err(EvalError::DivisionByZero),
            1 => Ok(1),
            -1 if exp % 2 == 0 => Ok(1),
            -1 => Ok(-1),
            _ => Ok(0),
        };
    }

    let mut result: i64 = 1;
    let mut base = base;
    let mut exp = exp.unsigned_abs();
    while exp > 0 {
        if exp & 1 == 1 {
            result = result.wrapping_mul(base);
        }
        base = base.wrapping_mul(base);
        exp >>= 1;
    }
    Ok(result)
}

fn builtin_add(_env: &Env, args: Vec<Value>) -> Value {
    checked(|| arithmetic("+", args))
}

fn builtin_sub(_env: &Env, args: Vec<Value>) -> Value {
    checked(|| arithmetic("-", args))
}

fn builtin_mul(_env: &Env, args: Vec<Value>) -> Value {
    checked(|| arithmetic("*", args))
}

fn builtin_div(_env: &Env, args: Vec<Value>) -> Value {
    checked(|| arithmetic("/", args))
}

fn builtin_mod(_env: &Env, args: Vec<Value>) -> Value {
    checked(|| arithmetic("%", args))
}

fn builtin_pow(_env: &Env, args: Vec<Value>) -> Value {
    checked(|| arithmetic("^", args))
}

fn builtin_min(_env: &Env, args: Vec<Value>) -> Value {
    checked(|| arithmetic("min", args))
}

fn builtin_max(_env: &Env, args: Vec<Value>) -> Value {
    checked(|| arithmetic("max", args))
}

// ==================== COMPARISON ====================

/// Chained comparison: true iff every adjacent pair satisfies `op`
fn compare(op: &str, args: Vec<Value>) -> Result<Value, EvalError> {
    let holds = match op {
        "=" => args.windows(2).all(|pair| pair[0] == pair[1]),
        "!=" => args.windows(2).all(|pair| pair[0] != pair[1]),
        _ => {
            let numbers = take_numbers(op, args)?;
            let mut holds = true;
            for pair in numbers.windows(2) {
                let (a, b) = (pair[0], pair[1]);
                let ok = match op {
                    "<" => a < b,
                    "<=" => a <= b,
                    ">" => a > b,
                    ">=" => a >= b,
                    _ => return Err(EvalError::UnknownOperator(op.to_string())),
                };
                if !ok {
                    holds = false;
                    break;
                }
            }
            holds
        }
    };
    Ok(Value::Boolean(holds))
}

fn builtin_lt(_env: &Env, args: Vec<Value>) -> Value {
    checked(|| compare("<", args))
}

fn builtin_le(_env: &Env, args: Vec<Value>) -> Value {
    checked(|| compare("<=", args))
}

fn builtin_gt(_env: &Env, args: Vec<Value>) -> Value {
    checked(|| compare(">", args))
}

fn builtin_ge(_env: &Env, args: Vec<Value>) -> Value {
    checked(|| compare(">=", args))
}

fn builtin_eq(_env: &Env, args: Vec<Value>) -> Value {
    checked(|| compare("=", args))
}

fn builtin_ne(_env: &Env, args: Vec<Value>) -> Value {
    checked(|| compare("!=", args))
}

fn builtin_not(_env: &Env, args: Vec<Value>) -> Value {
    checked(|| match single("!", args)? {
        Value::Boolean(b) => Ok(Value::Boolean(!b)),
        other => Err(EvalError::wrong_type("!", 0, other.type_name(), "Boolean")),
    })
}

// ==================== LISTS ====================

fn builtin_list(_env: &Env, args: Vec<Value>) -> Value {
    Value::Qexp(args)
}

fn builtin_head(_env: &Env, args: Vec<Value>) -> Value {
    checked(|| {
        let mut items = take_non_empty("head", single("head", args)?, 0)?;
        items.truncate(1);
        Ok(Value::Qexp(items))
    })
}

fn builtin_last(_env: &Env, args: Vec<Value>) -> Value {
    checked(|| {
        let mut items = take_non_empty("last", single("last", args)?, 0)?;
        let last = items.split_off(items.len() - 1);
        Ok(Value::Qexp(last))
    })
}

fn builtin_tail(_env: &Env, args: Vec<Value>) -> Value {
    checked(|| {
        let mut items = take_non_empty("tail", single("tail", args)?, 0)?;
        items.remove(0);
        Ok(Value::Qexp(items))
    })
}

fn builtin_init(_env: &Env, args: Vec<Value>) -> Value {
    checked(|| {
        let mut items = take_non_empty("init", single("init", args)?, 0)?;
        items.pop();
        Ok(Value::Qexp(items))
    })
}

fn builtin_join(_env: &Env, args: Vec<Value>) -> Value {
    checked(|| {
        if args.is_empty() {
            return Err(EvalError::NoArguments("join".to_string()));
        }
        let mut joined = Vec::new();
        for (i, arg) in args.into_iter().enumerate() {
            joined.extend(take_qexp("join", arg, i)?);
        }
        Ok(Value::Qexp(joined))
    })
}

fn builtin_cons(_env: &Env, args: Vec<Value>) -> Value {
    checked(|| {
        expect_count("cons", &args, 2)?;
        let mut args = args.into_iter();
        let (Some(first), Some(list)) = (args.next(), args.next()) else {
            return Err(EvalError::wrong_count("cons", 0, 2));
        };
        let list = take_qexp("cons", list, 1)?;
        let mut items = Vec::with_capacity(list.len() + 1);
        items.push(first);
        items.extend(list);
        Ok(Value::Qexp(items))
    })
}

fn builtin_len(_env: &Env, args: Vec<Value>) -> Value {
    checked(|| {
        let items = take_qexp("len", single("len", args)?, 0)?;
        let len = i64::try_from(items.len()).unwrap_or(i64::MAX);
        Ok(Value::Number(len))
    })
}

// ==================== EVALUATION AND CONTROL ====================

fn builtin_eval(env: &Env, args: Vec<Value>) -> Value {
    checked(|| {
        let items = take_qexp("eval", single("eval", args)?, 0)?;
        Ok(eval_sexp(env, items))
    })
}

fn builtin_id(env: &Env, args: Vec<Value>) -> Value {
    checked(|| Ok(eval(env, single("id", args)?)))
}

fn builtin_if(env: &Env, args: Vec<Value>) -> Value {
    checked(|| {
        expect_count("if", &args, 3)?;
        let mut args = args.into_iter();
        let (Some(cond), Some(then), Some(otherwise)) = (args.next(), args.next(), args.next())
        else {
            return Err(EvalError::wrong_count("if", 0, 3));
        };

        let cond = match cond {
            Value::Boolean(b) => b,
            other => return Err(EvalError::wrong_type("if", 0, other.type_name(), "Boolean")),
        };
        let then = take_qexp("if", then, 1)?;
        let otherwise = take_qexp("if", otherwise, 2)?;

        // Only the chosen branch is ever evaluated
        let branch = if cond { then } else { otherwise };
        Ok(eval_sexp(env, branch))
    })
}

// ==================== DEFINITIONS ====================

fn builtin_def(env: &Env, args: Vec<Value>) -> Value {
    checked(|| {
        let mut args = args.into_iter();
        let Some(targets) = args.next() else {
            return Err(EvalError::NoArguments("def".to_string()));
        };
        let targets = take_qexp("def", targets, 0)?;

        let mut names = Vec::with_capacity(targets.len());
        for (i, target) in targets.into_iter().enumerate() {
            match target {
                Value::Symbol(name) => names.push(name),
                other => return Err(EvalError::wrong_type("def", i, other.type_name(), "Symbol")),
            }
        }

        let values: Vec<Value> = args.collect();
        if names.len() != values.len() {
            return Err(EvalError::wrong_count("def", values.len(), names.len()));
        }

        let root = root(env);
        for name in &names {
            let existing = root.borrow().get(name);
            if existing.is_ok_and(|v| v.is_builtin()) {
                return Err(EvalError::RedefineBuiltin(name.clone()));
            }
        }

        for (name, value) in names.iter().zip(values) {
            define_global(env, name, value);
        }
        Ok(Value::sexp())
    })
}

fn builtin_lambda(_env: &Env, args: Vec<Value>) -> Value {
    checked(|| {
        expect_count("\\", &args, 2)?;
        let mut args = args.into_iter();
        let (Some(params), Some(body)) = (args.next(), args.next()) else {
            return Err(EvalError::wrong_count("\\", 0, 2));
        };
        let params = take_qexp("\\", params, 0)?;
        let body = take_qexp("\\", body, 1)?;
        Lambda::new(params, body).map(Value::lambda)
    })
}

// ==================== SESSION ====================

fn builtin_env(env: &Env, args: Vec<Value>) -> Value {
    checked(|| {
        expect_count("env", &args, 0)?;
        for line in env.borrow().dump() {
            println!("{}", line);
        }
        Ok(Value::sexp())
    })
}

fn builtin_exit(_env: &Env, args: Vec<Value>) -> Value {
    checked(|| {
        expect_count("exit", &args, 0)?;
        tracing::info!("exit requested");
        std::process::exit(0)
    })
}
