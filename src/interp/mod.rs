//! Tree-walking interpreter
//!
//! Reads parse trees into values and evaluates them against a chain of
//! environment frames rooted at a frame seeded with the builtins.

pub mod builtins;
pub mod env;
pub mod error;
pub mod eval;
pub mod read;
pub mod value;

pub use env::{Env, Environment, define_global};
pub use error::EvalError;
pub use eval::{Interpreter, apply, eval};
pub use read::read;
pub use value::{BuiltinFn, Function, Lambda, Value};
