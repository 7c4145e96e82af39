//! Environment frames
//!
//! A frame maps names to values and links to an optional parent frame.
//! Frames are handed around as [`Env`] handles; values inside them are
//! always owned copies.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;

use super::error::EvalError;
use super::value::Value;

/// Shared handle to a frame
pub type Env = Rc<RefCell<Environment>>;

/// A single scope frame
#[derive(Clone, Default)]
pub struct Environment {
    bindings: IndexMap<String, Value>,
    parent: Option<Env>,
}

impl Environment {
    /// Create a frame with no parent
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a frame chained to `parent`
    pub fn with_parent(parent: Env) -> Self {
        Self {
            bindings: IndexMap::new(),
            parent: Some(parent),
        }
    }

    /// Move this frame behind a shared handle
    pub fn into_env(self) -> Env {
        Rc::new(RefCell::new(self))
    }

    pub fn parent(&self) -> Option<&Env> {
        self.parent.as_ref()
    }

    pub fn set_parent(&mut self, parent: Env) {
        self.parent = Some(parent);
    }

    /// Number of bindings in this frame only
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Names bound in this frame, in binding order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.bindings.keys().map(String::as_str)
    }

    /// Look a name up in this frame, then in each ancestor, returning a copy
    pub fn get(&self, name: &str) -> Result<Value, EvalError> {
        if let Some(value) = self.bindings.get(name) {
            return Ok(value.clone());
        }
        match &self.parent {
            Some(parent) => parent.borrow().get(name),
            None => Err(EvalError::UnboundSymbol(name.to_string())),
        }
    }

    /// Bind `name` in this frame, replacing an existing binding in place
    pub fn put(&mut self, name: &str, value: Value) {
        tracing::trace!(name, "bind");
        if let Some(slot) = self.bindings.get_mut(name) {
            *slot = value;
        } else {
            self.bindings.insert(name.to_string(), value);
        }
    }

    /// Listing of `name - value` for this frame and every ancestor
    pub fn dump(&self) -> Vec<String> {
        let mut lines: Vec<String> = self
            .bindings
            .iter()
            .map(|(name, value)| format!("{} - {}", name, value))
            .collect();
        if let Some(parent) = &self.parent {
            lines.extend(parent.borrow().dump());
        }
        lines
    }
}

/// The frame with no parent at the end of the chain starting at `env`
pub fn root(env: &Env) -> Env {
    let mut frame = Rc::clone(env);
    loop {
        let parent = frame.borrow().parent.clone();
        match parent {
            Some(parent) => frame = parent,
            None => return frame,
        }
    }
}

/// Bind `name` in the root frame of the chain starting at `env`
pub fn define_global(env: &Env, name: &str, value: Value) {
    root(env).borrow_mut().put(name, value);
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Environment")
            .field("bindings", &self.bindings)
            .field("has_parent", &self.parent.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_replaces_in_place() {
        let mut env = Environment::new();
        env.put("a", Value::Number(1));
        env.put("b", Value::Number(2));
        env.put("a", Value::Number(3));
        assert_eq!(env.names().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(env.get("a").unwrap(), Value::Number(3));
    }

    #[test]
    fn test_define_global_reaches_root() {
        let root = Environment::new().into_env();
        let mid = Environment::with_parent(Rc::clone(&root)).into_env();
        let leaf = Environment::with_parent(Rc::clone(&mid)).into_env();

        define_global(&leaf, "x", Value::Number(9));

        assert!(leaf.borrow().is_empty());
        assert!(mid.borrow().is_empty());
        assert_eq!(root.borrow().get("x").unwrap(), Value::Number(9));
        assert_eq!(leaf.borrow().get("x").unwrap(), Value::Number(9));
    }
}
