//! The flat lexical environment (`spec.md` §4.4).
//!
//! A single mapping from identifier lexeme to value, owned by the
//! interpreter for its whole lifetime. Nested scopes are out of scope for
//! this version (§9 "Environment identity") — callers hold the
//! `Environment` behind whatever indirection they like; this type itself
//! stays a flat map so a future parent-link design doesn't have to change
//! this module's public contract.

use crate::error::RuntimeError;
use crate::value::Value;
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct Environment {
    values: HashMap<String, Value>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a fresh binding. Fails if `identifier` is already bound in
    /// this environment (`spec.md` §4.4: at most one binding per lexeme).
    pub fn define(&mut self, identifier: &str, value: Value, line: usize) -> Result<(), RuntimeError> {
        if self.values.contains_key(identifier) {
            return Err(RuntimeError::new(
                line,
                format!("identifier '{}' already defined in this context", identifier),
            ));
        }
        self.values.insert(identifier.to_string(), value);
        Ok(())
    }

    /// Overwrites an existing binding. Fails if `identifier` has never
    /// been defined.
    pub fn set(&mut self, identifier: &str, value: Value, line: usize) -> Result<(), RuntimeError> {
        if !self.values.contains_key(identifier) {
            return Err(RuntimeError::new(
                line,
                format!("identifier '{}' not defined in this context", identifier),
            ));
        }
        self.values.insert(identifier.to_string(), value);
        Ok(())
    }

    /// Returns the bound value, or a runtime error if `identifier` was
    /// never defined.
    pub fn get(&self, identifier: &str, line: usize) -> Result<Value, RuntimeError> {
        self.values.get(identifier).cloned().ok_or_else(|| {
            RuntimeError::new(
                line,
                format!("identifier '{}' not defined in this context", identifier),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn define_then_get_returns_the_value() {
        let mut env = Environment::new();
        env.define("x", Value::Number(10.0), 1).unwrap();
        assert_eq!(env.get("x", 1).unwrap(), Value::Number(10.0));
    }

    #[test]
    fn redefining_is_a_runtime_error() {
        let mut env = Environment::new();
        env.define("x", Value::Absent, 1).unwrap();
        let err = env.define("x", Value::Number(2.0), 2).unwrap_err();
        assert_eq!(err.line, 2);
    }

    #[test]
    fn get_of_undefined_identifier_is_a_runtime_error() {
        let env = Environment::new();
        assert!(env.get("missing", 1).is_err());
    }

    #[test]
    fn set_requires_prior_define() {
        let mut env = Environment::new();
        assert!(env.set("x", Value::Number(1.0), 1).is_err());
        env.define("x", Value::Number(1.0), 1).unwrap();
        env.set("x", Value::Number(2.0), 2).unwrap();
        assert_eq!(env.get("x", 3).unwrap(), Value::Number(2.0));
    }
}
