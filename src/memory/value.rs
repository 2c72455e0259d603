//! Runtime value representation
//!
//! This module defines the [`Value`] enum, which represents all runtime values
//! of a MiniC program. Values are tagged: a value never changes kind, and every
//! operator produces a fresh value.
//!
//! # Value Types
//!
//! - [`Value::Int`]: 64-bit signed integer, two's-complement wrapping arithmetic
//! - [`Value::Float`]: IEEE-754 double
//! - [`Value::Bool`]: truth value, never implicitly numeric
//!
//! # Coercion
//!
//! `int → float` widens. `float → int` truncates toward zero and is only
//! applied where the language requires it (stores into an `int` cell and the
//! exit code of `main`). `bool` has no numeric coercion.

use crate::parser::ast::BaseType;
use std::fmt;

/// Runtime values in the interpreter
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl Value {
    /// The zero value a declaration without initializer receives
    pub fn zero(ty: BaseType) -> Option<Value> {
        match ty {
            BaseType::Int => Some(Value::Int(0)),
            BaseType::Float => Some(Value::Float(0.0)),
            BaseType::Bool => Some(Value::Bool(false)),
            BaseType::Void => None,
        }
    }

    /// The static type this value belongs to
    pub fn base_type(&self) -> BaseType {
        match self {
            Value::Int(_) => BaseType::Int,
            Value::Float(_) => BaseType::Float,
            Value::Bool(_) => BaseType::Bool,
        }
    }

    /// Get the integer value, returns None if not an Int
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Get the boolean value, returns None if not a Bool
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Numeric view with int widened to float, None for bools
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(n) => Some(*n as f64),
            Value::Float(x) => Some(*x),
            Value::Bool(_) => None,
        }
    }

    /// Convert to `target`, following the int/float assignment rules.
    ///
    /// Returns `None` when no coercion exists (anything involving `bool` with a
    /// numeric kind, or `void`).
    pub fn coerce_to(self, target: BaseType) -> Option<Value> {
        match (self, target) {
            (Value::Int(_), BaseType::Int)
            | (Value::Float(_), BaseType::Float)
            | (Value::Bool(_), BaseType::Bool) => Some(self),
            (Value::Int(n), BaseType::Float) => Some(Value::Float(n as f64)),
            // `as` truncates toward zero and saturates; NaN becomes 0
            (Value::Float(x), BaseType::Int) => Some(Value::Int(x as i64)),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{}", n),
            Value::Float(x) => write!(f, "{}", x),
            Value::Bool(b) => write!(f, "{}", b),
        }
    }
}
