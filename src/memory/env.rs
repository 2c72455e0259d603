//! Variable environment of a running function
//!
//! - [`Environment`]: the bindings of one function activation
//! - [`Cell`]: a typed storage cell holding one [`Value`]
//!
//! # Scoping
//!
//! MiniC has a single function scope. The only nested scope is the header of
//! a `for` loop: a variable declared in `for (int i = 0; ...)` is removed when
//! the loop ends, and an outer variable of the same name is restored.

use super::value::Value;
use crate::parser::ast::BaseType;
use rustc_hash::FxHashMap;

/// A typed storage cell
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub value: Value,
    /// Fixed at declaration; every store is coerced to it
    pub var_type: BaseType,
}

#[derive(Debug, Clone, Default)]
struct ScopeData {
    shadowed: Vec<(String, Cell)>,
    declared: Vec<String>,
}

/// Bindings of one function activation
#[derive(Debug, Clone)]
pub struct Environment {
    pub function_name: String,
    cells: FxHashMap<String, Cell>,
    scope_stack: Vec<ScopeData>,
}

impl Environment {
    pub fn new(function_name: impl Into<String>) -> Self {
        Environment {
            function_name: function_name.into(),
            cells: FxHashMap::default(),
            scope_stack: Vec::new(),
        }
    }

    /// Enter a nested scope
    pub fn push_scope(&mut self) {
        self.scope_stack.push(ScopeData::default());
    }

    /// Exit the current nested scope, dropping its declarations
    pub fn pop_scope(&mut self) {
        if let Some(scope) = self.scope_stack.pop() {
            for name in scope.declared {
                self.cells.remove(&name);
            }
            for (name, cell) in scope.shadowed {
                self.cells.insert(name, cell);
            }
        }
    }

    /// Declare a variable in the innermost scope
    pub fn declare(&mut self, name: String, var_type: BaseType, value: Value) {
        let cell = Cell { value, var_type };

        let Some(scope) = self.scope_stack.last_mut() else {
            self.cells.insert(name, cell);
            return;
        };

        // A loop body re-runs its declarations; only the first one in a
        // scope records what it shadows.
        let seen_in_scope = scope.declared.contains(&name)
            || scope.shadowed.iter().any(|(shadowed, _)| *shadowed == name);
        let old = self.cells.insert(name.clone(), cell);
        if seen_in_scope {
            return;
        }
        match old {
            Some(old) => scope.shadowed.push((name, old)),
            None => scope.declared.push(name),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Cell> {
        self.cells.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Cell> {
        self.cells.get_mut(name)
    }

    /// Number of live bindings
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
