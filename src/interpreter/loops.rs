//! Loop statement execution (`for`, `while`).
//!
//! Adds `impl Interpreter` methods for the two loop forms. MiniC has no
//! `break` or `continue`, so the only way out of a loop body other than its
//! condition is `return`, which the loop observes through `control_flow`.
//!
//! A `for` loop opens a scope covering its header and body: a variable
//! declared in the header is gone once the loop ends, and a shadowed outer
//! variable of the same name comes back.

use crate::interpreter::engine::Interpreter;
use crate::interpreter::errors::RuntimeError;
use crate::parser::ast::{Expr, SourceLocation, Stmt};
use std::io::Write;

impl<W: Write> Interpreter<W> {
    /// Executes `for (init; condition; update) body`.
    ///
    /// An absent condition is true. The scope is popped on every exit path,
    /// including errors.
    pub(crate) fn execute_for(
        &mut self,
        init: Option<&Stmt>,
        condition: Option<&Expr>,
        update: Option<&Expr>,
        body: &[Stmt],
        location: SourceLocation,
    ) -> Result<(), RuntimeError> {
        self.env.push_scope();
        let result = self.run_for(init, condition, update, body);
        self.env.pop_scope();

        let iterations = result?;
        tracing::debug!(%location, iterations, "for loop finished");
        Ok(())
    }

    fn run_for(
        &mut self,
        init: Option<&Stmt>,
        condition: Option<&Expr>,
        update: Option<&Expr>,
        body: &[Stmt],
    ) -> Result<u64, RuntimeError> {
        if let Some(init) = init {
            self.execute_statement(init)?;
        }

        let mut iterations = 0u64;
        loop {
            if let Some(condition) = condition {
                if !self.evaluate_condition(condition, "for")? {
                    break;
                }
            }

            self.execute_block(body)?;
            iterations += 1;
            if self.is_returning() {
                break;
            }

            if let Some(update) = update {
                self.evaluate_expr(update)?;
            }
        }
        Ok(iterations)
    }

    /// Executes a `while (condition) body` loop.
    ///
    /// The condition is evaluated before each iteration.
    pub(crate) fn execute_while(
        &mut self,
        condition: &Expr,
        body: &[Stmt],
    ) -> Result<(), RuntimeError> {
        let mut iterations = 0u64;
        while self.evaluate_condition(condition, "while")? {
            self.execute_block(body)?;
            iterations += 1;
            if self.is_returning() {
                break;
            }
        }
        tracing::debug!(location = %condition.location(), iterations, "while loop finished");
        Ok(())
    }
}
