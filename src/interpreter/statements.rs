//! Statement execution implementation
//!
//! This module handles the execution of all MiniC statement types:
//!
//! - Variable declarations, with or without initializers
//! - Expression statements and blocks
//! - `if`/`else` and `return`
//!
//! Loops live in [`super::loops`] and the print primitives in
//! [`super::builtins`].
//!
//! # Control Flow
//!
//! `return` sets `control_flow`; every block checks it after each statement
//! and stops early, so the signal unwinds through nested blocks and loops up
//! to the driver.

use crate::interpreter::engine::{ControlFlow, Interpreter};
use crate::interpreter::errors::RuntimeError;
use crate::memory::value::Value;
use crate::parser::ast::*;
use std::io::Write;

impl<W: Write> Interpreter<W> {
    /// Run statements in order, stopping after a `return`
    pub(crate) fn execute_block(&mut self, statements: &[Stmt]) -> Result<(), RuntimeError> {
        for stmt in statements {
            self.execute_statement(stmt)?;
            if self.is_returning() {
                break;
            }
        }
        Ok(())
    }

    /// Execute a single statement
    pub(crate) fn execute_statement(&mut self, stmt: &Stmt) -> Result<(), RuntimeError> {
        self.current_location = stmt.location();
        self.statements_executed += 1;
        tracing::trace!(location = %self.current_location, "statement");

        match stmt {
            Stmt::VarDecl {
                var_type,
                declarators,
                ..
            } => self.execute_var_decl(*var_type, declarators),

            Stmt::Expression { expr, .. } => self.evaluate_expr(expr).map(|_| ()),

            Stmt::Block { statements, .. } => self.execute_block(statements),

            Stmt::If {
                condition,
                then_branch,
                else_branch,
                ..
            } => {
                if self.evaluate_condition(condition, "if")? {
                    self.execute_block(then_branch)
                } else if let Some(else_branch) = else_branch {
                    self.execute_block(else_branch)
                } else {
                    Ok(())
                }
            }

            Stmt::While {
                condition, body, ..
            } => self.execute_while(condition, body),

            Stmt::For {
                init,
                condition,
                update,
                body,
                location,
            } => self.execute_for(
                init.as_deref(),
                condition.as_ref(),
                update.as_ref(),
                body,
                *location,
            ),

            Stmt::Return { expr, .. } => {
                let value = expr.as_ref().map(|e| self.evaluate_expr(e)).transpose()?;
                self.control_flow = ControlFlow::Return(value);
                Ok(())
            }

            Stmt::Print {
                kind,
                arg,
                location,
            } => self.execute_print(*kind, arg, *location),
        }
    }

    /// Declare each name in turn; a later initializer sees the earlier names.
    pub(crate) fn execute_var_decl(
        &mut self,
        var_type: BaseType,
        declarators: &[Declarator],
    ) -> Result<(), RuntimeError> {
        for decl in declarators {
            let value = match &decl.init {
                Some(init) => {
                    let value = self.evaluate_expr(init)?;
                    value.coerce_to(var_type).ok_or_else(|| {
                        RuntimeError::type_mismatch(
                            format!(
                                "cannot initialize {} '{}' with a value of type {}",
                                var_type,
                                decl.name,
                                value.base_type()
                            ),
                            decl.location,
                        )
                    })?
                }
                None => Value::zero(var_type).ok_or_else(|| {
                    RuntimeError::type_mismatch(
                        format!("variable '{}' declared void", decl.name),
                        decl.location,
                    )
                })?,
            };
            self.env.declare(decl.name.clone(), var_type, value);
        }
        Ok(())
    }
}
