//! Expression evaluation implementation
//!
//! This module handles evaluation of all MiniC expression types:
//!
//! - Literals (`int`, `float`, `bool`)
//! - Variable references
//! - Unary `-` and `!`
//! - Binary arithmetic, relational and logical operators
//! - Assignment, which stores and yields the coerced value
//!
//! Operator semantics on evaluated values live in [`super::ops`]. `&&` and
//! `||` are handled here because their right operand may not be evaluated at
//! all.

use crate::interpreter::engine::Interpreter;
use crate::interpreter::errors::RuntimeError;
use crate::interpreter::ops::{binary::apply_binary, unary::apply_unary};
use crate::memory::value::Value;
use crate::parser::ast::*;
use std::io::Write;

impl<W: Write> Interpreter<W> {
    /// Evaluate an expression and return its value
    pub(crate) fn evaluate_expr(&mut self, expr: &Expr) -> Result<Value, RuntimeError> {
        match expr {
            Expr::IntLiteral(n, _) => Ok(Value::Int(*n)),

            Expr::FloatLiteral(x, _) => Ok(Value::Float(*x)),

            Expr::BoolLiteral(b, _) => Ok(Value::Bool(*b)),

            Expr::Variable(name, location) => self
                .env
                .get(name)
                .map(|cell| cell.value)
                .ok_or_else(|| RuntimeError::UndefinedVariable {
                    name: name.clone(),
                    location: *location,
                }),

            Expr::UnaryOp {
                op,
                operand,
                location,
            } => {
                let value = self.evaluate_expr(operand)?;
                apply_unary(*op, value, *location)
            }

            Expr::BinaryOp {
                op,
                left,
                right,
                location,
            } => self.evaluate_binary_op(*op, left, right, *location),

            Expr::Assignment {
                name,
                value,
                location,
            } => self.evaluate_assignment(name, value, *location),
        }
    }

    fn evaluate_binary_op(
        &mut self,
        op: BinOp,
        left: &Expr,
        right: &Expr,
        location: SourceLocation,
    ) -> Result<Value, RuntimeError> {
        if op.is_logical() {
            return self.evaluate_logical(op, left, right, location);
        }

        // Left to right, both operands always
        let lhs = self.evaluate_expr(left)?;
        let rhs = self.evaluate_expr(right)?;
        apply_binary(op, lhs, rhs, location)
    }

    /// `&&` and `||`; the right operand runs only when the left one does not
    /// decide the result.
    fn evaluate_logical(
        &mut self,
        op: BinOp,
        left: &Expr,
        right: &Expr,
        location: SourceLocation,
    ) -> Result<Value, RuntimeError> {
        let lhs = self.logical_operand(op, left, location)?;
        let decided = match op {
            BinOp::And => !lhs,
            _ => lhs,
        };
        if decided {
            return Ok(Value::Bool(lhs));
        }
        let rhs = self.logical_operand(op, right, location)?;
        Ok(Value::Bool(rhs))
    }

    fn logical_operand(
        &mut self,
        op: BinOp,
        operand: &Expr,
        location: SourceLocation,
    ) -> Result<bool, RuntimeError> {
        let value = self.evaluate_expr(operand)?;
        value.as_bool().ok_or_else(|| {
            RuntimeError::type_mismatch(
                format!(
                    "operands of '{}' must be bool, got {}",
                    op.symbol(),
                    value.base_type()
                ),
                location,
            )
        })
    }

    /// Store into an existing cell, coercing to its declared type
    fn evaluate_assignment(
        &mut self,
        name: &str,
        value: &Expr,
        location: SourceLocation,
    ) -> Result<Value, RuntimeError> {
        let value = self.evaluate_expr(value)?;

        let cell = self
            .env
            .get_mut(name)
            .ok_or_else(|| RuntimeError::UndefinedVariable {
                name: name.to_string(),
                location,
            })?;

        let stored = value.coerce_to(cell.var_type).ok_or_else(|| {
            RuntimeError::type_mismatch(
                format!(
                    "cannot assign a value of type {} to {} '{}'",
                    value.base_type(),
                    cell.var_type,
                    name
                ),
                location,
            )
        })?;
        cell.value = stored;
        Ok(stored)
    }

    /// Evaluate the condition of an `if`, `for` or `while`
    pub(crate) fn evaluate_condition(
        &mut self,
        condition: &Expr,
        context: &str,
    ) -> Result<bool, RuntimeError> {
        let value = self.evaluate_expr(condition)?;
        value.as_bool().ok_or_else(|| {
            RuntimeError::type_mismatch(
                format!(
                    "{} condition must be bool, got {}",
                    context,
                    value.base_type()
                ),
                condition.location(),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::interpreter::engine::Interpreter;
    use crate::interpreter::errors::RuntimeError;
    use crate::parser::parse_source;
    use pretty_assertions::assert_eq;

    fn run_lines(source: &str) -> Result<Vec<String>, RuntimeError> {
        let program = parse_source(source).unwrap();
        let mut interp = Interpreter::new(program, Vec::new());
        interp.run()?;
        Ok(interp.printer().lines())
    }

    #[test]
    fn test_short_circuit_skips_right_operand() {
        let lines = run_lines(
            "int main() {
                bool t = false;
                bool r = false && (t = true);
                println_bool(t);
                r = true || (t = true);
                println_bool(t);
                r = true && (t = true);
                println_bool(t);
                return 0;
            }",
        )
        .unwrap();
        assert_eq!(lines, vec!["0", "0", "1"]);
    }

    #[test]
    fn test_unevaluated_operand_is_not_type_checked() {
        // The right operand would be a TypeMismatch if it ran
        let lines = run_lines("int main() { println_bool(false && 1); return 0; }").unwrap();
        assert_eq!(lines, vec!["0"]);

        let err = run_lines("int main() { println_bool(true && 1); return 0; }").unwrap_err();
        assert!(matches!(err, RuntimeError::TypeMismatch { .. }));
    }

    #[test]
    fn test_assignment_yields_stored_value() {
        let lines = run_lines(
            "int main() { int a; float b; b = a = 3.7; println_int(a); println_float(b); return 0; }",
        )
        .unwrap();
        assert_eq!(lines, vec!["3", "3.00"]);
    }

    #[test]
    fn test_assignment_to_undeclared_variable() {
        let err = run_lines("int main() { x = 1; return 0; }").unwrap_err();
        assert!(matches!(err, RuntimeError::UndefinedVariable { ref name, .. } if name == "x"));
    }

    #[test]
    fn test_assigning_bool_to_float_fails() {
        let err = run_lines("int main() { float f; f = true; return 0; }").unwrap_err();
        assert!(matches!(err, RuntimeError::TypeMismatch { .. }));
    }

    #[test]
    fn test_int_arithmetic_expressions() {
        let lines = run_lines(
            "int main() {
                int x = 8;
                println_int(x * x);
                println_int(x + x);
                println_int(-x - x);
                println_int(x / x);
                println_int(x * x / (x + x));
                println_int(x / 2);
                println_int(x % x);
                println_int(x / 4);
                println_int((x + 1) % x);
                return 0;
            }",
        )
        .unwrap();
        assert_eq!(lines, vec!["64", "16", "-16", "1", "4", "4", "0", "2", "1"]);
    }
}
