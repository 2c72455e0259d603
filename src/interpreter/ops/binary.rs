//! Non-short-circuit binary operators on already-evaluated operands.
//!
//! `&&` and `||` never reach this module; they are evaluated lazily in
//! `expressions`.

use crate::interpreter::errors::RuntimeError;
use crate::memory::value::Value;
use crate::parser::ast::{BinOp, SourceLocation};

/// Operands after the usual arithmetic promotion
#[derive(Debug, Clone, Copy, PartialEq)]
enum Operands {
    Ints(i64, i64),
    Floats(f64, f64),
    Bools(bool, bool),
}

/// Promote a mixed int/float pair to floats; pair bools only with bools.
#[inline]
fn promote(left: Value, right: Value) -> Option<Operands> {
    match (left, right) {
        (Value::Int(a), Value::Int(b)) => Some(Operands::Ints(a, b)),
        (Value::Bool(a), Value::Bool(b)) => Some(Operands::Bools(a, b)),
        _ => match (left.as_f64(), right.as_f64()) {
            (Some(a), Some(b)) => Some(Operands::Floats(a, b)),
            _ => None,
        },
    }
}

fn operand_mismatch(op: BinOp, left: Value, right: Value, location: SourceLocation) -> RuntimeError {
    RuntimeError::type_mismatch(
        format!(
            "invalid operands for '{}': {} and {}",
            op.symbol(),
            left.base_type(),
            right.base_type()
        ),
        location,
    )
}

/// Apply an arithmetic, relational or equality operator.
pub(crate) fn apply_binary(
    op: BinOp,
    left: Value,
    right: Value,
    location: SourceLocation,
) -> Result<Value, RuntimeError> {
    let mismatch = || operand_mismatch(op, left, right, location);
    let operands = promote(left, right).ok_or_else(mismatch)?;

    let compared = match operands {
        Operands::Ints(a, b) if op.is_arithmetic() => {
            return int_arithmetic(op, a, b, location).ok_or_else(mismatch)?;
        }
        Operands::Floats(a, b) if op.is_arithmetic() => {
            return float_arithmetic(op, a, b, location).ok_or_else(mismatch)?;
        }
        Operands::Ints(a, b) => compare(op, &a, &b),
        Operands::Floats(a, b) => compare(op, &a, &b),
        Operands::Bools(a, b) if op.is_equality() => compare(op, &a, &b),
        Operands::Bools(..) => None,
    };
    compared.map(Value::Bool).ok_or_else(mismatch)
}

/// Two's-complement integer arithmetic; `/` truncates toward zero and `%`
/// takes the sign of the dividend.
#[inline]
fn int_arithmetic(
    op: BinOp,
    a: i64,
    b: i64,
    location: SourceLocation,
) -> Option<Result<Value, RuntimeError>> {
    let result = match op {
        BinOp::Add => a.wrapping_add(b),
        BinOp::Sub => a.wrapping_sub(b),
        BinOp::Mul => a.wrapping_mul(b),
        BinOp::Div | BinOp::Mod if b == 0 => {
            return Some(Err(RuntimeError::DivisionByZero {
                op: op.symbol(),
                location,
            }));
        }
        BinOp::Div => a.wrapping_div(b),
        BinOp::Mod => a.wrapping_rem(b),
        _ => return None,
    };
    Some(Ok(Value::Int(result)))
}

/// IEEE double arithmetic; `%` behaves like C `fmod`.
#[inline]
fn float_arithmetic(
    op: BinOp,
    a: f64,
    b: f64,
    location: SourceLocation,
) -> Option<Result<Value, RuntimeError>> {
    let result = match op {
        BinOp::Add => a + b,
        BinOp::Sub => a - b,
        BinOp::Mul => a * b,
        BinOp::Div | BinOp::Mod if b == 0.0 => {
            return Some(Err(RuntimeError::DivisionByZero {
                op: op.symbol(),
                location,
            }));
        }
        BinOp::Div => a / b,
        BinOp::Mod => a % b,
        _ => return None,
    };
    Some(Ok(Value::Float(result)))
}

/// Relational and equality operators; comparisons against NaN are false
/// except `!=`.
#[inline]
fn compare<T: PartialOrd>(op: BinOp, a: &T, b: &T) -> Option<bool> {
    match op {
        BinOp::Eq => Some(a == b),
        BinOp::Ne => Some(a != b),
        BinOp::Lt => Some(a < b),
        BinOp::Le => Some(a <= b),
        BinOp::Gt => Some(a > b),
        BinOp::Ge => Some(a >= b),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(op: BinOp, left: Value, right: Value) -> Result<Value, RuntimeError> {
        apply_binary(op, left, right, SourceLocation::new(1, 1))
    }

    #[test]
    fn test_int_division_truncates_toward_zero() {
        assert_eq!(eval(BinOp::Div, Value::Int(32), Value::Int(8)).unwrap(), Value::Int(4));
        assert_eq!(eval(BinOp::Div, Value::Int(-7), Value::Int(2)).unwrap(), Value::Int(-3));
        assert_eq!(eval(BinOp::Div, Value::Int(7), Value::Int(-2)).unwrap(), Value::Int(-3));
    }

    #[test]
    fn test_int_modulo_sign_of_dividend() {
        assert_eq!(eval(BinOp::Mod, Value::Int(9), Value::Int(8)).unwrap(), Value::Int(1));
        assert_eq!(eval(BinOp::Mod, Value::Int(-9), Value::Int(8)).unwrap(), Value::Int(-1));
        assert_eq!(eval(BinOp::Mod, Value::Int(9), Value::Int(-8)).unwrap(), Value::Int(1));
        assert_eq!(eval(BinOp::Mod, Value::Int(8), Value::Int(8)).unwrap(), Value::Int(0));
    }

    #[test]
    fn test_int_overflow_wraps() {
        assert_eq!(
            eval(BinOp::Add, Value::Int(i64::MAX), Value::Int(1)).unwrap(),
            Value::Int(i64::MIN)
        );
        assert_eq!(
            eval(BinOp::Div, Value::Int(i64::MIN), Value::Int(-1)).unwrap(),
            Value::Int(i64::MIN)
        );
        assert_eq!(
            eval(BinOp::Mod, Value::Int(i64::MIN), Value::Int(-1)).unwrap(),
            Value::Int(0)
        );
    }

    #[test]
    fn test_mixed_operands_promote_to_float() {
        assert_eq!(
            eval(BinOp::Add, Value::Int(1), Value::Float(0.5)).unwrap(),
            Value::Float(1.5)
        );
        assert_eq!(
            eval(BinOp::Div, Value::Float(7.0), Value::Int(2)).unwrap(),
            Value::Float(3.5)
        );
        assert_eq!(
            eval(BinOp::Lt, Value::Int(1), Value::Float(1.5)).unwrap(),
            Value::Bool(true)
        );
    }

    #[test]
    fn test_float_modulo_is_fmod() {
        assert_eq!(
            eval(BinOp::Mod, Value::Float(-7.5), Value::Float(2.0)).unwrap(),
            Value::Float(-1.5)
        );
    }

    #[test]
    fn test_division_by_zero() {
        for op in [BinOp::Div, BinOp::Mod] {
            assert!(matches!(
                eval(op, Value::Int(1), Value::Int(0)),
                Err(RuntimeError::DivisionByZero { .. })
            ));
            assert!(matches!(
                eval(op, Value::Float(1.0), Value::Float(0.0)),
                Err(RuntimeError::DivisionByZero { .. })
            ));
            assert!(matches!(
                eval(op, Value::Float(1.0), Value::Int(0)),
                Err(RuntimeError::DivisionByZero { .. })
            ));
        }
    }

    #[test]
    fn test_bool_equality_only() {
        assert_eq!(
            eval(BinOp::Eq, Value::Bool(false), Value::Bool(false)).unwrap(),
            Value::Bool(true)
        );
        assert_eq!(
            eval(BinOp::Ne, Value::Bool(false), Value::Bool(true)).unwrap(),
            Value::Bool(true)
        );
        assert!(matches!(
            eval(BinOp::Lt, Value::Bool(false), Value::Bool(true)),
            Err(RuntimeError::TypeMismatch { .. })
        ));
        assert!(matches!(
            eval(BinOp::Add, Value::Bool(true), Value::Bool(true)),
            Err(RuntimeError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_bool_and_number_mismatch() {
        let err = eval(BinOp::Eq, Value::Bool(true), Value::Int(1)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Type mismatch at line 1, column 1: invalid operands for '==': bool and int"
        );
    }
}
