use crate::interpreter::errors::RuntimeError;
use crate::memory::value::Value;
use crate::parser::ast::{SourceLocation, UnOp};

/// Apply `-` or `!` to an evaluated operand.
#[inline]
pub(crate) fn apply_unary(
    op: UnOp,
    operand: Value,
    location: SourceLocation,
) -> Result<Value, RuntimeError> {
    match (op, operand) {
        // Two's-complement: -i64::MIN stays i64::MIN
        (UnOp::Neg, Value::Int(n)) => Ok(Value::Int(n.wrapping_neg())),
        (UnOp::Neg, Value::Float(x)) => Ok(Value::Float(-x)),
        (UnOp::Not, Value::Bool(b)) => Ok(Value::Bool(!b)),
        (op, value) => Err(RuntimeError::type_mismatch(
            format!(
                "invalid operand for unary '{}': {}",
                op.symbol(),
                value.base_type()
            ),
            location,
        )),
    }
}
