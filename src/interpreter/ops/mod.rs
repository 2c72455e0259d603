//! Operator semantics on evaluated values.
//!
//! These are pure functions: operand evaluation order, short-circuiting and
//! stores live in `expressions`.

pub(crate) mod binary;
pub(crate) mod unary;
