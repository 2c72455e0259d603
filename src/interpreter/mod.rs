//! MiniC execution engine
//!
//! This module provides the core execution logic:
//! - [`engine`]: program driver, owns the environment and runs `main`
//! - [`errors`]: Runtime error types
//! - [`constants`]: process exit codes
//!
//! # Execution Model
//!
//! The interpreter walks the AST and executes statements one at a time. A
//! `return` sets a control-flow signal that every enclosing block and loop
//! checks after each statement.
//!
//! # Built-in Functions
//!
//! The `println_*` primitives are dispatched by print kind to the output
//! formatter rather than looked up as functions.

pub mod constants;
pub mod engine;
pub mod errors;

mod builtins;
mod expressions;
mod loops;
mod ops;
mod statements;
