//! # Introduction
//!
//! `minic` parses, type-checks and executes MiniC, a scalar-only subset of C
//! with `int`, `float` and `bool`, structured control flow, and the
//! `println_int`, `println_float` and `println_bool` output primitives.
//!
//! ## Execution pipeline
//!
//! ```text
//! Source → Lexer → Parser → AST → Typing → Interpreter → Output
//! ```
//!
//! 1. [`parser`]: tokenises the source and builds an AST.
//! 2. [`typing`]: static checks mirroring the runtime coercion rules.
//! 3. [`interpreter`]: walks the AST of `main` and returns its exit code.
//! 4. [`memory`]: tagged [`memory::value::Value`]s held in a typed
//!    [`memory::env::Environment`].
//! 5. [`output`]: the exact line format of the print primitives.
//! 6. [`golden`]: runs fixtures annotated with `// EXPECTED` blocks.
//!
//! ## Example
//!
//! ```
//! use minic::interpreter::engine::Interpreter;
//!
//! let program = minic::compile("int main() { println_float(1.15); return 2; }").unwrap();
//! let mut interp = Interpreter::new(program, Vec::new());
//! assert_eq!(interp.run().unwrap(), 2);
//! assert_eq!(interp.into_output(), b"1.15\n");
//! ```

pub mod golden;
pub mod interpreter;
pub mod memory;
pub mod output;
pub mod parser;
pub mod typing;

use parser::ParseError;
use typing::TypeError;

/// Errors raised before a program starts running
#[derive(Debug, thiserror::Error)]
pub enum FrontendError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Type(#[from] TypeError),
}

/// Parse and type-check `source`
pub fn compile(source: &str) -> Result<parser::ast::Program, FrontendError> {
    let program = parser::parse_source(source)?;
    typing::check_program(&program)?;
    Ok(program)
}
