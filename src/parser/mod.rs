//! MiniC source code parser
//!
//! This module transforms MiniC source text into an Abstract Syntax Tree (AST):
//! - [`lexer`]: Tokenization (source text → tokens)
//! - [`parse`]: Parsing (tokens → AST), split across `declarations`,
//!   `statements` and `expressions`
//! - [`ast`]: AST node definitions
//!
//! # Supported subset
//!
//! - Types: `int`, `float`, `bool` (and `void` as a return type)
//! - Statements: declarations, assignments, `if`/`else`, `while`, `for`,
//!   `return`, blocks, `println_int`/`println_float`/`println_bool`
//! - Expressions: arithmetic, relational, logical, unary `-` and `!`
//! - Preprocessor lines such as `#include "printlib.h"` are skipped
//!
//! Hand-written recursive descent parser, no parser generator.

pub mod ast;
pub mod lexer;
pub mod parse;

mod declarations;
mod expressions;
mod statements;

pub use parse::{ParseError, Parser};

/// Parse a complete source file into a [`ast::Program`]
pub fn parse_source(source: &str) -> Result<ast::Program, ParseError> {
    Parser::new(source)?.parse_program()
}
