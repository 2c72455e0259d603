//! Built-in print primitives
//!
//! `println_int`, `println_float` and `println_bool` are statements rather
//! than calls: the parser resolves the name to a [`PrintKind`] and the
//! argument is handed to the interpreter's [`Printer`](crate::output::Printer),
//! which formats and writes one line.

use crate::interpreter::engine::Interpreter;
use crate::interpreter::errors::RuntimeError;
use crate::parser::ast::{Expr, PrintKind, SourceLocation};
use std::io::Write;

impl<W: Write> Interpreter<W> {
    pub(crate) fn execute_print(
        &mut self,
        kind: PrintKind,
        arg: &Expr,
        location: SourceLocation,
    ) -> Result<(), RuntimeError> {
        let value = self.evaluate_expr(arg)?;
        self.printer.println(kind, value, location)
    }
}
