// Program driver for the MiniC interpreter

use crate::interpreter::errors::RuntimeError;
use crate::memory::{env::Environment, value::Value};
use crate::output::Printer;
use crate::parser::ast::*;
use std::io::Write;

/// Control-flow signal raised by the statement just executed
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum ControlFlow {
    Normal,
    /// `return` was executed; carries the returned value, if any
    Return(Option<Value>),
}

/// Executes the `main` function of a parsed program
///
/// The interpreter owns the tree for the duration of the run and writes all
/// program output through its [`Printer`].
pub struct Interpreter<W: Write> {
    /// Parsed program
    program: Program,

    /// Bindings of the running function
    pub(crate) env: Environment,

    /// Sink for `println_*` output
    pub(crate) printer: Printer<W>,

    /// Current source location being executed
    pub(crate) current_location: SourceLocation,

    /// Pending non-local exit
    pub(crate) control_flow: ControlFlow,

    /// Number of statements executed so far
    pub(crate) statements_executed: u64,
}

impl<W: Write> Interpreter<W> {
    /// Create a new interpreter writing program output to `out`
    pub fn new(program: Program, out: W) -> Self {
        Interpreter {
            program,
            env: Environment::new("main"),
            printer: Printer::new(out),
            current_location: SourceLocation::new(1, 1),
            control_flow: ControlFlow::Normal,
            statements_executed: 0,
        }
    }

    /// Run `main` from start to finish and return its exit code.
    ///
    /// Output written before a runtime error stays written, and the sink is
    /// flushed either way.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn run(&mut self) -> Result<i64, RuntimeError> {
        // Borrowing the body from `self.program` would conflict with the
        // `&mut self` the executor needs
        let program = std::mem::take(&mut self.program);
        let result = self.run_main(&program);
        self.program = program;

        let flushed = self.printer.flush();
        let exit_code = result?;
        flushed?;

        tracing::debug!(
            exit_code,
            statements = self.statements_executed,
            lines = self.printer.lines_written(),
            "program finished"
        );
        Ok(exit_code)
    }

    fn run_main(&mut self, program: &Program) -> Result<i64, RuntimeError> {
        let main_fn = program
            .function("main")
            .ok_or(RuntimeError::NoMainFunction)?;

        self.env = Environment::new(main_fn.name.as_str());
        self.control_flow = ControlFlow::Normal;
        self.current_location = main_fn.location;
        tracing::debug!(
            function = %self.env.function_name,
            return_type = %main_fn.return_type,
            "entering function"
        );

        self.execute_block(&main_fn.body)?;

        let returned = match std::mem::replace(&mut self.control_flow, ControlFlow::Normal) {
            ControlFlow::Return(value) => value,
            ControlFlow::Normal => None,
        };
        Self::exit_code(returned, self.current_location)
    }

    /// `main`'s returned value as a process exit code
    fn exit_code(value: Option<Value>, location: SourceLocation) -> Result<i64, RuntimeError> {
        match value {
            None => Ok(0),
            Some(value) => value
                .coerce_to(BaseType::Int)
                .and_then(|v| v.as_int())
                .ok_or_else(|| {
                    RuntimeError::type_mismatch(
                        format!("main cannot return a value of type {}", value.base_type()),
                        location,
                    )
                }),
        }
    }

    pub fn printer(&self) -> &Printer<W> {
        &self.printer
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }

    pub fn statements_executed(&self) -> u64 {
        self.statements_executed
    }

    /// Consume the interpreter, returning the output sink
    pub fn into_output(self) -> W {
        self.printer.into_inner()
    }

    pub(crate) fn is_returning(&self) -> bool {
        matches!(self.control_flow, ControlFlow::Return(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_source;
    use pretty_assertions::assert_eq;

    fn run(source: &str) -> (Result<i64, RuntimeError>, String) {
        let program = parse_source(source).unwrap();
        let mut interp = Interpreter::new(program, Vec::new());
        let result = interp.run();
        let out = String::from_utf8(interp.into_output()).unwrap();
        (result, out)
    }

    #[test]
    fn test_exit_code_from_main() {
        let (result, out) = run("int main() { return 42; }");
        assert_eq!(result.unwrap(), 42);
        assert_eq!(out, "");
    }

    #[test]
    fn test_falling_off_main_exits_zero() {
        let (result, _) = run("void main() { println_int(1); }");
        assert_eq!(result.unwrap(), 0);
    }

    #[test]
    fn test_float_return_truncates() {
        let (result, _) = run("float main() { return -2.9; }");
        assert_eq!(result.unwrap(), -2);
    }

    #[test]
    fn test_bool_return_is_type_mismatch() {
        let (result, _) = run("bool main() { return true; }");
        assert!(matches!(result, Err(RuntimeError::TypeMismatch { .. })));
    }

    #[test]
    fn test_missing_main() {
        let (result, _) = run("int helper() { return 1; }");
        assert!(matches!(result, Err(RuntimeError::NoMainFunction)));
    }

    #[test]
    fn test_output_before_error_is_kept() {
        let (result, out) = run("int main() { println_int(1); println_int(1 / 0); println_int(2); return 0; }");
        assert!(matches!(result, Err(RuntimeError::DivisionByZero { .. })));
        assert_eq!(out, "1\n");
    }

    #[test]
    fn test_environment_belongs_to_main() {
        let program = parse_source("int main() { int x = 1; return x; }").unwrap();
        let mut interp = Interpreter::new(program, Vec::new());
        interp.run().unwrap();
        assert_eq!(interp.env().function_name, "main");
        assert_eq!(interp.env().len(), 1);
    }

    #[test]
    fn test_program_is_restored_after_run() {
        let program = parse_source("int main() { return 3; }").unwrap();
        let mut interp = Interpreter::new(program, Vec::new());
        assert_eq!(interp.run().unwrap(), 3);
        assert_eq!(interp.run().unwrap(), 3);
    }
}
