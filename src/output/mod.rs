// Output formatting for the println_* primitives

use crate::interpreter::errors::RuntimeError;
use crate::memory::value::Value;
use crate::parser::ast::{PrintKind, SourceLocation};
use std::io::Write;

/// Render `value` the way the `kind` primitive prints it, without the newline.
///
/// Returns `None` when the value does not fit the primitive's parameter.
/// `println_float` accepts an `int`, widened as any call argument would be.
pub fn format_value(kind: PrintKind, value: Value) -> Option<String> {
    match (kind, value) {
        (PrintKind::Int, Value::Int(n)) => Some(n.to_string()),
        (PrintKind::Float, Value::Float(x)) => Some(format_float(x)),
        (PrintKind::Float, Value::Int(n)) => Some(format_float(n as f64)),
        (PrintKind::Bool, Value::Bool(b)) => Some(if b { "1" } else { "0" }.to_string()),
        _ => None,
    }
}

/// C `%.2f` of the exact binary value.
pub fn format_float(x: f64) -> String {
    if x.is_nan() {
        // Rust spells it "NaN"
        return "nan".to_string();
    }
    format!("{:.2}", x)
}

/// Line-oriented sink for program output
///
/// Wraps any [`Write`] handle: stdout in the CLI, a `Vec<u8>` in tests.
#[derive(Debug)]
pub struct Printer<W: Write> {
    out: W,
    lines_written: usize,
}

impl<W: Write> Printer<W> {
    pub fn new(out: W) -> Self {
        Printer {
            out,
            lines_written: 0,
        }
    }

    /// Write one formatted line
    pub fn println(
        &mut self,
        kind: PrintKind,
        value: Value,
        location: SourceLocation,
    ) -> Result<(), RuntimeError> {
        let text = format_value(kind, value).ok_or_else(|| {
            RuntimeError::type_mismatch(
                format!(
                    "{} expects {}, got {}",
                    kind.builtin_name(),
                    kind.param_type(),
                    value.base_type()
                ),
                location,
            )
        })?;
        writeln!(self.out, "{}", text)?;
        self.lines_written += 1;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<(), RuntimeError> {
        self.out.flush()?;
        Ok(())
    }

    pub fn lines_written(&self) -> usize {
        self.lines_written
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl Printer<Vec<u8>> {
    /// Captured output split into lines
    pub fn lines(&self) -> Vec<String> {
        String::from_utf8_lossy(&self.out)
            .lines()
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn loc() -> SourceLocation {
        SourceLocation::new(1, 1)
    }

    #[test]
    fn test_int_format() {
        assert_eq!(format_value(PrintKind::Int, Value::Int(64)).as_deref(), Some("64"));
        assert_eq!(format_value(PrintKind::Int, Value::Int(-16)).as_deref(), Some("-16"));
        assert_eq!(
            format_value(PrintKind::Int, Value::Int(i64::MIN)).as_deref(),
            Some("-9223372036854775808")
        );
    }

    #[test]
    fn test_bool_format() {
        assert_eq!(format_value(PrintKind::Bool, Value::Bool(true)).as_deref(), Some("1"));
        assert_eq!(format_value(PrintKind::Bool, Value::Bool(false)).as_deref(), Some("0"));
    }

    #[test]
    fn test_float_format_two_decimals() {
        assert_eq!(format_float(1.0), "1.00");
        assert_eq!(format_float(2.15), "2.15");
        assert_eq!(format_float(-0.5), "-0.50");
        assert_eq!(format_float(1234567.891), "1234567.89");
        assert_eq!(format_float(f64::INFINITY), "inf");
        assert_eq!(format_float(f64::NEG_INFINITY), "-inf");
        assert_eq!(format_float(f64::NAN), "nan");
    }

    #[test]
    fn test_float_accepts_int() {
        assert_eq!(format_value(PrintKind::Float, Value::Int(3)).as_deref(), Some("3.00"));
    }

    #[test]
    fn test_kind_mismatch() {
        assert_eq!(format_value(PrintKind::Int, Value::Float(1.0)), None);
        assert_eq!(format_value(PrintKind::Bool, Value::Int(1)), None);
        assert_eq!(format_value(PrintKind::Int, Value::Bool(true)), None);
    }

    #[test]
    fn test_printer_writes_lines_in_order() {
        let mut printer = Printer::new(Vec::new());
        printer.println(PrintKind::Int, Value::Int(1), loc()).unwrap();
        printer.println(PrintKind::Float, Value::Float(2.5), loc()).unwrap();
        printer.println(PrintKind::Bool, Value::Bool(false), loc()).unwrap();

        assert_eq!(printer.lines_written(), 3);
        assert_eq!(printer.get_ref().as_slice(), b"1\n2.50\n0\n");
        assert_eq!(printer.lines(), vec!["1", "2.50", "0"]);
    }

    #[test]
    fn test_printer_rejects_mismatch_without_writing() {
        let mut printer = Printer::new(Vec::new());
        let err = printer
            .println(PrintKind::Bool, Value::Int(1), loc())
            .unwrap_err();

        assert!(matches!(err, RuntimeError::TypeMismatch { .. }));
        assert!(printer.into_inner().is_empty());
    }
}
