// Integration tests for the MiniC interpreter

use minic::interpreter::engine::Interpreter;
use minic::interpreter::errors::RuntimeError;
use minic::{compile, FrontendError};
use pretty_assertions::assert_eq;

fn run(source: &str) -> (Result<i64, RuntimeError>, String) {
    let program = compile(source).expect("program compiles");
    let mut interpreter = Interpreter::new(program, Vec::new());
    let result = interpreter.run();
    let output = String::from_utf8(interpreter.into_output()).unwrap();
    (result, output)
}

#[test]
fn test_mul_expr_scenario() {
    let source = r#"
        #include "printlib.h"

        int main() {
            int x;
            x = 8;
            println_int(x * x);
            println_int(x * 2);
            println_int(-2 * x);
            println_int(x / x);
            println_int(x / 2);
            println_int(32 / x);
            println_int(x % x);
            println_int(x % 3);
            println_int(9 % x);
            return 0;
        }
    "#;

    let (result, output) = run(source);
    assert_eq!(result.unwrap(), 0);
    assert_eq!(output, "64\n16\n-16\n1\n4\n4\n0\n2\n1\n");
}

#[test]
fn test_float_accumulation() {
    let source = r#"
        int main() {
            float f = 1.00;
            int i;
            for (i = 0; i < 5; i = i + 1) {
                println_float(f);
                f = f + 1.15;
            }
            return 0;
        }
    "#;

    let (result, output) = run(source);
    result.unwrap();
    assert_eq!(output, "1.00\n2.15\n3.30\n4.45\n5.60\n");
}

#[test]
fn test_mixed_arithmetic_promotes() {
    let source = r#"
        int main() {
            int n = 7;
            float half = n / 2.0;
            int truncated = n / 2.0;
            println_float(half);
            println_int(truncated);
            println_float(n / 2);
            return truncated;
        }
    "#;

    let (result, output) = run(source);
    assert_eq!(result.unwrap(), 3);
    assert_eq!(output, "3.50\n3\n3.00\n");
}

#[test]
fn test_comments_and_float_literal_forms() {
    let source = r#"
        /* leading block comment */
        int main() {
            float a = 1.;   // trailing dot
            float b = .25;  // leading dot
            println_float(a + b);
            return 0;
        }
    "#;

    let (result, output) = run(source);
    result.unwrap();
    assert_eq!(output, "1.25\n");
}

#[test]
fn test_float_division_by_zero() {
    let source = r#"
        int main() {
            float z = 0.0;
            println_float(1.5);
            println_float(1.5 / z);
            return 0;
        }
    "#;

    let (result, output) = run(source);
    let err = result.unwrap_err();
    assert!(matches!(err, RuntimeError::DivisionByZero { op: "/", .. }));
    assert_eq!(err.location().map(|l| l.line), Some(5));
    assert_eq!(output, "1.50\n");
}

#[test]
fn test_float_main_exit_code_truncates() {
    let (result, _) = run("float main() { return 9.99; }");
    assert_eq!(result.unwrap(), 9);
}

#[test]
fn test_void_main_exits_zero() {
    let (result, output) = run("void main() { println_bool(!false); }");
    assert_eq!(result.unwrap(), 0);
    assert_eq!(output, "1\n");
}

#[test]
fn test_parse_error_reports_location() {
    let err = compile("int main() {\n  int x = 1\n  return x;\n}").unwrap_err();
    assert!(matches!(err, FrontendError::Parse(_)));
    assert!(err.to_string().contains("line 3"), "{}", err);
}

#[test]
fn test_type_error_is_rejected_before_running() {
    let err = compile("int main() { bool b = 1; return 0; }").unwrap_err();
    assert!(matches!(err, FrontendError::Type(_)));
    assert!(
        err.to_string().starts_with("In function main: line 1"),
        "{}",
        err
    );
}

#[test]
fn test_bool_main_is_rejected_at_compile_time() {
    let err = compile("bool main() { return true; }").unwrap_err();
    assert!(matches!(err, FrontendError::Type(_)));
    assert!(err.to_string().contains("main must return"), "{}", err);
}

#[test]
fn test_lexer_error_surfaces_as_parse_error() {
    let err = compile("int main() { int x = 1 & 2; return 0; }").unwrap_err();
    assert!(matches!(err, FrontendError::Parse(_)));
}

#[test]
fn test_statement_counter() {
    let program = compile("int main() { int i; for (i = 0; i < 3; i = i + 1) { } return 0; }").unwrap();
    let mut interpreter = Interpreter::new(program, Vec::new());
    interpreter.run().unwrap();
    // declaration, for, its init, return
    assert_eq!(interpreter.statements_executed(), 4);
    assert_eq!(interpreter.printer().lines_written(), 0);
}
