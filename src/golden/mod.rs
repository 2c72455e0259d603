//! Golden-output test runner
//!
//! A fixture is a MiniC source file ending in a comment block:
//!
//! ```text
//! // EXPECTED
//! // EXECCODE 3
//! // 64
//! // 16
//! ```
//!
//! Every `// ` line after the `// EXPECTED` marker is one expected stdout
//! line, except an optional `// EXECCODE <n>` giving the expected exit code
//! (default `0`). A runtime error counts as exit code `1`. Exit codes are
//! compared as the process status the OS reports, i.e. modulo 256.

use crate::interpreter::constants::RUNTIME_ERROR_EXIT_CODE;
use crate::interpreter::engine::Interpreter;
use crate::{compile, FrontendError};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;

const EXPECTED_MARKER: &str = "EXPECTED";
const EXECCODE_PRAGMA: &str = "EXECCODE";

/// Failure to load fixtures (as opposed to a fixture that fails)
#[derive(Debug, thiserror::Error)]
pub enum GoldenError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path}: no '// EXPECTED' block")]
    MissingExpectation { path: PathBuf },

    #[error("{path}: invalid EXECCODE '{value}'")]
    InvalidExecCode { path: PathBuf, value: String },

    #[error("Failed to write test report: {0}")]
    Report(#[source] std::io::Error),
}

/// Expected exit code and stdout of a fixture
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expectation {
    pub exit_code: i64,
    pub stdout: Vec<String>,
}

impl Expectation {
    /// Extract the `// EXPECTED` block from `source`.
    ///
    /// Returns `Ok(None)` when there is no block, and `Err` with the offending
    /// text when the `EXECCODE` value is not an integer.
    pub fn parse(source: &str) -> Result<Option<Expectation>, String> {
        let mut lines = source.lines().map(str::trim);
        if !lines.any(|line| comment_text(line) == Some(EXPECTED_MARKER)) {
            return Ok(None);
        }

        let mut expectation = Expectation {
            exit_code: 0,
            stdout: Vec::new(),
        };
        for line in lines {
            if line.is_empty() {
                continue;
            }
            let Some(text) = comment_text(line) else {
                break;
            };
            match text.strip_prefix(EXECCODE_PRAGMA) {
                Some(code) => {
                    let code = code.trim();
                    expectation.exit_code = code.parse().map_err(|_| code.to_string())?;
                }
                None => expectation.stdout.push(text.to_string()),
            }
        }
        Ok(Some(expectation))
    }
}

/// Body of a `//` comment line, without the marker and one following space
fn comment_text(line: &str) -> Option<&str> {
    let text = line.strip_prefix("//")?;
    Some(text.strip_prefix(' ').unwrap_or(text).trim_end())
}

/// Observed behaviour of one program run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunResult {
    pub exit_code: i64,
    pub stdout: Vec<String>,
    /// Runtime error message, when the run stopped on one
    pub error: Option<String>,
}

/// The status a parent process sees for exit code `code`
fn process_status(code: i64) -> i64 {
    code & 0xff
}

/// Compile and run `source`, capturing its output.
///
/// Runtime errors are part of the result; only front-end errors fail.
pub fn run_source(source: &str) -> Result<RunResult, FrontendError> {
    let program = compile(source)?;
    let mut interp = Interpreter::new(program, Vec::new());
    let outcome = interp.run();
    let stdout = interp.printer().lines();

    Ok(match outcome {
        Ok(exit_code) => RunResult {
            exit_code: process_status(exit_code),
            stdout,
            error: None,
        },
        Err(err) => RunResult {
            exit_code: RUNTIME_ERROR_EXIT_CODE.into(),
            stdout,
            error: Some(err.to_string()),
        },
    })
}

/// Result of checking one fixture
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixtureReport {
    pub path: PathBuf,
    /// Empty when the fixture passed
    pub mismatches: Vec<String>,
}

impl FixtureReport {
    pub fn passed(&self) -> bool {
        self.mismatches.is_empty()
    }
}

/// Compare a run against its expectation, one message per difference
pub fn compare(expected: &Expectation, actual: &RunResult) -> Vec<String> {
    let mut mismatches = Vec::new();

    if let Some(error) = &actual.error {
        if expected.exit_code != actual.exit_code {
            mismatches.push(format!("runtime error: {}", error));
        }
    }
    if expected.exit_code != actual.exit_code {
        mismatches.push(format!(
            "exit code: expected {}, got {}",
            expected.exit_code, actual.exit_code
        ));
    }

    let line_count = expected.stdout.len().max(actual.stdout.len());
    for i in 0..line_count {
        let want = expected.stdout.get(i).map(String::as_str);
        let got = actual.stdout.get(i).map(String::as_str);
        if want != got {
            mismatches.push(format!(
                "line {}: expected {}, got {}",
                i + 1,
                want.unwrap_or("<nothing>"),
                got.unwrap_or("<nothing>")
            ));
        }
    }
    mismatches
}

/// Run one fixture file
pub fn run_fixture(path: &Path) -> Result<FixtureReport, GoldenError> {
    let source = fs::read_to_string(path).map_err(|source| GoldenError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let expected = Expectation::parse(&source)
        .map_err(|value| GoldenError::InvalidExecCode {
            path: path.to_path_buf(),
            value,
        })?
        .ok_or_else(|| GoldenError::MissingExpectation {
            path: path.to_path_buf(),
        })?;

    let mismatches = match run_source(&source) {
        Ok(actual) => compare(&expected, &actual),
        Err(err) => vec![err.to_string()],
    };
    tracing::debug!(path = %path.display(), failed = mismatches.len(), "fixture checked");

    Ok(FixtureReport {
        path: path.to_path_buf(),
        mismatches,
    })
}

/// Totals of a directory run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    pub passed: usize,
    pub total: usize,
}

impl Summary {
    pub fn all_passed(&self) -> bool {
        self.passed == self.total
    }
}

/// Run every `.c` fixture in `dir` in name order, reporting one line per
/// fixture to `out`
pub fn run_directory(dir: &Path, out: &mut impl Write) -> Result<Summary, GoldenError> {
    let io_error = |source| GoldenError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut fixtures: Vec<PathBuf> = fs::read_dir(dir)
        .map_err(io_error)?
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "c"))
        .collect();
    fixtures.sort();

    let mut summary = Summary::default();
    for path in &fixtures {
        let start = Instant::now();
        let report = run_fixture(path)?;
        summary.total += 1;

        if report.passed() {
            summary.passed += 1;
            writeln!(out, "[✓] {} ({:.2?})", path.display(), start.elapsed())
                .map_err(GoldenError::Report)?;
        } else {
            writeln!(out, "[✗] {}", path.display()).map_err(GoldenError::Report)?;
            for mismatch in &report.mismatches {
                writeln!(out, "    {}", mismatch).map_err(GoldenError::Report)?;
            }
        }
    }

    writeln!(out, "\n[✓] Passed {}/{} tests", summary.passed, summary.total)
        .map_err(GoldenError::Report)?;
    Ok(summary)
}
