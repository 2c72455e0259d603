//! Runtime error types for the MiniC interpreter
//!
//! This module defines [`RuntimeError`], which represents all errors that can occur
//! during program execution (as opposed to parse or typing errors).
//!
//! All runtime errors are fatal: MiniC has no way to catch them, so they halt
//! execution and propagate to the driver. Output printed before the failure
//! stays printed.

use crate::parser::ast::SourceLocation;

/// Runtime errors that can occur during execution
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    /// Operand or operator kinds are incompatible, or a coercion does not exist
    #[error("Type mismatch at {location}: {message}")]
    TypeMismatch {
        message: String,
        location: SourceLocation,
    },

    /// Integer or float division or modulus by zero
    #[error("Division by zero in '{op}' at {location}")]
    DivisionByZero {
        op: &'static str,
        location: SourceLocation,
    },

    /// Reference to a name with no binding (a malformed tree)
    #[error("Undefined variable '{name}' at {location}")]
    UndefinedVariable {
        name: String,
        location: SourceLocation,
    },

    /// Main function not found
    #[error("No main() function found")]
    NoMainFunction,

    /// The output sink rejected a write
    #[error("Failed to write program output: {0}")]
    Output(#[from] std::io::Error),
}

impl RuntimeError {
    pub fn location(&self) -> Option<&SourceLocation> {
        match self {
            RuntimeError::TypeMismatch { location, .. }
            | RuntimeError::DivisionByZero { location, .. }
            | RuntimeError::UndefinedVariable { location, .. } => Some(location),
            RuntimeError::NoMainFunction | RuntimeError::Output(_) => None,
        }
    }

    pub(crate) fn type_mismatch(message: impl Into<String>, location: SourceLocation) -> Self {
        RuntimeError::TypeMismatch {
            message: message.into(),
            location,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_location() {
        let err = RuntimeError::DivisionByZero {
            op: "/",
            location: SourceLocation::new(4, 17),
        };
        assert_eq!(
            err.to_string(),
            "Division by zero in '/' at line 4, column 17"
        );
        assert_eq!(err.location(), Some(&SourceLocation::new(4, 17)));
    }

    #[test]
    fn test_no_main_has_no_location() {
        assert!(RuntimeError::NoMainFunction.location().is_none());
    }
}
