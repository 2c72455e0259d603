// Process exit codes used by the driver and the golden runner

/// Exit code for a program stopped by a runtime error
pub const RUNTIME_ERROR_EXIT_CODE: i32 = 1;

/// Exit code for lexer, parser, typing and usage errors
pub const FRONTEND_ERROR_EXIT_CODE: i32 = 2;
