// minic: run, check and golden-test MiniC programs

use clap::{Parser as ClapParser, Subcommand};
use minic::golden;
use minic::interpreter::constants::{FRONTEND_ERROR_EXIT_CODE, RUNTIME_ERROR_EXIT_CODE};
use minic::interpreter::engine::Interpreter;
use std::fs;
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};
use std::process;

#[derive(ClapParser)]
#[command(
    name = "minic",
    about = "MiniC: interpreter for a scalar subset of C",
    version = env!("CARGO_PKG_VERSION"),
    long_about = None
)]
struct Cli {
    /// Log interpreter progress to stderr (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
#[command(arg_required_else_help = true)]
enum Commands {
    /// Parse, type-check and execute a MiniC file
    Run {
        /// Path to the .c file
        file: PathBuf,
    },

    /// Parse and type-check a MiniC file without running it
    Check {
        /// Path to the .c file
        file: PathBuf,
    },

    /// Run every .c fixture in a directory against its EXPECTED block
    Test {
        /// Directory holding the fixtures
        #[arg(default_value = "tests/programs")]
        dir: PathBuf,
    },
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("minic=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(io::stderr)
                .with_target(true)
                .with_level(true),
        )
        .with(filter)
        .init();
}

fn read_source(file: &Path) -> String {
    fs::read_to_string(file).unwrap_or_else(|e| {
        eprintln!("Error: cannot read '{}': {}", file.display(), e);
        process::exit(FRONTEND_ERROR_EXIT_CODE);
    })
}

fn compile_or_exit(file: &Path) -> minic::parser::ast::Program {
    let source = read_source(file);
    minic::compile(&source).unwrap_or_else(|e| {
        eprintln!("{}: {}", file.display(), e);
        process::exit(FRONTEND_ERROR_EXIT_CODE);
    })
}

fn run(file: &Path) -> i32 {
    let program = compile_or_exit(file);
    let stdout = io::stdout();
    let mut interpreter = Interpreter::new(program, BufWriter::new(stdout.lock()));

    match interpreter.run() {
        // Truncated like a C exit status
        Ok(code) => code as i32,
        Err(e) => {
            eprintln!("Runtime error: {}", e);
            RUNTIME_ERROR_EXIT_CODE
        }
    }
}

fn check(file: &Path) -> i32 {
    compile_or_exit(file);
    eprintln!("{}: ok", file.display());
    0
}

fn test(dir: &Path) -> i32 {
    let stdout = io::stdout();
    match golden::run_directory(dir, &mut stdout.lock()) {
        Ok(summary) if summary.all_passed() => 0,
        Ok(_) => 1,
        Err(e) => {
            eprintln!("Error: {}", e);
            FRONTEND_ERROR_EXIT_CODE
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let code = match cli.command {
        Commands::Run { file } => run(&file),
        Commands::Check { file } => check(&file),
        Commands::Test { dir } => test(&dir),
    };
    process::exit(code);
}
