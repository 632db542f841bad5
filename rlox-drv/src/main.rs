//! `rlox`: REPL / single-file entry point for the bytecode VM.
//!
//! Exit codes: 0 success, 64 usage error, 65 compile error, 70 runtime
//! error, 74 file-read error.

mod config;

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use rlox_util::diagnostic::Handler;
use rlox_util::error::RloxError;
use rlox_vm::{interpret, InterpretResult, Vm};

use config::RunConfig;

const EXIT_USAGE: u8 = 64;
const EXIT_COMPILE_ERROR: u8 = 65;
const EXIT_RUNTIME_ERROR: u8 = 70;
const EXIT_IO_ERROR: u8 = 74;

/// A bytecode compiler and VM for a small Lox-family expression language.
#[derive(Parser, Debug)]
#[command(name = "rlox", version, about)]
struct Cli {
    /// Script to run. Omit to start a REPL; more than one is a usage error.
    scripts: Vec<PathBuf>,

    /// Log the stack and next instruction before each dispatch step.
    #[arg(long, env = "RLOX_TRACE_EXECUTION")]
    trace_execution: bool,

    /// Disassemble each chunk immediately after compiling it.
    #[arg(long, env = "RLOX_PRINT_CODE")]
    print_code: bool,

    /// Disable ANSI color in diagnostics.
    #[arg(long, env = "RLOX_NO_COLOR")]
    no_color: bool,

    /// Path to a `rlox.toml` config file. Defaults to `./rlox.toml` if present.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::from(EXIT_IO_ERROR);
        }
    };
    init_logging(config.no_color);

    let mut vm = Vm::new();
    let handler = Handler::new();

    let result = match cli.scripts.as_slice() {
        [] => run_repl(&mut vm, &handler, &config),
        [path] => run_file(&mut vm, &handler, path, &config),
        _ => {
            eprintln!("Usage: rlox [script]");
            return ExitCode::from(EXIT_USAGE);
        }
    };

    match result {
        Ok(status) => status,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::from(EXIT_IO_ERROR)
        }
    }
}

fn init_logging(no_color: bool) {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_ansi(!no_color)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> Result<RunConfig, RloxError> {
    let base = match &cli.config {
        Some(path) => RunConfig::from_file(path)?,
        None => {
            let default_path = PathBuf::from("rlox.toml");
            if default_path.exists() {
                RunConfig::from_file(&default_path)?
            } else {
                RunConfig::default()
            }
        }
    };
    Ok(base.merge_flags(cli.trace_execution, cli.print_code, cli.no_color))
}

fn run_file(
    vm: &mut Vm,
    handler: &Handler,
    path: &Path,
    config: &RunConfig,
) -> Result<ExitCode, RloxError> {
    let source = std::fs::read_to_string(path).map_err(|source| RloxError::ReadScript {
        path: path.display().to_string(),
        source,
    })?;
    let status = match interpret(vm, &source, handler, config.print_code, config.trace_execution) {
        InterpretResult::Ok => ExitCode::SUCCESS,
        InterpretResult::CompileError => ExitCode::from(EXIT_COMPILE_ERROR),
        InterpretResult::RuntimeError => ExitCode::from(EXIT_RUNTIME_ERROR),
    };
    Ok(status)
}

fn run_repl(vm: &mut Vm, handler: &Handler, config: &RunConfig) -> Result<ExitCode, RloxError> {
    let stdin = std::io::stdin();
    loop {
        print!("> ");
        std::io::stdout().flush().ok();

        let mut line = String::new();
        let bytes_read = stdin.read_line(&mut line).unwrap_or(0);
        if bytes_read == 0 {
            break;
        }

        interpret(vm, &line, handler, config.print_code, config.trace_execution);
    }
    Ok(ExitCode::SUCCESS)
}
