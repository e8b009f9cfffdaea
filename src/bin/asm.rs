//! The assembler binary: turns line-oriented source into packed platters.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::error;

use um::assembler;

/// Assemble Universal Machine source into a program file.
#[derive(Debug, Parser)]
#[command(name = "asm", about = "Universal Machine assembler")]
struct Args {
    /// Path to an assembly source file.
    source: PathBuf,

    /// Output path for the assembled program.
    #[arg(default_value = "output.umz")]
    output: PathBuf,

    /// Increase log verbosity (repeatable: -v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

const ERR_INVALID_INPUT_FILE: u8 = 3;
const ERR_INVALID_OUTPUT_FILE: u8 = 4;
const ERR_COMPILATION_FAILED: u8 = 5;

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    let source = match fs::read_to_string(&args.source) {
        Ok(source) => source,
        Err(e) => {
            error!(path = %args.source.display(), error = %e, "cannot read input file");
            return ExitCode::from(ERR_INVALID_INPUT_FILE);
        }
    };

    let program = match assembler::assemble(&source) {
        Ok(program) => program,
        Err(e) => {
            error!(%e, "compilation failed");
            return ExitCode::from(ERR_COMPILATION_FAILED);
        }
    };

    let bytes: Vec<u8> = program.iter().flat_map(|word| word.to_be_bytes()).collect();
    if let Err(e) = fs::write(&args.output, bytes) {
        error!(path = %args.output.display(), error = %e, "cannot write output file");
        return ExitCode::from(ERR_INVALID_OUTPUT_FILE);
    }

    ExitCode::SUCCESS
}

fn init_logging(verbosity: u8) {
    let level = if verbosity == 0 { "warn" } else { "debug" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}
