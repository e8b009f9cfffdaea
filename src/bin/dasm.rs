//! The disassembler binary: renders packed platters back into source.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::error;

use um::disassembler;

/// Disassemble a Universal Machine program into source text.
#[derive(Debug, Parser)]
#[command(name = "dasm", about = "Universal Machine disassembler")]
struct Args {
    /// Path to a program file: a sequence of big-endian 32-bit platters.
    program: PathBuf,

    /// Output path for the disassembled source.
    #[arg(default_value = "output.uma")]
    output: PathBuf,

    /// Increase log verbosity (repeatable: -v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

const ERR_INVALID_INPUT_FILE: u8 = 3;
const ERR_INVALID_OUTPUT_FILE: u8 = 4;

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    let bytes = match fs::read(&args.program) {
        Ok(bytes) => bytes,
        Err(e) => {
            error!(path = %args.program.display(), error = %e, "cannot read input file");
            return ExitCode::from(ERR_INVALID_INPUT_FILE);
        }
    };

    if bytes.len() % 4 != 0 {
        error!(size = bytes.len(), "input file's size seems invalid");
        return ExitCode::from(ERR_INVALID_INPUT_FILE);
    }

    let program: Vec<u32> =
        bytes.chunks_exact(4).map(|w| u32::from_be_bytes([w[0], w[1], w[2], w[3]])).collect();
    let source = disassembler::disassemble(&program);

    if let Err(e) = fs::write(&args.output, source) {
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
