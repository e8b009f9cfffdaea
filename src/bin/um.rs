//! The interpreter binary: loads a program file and runs it to completion.

use std::fs;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};

use um::diagnostics;
use um::error::Fault;
use um::interpreter::{Interpreter, Outcome};

/// Run a Universal Machine program.
#[derive(Debug, Parser)]
#[command(name = "um", about = "Universal Machine interpreter")]
struct Args {
    /// Path to a program file: a sequence of big-endian 32-bit platters.
    program: PathBuf,

    /// Write a memdump.txt snapshot if the machine faults.
    #[arg(long)]
    dump_on_fault: bool,

    /// Increase log verbosity (repeatable: -v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);
    um::signal::install();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(fault) => {
            error!(%fault, "um terminated abnormally");
            let code = fault.exit_code() as u8;
            ExitCode::from(code)
        }
    }
}

fn run(args: &Args) -> Result<(), Fault> {
    let program = load_program(&args.program)?;
    let mut vm = Interpreter::new(program, io::stdin().lock(), io::stdout());

    let outcome = vm.run();
    match &outcome {
        Ok(Outcome::Halted) => info!("halted"),
        Ok(Outcome::Interrupted) => info!("interrupted by signal"),
        Err(fault) if args.dump_on_fault => {
            let path = PathBuf::from("memdump.txt");
            if let Err(io_err) = diagnostics::write_to(&path, vm.registers(), vm.memory()) {
                error!(%io_err, "failed to write memdump.txt");
            } else {
                info!(path = %path.display(), "wrote fault snapshot");
            }
            return Err(fault.clone());
        }
        Err(_) => {}
    }
    outcome.map(|_| ())
}

fn load_program(path: &std::path::Path) -> Result<Vec<u32>, Fault> {
    let bytes = fs::read(path).map_err(|e| Fault::InvalidProgramFile {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    if bytes.len() % 4 != 0 {
        return Err(Fault::InvalidProgramFile {
            path: path.display().to_string(),
            reason: format!("file size {} is not a multiple of 4 bytes", bytes.len()),
        });
    }
    Ok(bytes.chunks_exact(4).map(|w| u32::from_be_bytes([w[0], w[1], w[2], w[3]])).collect())
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();
}
