//! Runtime fault taxonomy.
//!
//! Every VM-internal error is a distinct [`Fault`] variant with its own
//! stable exit code (see [`Fault::exit_code`]). There is no recovery: a
//! fault always terminates the machine.

use thiserror::Error;

/// A fatal, exit-code-bearing VM error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Fault {
    /// The `um` binary was invoked without a program path.
    #[error("missing program file argument")]
    MissingArguments,

    /// The program file could not be read, or its size isn't a multiple of 4.
    #[error("invalid program file {path}: {reason}")]
    InvalidProgramFile { path: String, reason: String },

    /// Dispatch encountered an opcode `>= 14`.
    #[error("invalid opcode {opcode} at pc={pc:#06x}")]
    InvalidOpcode { opcode: u8, pc: u32 },

    /// A register index fell outside `[0, 8)`.
    #[error("invalid register access: index {index}")]
    InvalidRegisterAccess { index: u32 },

    /// An array read, write, abandon, or load-program targeted an
    /// out-of-bounds offset or an inactive identifier.
    #[error("invalid memory access: {0}")]
    InvalidMemoryAccess(String),

    /// `div` was executed with a zero divisor.
    #[error("division by zero")]
    DivisionByZero,

    /// The host allocator could not satisfy an allocation request.
    #[error("out of memory")]
    OutOfMemory,

    /// The program counter reached the end of array 0 without a `halt`.
    #[error("program execution reached the end of the program array without halting")]
    ProgramRanOffEnd,

    /// The codec was asked to encode an opcode that isn't one of the
    /// fourteen defined opcodes.
    #[error("cannot encode unknown opcode {0}")]
    InvalidOpcodeEncoding(u8),

    /// A host I/O operation (reading stdin or writing stdout) failed for a
    /// reason other than ordinary end-of-file.
    #[error("I/O failure: {0}")]
    Io(String),
}

impl Fault {
    /// The process exit code this fault should produce. Stable per binary,
    /// and distinct across all variants.
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::MissingArguments => 2,
            Self::InvalidProgramFile { .. } => 3,
            Self::InvalidOpcode { .. } => 4,
            Self::InvalidRegisterAccess { .. } => 5,
            Self::InvalidMemoryAccess(_) => 6,
            Self::DivisionByZero => 7,
            Self::OutOfMemory => 8,
            Self::ProgramRanOffEnd => 9,
            Self::InvalidOpcodeEncoding(_) => 10,
            Self::Io(_) => 11,
        }
    }
}

/// Result of an operation that can fail with a [`Fault`].
pub type FaultResult<T> = Result<T, Fault>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_pairwise_distinct() {
        let variants = [
            Fault::MissingArguments,
            Fault::InvalidProgramFile { path: String::new(), reason: String::new() },
            Fault::InvalidOpcode { opcode: 0, pc: 0 },
            Fault::InvalidRegisterAccess { index: 0 },
            Fault::InvalidMemoryAccess(String::new()),
            Fault::DivisionByZero,
            Fault::OutOfMemory,
            Fault::ProgramRanOffEnd,
            Fault::InvalidOpcodeEncoding(0),
            Fault::Io(String::new()),
        ];
        for (i, a) in variants.iter().enumerate() {
            for (j, b) in variants.iter().enumerate() {
                if i != j {
                    assert_ne!(a.exit_code(), b.exit_code(), "{a:?} and {b:?} share an exit code");
                }
            }
        }
    }
}
