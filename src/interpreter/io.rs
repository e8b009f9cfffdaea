//! Character I/O against the host's stdin/stdout.

use std::io::{Read, Write};

use tracing::warn;

use crate::codec::RegId;
use crate::error::Fault;

use super::Interpreter;

const END_OF_INPUT: u32 = u32::MAX;

impl<R: Read, W: Write> Interpreter<R, W> {
    /// Emits `R[c]`'s low byte. A value with bits set above the low byte is
    /// not a fault: the machine writes the low byte and moves on, matching
    /// how existing UM programs and test corpora expect `out` to behave.
    pub(super) fn emit_output(&mut self, c: RegId) -> Result<(), Fault> {
        let value = self.registers.get(c)?;
        if value > 0xFF {
            warn!(value, "output value exceeds one byte; emitting the low byte only");
        }
        self.output.write_all(&[value as u8]).map_err(|e| Fault::Io(format!("stdout write failed: {e}")))
    }

    /// Reads one byte from stdin into `R[c]`, or `u32::MAX` at end of input.
    pub(super) fn read_input(&mut self, c: RegId) -> Result<(), Fault> {
        let mut byte = [0u8; 1];
        let value = match self.input.read(&mut byte) {
            Ok(0) => END_OF_INPUT,
            Ok(_) => byte[0] as u32,
            Err(e) => return Err(Fault::Io(format!("stdin read failed: {e}"))),
        };
        self.registers.set(c, value)
    }
}
