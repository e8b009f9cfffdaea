//! Array indexing, amendment, allocation, abandonment, and `load-program`.

use std::io::{Read, Write};

use tracing::debug;

use crate::codec::RegId;
use crate::error::Fault;

use super::Interpreter;

impl<R: Read, W: Write> Interpreter<R, W> {
    pub(super) fn array_index(&mut self, a: RegId, b: RegId, c: RegId) -> Result<(), Fault> {
        let array = self.registers.get(b)?;
        let offset = self.registers.get(c)?;
        let value = self.memory.read(array, offset)?;
        self.registers.set(a, value)
    }

    pub(super) fn array_amendment(&mut self, a: RegId, b: RegId, c: RegId) -> Result<(), Fault> {
        let array = self.registers.get(a)?;
        let offset = self.registers.get(b)?;
        let value = self.registers.get(c)?;
        self.memory.write(array, offset, value)
    }

    pub(super) fn allocation(&mut self, b: RegId, c: RegId) -> Result<(), Fault> {
        let size = self.registers.get(c)?;
        let id = self.memory.allocate(size);
        self.registers.set(b, id)
    }

    pub(super) fn abandonment(&mut self, c: RegId) -> Result<(), Fault> {
        let id = self.registers.get(c)?;
        self.memory.abandon(id)
    }

    /// Replaces the program array with a copy of array `b` and jumps to
    /// offset `c`. `b == 0` is the no-copy shortcut: the running program is
    /// already its own source, so only the jump happens.
    pub(super) fn load_program(&mut self, b: RegId, c: RegId) -> Result<(), Fault> {
        let source = self.registers.get(b)?;
        let target = self.registers.get(c)?;
        debug!(source, target, "load-program");
        self.memory.replace_program(source)?;
        self.registers.set_pc(target);
        Ok(())
    }
}
