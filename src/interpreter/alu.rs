//! Arithmetic, logic, and the conditional-move and orthography opcodes.

use std::io::{Read, Write};

use crate::codec::RegId;
use crate::error::Fault;

use super::Interpreter;

impl<R: Read, W: Write> Interpreter<R, W> {
    pub(super) fn conditional_move(&mut self, a: RegId, b: RegId, c: RegId) -> Result<(), Fault> {
        if self.registers.get(c)? != 0 {
            let value = self.registers.get(b)?;
            self.registers.set(a, value)?;
        }
        Ok(())
    }

    pub(super) fn addition(&mut self, a: RegId, b: RegId, c: RegId) -> Result<(), Fault> {
        let result = self.registers.get(b)?.wrapping_add(self.registers.get(c)?);
        self.registers.set(a, result)
    }

    pub(super) fn multiplication(&mut self, a: RegId, b: RegId, c: RegId) -> Result<(), Fault> {
        let result = self.registers.get(b)?.wrapping_mul(self.registers.get(c)?);
        self.registers.set(a, result)
    }

    pub(super) fn division(&mut self, a: RegId, b: RegId, c: RegId) -> Result<(), Fault> {
        let divisor = self.registers.get(c)?;
        if divisor == 0 {
            return Err(Fault::DivisionByZero);
        }
        let dividend = self.registers.get(b)?;
        self.registers.set(a, dividend / divisor)
    }

    pub(super) fn not_and(&mut self, a: RegId, b: RegId, c: RegId) -> Result<(), Fault> {
        let result = !(self.registers.get(b)? & self.registers.get(c)?);
        self.registers.set(a, result)
    }

    pub(super) fn orthography(&mut self, a: RegId, value: u32) -> Result<(), Fault> {
        self.registers.set(a, value)
    }
}
