//! Eight general-purpose registers plus a hidden program counter.

use crate::consts::REGISTER_COUNT;
use crate::error::Fault;

/// Register state: `R0..R7` plus the engine-only program counter.
#[derive(Debug, Clone, Default)]
pub struct RegisterFile {
    general: [u32; REGISTER_COUNT],
    pc: u32,
}

impl RegisterFile {
    /// Reads `R[index]`. Fails if `index` isn't in `[0, 8)`.
    pub fn get(&self, index: u8) -> Result<u32, Fault> {
        self.general
            .get(index as usize)
            .copied()
            .ok_or(Fault::InvalidRegisterAccess { index: index as u32 })
    }

    /// Writes `R[index] := value`. Fails if `index` isn't in `[0, 8)`.
    pub fn set(&mut self, index: u8, value: u32) -> Result<(), Fault> {
        let slot = self
            .general
            .get_mut(index as usize)
            .ok_or(Fault::InvalidRegisterAccess { index: index as u32 })?;
        *slot = value;
        Ok(())
    }

    /// The program counter, indexing the program array.
    pub const fn pc(&self) -> u32 {
        self.pc
    }

    /// Overwrites the program counter directly (used by `load-program`).
    pub fn set_pc(&mut self, value: u32) {
        self.pc = value;
    }

    /// Advances the program counter by one platter, returning the offset it
    /// pointed at before advancing (the instruction just fetched).
    pub fn advance_pc(&mut self) -> u32 {
        let fetched_at = self.pc;
        self.pc = self.pc.wrapping_add(1);
        fetched_at
    }

    /// A read-only snapshot of `R0..R7`, for diagnostics.
    pub const fn snapshot(&self) -> [u32; REGISTER_COUNT] {
        self.general
    }
}
