//! The fetch/decode/execute loop.
//!
//! [`Interpreter`] owns the registers, the array pool, and the host's
//! stdin/stdout handles. [`Interpreter::run`] drives the machine until it
//! halts, faults, or is interrupted; opcode bodies live in the sibling
//! `alu`, `memory_ops`, and `io` modules, split along the same lines the
//! instruction set groups them (arithmetic/logic, memory, character I/O).

mod alu;
mod io;
mod memory_ops;

use std::io::{Read, Write};

use tracing::trace;

use crate::codec::{self, Instruction, Opcode};
use crate::error::Fault;
use crate::memory::MemoryPool;
use crate::registers::RegisterFile;
use crate::signal;

/// How a [`Interpreter::run`] call ended, for exit-0 outcomes only; every
/// other ending is a [`Fault`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The `halt` opcode executed.
    Halted,
    /// A termination signal was observed between instructions.
    Interrupted,
}

/// The Universal Machine: registers, array pool, and the two I/O handles
/// the `in`/`out` opcodes read and write.
pub struct Interpreter<R, W> {
    registers: RegisterFile,
    memory: MemoryPool,
    input: R,
    output: W,
}

impl<R: Read, W: Write> Interpreter<R, W> {
    /// Builds a machine with `program` loaded into array 0 and the program
    /// counter at offset 0.
    pub fn new(program: Vec<u32>, input: R, output: W) -> Self {
        Self { registers: RegisterFile::default(), memory: MemoryPool::new(program), input, output }
    }

    /// A read-only view of the general-purpose registers, for diagnostics.
    pub fn registers(&self) -> &RegisterFile {
        &self.registers
    }

    /// A read-only view of the array pool, for diagnostics.
    pub fn memory(&self) -> &MemoryPool {
        &self.memory
    }

    /// A read-only view of the output sink, for tests driving the machine
    /// against an in-memory buffer.
    pub fn output(&self) -> &W {
        &self.output
    }

    /// Runs until `halt`, a fault, or a termination signal.
    ///
    /// The program counter is advanced *before* the fetched instruction is
    /// dispatched, so a `load-program` that jumps to the address it was
    /// itself fetched from behaves exactly as if the replaced program had
    /// always been running: nothing about the just-executed instruction is
    /// re-read out of the (possibly now different) array 0.
    pub fn run(&mut self) -> Result<Outcome, Fault> {
        loop {
            if signal::requested() {
                return Ok(Outcome::Interrupted);
            }

            let pc = self.registers.pc();
            if pc as usize >= self.memory.program_len() {
                return Err(Fault::ProgramRanOffEnd);
            }
            let word = self.memory.fetch(pc)?;
            self.registers.advance_pc();

            let instruction = codec::decode(word);
            trace!(pc, word, ?instruction, "fetch");

            if let Some(outcome) = self.dispatch(pc, instruction)? {
                return Ok(outcome);
            }
        }
    }

    /// Executes one decoded instruction. Returns `Some(outcome)` only for
    /// `halt`; every other opcode returns `None` and execution continues.
    fn dispatch(&mut self, pc: u32, instruction: Instruction) -> Result<Option<Outcome>, Fault> {
        let raw_opcode = instruction.raw_opcode();
        let opcode =
            Opcode::try_from(raw_opcode).map_err(|_| Fault::InvalidOpcode { opcode: raw_opcode, pc })?;

        match (opcode, instruction) {
            (Opcode::ConditionalMove, Instruction::Standard { a, b, c, .. }) => {
                self.conditional_move(a, b, c)?
            }
            (Opcode::ArrayIndex, Instruction::Standard { a, b, c, .. }) => self.array_index(a, b, c)?,
            (Opcode::ArrayAmendment, Instruction::Standard { a, b, c, .. }) => {
                self.array_amendment(a, b, c)?
            }
            (Opcode::Addition, Instruction::Standard { a, b, c, .. }) => self.addition(a, b, c)?,
            (Opcode::Multiplication, Instruction::Standard { a, b, c, .. }) => {
                self.multiplication(a, b, c)?
            }
            (Opcode::Division, Instruction::Standard { a, b, c, .. }) => self.division(a, b, c)?,
            (Opcode::NotAnd, Instruction::Standard { a, b, c, .. }) => self.not_and(a, b, c)?,
            (Opcode::Halt, Instruction::Standard { .. }) => return Ok(Some(Outcome::Halted)),
            (Opcode::Allocation, Instruction::Standard { b, c, .. }) => self.allocation(b, c)?,
            (Opcode::Abandonment, Instruction::Standard { c, .. }) => self.abandonment(c)?,
            (Opcode::Output, Instruction::Standard { c, .. }) => self.emit_output(c)?,
            (Opcode::Input, Instruction::Standard { c, .. }) => self.read_input(c)?,
            (Opcode::LoadProgram, Instruction::Standard { b, c, .. }) => self.load_program(b, c)?,
            (Opcode::Orthography, Instruction::Put { a, value }) => self.orthography(a, value)?,
            (_, _) => unreachable!("codec::decode's layout always matches try_from's opcode"),
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn machine(program: Vec<u32>, stdin: &[u8]) -> Interpreter<&[u8], Vec<u8>> {
        Interpreter::new(program, stdin, Vec::new())
    }

    fn standard(opcode: u8, a: u8, b: u8, c: u8) -> u32 {
        codec::encode(Instruction::Standard { opcode, a, b, c })
    }

    fn put(a: u8, value: u32) -> u32 {
        codec::encode(Instruction::Put { a, value })
    }

    #[test]
    fn halts_cleanly() {
        let mut vm = machine(vec![standard(7, 0, 0, 0)], &[]);
        assert_eq!(vm.run().unwrap(), Outcome::Halted);
    }

    #[test]
    fn put_then_output_then_halt() {
        let program = vec![put(0, 65), standard(10, 0, 0, 0), standard(7, 0, 0, 0)];
        let mut vm = machine(program, &[]);
        assert_eq!(vm.run().unwrap(), Outcome::Halted);
        assert_eq!(vm.output(), b"A");
    }

    #[test]
    fn addition_wraps_on_overflow() {
        let program = vec![
            put(1, u32::MAX),
            put(2, 1),
            standard(3, 0, 1, 2), // r0 = r1 + r2
            standard(7, 0, 0, 0),
        ];
        let mut vm = machine(program, &[]);
        vm.run().unwrap();
        assert_eq!(vm.registers.get(0).unwrap(), 0);
    }

    #[test]
    fn division_by_zero_is_a_fault() {
        let program = vec![standard(5, 0, 1, 2)]; // r2 defaults to 0
        let mut vm = machine(program, &[]);
        assert_eq!(vm.run().unwrap_err(), Fault::DivisionByZero);
    }

    #[test]
    fn running_off_the_end_without_halt_is_a_fault() {
        let program = vec![put(0, 1)];
        let mut vm = machine(program, &[]);
        assert_eq!(vm.run().unwrap_err(), Fault::ProgramRanOffEnd);
    }

    #[test]
    fn unknown_opcode_is_a_fault() {
        let word = 0xF000_0000;
        let mut vm = machine(vec![word], &[]);
        assert_eq!(vm.run().unwrap_err(), Fault::InvalidOpcode { opcode: 15, pc: 0 });
    }

    #[test]
    fn input_reports_end_of_input_as_all_ones() {
        let program = vec![standard(11, 0, 0, 0), standard(7, 0, 0, 0)];
        let mut vm = machine(program, &[]);
        vm.run().unwrap();
        assert_eq!(vm.registers.get(0).unwrap(), u32::MAX);
    }

    #[test]
    fn load_program_with_zero_source_is_a_pure_jump() {
        // r1 defaults to 0 (source, the no-copy shortcut); r2 = 3 (target
        // offset), skipping the `put(0, 1)` at offset 2 entirely.
        let program = vec![
            put(2, 3),
            standard(12, 0, 1, 2),
            put(0, 1),
            put(0, 99),
            standard(7, 0, 0, 0),
        ];
        let mut vm = machine(program, &[]);
        vm.run().unwrap();
        assert_eq!(vm.registers.get(0).unwrap(), 99);
    }

    #[test]
    fn load_program_copies_another_array_and_jumps() {
        // If load-program didn't actually replace array 0, running past it
        // would hit this `put` and leave r0 == 99 instead of halting.
        let original = vec![put(0, 99)];
        let mut vm = machine(original, &[]);
        let halt_array = vm.memory.allocate(1);
        vm.memory.write(halt_array, 0, standard(7, 0, 0, 0)).unwrap();
        vm.registers.set(1, halt_array).unwrap();
        vm.registers.set(2, 0).unwrap();
        vm.dispatch(0, Instruction::Standard { opcode: 12, a: 0, b: 1, c: 2 }).unwrap();
        assert_eq!(vm.registers.pc(), 0);
        assert_eq!(vm.run().unwrap(), Outcome::Halted);
    }
}
