//! Optional `memdump.txt` snapshot written by `um` on abnormal termination.
//!
//! Format is informative only — nothing in this crate parses a memdump back
//! in, so there is no round-trip obligation on its shape.

use std::fmt::Write as _;
use std::io;

use crate::memory::MemoryPool;
use crate::registers::RegisterFile;

/// Renders registers and every live array's contents into the memdump text.
pub fn render(registers: &RegisterFile, memory: &MemoryPool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "registers: {:?}", registers.snapshot());
    let _ = writeln!(out, "pc: {:#010x}", registers.pc());
    for (id, contents) in memory.dump() {
        match contents {
            Some(platters) => {
                let _ = writeln!(out, "array {id} ({} platters): {platters:?}", platters.len());
            }
            None => {
                let _ = writeln!(out, "array {id}: freed");
            }
        }
    }
    out
}

/// Writes the memdump to `path`.
pub fn write_to(path: &std::path::Path, registers: &RegisterFile, memory: &MemoryPool) -> io::Result<()> {
    std::fs::write(path, render(registers, memory))
}
