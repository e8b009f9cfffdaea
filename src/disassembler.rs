//! Renders packed platters back into assembler source.
//!
//! Unlike assembly, disassembly never fails: a platter whose opcode nibble
//! doesn't name one of the fourteen defined opcodes is still disassembled,
//! as a comment line carrying the raw opcode, so a corrupt or hand-crafted
//! program can still be inspected.

use std::fmt::Write as _;

use crate::codec::{self, Instruction};

/// Disassembles `program` into one line of source per platter.
pub fn disassemble(program: &[u32]) -> String {
    let mut out = String::new();
    for &word in program {
        writeln!(out, "{}", disassemble_one(word)).expect("writing to a String never fails");
    }
    out
}

/// Disassembles a single platter into one line of source, without a
/// trailing newline.
pub fn disassemble_one(word: u32) -> String {
    match codec::decode(word) {
        Instruction::Standard { opcode, a, b, c } => match codec::Opcode::try_from(opcode) {
            Ok(op) => format!("{} {a} {b} {c}", op.mnemonic()),
            Err(_) => format!("# Wrong opcode detected: {opcode}"),
        },
        Instruction::Put { a, value } => format!("put {a} {value}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembler;

    #[test]
    fn disassembles_standard_and_put_instructions() {
        let program = vec![
            codec::encode(Instruction::Put { a: 0, value: 65 }),
            codec::encode(Instruction::Standard { opcode: 10, a: 0, b: 0, c: 0 }),
            codec::encode(Instruction::Standard { opcode: 7, a: 0, b: 0, c: 0 }),
        ];
        let source = disassemble(&program);
        assert_eq!(source, "put 0 65\nout 0 0 0\nhalt 0 0 0\n");
    }

    #[test]
    fn unknown_opcode_becomes_a_comment_instead_of_failing() {
        let word = 0xF000_0000;
        assert_eq!(disassemble_one(word), "# Wrong opcode detected: 15");
    }

    #[test]
    fn assemble_then_disassemble_round_trips_through_source_text() {
        let source = "cmove 1 2 3\nget 0 1 2\nset 0 1 2\nadd 0 1 2\nmult 0 1 2\n\
                      div 0 1 2\nnand 0 1 2\nhalt 0 0 0\nallocate 0 1 2\nfree 0 0 3\n\
                      out 0 0 3\nin 0 0 3\nload 0 1 2\nput 5 12345\n";
        let program = assembler::assemble(source).unwrap();
        let round_tripped = disassemble(&program);
        assert_eq!(round_tripped, source);
    }
}
