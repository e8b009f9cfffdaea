//! Instruction codec.
//!
//! A platter is a discriminated union over two layouts, selected by its top
//! 4 bits. Opcodes `0..=12` use the "standard" layout
//! (`[op:4][unused:19][a:3][b:3][c:3]`), opcode 13 ("orthography", `put`)
//! uses `[op:4][a:3][value:25]`. This module is the only place that knows
//! about the bit layout; everything else in the crate works with
//! [`Instruction`] and [`Opcode`] values.

use std::fmt;

use crate::consts::PUT_VALUE_BITS;

/// A register index, in `[0, 8)` by construction (it is read from a 3-bit field).
pub type RegId = u8;

/// The inclusive upper bound of a `put` immediate: `2^25 - 1`.
pub const MAX_PUT_VALUE: u32 = (1 << PUT_VALUE_BITS) - 1;

const PUT_OPCODE: u8 = 13;

/// A decoded instruction, in one of the UM's two layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Instruction {
    /// Three-register form used by opcodes `0..=12`.
    Standard { opcode: u8, a: RegId, b: RegId, c: RegId },
    /// `put a, value` (opcode 13): sets `a` to a 25-bit zero-extended immediate.
    Put { a: RegId, value: u32 },
}

impl Instruction {
    /// The raw opcode nibble this instruction carries.
    pub const fn raw_opcode(&self) -> u8 {
        match self {
            Self::Standard { opcode, .. } => *opcode,
            Self::Put { .. } => PUT_OPCODE,
        }
    }
}

/// Decodes a packed platter into its logical fields.
///
/// Opcodes `>= 14` are still decoded using the standard layout; callers must
/// check [`Opcode::try_from`] against the resulting [`Instruction::raw_opcode`]
/// before dispatch — decoding itself never fails.
pub fn decode(word: u32) -> Instruction {
    let opcode = ((word >> 28) & 0xF) as u8;
    if opcode == PUT_OPCODE {
        let a = ((word >> 25) & 0x7) as RegId;
        let value = word & MAX_PUT_VALUE;
        Instruction::Put { a, value }
    } else {
        let a = ((word >> 6) & 0x7) as RegId;
        let b = ((word >> 3) & 0x7) as RegId;
        let c = (word & 0x7) as RegId;
        Instruction::Standard { opcode, a, b, c }
    }
}

/// Encodes a logical instruction back into its packed platter.
///
/// # Panics
///
/// Panics if a [`Instruction::Standard`] carries an opcode `> 12`. Only the
/// assembler constructs [`Instruction`] values directly, and it guarantees
/// well-formedness before calling this function.
pub fn encode(instruction: Instruction) -> u32 {
    match instruction {
        Instruction::Standard { opcode, a, b, c } => {
            assert!(opcode <= 12, "opcode {opcode} is not a standard-form opcode");
            ((opcode as u32) << 28) | ((a as u32) << 6) | ((b as u32) << 3) | (c as u32)
        }
        Instruction::Put { a, value } => {
            assert!(value <= MAX_PUT_VALUE, "put value {value} exceeds 25 bits");
            ((PUT_OPCODE as u32) << 28) | ((a as u32) << 25) | value
        }
    }
}

/// The fourteen defined opcodes, in mnemonic order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Opcode {
    ConditionalMove = 0,
    ArrayIndex = 1,
    ArrayAmendment = 2,
    Addition = 3,
    Multiplication = 4,
    Division = 5,
    NotAnd = 6,
    Halt = 7,
    Allocation = 8,
    Abandonment = 9,
    Output = 10,
    Input = 11,
    LoadProgram = 12,
    Orthography = 13,
}

/// A raw opcode byte does not name one of the fourteen defined opcodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidOpcode(pub u8);

impl fmt::Display for InvalidOpcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid opcode {}", self.0)
    }
}

impl std::error::Error for InvalidOpcode {}

impl TryFrom<u8> for Opcode {
    type Error = InvalidOpcode;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        use Opcode::*;
        Ok(match value {
            0 => ConditionalMove,
            1 => ArrayIndex,
            2 => ArrayAmendment,
            3 => Addition,
            4 => Multiplication,
            5 => Division,
            6 => NotAnd,
            7 => Halt,
            8 => Allocation,
            9 => Abandonment,
            10 => Output,
            11 => Input,
            12 => LoadProgram,
            13 => Orthography,
            other => return Err(InvalidOpcode(other)),
        })
    }
}

impl Opcode {
    /// The assembler/disassembler mnemonic for this opcode.
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::ConditionalMove => "cmove",
            Self::ArrayIndex => "get",
            Self::ArrayAmendment => "set",
            Self::Addition => "add",
            Self::Multiplication => "mult",
            Self::Division => "div",
            Self::NotAnd => "nand",
            Self::Halt => "halt",
            Self::Allocation => "allocate",
            Self::Abandonment => "free",
            Self::Output => "out",
            Self::Input => "in",
            Self::LoadProgram => "load",
            Self::Orthography => "put",
        }
    }

    /// Looks up an opcode by its assembler mnemonic.
    pub fn from_mnemonic(mnemonic: &str) -> Option<Self> {
        use Opcode::*;
        Some(match mnemonic {
            "cmove" => ConditionalMove,
            "get" => ArrayIndex,
            "set" => ArrayAmendment,
            "add" => Addition,
            "mult" => Multiplication,
            "div" => Division,
            "nand" => NotAnd,
            "halt" => Halt,
            "allocate" => Allocation,
            "free" => Abandonment,
            "out" => Output,
            "in" => Input,
            "load" => LoadProgram,
            "put" => Orthography,
            _ => return None,
        })
    }

    /// True for opcode 13, the only variable-layout opcode.
    pub const fn is_orthography(self) -> bool {
        matches!(self, Self::Orthography)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::quickcheck;

    #[test]
    fn decodes_standard_layout() {
        // op=3 (add), a=1, b=2, c=3
        let word = (3u32 << 28) | (1 << 6) | (2 << 3) | 3;
        assert_eq!(
            decode(word),
            Instruction::Standard { opcode: 3, a: 1, b: 2, c: 3 }
        );
    }

    #[test]
    fn decodes_put_layout() {
        // op=13, a=5, value=42
        let word = (13u32 << 28) | (5 << 25) | 42;
        assert_eq!(decode(word), Instruction::Put { a: 5, value: 42 });
    }

    #[test]
    fn unknown_opcode_still_decodes_as_standard() {
        let word = 0xF000_0000;
        assert!(matches!(decode(word), Instruction::Standard { opcode: 15, .. }));
        assert!(Opcode::try_from(15u8).is_err());
    }

    #[test]
    fn encode_decode_round_trip_example() {
        let instr = Instruction::Standard { opcode: 6, a: 7, b: 0, c: 4 };
        assert_eq!(decode(encode(instr)), instr);
    }

    #[quickcheck]
    fn round_trips_any_standard_instruction(opcode: u8, a: u8, b: u8, c: u8) -> bool {
        let opcode = opcode % 13; // 0..=12
        let a = a & 0x7;
        let b = b & 0x7;
        let c = c & 0x7;
        let instr = Instruction::Standard { opcode, a, b, c };
        decode(encode(instr)) == instr
    }

    #[quickcheck]
    fn round_trips_any_put_instruction(a: u8, value: u32) -> bool {
        let a = a & 0x7;
        let value = value & MAX_PUT_VALUE;
        let instr = Instruction::Put { a, value };
        decode(encode(instr)) == instr
    }

    #[test]
    fn mnemonics_cover_every_opcode() {
        for raw in 0..14u8 {
            let opcode = Opcode::try_from(raw).unwrap();
            assert_eq!(Opcode::from_mnemonic(opcode.mnemonic()), Some(opcode));
        }
    }
}
