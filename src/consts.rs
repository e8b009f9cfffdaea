//! VM parameters

/// Number of program-visible general-purpose registers.
pub const REGISTER_COUNT: usize = 8;

/// Identifier permanently bound to the program array.
pub const PROGRAM_ARRAY: u32 = 0;

/// Number of defined opcodes (0..=13). Anything at or above this is invalid.
pub const OPCODE_COUNT: u8 = 14;

/// Width, in bits, of the `put` instruction's immediate field.
pub const PUT_VALUE_BITS: u32 = 25;
