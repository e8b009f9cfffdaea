//! Line-oriented assembler: one instruction per line, `#` comments, blank
//! lines ignored.
//!
//! Syntax is `mnemonic a b c` for the twelve three-register opcodes, `halt`
//! (no operands), and `put a value` for the orthography opcode. Parsing is
//! fail-fast: the first malformed line aborts assembly with a line number
//! attached, rather than collecting every error in the file.

use thiserror::Error;

use crate::codec::{self, Instruction, Opcode};

/// Why a source line failed to assemble.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AssemblyError {
    #[error("line {line}: unknown operation '{mnemonic}'")]
    UnknownMnemonic { line: usize, mnemonic: String },

    #[error("line {line}: wrong number of arguments")]
    WrongArgumentCount { line: usize },

    #[error("line {line}: '{token}' is not a valid register number")]
    InvalidRegister { line: usize, token: String },

    #[error("line {line}: register number {value} is out of range (registers are 0-7)")]
    RegisterOutOfRange { line: usize, value: u32 },

    #[error("line {line}: value {value} exceeds the 25-bit immediate range")]
    ValueOutOfRange { line: usize, value: u32 },

    #[error("line {line}: '{token}' is not a valid immediate value")]
    InvalidValue { line: usize, token: String },
}

/// Assembles `source` into packed platters, one per non-comment,
/// non-blank line, in order.
pub fn assemble(source: &str) -> Result<Vec<u32>, AssemblyError> {
    let mut program = Vec::new();
    for (index, line) in source.lines().enumerate() {
        let line_number = index + 1;
        if let Some(instruction) = parse_line(line, line_number)? {
            program.push(codec::encode(instruction));
        }
    }
    Ok(program)
}

fn parse_line(line: &str, line_number: usize) -> Result<Option<Instruction>, AssemblyError> {
    let line = line.split('#').next().unwrap_or("");
    let mut tokens = line.split_whitespace();

    let Some(mnemonic) = tokens.next() else { return Ok(None) };

    let opcode = Opcode::from_mnemonic(mnemonic)
        .ok_or_else(|| AssemblyError::UnknownMnemonic { line: line_number, mnemonic: mnemonic.to_string() })?;

    if opcode.is_orthography() {
        let (a_token, value_token) = two_tokens(&mut tokens, line_number)?;
        let a = parse_register(a_token, line_number)?;
        let value = parse_u32(value_token, line_number)?;
        if value > codec::MAX_PUT_VALUE {
            return Err(AssemblyError::ValueOutOfRange { line: line_number, value });
        }
        Ok(Some(Instruction::Put { a, value }))
    } else {
        let (a_token, b_token, c_token) = three_tokens(&mut tokens, line_number)?;
        let a = parse_register(a_token, line_number)?;
        let b = parse_register(b_token, line_number)?;
        let c = parse_register(c_token, line_number)?;
        Ok(Some(Instruction::Standard { opcode: opcode as u8, a, b, c }))
    }
}

fn two_tokens<'a>(
    tokens: &mut impl Iterator<Item = &'a str>,
    line: usize,
) -> Result<(&'a str, &'a str), AssemblyError> {
    let a = tokens.next().ok_or(AssemblyError::WrongArgumentCount { line })?;
    let b = tokens.next().ok_or(AssemblyError::WrongArgumentCount { line })?;
    if tokens.next().is_some() {
        return Err(AssemblyError::WrongArgumentCount { line });
    }
    Ok((a, b))
}

fn three_tokens<'a>(
    tokens: &mut impl Iterator<Item = &'a str>,
    line: usize,
) -> Result<(&'a str, &'a str, &'a str), AssemblyError> {
    let a = tokens.next().ok_or(AssemblyError::WrongArgumentCount { line })?;
    let b = tokens.next().ok_or(AssemblyError::WrongArgumentCount { line })?;
    let c = tokens.next().ok_or(AssemblyError::WrongArgumentCount { line })?;
    if tokens.next().is_some() {
        return Err(AssemblyError::WrongArgumentCount { line });
    }
    Ok((a, b, c))
}

fn parse_u32(token: &str, line: usize) -> Result<u32, AssemblyError> {
    token
        .parse::<u32>()
        .map_err(|_| AssemblyError::InvalidValue { line, token: token.to_string() })
}

fn parse_register(token: &str, line: usize) -> Result<codec::RegId, AssemblyError> {
    let value = token
        .parse::<u32>()
        .map_err(|_| AssemblyError::InvalidRegister { line, token: token.to_string() })?;
    if value >= 8 {
        return Err(AssemblyError::RegisterOutOfRange { line, value });
    }
    Ok(value as codec::RegId)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assembles_a_small_program() {
        let source = "put 0 65\nout 0 0 0\nhalt 0 0 0\n";
        let program = assemble(source).unwrap();
        assert_eq!(program.len(), 3);
        assert_eq!(codec::decode(program[0]), Instruction::Put { a: 0, value: 65 });
        assert_eq!(
            codec::decode(program[1]),
            Instruction::Standard { opcode: 10, a: 0, b: 0, c: 0 }
        );
    }

    #[test]
    fn ignores_comments_and_blank_lines() {
        let source = "# a comment\n\nhalt 0 0 0 # trailing comment\n   \n";
        let program = assemble(source).unwrap();
        assert_eq!(program.len(), 1);
    }

    #[test]
    fn rejects_unknown_mnemonic() {
        let err = assemble("frobnicate 0 0 0\n").unwrap_err();
        assert_eq!(err, AssemblyError::UnknownMnemonic { line: 1, mnemonic: "frobnicate".into() });
    }

    #[test]
    fn rejects_wrong_argument_count() {
        let err = assemble("add 0 1\n").unwrap_err();
        assert_eq!(err, AssemblyError::WrongArgumentCount { line: 1 });
    }

    #[test]
    fn rejects_out_of_range_register() {
        let err = assemble("add 0 1 8\n").unwrap_err();
        assert_eq!(err, AssemblyError::RegisterOutOfRange { line: 1, value: 8 });
    }

    #[test]
    fn rejects_out_of_range_put_value() {
        let err = assemble("put 0 33554432\n").unwrap_err();
        assert_eq!(err, AssemblyError::ValueOutOfRange { line: 1, value: 33554432 });
    }

    #[test]
    fn line_numbers_are_one_based_and_count_every_source_line() {
        let err = assemble("halt 0 0 0\nfrobnicate 0 0 0\n").unwrap_err();
        assert_eq!(err, AssemblyError::UnknownMnemonic { line: 2, mnemonic: "frobnicate".into() });
    }
}
