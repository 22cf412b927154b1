//! Disassembly listing.
//!
//! Each line shows the raw bit groups of the instruction's format, the
//! instruction address and the assembly text, separated by tabs:
//!
//! ```text
//! 10001011000 00001 000000 00000 00010	96	ADD	R2, R0, R1
//! ```

use tracing::instrument;

use crate::{
    decoder::{bit_groups, decode, DecodedInstruction},
    error::DecodeError,
    opcodes::{Format, Opcode},
    program::{Program, SourceLine},
};

/// Renders a decoded instruction.
pub fn render(decoded: &DecodedInstruction, address: u64) -> String {
    let groups = decoded
        .fields
        .iter()
        .map(|field| field.bits())
        .collect::<Vec<_>>()
        .join(" ");
    format!("{groups}\t{address}\t{}", decoded.instruction)
}

/// Diagnostic for a line that is not a 32-bit binary string.
pub fn render_malformed(line: &str) -> String {
    format!("{line:.32} Invalid binary string!")
}

/// Diagnostic for a word that matches no opcode.
pub fn render_unknown(word: u32, address: u64) -> String {
    format!(
        "{}\t{address}\tUnknown instruction!",
        bit_groups(word, Format::UNKNOWN)
    )
}

/// Diagnostic for a known opcode with an unrecognized secondary field.
pub fn render_unrecognized(word: u32, opcode: Opcode, value: u32, address: u64) -> String {
    format!(
        "{}\t{address}\t{opcode}\tUnrecognized discriminator {value}!",
        bit_groups(word, opcode.format())
    )
}

/// Renders a word found after `BREAK` as a signed 32-bit data value.
pub fn render_data(word: u32, address: u64) -> String {
    format!("{word:032b}\t{address}\t{}", word as i32)
}

/// Renders the diagnostic line matching `error`.
pub fn render_error(word: u32, error: &DecodeError, address: u64) -> String {
    match error {
        DecodeError::Malformed { line } => render_malformed(line),
        DecodeError::UnknownOpcode { .. } => render_unknown(word, address),
        DecodeError::UnrecognizedDiscriminator { opcode, value } => {
            render_unrecognized(word, *opcode, *value, address)
        }
    }
}

/// Produces the disassembly listing of a program, one line per input line.
///
/// Words following the first `BREAK` are listed as data.
#[instrument(level = "debug", skip_all, fields(lines = program.lines().len()))]
pub fn listing(program: &Program) -> Vec<String> {
    program
        .lines()
        .iter()
        .map(|line| match *line {
            SourceLine::Malformed { ref text } => render_malformed(text),
            SourceLine::Word { address, word } if !program.is_code(address) => {
                render_data(word, address)
            }
            SourceLine::Word { address, word } => match decode(word) {
                Ok(decoded) => render(&decoded, address),
                Err(error) => render_error(word, &error, address),
            },
        })
        .collect()
}
