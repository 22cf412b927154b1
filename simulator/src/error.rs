//! Error types for decoding and simulation.

use thiserror::Error;

use crate::opcodes::Opcode;

/// Errors raised while turning an input line into a decoded instruction.
///
/// None of these are fatal to a run: the offending line is reported in the
/// disassembly listing and simulation moves on to the next instruction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The line is not exactly 32 characters of `0`/`1`.
    #[error("invalid binary string: {line:?}")]
    Malformed { line: String },

    /// No entry of the opcode table matches the word.
    #[error("unknown instruction {word:#034b}")]
    UnknownOpcode { word: u32 },

    /// The opcode is known but its secondary discriminator field is not.
    #[error("unrecognized discriminator {value:#b} for {opcode}")]
    UnrecognizedDiscriminator { opcode: Opcode, value: u32 },
}

/// Errors that stop the interpreter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InterpreterError {
    #[error("cycle limit of {limit} executed instructions exceeded")]
    CycleLimitExceeded { limit: u64 },
}
