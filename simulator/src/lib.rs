//! Decoder, disassembler and functional simulator for a LEGv8 subset.
//!
//! Input is a sequence of 32-character binary strings, one instruction each.
//! [`Program`] lays them out in instruction memory, [`disasm::listing`]
//! renders the disassembly and [`Interpreter`] executes them one at a time
//! against an [`ArchState`], producing one [`Snapshot`] per instruction.

pub mod config;
pub mod decoder;
pub mod disasm;
pub mod error;
pub mod event;
pub mod execution;
pub mod memory;
pub mod opcodes;
pub mod program;
pub mod stats;
pub mod util;

pub use config::SimConfig;
pub use decoder::{decode, parse_word, DecodedInstruction, Instruction, Reg};
pub use error::{DecodeError, InterpreterError};
pub use execution::{Interpreter, RunState, SimTrace, Snapshot, Step};
pub use memory::{ArchState, Ram, RegisterFile};
pub use opcodes::{classify, Format, Opcode};
pub use program::{Program, SourceLine};
pub use stats::OpcodeStats;
