//! The opcode table of the supported LEGv8 subset.
//!
//! Every opcode is identified by a bit-pattern prefix of the instruction
//! word. The prefix length depends on the instruction format, so the table is
//! split into one map per prefix length and classification walks those maps in
//! a fixed format order. The two whole-word literals (`NOP` and `BREAK`) are
//! matched against the full instruction before any prefix is tried.

use ahash::AHashMap;
use once_cell::sync::Lazy;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumCount, EnumIter, EnumString, IntoStaticStr};

/// Width of an instruction word in bits.
pub const WORD_BITS: u32 = 32;

/// Prefix lengths in the order classification tries them: the 11-bit
/// `R`/`SHIFT`/`D` opcodes, then `I`, `IM`, `CB` and finally `B`.
const PREFIX_DISPATCH_ORDER: [u32; 5] = [11, 10, 9, 8, 6];

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    EnumCount,
    EnumIter,
    EnumString,
    IntoStaticStr,
    Display,
)]
#[strum(serialize_all = "UPPERCASE")]
pub enum Opcode {
    // Register-register ALU
    And,
    Add,
    Orr,
    Sub,
    Eor,

    // Register-immediate ALU
    Addi,
    Subi,

    // Shift by immediate
    Lsr,
    Lsl,
    Asr,

    // Load / store
    Stur,
    Ldur,

    // Control flow
    B,
    Cbz,
    Cbnz,

    // Move wide
    Movz,
    Movk,

    Nop,
    Break,
}

/// Instruction format family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[allow(clippy::upper_case_acronyms)]
pub enum Format {
    B,
    CB,
    R,
    I,
    IM,
    SHIFT,
    D,
    NOP,
    BREAK,
    UNKNOWN,
}

impl Format {
    /// Field widths of the format, most significant field first.
    ///
    /// Every layout partitions the 32-bit word: no gaps, no overlap.
    pub const fn layout(self) -> &'static [u32] {
        match self {
            Format::R | Format::SHIFT => &[11, 5, 6, 5, 5],
            Format::I => &[10, 12, 5, 5],
            Format::D => &[11, 9, 2, 5, 5],
            Format::B => &[6, 26],
            Format::CB => &[8, 19, 5],
            Format::IM => &[9, 2, 16, 5],
            Format::NOP => &[32],
            Format::BREAK => &[1, 5, 5, 5, 5, 5, 6],
            Format::UNKNOWN => &[8, 3, 5, 5, 5, 6],
        }
    }
}

impl Opcode {
    /// Returns the bit pattern identifying this opcode and its length.
    ///
    /// For prefix opcodes the pattern is right-aligned, i.e. it is compared
    /// against `word >> (32 - len)`.
    pub const fn pattern(self) -> (u32, u32) {
        match self {
            Opcode::B => (0b000101, 6),
            Opcode::And => (0b10001010000, 11),
            Opcode::Add => (0b10001011000, 11),
            Opcode::Addi => (0b1001000100, 10),
            Opcode::Orr => (0b10101010000, 11),
            Opcode::Cbz => (0b10110100, 8),
            Opcode::Cbnz => (0b10110101, 8),
            Opcode::Sub => (0b11001011000, 11),
            Opcode::Subi => (0b1101000100, 10),
            Opcode::Movz => (0b110100101, 9),
            Opcode::Movk => (0b111100101, 9),
            Opcode::Lsr => (0b11010011010, 11),
            Opcode::Lsl => (0b11010011011, 11),
            Opcode::Stur => (0b11111000000, 11),
            Opcode::Ldur => (0b11111000010, 11),
            Opcode::Asr => (0b11010011100, 11),
            Opcode::Eor => (0b11101010000, 11),
            Opcode::Nop => (0, WORD_BITS),
            Opcode::Break => (0b11111110110111101111111111100111, WORD_BITS),
        }
    }

    pub const fn format(self) -> Format {
        match self {
            Opcode::And | Opcode::Add | Opcode::Orr | Opcode::Sub | Opcode::Eor => Format::R,
            Opcode::Addi | Opcode::Subi => Format::I,
            Opcode::Lsr | Opcode::Lsl | Opcode::Asr => Format::SHIFT,
            Opcode::Stur | Opcode::Ldur => Format::D,
            Opcode::B => Format::B,
            Opcode::Cbz | Opcode::Cbnz => Format::CB,
            Opcode::Movz | Opcode::Movk => Format::IM,
            Opcode::Nop => Format::NOP,
            Opcode::Break => Format::BREAK,
        }
    }

    pub fn mnemonic(self) -> &'static str {
        self.into()
    }
}

/// Opcodes keyed by prefixes of a single length.
#[derive(Debug)]
struct PrefixTable {
    len: u32,
    entries: AHashMap<u32, Opcode>,
}

/// Lookup structure built once from [`Opcode::pattern`].
#[derive(Debug)]
struct OpcodeTable {
    literals: AHashMap<u32, Opcode>,
    prefixes: Vec<PrefixTable>,
}

impl OpcodeTable {
    fn build() -> Self {
        let mut literals = AHashMap::new();
        let mut prefixes: Vec<PrefixTable> = PREFIX_DISPATCH_ORDER
            .iter()
            .map(|&len| PrefixTable {
                len,
                entries: AHashMap::new(),
            })
            .collect();

        for opcode in Opcode::iter() {
            let (pattern, len) = opcode.pattern();
            if len == WORD_BITS {
                literals.insert(pattern, opcode);
                continue;
            }
            if let Some(table) = prefixes.iter_mut().find(|t| t.len == len) {
                table.entries.insert(pattern, opcode);
            }
        }

        Self { literals, prefixes }
    }

    /// Finds the opcode of `word`, or `None` if nothing in the table matches.
    fn classify(&self, word: u32) -> Option<Opcode> {
        if let Some(&opcode) = self.literals.get(&word) {
            return Some(opcode);
        }
        self.prefixes
            .iter()
            .find_map(|table| table.entries.get(&(word >> (WORD_BITS - table.len))))
            .copied()
    }
}

static OPCODE_TABLE: Lazy<OpcodeTable> = Lazy::new(OpcodeTable::build);

/// Classifies an instruction word into its opcode and format.
///
/// Words that match no entry are reported with [`Format::UNKNOWN`].
pub fn classify(word: u32) -> (Option<Opcode>, Format) {
    let opcode = OPCODE_TABLE.classify(word);
    let format = opcode.map_or(Format::UNKNOWN, Opcode::format);
    (opcode, format)
}
