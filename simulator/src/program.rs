//! Program images built from the input lines.

use tracing::warn;

use crate::{
    decoder::parse_word,
    execution::INSTRUCTION_SIZE,
    opcodes::{classify, Opcode},
};

/// One input line, after parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceLine {
    /// Not a 32-bit binary string. Malformed lines take no address.
    Malformed { text: String },
    /// A well-formed word and the address it was loaded at.
    Word { address: u64, word: u32 },
}

/// The instruction memory: every well-formed input word, laid out from the
/// base address in steps of [`INSTRUCTION_SIZE`].
///
/// Code ends with the first `BREAK`. Words after it are data: they keep their
/// addresses but are never fetched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    base_address: u64,
    words: Vec<u32>,
    lines: Vec<SourceLine>,
    /// Index of the first `BREAK` word.
    first_break: Option<usize>,
}

impl Program {
    /// An empty image starting at `base_address`.
    pub fn new(base_address: u64) -> Self {
        Self {
            base_address,
            ..Self::default()
        }
    }

    pub fn from_lines<I, S>(lines: I, base_address: u64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut program = Self::new(base_address);
        for line in lines {
            program.push_line(line.as_ref());
        }
        program
    }

    /// Appends one input line to the image.
    pub fn push_line(&mut self, line: &str) {
        match parse_word(line) {
            Ok(word) => {
                let address = self.end_address();
                if self.first_break.is_none() && classify(word).0 == Some(Opcode::Break) {
                    self.first_break = Some(self.words.len());
                }
                self.words.push(word);
                self.lines.push(SourceLine::Word { address, word });
            }
            Err(error) => {
                warn!(%error, "rejecting input line");
                self.lines.push(SourceLine::Malformed {
                    text: line.trim().to_string(),
                });
            }
        }
    }

    pub const fn base_address(&self) -> u64 {
        self.base_address
    }

    /// Address just past the last word. Addresses wrap around at `u64::MAX`.
    pub fn end_address(&self) -> u64 {
        self.address_of(self.words.len())
    }

    fn address_of(&self, index: usize) -> u64 {
        self.base_address
            .wrapping_add((index as u64).wrapping_mul(INSTRUCTION_SIZE))
    }

    /// Number of words up to and including the first `BREAK`, or all words if
    /// there is none.
    pub fn code_len(&self) -> usize {
        self.first_break.map_or(self.words.len(), |index| index + 1)
    }

    /// Whether `address` holds an instruction rather than a data word.
    pub fn is_code(&self, address: u64) -> bool {
        self.index_of(address).is_some_and(|index| index < self.code_len())
    }

    /// Number of well-formed words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// All input lines in order, malformed ones included.
    pub fn lines(&self) -> &[SourceLine] {
        &self.lines
    }

    fn index_of(&self, address: u64) -> Option<usize> {
        let offset = address.wrapping_sub(self.base_address);
        if offset % INSTRUCTION_SIZE != 0 {
            return None;
        }
        usize::try_from(offset / INSTRUCTION_SIZE)
            .ok()
            .filter(|&index| index < self.words.len())
    }

    /// Returns the instruction at `address`, or `None` if the address is not
    /// word aligned or falls outside the code.
    pub fn fetch(&self, address: u64) -> Option<u32> {
        let index = self.index_of(address)?;
        self.words[..self.code_len()].get(index).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_lines_take_no_address() {
        let program = Program::from_lines(
            [
                "00000000000000000000000000000000",
                "0000000000000000000000000000000",
                "000000000000000000000000000000001",
                "  11111110110111101111111111100111  ",
            ],
            96,
        );

        assert_eq!(program.len(), 2);
        assert_eq!(program.lines().len(), 4);
        assert_eq!(
            program.lines()[3],
            SourceLine::Word {
                address: 100,
                word: 0xfede_ffe7
            }
        );
        assert_eq!(program.end_address(), 104);
    }

    #[test]
    fn test_fetch() {
        let program = Program::from_lines(["00000000000000000000000000000000"; 3], 96);
        assert_eq!(program.fetch(96), Some(0));
        assert_eq!(program.fetch(104), Some(0));
        assert_eq!(program.fetch(108), None);
        assert_eq!(program.fetch(98), None);
        assert_eq!(program.fetch(92), None);
    }

    #[test]
    fn test_code_ends_at_first_break() {
        let program = Program::from_lines(
            [
                "00000000000000000000000000000000",
                "11111110110111101111111111100111",
                "10010001000000000001010000100001",
                "11111110110111101111111111100111",
            ],
            96,
        );

        assert_eq!(program.len(), 4);
        assert_eq!(program.code_len(), 2);
        assert_eq!(program.fetch(100), Some(0xfede_ffe7));
        assert_eq!(program.fetch(104), None);
        assert_eq!(program.fetch(108), None);
        assert!(program.is_code(100));
        assert!(!program.is_code(104));
    }

    #[test]
    fn test_addresses_wrap_near_the_top_of_memory() {
        let base = u64::MAX - 3;
        let program = Program::from_lines(["00000000000000000000000000000000"; 2], base);

        assert_eq!(
            program.lines()[1],
            SourceLine::Word {
                address: 0,
                word: 0
            }
        );
        assert_eq!(program.end_address(), 4);
        assert_eq!(program.fetch(base), Some(0));
        assert_eq!(program.fetch(0), Some(0));
        assert_eq!(program.fetch(4), None);
        assert_eq!(program.fetch(base - 4), None);
    }
}
