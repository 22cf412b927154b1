use strum::{EnumCount, IntoEnumIterator};
use tracing::info;

use crate::opcodes::Opcode;

/// Number of executed instructions per opcode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpcodeStats {
    counts: [u64; Opcode::COUNT],
}

impl Default for OpcodeStats {
    fn default() -> Self {
        Self {
            counts: [0; Opcode::COUNT],
        }
    }
}

impl OpcodeStats {
    pub fn record(&mut self, opcode: Opcode) {
        self.counts[opcode as usize] += 1;
    }

    pub fn count(&self, opcode: Opcode) -> u64 {
        self.counts[opcode as usize]
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Opcodes that executed at least once, with their counts.
    pub fn executed(&self) -> impl Iterator<Item = (Opcode, u64)> + '_ {
        Opcode::iter()
            .map(|opcode| (opcode, self.count(opcode)))
            .filter(|&(_, count)| count > 0)
    }

    pub fn log_summary(&self) {
        for (opcode, count) in self.executed() {
            info!(%opcode, count, "executed");
        }
        info!(total = self.total(), "instructions executed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_and_count() {
        let mut stats = OpcodeStats::default();
        stats.record(Opcode::Add);
        stats.record(Opcode::Add);
        stats.record(Opcode::Break);

        assert_eq!(stats.count(Opcode::Add), 2);
        assert_eq!(stats.count(Opcode::Sub), 0);
        assert_eq!(stats.total(), 3);
        assert_eq!(
            stats.executed().collect::<Vec<_>>(),
            vec![(Opcode::Add, 2), (Opcode::Break, 1)]
        );
    }
}
