//! The simulation trace: one state snapshot per executed instruction.

use std::fmt;

use crate::{
    decoder::Instruction,
    error::DecodeError,
    event::ExecEvent,
    memory::{ArchState, RegisterFile, CELLS_PER_ROW},
    stats::OpcodeStats,
};

/// Line written before every snapshot.
pub const SNAPSHOT_SEPARATOR: &str = "====================";

type MemoryRow = (i64, [i64; CELLS_PER_ROW as usize]);

/// Copy of the architectural state right after an instruction executed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub cycle: u64,
    pub address: u64,
    pub instruction: Instruction,
    pub registers: RegisterFile,
    pub memory: Vec<MemoryRow>,
}

impl Snapshot {
    /// Captures `state` without modifying it.
    pub fn capture(cycle: u64, address: u64, instruction: Instruction, state: &ArchState) -> Self {
        Self {
            cycle,
            address,
            instruction,
            registers: state.registers().clone(),
            memory: state.ram().rows(),
        }
    }
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{SNAPSHOT_SEPARATOR}")?;
        writeln!(f, "cycle:{}\t{}\t{}", self.cycle, self.address, self.instruction)?;
        writeln!(f)?;

        writeln!(f, "registers:")?;
        for (first, values) in self.registers.rows() {
            write!(f, "r{first:02}:")?;
            for value in values {
                write!(f, "\t{value}")?;
            }
            writeln!(f)?;
        }
        writeln!(f)?;

        writeln!(f, "data:")?;
        for (base, values) in &self.memory {
            write!(f, "{base}:")?;
            for value in values {
                write!(f, "\t{value}")?;
            }
            writeln!(f)?;
        }
        writeln!(f)
    }
}

/// Everything recorded during a run.
#[derive(Debug, Default)]
pub struct SimTrace {
    pub events: Vec<ExecEvent>,
    pub snapshots: Vec<Snapshot>,
    /// Words that could not be decoded, with their address.
    pub skipped: Vec<(u64, DecodeError)>,
    pub stats: OpcodeStats,
}

impl SimTrace {
    /// Number of executed instructions.
    pub fn cycles(&self) -> usize {
        self.snapshots.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::{AluOp, Reg};

    #[test]
    fn test_snapshot_format() {
        let mut state = ArchState::default();
        state.set_reg(Reg::new(1), 5);
        state.set_reg(Reg::new(31), -1);
        state.store(100, 7);

        let instruction = Instruction::Alu {
            op: AluOp::Add,
            rd: Reg::new(2),
            rn: Reg::new(0),
            rm: Reg::new(1),
        };
        let snapshot = Snapshot::capture(3, 104, instruction, &state);

        let expected = "====================\n\
                        cycle:3\t104\tADD\tR2, R0, R1\n\
                        \n\
                        registers:\n\
                        r00:\t0\t5\t0\t0\t0\t0\t0\t0\n\
                        r08:\t0\t0\t0\t0\t0\t0\t0\t0\n\
                        r16:\t0\t0\t0\t0\t0\t0\t0\t0\n\
                        r24:\t0\t0\t0\t0\t0\t0\t0\t-1\n\
                        \n\
                        data:\n\
                        96:\t0\t0\t0\t0\t7\t0\t0\t0\n\
                        \n";
        assert_eq!(snapshot.to_string(), expected);
    }

    #[test]
    fn test_capture_does_not_mutate_state() {
        let mut state = ArchState::default();
        state.store(8, 1);
        let before = state.clone();

        let _ = Snapshot::capture(1, 96, Instruction::Nop, &state);

        assert_eq!(state, before);
    }
}
