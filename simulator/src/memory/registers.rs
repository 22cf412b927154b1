use std::ops::{Index, IndexMut};

use crate::decoder::Reg;

pub const NUM_REGISTERS: usize = 32;

/// Registers shown per row of a trace snapshot.
pub const REGISTERS_PER_ROW: usize = 8;

/// The 32 general purpose registers, zero-initialized.
///
/// There is no hardwired zero register: `R31` is read and written like any
/// other slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterFile([i64; NUM_REGISTERS]);

impl Default for RegisterFile {
    fn default() -> Self {
        Self([0; NUM_REGISTERS])
    }
}

impl RegisterFile {
    pub fn get(&self, reg: Reg) -> i64 {
        self.0[reg.index()]
    }

    pub fn set(&mut self, reg: Reg, value: i64) {
        self.0[reg.index()] = value;
    }

    /// Iterates over `(first register index, values)` rows.
    pub fn rows(&self) -> impl Iterator<Item = (usize, &[i64])> {
        self.0
            .chunks(REGISTERS_PER_ROW)
            .enumerate()
            .map(|(row, values)| (row * REGISTERS_PER_ROW, values))
    }
}

impl Index<Reg> for RegisterFile {
    type Output = i64;

    fn index(&self, reg: Reg) -> &Self::Output {
        &self.0[reg.index()]
    }
}

impl IndexMut<Reg> for RegisterFile {
    fn index_mut(&mut self, reg: Reg) -> &mut Self::Output {
        &mut self.0[reg.index()]
    }
}
