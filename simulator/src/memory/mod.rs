//! Architectural state: the register file and the data memory.

mod ram;
mod registers;

pub use ram::{Ram, CELLS_PER_ROW};
pub use registers::{RegisterFile, NUM_REGISTERS, REGISTERS_PER_ROW};

use crate::decoder::Reg;

/// The machine state mutated by the interpreter.
///
/// Both parts persist for the whole run and are only changed by executing
/// instructions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArchState {
    registers: RegisterFile,
    ram: Ram,
}

impl ArchState {
    /// Returns a reference to the register file.
    pub const fn registers(&self) -> &RegisterFile {
        &self.registers
    }

    /// Returns a reference to the data memory.
    pub const fn ram(&self) -> &Ram {
        &self.ram
    }

    pub fn reg(&self, reg: Reg) -> i64 {
        self.registers.get(reg)
    }

    pub fn set_reg(&mut self, reg: Reg, value: i64) {
        self.registers.set(reg, value);
    }

    pub fn load(&self, addr: i64) -> i64 {
        self.ram.read(addr)
    }

    pub fn store(&mut self, addr: i64, value: i64) {
        self.ram.write(addr, value);
    }
}
