//! Run configuration.

/// Byte address of the first instruction of a program.
pub const DEFAULT_BASE_ADDRESS: u64 = 96;

/// Default bound on the number of executed instructions.
pub const DEFAULT_MAX_CYCLES: u64 = 100_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimConfig {
    /// Address a [`Program`](crate::Program) is laid out at when loaded
    /// from input lines. The interpreter starts at the program's own base.
    pub base_address: u64,
    /// Maximum number of instructions to execute before giving up, or `None`
    /// to run until `BREAK` or the end of the program.
    pub max_cycles: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            base_address: DEFAULT_BASE_ADDRESS,
            max_cycles: Some(DEFAULT_MAX_CYCLES),
        }
    }
}

impl SimConfig {
    pub const fn with_base_address(mut self, base_address: u64) -> Self {
        self.base_address = base_address;
        self
    }

    pub const fn with_max_cycles(mut self, max_cycles: Option<u64>) -> Self {
        self.max_cycles = max_cycles;
        self
    }
}
