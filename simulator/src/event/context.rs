use std::ops::{Deref, DerefMut};

use crate::{decoder::Reg, execution::Interpreter, memory::ArchState};

/// Everything an event may read or mutate while it executes.
pub struct EventContext<'a> {
    pub interpreter: &'a mut Interpreter,
    pub state: &'a mut ArchState,
}

impl<'a> EventContext<'a> {
    pub fn new(interpreter: &'a mut Interpreter, state: &'a mut ArchState) -> Self {
        Self { interpreter, state }
    }

    pub fn load_reg(&self, reg: Reg) -> i64 {
        self.state.reg(reg)
    }

    pub fn store_reg(&mut self, reg: Reg, value: i64) {
        self.state.set_reg(reg, value);
    }

    pub fn load_ram(&self, addr: i64) -> i64 {
        self.state.load(addr)
    }

    pub fn store_ram(&mut self, addr: i64, value: i64) {
        self.state.store(addr, value);
    }

    /// Address of the instruction `offset` words away from the current one.
    pub fn branch_target(&self, offset: i64) -> u64 {
        self.interpreter.pc.wrapping_add_signed(offset.wrapping_mul(4))
    }
}

impl Deref for EventContext<'_> {
    type Target = Interpreter;

    fn deref(&self) -> &Self::Target {
        self.interpreter
    }
}

impl DerefMut for EventContext<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.interpreter
    }
}
