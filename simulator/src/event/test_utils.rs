use crate::{
    config::{SimConfig, DEFAULT_BASE_ADDRESS},
    decoder::Reg,
    event::context::EventContext,
    execution::Interpreter,
    memory::ArchState,
};

/// Test environment for simplified instruction testing
pub struct TestEnv {
    pub interpreter: Interpreter,
    pub state: ArchState,
}

impl TestEnv {
    pub fn new() -> Self {
        let mut interpreter = Interpreter::new(SimConfig::default());
        interpreter.pc = DEFAULT_BASE_ADDRESS;
        Self {
            interpreter,
            state: ArchState::default(),
        }
    }

    pub fn ctx(&mut self) -> EventContext<'_> {
        EventContext::new(&mut self.interpreter, &mut self.state)
    }

    pub fn pc(&self) -> u64 {
        self.interpreter.pc
    }

    // Helper to set a register
    pub fn set_reg(&mut self, index: u8, value: i64) {
        self.state.set_reg(Reg::new(index), value);
    }

    // Helper to get a register
    pub fn reg(&self, index: u8) -> i64 {
        self.state.reg(Reg::new(index))
    }
}
