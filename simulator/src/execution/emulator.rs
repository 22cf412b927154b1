//! The interpreter: fetches, decodes and executes one instruction at a time.

use tracing::{debug, instrument, trace, warn};

use super::trace::{SimTrace, Snapshot};
use crate::{
    config::SimConfig,
    decoder::decode,
    error::{DecodeError, InterpreterError},
    event::{EventContext, ExecEvent},
    memory::ArchState,
    program::Program,
};

/// Size in bytes of an instruction word.
pub const INSTRUCTION_SIZE: u64 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// Nothing fetched yet. The first step loads the program counter from
    /// the program's base address.
    Ready,
    Running,
    /// Terminal: set by `BREAK`, nothing is fetched afterwards.
    Halted,
}

/// Outcome of a single [`Interpreter::step`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// An instruction was executed.
    Executed {
        event: ExecEvent,
        snapshot: Box<Snapshot>,
    },
    /// The word at `address` could not be decoded. Nothing was mutated and
    /// the program counter moved on to the next word.
    Skipped { address: u64, error: DecodeError },
    /// The interpreter is halted or the program counter left the code.
    Finished,
}

#[derive(Debug)]
pub struct Interpreter {
    pub(crate) pc: u64,
    /// Number of the next instruction to execute, starting at 1.
    pub(crate) cycle: u64,
    run_state: RunState,
    config: SimConfig,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new(SimConfig::default())
    }
}

impl Interpreter {
    pub const fn new(config: SimConfig) -> Self {
        Self {
            pc: 0,
            cycle: 1,
            run_state: RunState::Ready,
            config,
        }
    }

    pub const fn pc(&self) -> u64 {
        self.pc
    }

    pub const fn cycle(&self) -> u64 {
        self.cycle
    }

    pub const fn run_state(&self) -> RunState {
        self.run_state
    }

    pub const fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn is_halted(&self) -> bool {
        self.run_state == RunState::Halted
    }

    pub(crate) fn incr_pc(&mut self) {
        self.pc = self.pc.wrapping_add(INSTRUCTION_SIZE);
    }

    pub(crate) fn jump_to(&mut self, target: u64) {
        self.pc = target;
    }

    pub(crate) fn halt(&mut self) {
        self.run_state = RunState::Halted;
    }

    /// Fetches, decodes and executes the instruction at the program counter.
    ///
    /// The first call starts at `program.base_address()`.
    pub fn step(
        &mut self,
        program: &Program,
        state: &mut ArchState,
    ) -> Result<Step, InterpreterError> {
        match self.run_state {
            RunState::Halted => return Ok(Step::Finished),
            RunState::Ready => {
                self.pc = program.base_address();
                self.run_state = RunState::Running;
            }
            RunState::Running => {}
        }
        let Some(word) = program.fetch(self.pc) else {
            debug!(pc = self.pc, "program counter left the code");
            return Ok(Step::Finished);
        };

        let address = self.pc;
        let decoded = match decode(word) {
            Ok(decoded) => decoded,
            Err(error) => {
                warn!(address, %error, "skipping undecodable instruction");
                self.incr_pc();
                return Ok(Step::Skipped { address, error });
            }
        };

        if let Some(limit) = self.config.max_cycles {
            if self.cycle > limit {
                return Err(InterpreterError::CycleLimitExceeded { limit });
            }
        }

        trace!(cycle = self.cycle, pc = address, opcode = %decoded.opcode(), "execute");
        let cycle = self.cycle;
        let event = decoded
            .instruction
            .generate_event(&mut EventContext::new(self, state));
        let snapshot = Snapshot::capture(cycle, address, decoded.instruction, state);
        self.cycle += 1;

        Ok(Step::Executed {
            event,
            snapshot: Box::new(snapshot),
        })
    }

    /// Runs until `BREAK` or until the program counter leaves the code.
    #[instrument(level = "debug", skip_all, fields(words = program.len()))]
    pub fn run(
        &mut self,
        program: &Program,
        state: &mut ArchState,
    ) -> Result<SimTrace, InterpreterError> {
        let mut trace = SimTrace::default();
        loop {
            match self.step(program, state)? {
                Step::Executed { event, snapshot } => {
                    trace.stats.record(snapshot.instruction.opcode());
                    trace.events.push(event);
                    trace.snapshots.push(*snapshot);
                }
                Step::Skipped { address, error } => trace.skipped.push((address, error)),
                Step::Finished => break,
            }
        }
        debug!(
            cycles = trace.cycles(),
            halted = self.is_halted(),
            "run finished"
        );
        Ok(trace)
    }
}
