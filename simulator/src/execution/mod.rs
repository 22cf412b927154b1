pub(crate) mod emulator;
pub(crate) mod trace;

pub use emulator::{Interpreter, RunState, Step, INSTRUCTION_SIZE};
pub use trace::{SimTrace, Snapshot, SNAPSHOT_SEPARATOR};
