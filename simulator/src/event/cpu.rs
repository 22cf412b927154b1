use tracing::info;

use super::{context::EventContext, Event};

/// Event for NOP: only advances the PC.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NopEvent {
    pub pc: u64,
    pub cycle: u64,
}

impl Event for NopEvent {
    type Args = ();

    fn generate(ctx: &mut EventContext<'_>, (): Self::Args) -> Self {
        let event = Self {
            pc: ctx.pc,
            cycle: ctx.cycle,
        };
        ctx.incr_pc();
        event
    }
}

/// Event for BREAK: halts the interpreter. The PC is left on the BREAK.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreakEvent {
    pub pc: u64,
    pub cycle: u64,
}

impl Event for BreakEvent {
    type Args = ();

    fn generate(ctx: &mut EventContext<'_>, (): Self::Args) -> Self {
        info!(pc = ctx.pc, cycle = ctx.cycle, "BREAK reached, halting");
        ctx.halt();
        Self {
            pc: ctx.pc,
            cycle: ctx.cycle,
        }
    }
}
