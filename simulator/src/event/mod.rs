//! Defines execution events for the simulator.
//!
//! Each instruction executed by the interpreter results in an event, which
//! records the operands it read and the state changes it made. Generating an
//! event is what executes the instruction: it mutates the registers, the data
//! memory and the program counter through an [`EventContext`].

use tracing::instrument;

use crate::decoder::Instruction;

pub(crate) mod branch;
pub(crate) mod context;
pub(crate) mod cpu;
pub(crate) mod integer_ops;
pub(crate) mod mv;
pub(crate) mod ram;
pub(crate) mod shift;

#[cfg(test)]
pub(crate) mod test_utils;

pub use self::{
    branch::{BranchEvent, CondBranchEvent},
    context::EventContext,
    cpu::{BreakEvent, NopEvent},
    integer_ops::{AluEvent, AluImmEvent},
    mv::MoveEvent,
    ram::MemEvent,
    shift::ShiftEvent,
};

/// An `Event` represents an instruction executed by the interpreter.
///
/// This trait is implemented by every instruction family of the instruction
/// set.
pub trait Event: Sized {
    /// Decoded operands the event needs.
    type Args;

    /// Executes the instruction against `ctx` and returns the record of what
    /// it did. Every implementation either advances or redirects the program
    /// counter, or halts the interpreter.
    fn generate(ctx: &mut EventContext<'_>, args: Self::Args) -> Self;
}

/// Any executed instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecEvent {
    Alu(AluEvent),
    AluImm(AluImmEvent),
    Shift(ShiftEvent),
    Mem(MemEvent),
    Branch(BranchEvent),
    CondBranch(CondBranchEvent),
    Move(MoveEvent),
    Nop(NopEvent),
    Break(BreakEvent),
}

macro_rules! impl_from_event {
    ($($variant:ident => $event:ty),* $(,)?) => {
        $(
            impl From<$event> for ExecEvent {
                fn from(event: $event) -> Self {
                    ExecEvent::$variant(event)
                }
            }
        )*
    };
}

impl_from_event!(
    Alu => AluEvent,
    AluImm => AluImmEvent,
    Shift => ShiftEvent,
    Mem => MemEvent,
    Branch => BranchEvent,
    CondBranch => CondBranchEvent,
    Move => MoveEvent,
    Nop => NopEvent,
    Break => BreakEvent,
);

impl ExecEvent {
    /// Address of the instruction that produced the event.
    pub const fn pc(&self) -> u64 {
        match self {
            ExecEvent::Alu(e) => e.pc,
            ExecEvent::AluImm(e) => e.pc,
            ExecEvent::Shift(e) => e.pc,
            ExecEvent::Mem(e) => e.pc,
            ExecEvent::Branch(e) => e.pc,
            ExecEvent::CondBranch(e) => e.pc,
            ExecEvent::Move(e) => e.pc,
            ExecEvent::Nop(e) => e.pc,
            ExecEvent::Break(e) => e.pc,
        }
    }

    pub const fn cycle(&self) -> u64 {
        match self {
            ExecEvent::Alu(e) => e.cycle,
            ExecEvent::AluImm(e) => e.cycle,
            ExecEvent::Shift(e) => e.cycle,
            ExecEvent::Mem(e) => e.cycle,
            ExecEvent::Branch(e) => e.cycle,
            ExecEvent::CondBranch(e) => e.cycle,
            ExecEvent::Move(e) => e.cycle,
            ExecEvent::Nop(e) => e.cycle,
            ExecEvent::Break(e) => e.cycle,
        }
    }
}

impl Instruction {
    /// Executes the instruction by generating its event.
    #[instrument(level = "trace", skip(ctx), fields(pc = ctx.pc, cycle = ctx.cycle))]
    pub(crate) fn generate_event(self, ctx: &mut EventContext<'_>) -> ExecEvent {
        match self {
            Instruction::Alu { op, rd, rn, rm } => AluEvent::generate(ctx, (op, rd, rn, rm)).into(),
            Instruction::AluImm { op, rd, rn, imm } => {
                AluImmEvent::generate(ctx, (op, rd, rn, imm)).into()
            }
            Instruction::Shift { op, rd, rn, shamt } => {
                ShiftEvent::generate(ctx, (op, rd, rn, shamt)).into()
            }
            Instruction::Mem { op, rt, rn, offset } => {
                MemEvent::generate(ctx, (op, rt, rn, offset)).into()
            }
            Instruction::Branch { offset } => BranchEvent::generate(ctx, offset).into(),
            Instruction::CondBranch { op, rt, offset } => {
                CondBranchEvent::generate(ctx, (op, rt, offset)).into()
            }
            Instruction::Move { op, rd, imm, shift } => {
                MoveEvent::generate(ctx, (op, rd, imm, shift)).into()
            }
            Instruction::Nop => NopEvent::generate(ctx, ()).into(),
            Instruction::Break => BreakEvent::generate(ctx, ()).into(),
        }
    }
}
