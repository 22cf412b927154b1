use tracing::debug;

use super::{context::EventContext, Event};
use crate::decoder::{CondOp, Reg};

/// Event for B.
///
/// Logic:
///   1. PC = PC + offset * 4
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchEvent {
    pub pc: u64,
    pub cycle: u64,
    pub offset: i64,
    pub target: u64,
}

impl Event for BranchEvent {
    type Args = i64;

    fn generate(ctx: &mut EventContext<'_>, offset: Self::Args) -> Self {
        let target = ctx.branch_target(offset);
        let event = Self {
            pc: ctx.pc,
            cycle: ctx.cycle,
            offset,
            target,
        };
        debug!(from = event.pc, to = target, "branch");
        ctx.jump_to(target);
        event
    }
}

/// Event for CBZ and CBNZ.
///
/// Logic:
///   1. if R[rt] == 0 (CBZ) or R[rt] != 0 (CBNZ), then PC = PC + offset * 4
///   2. otherwise PC = PC + 4
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CondBranchEvent {
    pub pc: u64,
    pub cycle: u64,
    pub op: CondOp,
    pub rt: Reg,
    pub rt_val: i64,
    pub offset: i64,
    pub target: u64,
    pub taken: bool,
}

impl CondBranchEvent {
    pub const fn is_taken(op: CondOp, val: i64) -> bool {
        match op {
            CondOp::Cbz => val == 0,
            CondOp::Cbnz => val != 0,
        }
    }
}

impl Event for CondBranchEvent {
    type Args = (CondOp, Reg, i64);

    fn generate(ctx: &mut EventContext<'_>, (op, rt, offset): Self::Args) -> Self {
        let rt_val = ctx.load_reg(rt);
        let target = ctx.branch_target(offset);
        let taken = Self::is_taken(op, rt_val);

        let event = Self {
            pc: ctx.pc,
            cycle: ctx.cycle,
            op,
            rt,
            rt_val,
            offset,
            target,
            taken,
        };
        if taken {
            debug!(from = event.pc, to = target, "conditional branch taken");
            ctx.jump_to(target);
        } else {
            ctx.incr_pc();
        }
        event
    }
}
