use tracing::debug;

use super::{context::EventContext, Event};
use crate::decoder::{MemOp, Reg};

/// Computes the effective address `R[rn] + offset`.
///
/// The offset is added as is: addresses are not scaled by the access size.
fn compute_effective_address(ctx: &EventContext<'_>, rn: Reg, offset: i64) -> (i64, i64) {
    let base = ctx.load_reg(rn);
    (base, base.wrapping_add(offset))
}

/// Event for STUR and LDUR.
///
/// Logic:
///   1. STUR: MEM[R[rn] + offset] = R[rt]
///      LDUR: R[rt] = MEM[R[rn] + offset]
///   2. PC = PC + 4
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemEvent {
    pub pc: u64,
    pub cycle: u64,
    pub op: MemOp,
    pub rt: Reg,
    pub rn: Reg,
    pub base: i64,
    pub offset: i64,
    pub addr: i64,
    /// The value stored to, or loaded from, `addr`.
    pub value: i64,
}

impl MemEvent {
    pub const fn is_store(&self) -> bool {
        matches!(self.op, MemOp::Stur)
    }
}

impl Event for MemEvent {
    type Args = (MemOp, Reg, Reg, i64);

    fn generate(ctx: &mut EventContext<'_>, (op, rt, rn, offset): Self::Args) -> Self {
        let (base, addr) = compute_effective_address(ctx, rn, offset);
        let value = match op {
            MemOp::Stur => {
                let value = ctx.load_reg(rt);
                ctx.store_ram(addr, value);
                debug!(addr, value, "store");
                value
            }
            MemOp::Ldur => {
                let value = ctx.load_ram(addr);
                ctx.store_reg(rt, value);
                value
            }
        };

        let event = Self {
            pc: ctx.pc,
            cycle: ctx.cycle,
            op,
            rt,
            rn,
            base,
            offset,
            addr,
            value,
        };
        ctx.incr_pc();
        event
    }
}
