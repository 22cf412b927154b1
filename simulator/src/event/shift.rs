use super::{context::EventContext, Event};
use crate::decoder::{Reg, ShiftOp};

/// Event for LSL, LSR and ASR by an immediate amount.
///
/// Logic:
///   1. R[rd] = R[rn] << shamt (LSL), >> shamt logically (LSR) or
///      arithmetically (ASR)
///   2. PC = PC + 4
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftEvent {
    pub pc: u64,
    pub cycle: u64,
    pub op: ShiftOp,
    pub rd: Reg,
    pub rd_val: i64,
    pub rn: Reg,
    pub rn_val: i64,
    pub shamt: u32,
}

impl ShiftEvent {
    /// Calculate the result of a 64-bit shift.
    ///
    /// Amounts of 64 or more shift every bit out: 0 for the logical shifts,
    /// the sign fill for ASR.
    pub fn calculate_result(op: ShiftOp, val: i64, shamt: u32) -> i64 {
        if shamt >= i64::BITS {
            return match op {
                ShiftOp::Lsl | ShiftOp::Lsr => 0,
                ShiftOp::Asr => val >> (i64::BITS - 1),
            };
        }
        match op {
            ShiftOp::Lsl => ((val as u64) << shamt) as i64,
            ShiftOp::Lsr => ((val as u64) >> shamt) as i64,
            ShiftOp::Asr => val >> shamt,
        }
    }
}

impl Event for ShiftEvent {
    type Args = (ShiftOp, Reg, Reg, u32);

    fn generate(ctx: &mut EventContext<'_>, (op, rd, rn, shamt): Self::Args) -> Self {
        let rn_val = ctx.load_reg(rn);
        let rd_val = Self::calculate_result(op, rn_val, shamt);
        ctx.store_reg(rd, rd_val);

        let event = Self {
            pc: ctx.pc,
            cycle: ctx.cycle,
            op,
            rd,
            rd_val,
            rn,
            rn_val,
            shamt,
        };
        ctx.incr_pc();
        event
    }
}
