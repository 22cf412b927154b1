use super::{context::EventContext, Event};
use crate::decoder::{AluImmOp, AluOp, Reg};

/// Event for AND, ADD, ORR, SUB and EOR.
///
/// Logic:
///   1. R[rd] = R[rn] OP R[rm]
///   2. PC = PC + 4
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AluEvent {
    pub pc: u64,
    pub cycle: u64,
    pub op: AluOp,
    pub rd: Reg,
    pub rd_val: i64,
    pub rn: Reg,
    pub rn_val: i64,
    pub rm: Reg,
    pub rm_val: i64,
}

impl AluEvent {
    pub fn calculate_result(op: AluOp, lhs: i64, rhs: i64) -> i64 {
        match op {
            AluOp::And => lhs & rhs,
            AluOp::Add => lhs.wrapping_add(rhs),
            AluOp::Orr => lhs | rhs,
            AluOp::Sub => lhs.wrapping_sub(rhs),
            AluOp::Eor => lhs ^ rhs,
        }
    }
}

impl Event for AluEvent {
    type Args = (AluOp, Reg, Reg, Reg);

    fn generate(ctx: &mut EventContext<'_>, (op, rd, rn, rm): Self::Args) -> Self {
        let rn_val = ctx.load_reg(rn);
        let rm_val = ctx.load_reg(rm);
        let rd_val = Self::calculate_result(op, rn_val, rm_val);
        ctx.store_reg(rd, rd_val);

        let event = Self {
            pc: ctx.pc,
            cycle: ctx.cycle,
            op,
            rd,
            rd_val,
            rn,
            rn_val,
            rm,
            rm_val,
        };
        ctx.incr_pc();
        event
    }
}

/// Event for ADDI and SUBI.
///
/// Logic:
///   1. R[rd] = R[rn] +/- imm, with `imm` sign-extended from 12 bits
///   2. PC = PC + 4
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AluImmEvent {
    pub pc: u64,
    pub cycle: u64,
    pub op: AluImmOp,
    pub rd: Reg,
    pub rd_val: i64,
    pub rn: Reg,
    pub rn_val: i64,
    pub imm: i64,
}

impl AluImmEvent {
    pub fn calculate_result(op: AluImmOp, val: i64, imm: i64) -> i64 {
        match op {
            AluImmOp::Addi => val.wrapping_add(imm),
            AluImmOp::Subi => val.wrapping_sub(imm),
        }
    }
}

impl Event for AluImmEvent {
    type Args = (AluImmOp, Reg, Reg, i64);

    fn generate(ctx: &mut EventContext<'_>, (op, rd, rn, imm): Self::Args) -> Self {
        let rn_val = ctx.load_reg(rn);
        let rd_val = Self::calculate_result(op, rn_val, imm);
        ctx.store_reg(rd, rd_val);

        let event = Self {
            pc: ctx.pc,
            cycle: ctx.cycle,
            op,
            rd,
            rd_val,
            rn,
            rn_val,
            imm,
        };
        ctx.incr_pc();
        event
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{event::test_utils::TestEnv, execution::INSTRUCTION_SIZE};

    #[test]
    fn test_alu_operations() {
        assert_eq!(AluEvent::calculate_result(AluOp::And, 0b1100, 0b1010), 0b1000);
        assert_eq!(AluEvent::calculate_result(AluOp::Orr, 0b1100, 0b1010), 0b1110);
        assert_eq!(AluEvent::calculate_result(AluOp::Eor, 0b1100, 0b1010), 0b0110);
        assert_eq!(AluEvent::calculate_result(AluOp::Add, i64::MAX, 1), i64::MIN);
        assert_eq!(AluEvent::calculate_result(AluOp::Sub, 3, 5), -2);
    }

    #[test]
    fn test_add_event() {
        let mut env = TestEnv::new();
        env.set_reg(1, 5);
        env.set_reg(3, 7);
        let start = env.pc();

        let event = AluEvent::generate(
            &mut env.ctx(),
            (AluOp::Add, Reg::new(2), Reg::new(1), Reg::new(3)),
        );

        assert_eq!(event.rd_val, 12);
        assert_eq!(env.reg(2), 12);
        assert_eq!(event.pc, start);
        assert_eq!(env.pc(), start + INSTRUCTION_SIZE);
    }

    #[test]
    fn test_subi_event_with_negative_immediate() {
        let mut env = TestEnv::new();
        env.set_reg(4, 10);

        let event = AluImmEvent::generate(
            &mut env.ctx(),
            (AluImmOp::Subi, Reg::new(4), Reg::new(4), -2048),
        );

        assert_eq!(event.rn_val, 10);
        assert_eq!(env.reg(4), 2058);
    }
}
