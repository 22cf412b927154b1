use super::{context::EventContext, Event};
use crate::decoder::{HalfwordShift, MoveOp, Reg};

/// Event for MOVZ and MOVK.
///
/// Logic:
///   1. MOVZ: R[rd] = imm << shift
///      MOVK: R[rd][shift + 15 : shift] = imm, other bits unchanged
///   2. PC = PC + 4
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveEvent {
    pub pc: u64,
    pub cycle: u64,
    pub op: MoveOp,
    pub rd: Reg,
    pub prev_val: i64,
    pub rd_val: i64,
    pub imm: u16,
    pub shift: HalfwordShift,
}

impl MoveEvent {
    pub fn calculate_result(op: MoveOp, prev: i64, imm: u16, shift: HalfwordShift) -> i64 {
        let amount = shift.amount();
        let placed = u64::from(imm) << amount;
        match op {
            MoveOp::Movz => placed as i64,
            MoveOp::Movk => {
                let mask = 0xffff_u64 << amount;
                ((prev as u64 & !mask) | placed) as i64
            }
        }
    }
}

impl Event for MoveEvent {
    type Args = (MoveOp, Reg, u16, HalfwordShift);

    fn generate(ctx: &mut EventContext<'_>, (op, rd, imm, shift): Self::Args) -> Self {
        let prev_val = ctx.load_reg(rd);
        let rd_val = Self::calculate_result(op, prev_val, imm, shift);
        ctx.store_reg(rd, rd_val);

        let event = Self {
            pc: ctx.pc,
            cycle: ctx.cycle,
            op,
            rd,
            prev_val,
            rd_val,
            imm,
            shift,
        };
        ctx.incr_pc();
        event
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::event::test_utils::TestEnv;

    fn any_shift() -> impl Strategy<Value = HalfwordShift> {
        (0u8..4).prop_map(HalfwordShift::from)
    }

    #[test]
    fn test_movz_into_top_halfword_is_negative() {
        assert_eq!(
            MoveEvent::calculate_result(MoveOp::Movz, 123, 0x8000, HalfwordShift::Lsl48),
            i64::MIN
        );
    }

    #[test]
    fn test_movz_then_movk_builds_constant() {
        let mut env = TestEnv::new();
        MoveEvent::generate(&mut env.ctx(), (MoveOp::Movz, Reg::new(1), 0xbeef, HalfwordShift::Lsl0));
        MoveEvent::generate(&mut env.ctx(), (MoveOp::Movk, Reg::new(1), 0xdead, HalfwordShift::Lsl16));
        assert_eq!(env.reg(1), 0xdead_beef);
    }

    proptest! {
        #[test]
        fn prop_movz_clears_everything_else(prev in any::<i64>(), imm in any::<u16>(), shift in any_shift()) {
            let result = MoveEvent::calculate_result(MoveOp::Movz, prev, imm, shift);
            prop_assert_eq!(result as u64, u64::from(imm) << shift.amount());
        }

        #[test]
        fn prop_movk_only_touches_its_window(prev in any::<i64>(), imm in any::<u16>(), shift in any_shift()) {
            let result = MoveEvent::calculate_result(MoveOp::Movk, prev, imm, shift);
            let window = 0xffff_u64 << shift.amount();
            prop_assert_eq!((prev ^ result) as u64 & !window, 0);
            prop_assert_eq!((result as u64 & window) >> shift.amount(), u64::from(imm));
        }
    }
}
