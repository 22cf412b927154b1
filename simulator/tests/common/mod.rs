//! Helpers assembling input lines for integration tests.

use legv8_sim::{ArchState, Interpreter, Opcode, Program, SimConfig, SimTrace};

fn field(value: i64, width: u32) -> u32 {
    (value as u32) & ((1u32 << width) - 1)
}

fn line(word: u32) -> String {
    format!("{word:032b}")
}

fn prefix(opcode: Opcode) -> u32 {
    let (bits, len) = opcode.pattern();
    bits << (32 - len)
}

/// R-format and shift instructions.
pub fn r(opcode: Opcode, rd: u8, rn: u8, rm: u8, shamt: u32) -> String {
    line(
        prefix(opcode)
            | field(rm.into(), 5) << 16
            | field(shamt.into(), 6) << 10
            | field(rn.into(), 5) << 5
            | field(rd.into(), 5),
    )
}

pub fn i(opcode: Opcode, rd: u8, rn: u8, imm: i64) -> String {
    line(prefix(opcode) | field(imm, 12) << 10 | field(rn.into(), 5) << 5 | field(rd.into(), 5))
}

pub fn d(opcode: Opcode, rt: u8, rn: u8, offset: u32) -> String {
    line(
        prefix(opcode)
            | field(offset.into(), 9) << 12
            | field(rn.into(), 5) << 5
            | field(rt.into(), 5),
    )
}

pub fn b(offset: i64) -> String {
    line(prefix(Opcode::B) | field(offset, 26))
}

pub fn cb(opcode: Opcode, rt: u8, offset: i64) -> String {
    line(prefix(opcode) | field(offset, 19) << 5 | field(rt.into(), 5))
}

pub fn im(opcode: Opcode, rd: u8, imm: u16, shift_code: u32) -> String {
    line(
        prefix(opcode)
            | field(shift_code.into(), 2) << 21
            | u32::from(imm) << 5
            | field(rd.into(), 5),
    )
}

pub fn nop() -> String {
    line(prefix(Opcode::Nop))
}

pub fn brk() -> String {
    line(prefix(Opcode::Break))
}

/// Runs `lines` from a fresh state and returns the final state and trace.
pub fn run(lines: &[String]) -> (Interpreter, ArchState, SimTrace) {
    run_with(lines, ArchState::default(), SimConfig::default())
}

pub fn run_with(
    lines: &[String],
    mut state: ArchState,
    config: SimConfig,
) -> (Interpreter, ArchState, SimTrace) {
    let program = Program::from_lines(lines, config.base_address);
    let mut interpreter = Interpreter::new(config);
    let trace = interpreter
        .run(&program, &mut state)
        .expect("program should finish within the cycle limit");
    (interpreter, state, trace)
}
