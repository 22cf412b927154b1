//! Field extraction: turns a classified instruction word into a typed
//! [`Instruction`].

use std::fmt;

use num_enum::{FromPrimitive, IntoPrimitive};
use smallvec::SmallVec;

use crate::{
    error::DecodeError,
    opcodes::{classify, Format, Opcode, WORD_BITS},
};

/// Index of one of the 32 general purpose registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Reg(u8);

impl Reg {
    /// Builds a register index, keeping only the low 5 bits.
    pub const fn new(index: u8) -> Self {
        Self(index & 0x1f)
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for Reg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R{}", self.0)
    }
}

/// Halfword position selected by the 2-bit shift code of `MOVZ`/`MOVK`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum HalfwordShift {
    Lsl0 = 0,
    Lsl16 = 1,
    Lsl32 = 2,
    #[num_enum(default)]
    Lsl48 = 3,
}

impl HalfwordShift {
    /// Left-shift amount in bits: the shift code times 16.
    pub fn amount(self) -> u32 {
        u32::from(u8::from(self)) * 16
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AluOp {
    And,
    Add,
    Orr,
    Sub,
    Eor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AluImmOp {
    Addi,
    Subi,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShiftOp {
    Lsr,
    Lsl,
    Asr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemOp {
    Stur,
    Ldur,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CondOp {
    Cbz,
    Cbnz,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOp {
    Movz,
    Movk,
}

/// A decoded instruction with its typed operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    Alu {
        op: AluOp,
        rd: Reg,
        rn: Reg,
        rm: Reg,
    },
    AluImm {
        op: AluImmOp,
        rd: Reg,
        rn: Reg,
        imm: i64,
    },
    Shift {
        op: ShiftOp,
        rd: Reg,
        rn: Reg,
        shamt: u32,
    },
    Mem {
        op: MemOp,
        rt: Reg,
        rn: Reg,
        offset: i64,
    },
    Branch {
        offset: i64,
    },
    CondBranch {
        op: CondOp,
        rt: Reg,
        offset: i64,
    },
    Move {
        op: MoveOp,
        rd: Reg,
        imm: u16,
        shift: HalfwordShift,
    },
    Nop,
    Break,
}

impl Instruction {
    pub const fn opcode(&self) -> Opcode {
        match self {
            Instruction::Alu { op, .. } => match op {
                AluOp::And => Opcode::And,
                AluOp::Add => Opcode::Add,
                AluOp::Orr => Opcode::Orr,
                AluOp::Sub => Opcode::Sub,
                AluOp::Eor => Opcode::Eor,
            },
            Instruction::AluImm { op, .. } => match op {
                AluImmOp::Addi => Opcode::Addi,
                AluImmOp::Subi => Opcode::Subi,
            },
            Instruction::Shift { op, .. } => match op {
                ShiftOp::Lsr => Opcode::Lsr,
                ShiftOp::Lsl => Opcode::Lsl,
                ShiftOp::Asr => Opcode::Asr,
            },
            Instruction::Mem { op, .. } => match op {
                MemOp::Stur => Opcode::Stur,
                MemOp::Ldur => Opcode::Ldur,
            },
            Instruction::Branch { .. } => Opcode::B,
            Instruction::CondBranch { op, .. } => match op {
                CondOp::Cbz => Opcode::Cbz,
                CondOp::Cbnz => Opcode::Cbnz,
            },
            Instruction::Move { op, .. } => match op {
                MoveOp::Movz => Opcode::Movz,
                MoveOp::Movk => Opcode::Movk,
            },
            Instruction::Nop => Opcode::Nop,
            Instruction::Break => Opcode::Break,
        }
    }

    pub const fn format(&self) -> Format {
        self.opcode().format()
    }

    /// Number of operands printed by the disassembler.
    pub const fn num_operands(&self) -> usize {
        match self {
            Instruction::Alu { .. }
            | Instruction::AluImm { .. }
            | Instruction::Shift { .. }
            | Instruction::Mem { .. }
            | Instruction::Move { .. } => 3,
            Instruction::CondBranch { .. } => 2,
            Instruction::Branch { .. } => 1,
            Instruction::Nop | Instruction::Break => 0,
        }
    }
}

/// Renders the assembly text: the mnemonic, then a tab and the operands in
/// the conventional syntax of the format.
impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mnemonic = self.opcode().mnemonic();
        match *self {
            Instruction::Alu { rd, rn, rm, .. } => write!(f, "{mnemonic}\t{rd}, {rn}, {rm}"),
            Instruction::AluImm { rd, rn, imm, .. } => {
                write!(f, "{mnemonic}\t{rd}, {rn}, #{imm}")
            }
            Instruction::Shift { rd, rn, shamt, .. } => {
                write!(f, "{mnemonic}\t{rd}, {rn}, #{shamt}")
            }
            Instruction::Mem { rt, rn, offset, .. } => {
                write!(f, "{mnemonic}\t{rt}, [{rn}, #{offset}]")
            }
            Instruction::Branch { offset } => write!(f, "{mnemonic}\t#{offset}"),
            Instruction::CondBranch { rt, offset, .. } => write!(f, "{mnemonic}\t{rt}, #{offset}"),
            Instruction::Move { rd, imm, shift, .. } => {
                write!(f, "{mnemonic}\t{rd}, {imm}, LSL {}", shift.amount())
            }
            Instruction::Nop | Instruction::Break => f.write_str(mnemonic),
        }
    }
}

/// What a slice of the instruction word means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Opcode,
    Register,
    SignedImmediate,
    UnsignedImmediate,
    ShiftAmount,
    ShiftCode,
    /// Secondary opcode bits (`shamt` of `R`, `op2` of `D`).
    Discriminator,
    /// Whole-word literal (`NOP`, `BREAK`) or an undecoded group.
    Raw,
}

/// A contiguous bit field of an instruction word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub kind: FieldKind,
    pub width: u32,
    pub raw: u32,
}

impl Field {
    /// The field as a two's-complement number of `width` bits.
    pub fn signed(&self) -> i64 {
        sign_extend(self.raw, self.width)
    }

    /// The field's bits, zero-padded to its width.
    pub fn bits(&self) -> String {
        format!("{:0width$b}", self.raw, width = self.width as usize)
    }
}

pub type Fields = SmallVec<[Field; 7]>;

/// Interprets the low `width` bits of `value` as a two's-complement number.
pub fn sign_extend(value: u32, width: u32) -> i64 {
    debug_assert!((1..=WORD_BITS).contains(&width));
    let unsigned = i64::from(value) & ((1i64 << width) - 1);
    if (unsigned >> (width - 1)) & 1 == 1 {
        unsigned - (1i64 << width)
    } else {
        unsigned
    }
}

/// Slices a word into consecutive fields, most significant first.
struct FieldCursor {
    word: u32,
    consumed: u32,
    fields: Fields,
}

impl FieldCursor {
    fn new(word: u32) -> Self {
        Self {
            word,
            consumed: 0,
            fields: Fields::new(),
        }
    }

    fn take(&mut self, kind: FieldKind, width: u32) -> Field {
        debug_assert!(self.consumed + width <= WORD_BITS);
        let shift = WORD_BITS - self.consumed - width;
        let mask = if width == WORD_BITS {
            u32::MAX
        } else {
            (1u32 << width) - 1
        };
        let field = Field {
            kind,
            width,
            raw: (self.word >> shift) & mask,
        };
        self.consumed += width;
        self.fields.push(field);
        field
    }

    fn reg(&mut self) -> Reg {
        Reg::new(self.take(FieldKind::Register, 5).raw as u8)
    }

    fn finish(self) -> Fields {
        debug_assert_eq!(self.consumed, WORD_BITS);
        self.fields
    }
}

/// An instruction word together with its decoded form and raw fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedInstruction {
    pub word: u32,
    pub instruction: Instruction,
    pub fields: Fields,
}

impl DecodedInstruction {
    pub fn opcode(&self) -> Opcode {
        self.instruction.opcode()
    }

    pub fn format(&self) -> Format {
        self.instruction.format()
    }
}

/// Parses one input line into an instruction word.
///
/// Surrounding whitespace is ignored; anything other than exactly 32 `0`/`1`
/// characters is rejected.
pub fn parse_word(line: &str) -> Result<u32, DecodeError> {
    let bits = line.trim();
    if bits.len() != WORD_BITS as usize || !bits.bytes().all(|b| b == b'0' || b == b'1') {
        return Err(DecodeError::Malformed {
            line: bits.to_string(),
        });
    }
    u32::from_str_radix(bits, 2).map_err(|_| DecodeError::Malformed {
        line: bits.to_string(),
    })
}

/// Decodes an instruction word.
pub fn decode(word: u32) -> Result<DecodedInstruction, DecodeError> {
    let (opcode, _) = classify(word);
    let opcode = opcode.ok_or(DecodeError::UnknownOpcode { word })?;

    let mut cursor = FieldCursor::new(word);
    let instruction = match opcode {
        Opcode::And => cursor.alu(opcode, AluOp::And)?,
        Opcode::Add => cursor.alu(opcode, AluOp::Add)?,
        Opcode::Orr => cursor.alu(opcode, AluOp::Orr)?,
        Opcode::Sub => cursor.alu(opcode, AluOp::Sub)?,
        Opcode::Eor => cursor.alu(opcode, AluOp::Eor)?,
        Opcode::Addi => cursor.alu_imm(AluImmOp::Addi),
        Opcode::Subi => cursor.alu_imm(AluImmOp::Subi),
        Opcode::Lsr => cursor.shift(ShiftOp::Lsr),
        Opcode::Lsl => cursor.shift(ShiftOp::Lsl),
        Opcode::Asr => cursor.shift(ShiftOp::Asr),
        Opcode::Stur => cursor.mem(MemOp::Stur),
        Opcode::Ldur => cursor.mem(MemOp::Ldur),
        Opcode::B => cursor.branch(),
        Opcode::Cbz => cursor.cond_branch(CondOp::Cbz),
        Opcode::Cbnz => cursor.cond_branch(CondOp::Cbnz),
        Opcode::Movz => cursor.move_wide(MoveOp::Movz),
        Opcode::Movk => cursor.move_wide(MoveOp::Movk),
        Opcode::Nop => cursor.literal(Format::NOP, Instruction::Nop),
        Opcode::Break => cursor.literal(Format::BREAK, Instruction::Break),
    };

    Ok(DecodedInstruction {
        word,
        instruction,
        fields: cursor.finish(),
    })
}

/// Per-format field extraction, following [`Format::layout`].
impl FieldCursor {
    fn alu(&mut self, opcode: Opcode, op: AluOp) -> Result<Instruction, DecodeError> {
        self.take(FieldKind::Opcode, 11);
        let rm = self.reg();
        let shamt = self.take(FieldKind::Discriminator, 6).raw;
        let rn = self.reg();
        let rd = self.reg();
        // The ALU operations of this subset all require a zero shamt.
        if shamt != 0 {
            return Err(DecodeError::UnrecognizedDiscriminator {
                opcode,
                value: shamt,
            });
        }
        Ok(Instruction::Alu { op, rd, rn, rm })
    }

    fn alu_imm(&mut self, op: AluImmOp) -> Instruction {
        self.take(FieldKind::Opcode, 10);
        let imm = self.take(FieldKind::SignedImmediate, 12).signed();
        let rn = self.reg();
        let rd = self.reg();
        Instruction::AluImm { op, rd, rn, imm }
    }

    fn shift(&mut self, op: ShiftOp) -> Instruction {
        self.take(FieldKind::Opcode, 11);
        self.reg();
        let shamt = self.take(FieldKind::ShiftAmount, 6).raw;
        let rn = self.reg();
        let rd = self.reg();
        Instruction::Shift { op, rd, rn, shamt }
    }

    fn mem(&mut self, op: MemOp) -> Instruction {
        self.take(FieldKind::Opcode, 11);
        let offset = i64::from(self.take(FieldKind::UnsignedImmediate, 9).raw);
        self.take(FieldKind::Discriminator, 2);
        let rn = self.reg();
        let rt = self.reg();
        Instruction::Mem { op, rt, rn, offset }
    }

    fn branch(&mut self) -> Instruction {
        self.take(FieldKind::Opcode, 6);
        let offset = self.take(FieldKind::SignedImmediate, 26).signed();
        Instruction::Branch { offset }
    }

    fn cond_branch(&mut self, op: CondOp) -> Instruction {
        self.take(FieldKind::Opcode, 8);
        let offset = self.take(FieldKind::SignedImmediate, 19).signed();
        let rt = self.reg();
        Instruction::CondBranch { op, rt, offset }
    }

    fn move_wide(&mut self, op: MoveOp) -> Instruction {
        self.take(FieldKind::Opcode, 9);
        let shift = HalfwordShift::from(self.take(FieldKind::ShiftCode, 2).raw as u8);
        let imm = self.take(FieldKind::UnsignedImmediate, 16).raw as u16;
        let rd = self.reg();
        Instruction::Move { op, rd, imm, shift }
    }

    fn literal(&mut self, format: Format, instruction: Instruction) -> Instruction {
        for &width in format.layout() {
            self.take(FieldKind::Raw, width);
        }
        instruction
    }
}

/// Splits a word into the bit groups of `format`, separated by spaces.
pub fn bit_groups(word: u32, format: Format) -> String {
    let mut cursor = FieldCursor::new(word);
    for &width in format.layout() {
        cursor.take(FieldKind::Raw, width);
    }
    cursor
        .finish()
        .iter()
        .map(Field::bits)
        .collect::<Vec<_>>()
        .join(" ")
}
