//! Instruction field decode and immediate generation.
//!
//! This module splits a 32-bit encoding into its register and function fields
//! and produces the sign-extended immediate for every format (I, S, B, U, J).
//! The immediate format is selected by major opcode alone; R-type and unknown
//! opcodes carry no immediate.

use crate::isa::instruction::InstructionBits;
use crate::isa::opcodes;

/// Bit width of an I/S immediate.
const IMM12_BITS: u32 = 12;

/// Bit width of a B immediate (bit 0 is implicit zero).
const IMM13_BITS: u32 = 13;

/// Bit width of a J immediate (bit 0 is implicit zero).
const IMM21_BITS: u32 = 21;

/// Mask of the upper 20 bits carried by a U immediate.
const U_IMM_MASK: u32 = 0xFFFF_F000;

/// All fields of an instruction, decoded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Decoded {
    /// Raw 32-bit encoding.
    pub raw: u32,
    /// Major opcode.
    pub opcode: u32,
    /// Destination register index.
    pub rd: usize,
    /// First source register index.
    pub rs1: usize,
    /// Second source register index.
    pub rs2: usize,
    /// Function code 3.
    pub funct3: u32,
    /// Function code 7.
    pub funct7: u32,
    /// Sign-extended immediate, 0 for formats without one.
    pub imm: i64,
}

/// Decodes every field of `inst`.
pub fn decode(inst: u32) -> Decoded {
    Decoded {
        raw: inst,
        opcode: inst.opcode(),
        rd: inst.rd(),
        rs1: inst.rs1(),
        rs2: inst.rs2(),
        funct3: inst.funct3(),
        funct7: inst.funct7(),
        imm: immediate(inst),
    }
}

/// Immediate generator: the sign-extended immediate for `inst`'s format.
///
/// # Examples
///
/// ```
/// use rvpipe_core::isa::decode::immediate;
///
/// // addi x1, x0, -1
/// assert_eq!(immediate(0xFFF0_0093), -1);
/// // lui x1, 0x12345
/// assert_eq!(immediate(0x1234_50B7), 0x1234_5000);
/// ```
pub fn immediate(inst: u32) -> i64 {
    match inst.opcode() {
        opcodes::OP_IMM
        | opcodes::OP_IMM_32
        | opcodes::OP_LOAD
        | opcodes::OP_JALR
        | opcodes::OP_MISC_MEM
        | opcodes::OP_SYSTEM => imm_i(inst),
        opcodes::OP_STORE => imm_s(inst),
        opcodes::OP_BRANCH => imm_b(inst),
        opcodes::OP_LUI | opcodes::OP_AUIPC => imm_u(inst),
        opcodes::OP_JAL => imm_j(inst),
        _ => 0,
    }
}

/// I-type: `imm[11:0]` in bits 31:20.
pub const fn imm_i(inst: u32) -> i64 {
    (inst as i32 >> 20) as i64
}

/// S-type: `imm[11:5]` in bits 31:25, `imm[4:0]` in bits 11:7.
pub const fn imm_s(inst: u32) -> i64 {
    let raw = ((inst >> 25) << 5) | ((inst >> 7) & 0x1F);
    sign_extend(raw, IMM12_BITS)
}

/// B-type: `imm[12|10:5]` in bits 31:25, `imm[4:1|11]` in bits 11:7.
pub const fn imm_b(inst: u32) -> i64 {
    let raw = (((inst >> 31) & 0x1) << 12)
        | (((inst >> 7) & 0x1) << 11)
        | (((inst >> 25) & 0x3F) << 5)
        | (((inst >> 8) & 0xF) << 1);
    sign_extend(raw, IMM13_BITS)
}

/// U-type: `imm[31:12]` in bits 31:12, low 12 bits zero, sign-extended to 64.
pub const fn imm_u(inst: u32) -> i64 {
    (inst & U_IMM_MASK) as i32 as i64
}

/// J-type: `imm[20|10:1|11|19:12]` in bits 31:12.
pub const fn imm_j(inst: u32) -> i64 {
    let raw = (((inst >> 31) & 0x1) << 20)
        | (((inst >> 12) & 0xFF) << 12)
        | (((inst >> 20) & 0x1) << 11)
        | (((inst >> 21) & 0x3FF) << 1);
    sign_extend(raw, IMM21_BITS)
}

/// Sign-extends the low `bits` bits of `val`.
const fn sign_extend(val: u32, bits: u32) -> i64 {
    let shift = 32 - bits;
    ((val << shift) as i32 >> shift) as i64
}
