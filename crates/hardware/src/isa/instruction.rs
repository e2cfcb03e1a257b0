//! Instruction field extraction.
//!
//! Bit-slicing helpers for the fixed RISC-V field positions. Every format
//! places `opcode`, `rd`, `funct3`, `rs1`, `rs2` and `funct7` at the same bit
//! offsets, so extraction does not depend on the format.

/// Mask for the 7-bit opcode field (bits 0-6).
pub const OPCODE_MASK: u32 = 0x7F;
/// Mask for a 5-bit register field.
pub const REG_MASK: u32 = 0x1F;
/// Mask for the 3-bit `funct3` field (bits 12-14).
pub const FUNCT3_MASK: u32 = 0x7;
/// Mask for the 7-bit `funct7` field (bits 25-31).
pub const FUNCT7_MASK: u32 = 0x7F;

const RD_SHIFT: u32 = 7;
const FUNCT3_SHIFT: u32 = 12;
const RS1_SHIFT: u32 = 15;
const RS2_SHIFT: u32 = 20;
const FUNCT7_SHIFT: u32 = 25;

/// Field extraction on an encoded instruction.
pub trait InstructionBits {
    /// Major opcode (bits 0-6).
    fn opcode(&self) -> u32;

    /// Destination register (bits 7-11).
    fn rd(&self) -> usize;

    /// First source register (bits 15-19).
    fn rs1(&self) -> usize;

    /// Second source register (bits 20-24).
    ///
    /// For immediate shifts this field holds the low bits of the shift amount.
    fn rs2(&self) -> usize;

    /// Minor opcode (bits 12-14).
    fn funct3(&self) -> u32;

    /// Upper function bits (bits 25-31); selects SUB/SRA and the M extension.
    fn funct7(&self) -> u32;
}

impl InstructionBits for u32 {
    #[inline(always)]
    fn opcode(&self) -> u32 {
        self & OPCODE_MASK
    }

    #[inline(always)]
    fn rd(&self) -> usize {
        ((self >> RD_SHIFT) & REG_MASK) as usize
    }

    #[inline(always)]
    fn rs1(&self) -> usize {
        ((self >> RS1_SHIFT) & REG_MASK) as usize
    }

    #[inline(always)]
    fn rs2(&self) -> usize {
        ((self >> RS2_SHIFT) & REG_MASK) as usize
    }

    #[inline(always)]
    fn funct3(&self) -> u32 {
        (self >> FUNCT3_SHIFT) & FUNCT3_MASK
    }

    #[inline(always)]
    fn funct7(&self) -> u32 {
        (self >> FUNCT7_SHIFT) & FUNCT7_MASK
    }
}
