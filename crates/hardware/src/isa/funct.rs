//! Minor opcode constants.
//!
//! `funct3` (bits 12-14) distinguishes instructions that share a major
//! opcode; `funct7` (bits 25-31) further splits register-register forms.

/// Branch conditions (`OP_BRANCH`).
pub mod branch {
    /// Branch if equal.
    pub const BEQ: u32 = 0b000;
    /// Branch if not equal.
    pub const BNE: u32 = 0b001;
    /// Branch if less than (signed).
    pub const BLT: u32 = 0b100;
    /// Branch if greater or equal (signed).
    pub const BGE: u32 = 0b101;
    /// Branch if less than (unsigned).
    pub const BLTU: u32 = 0b110;
    /// Branch if greater or equal (unsigned).
    pub const BGEU: u32 = 0b111;
}

/// Load widths (`OP_LOAD`).
pub mod load {
    /// Load byte, sign-extended.
    pub const LB: u32 = 0b000;
    /// Load halfword, sign-extended.
    pub const LH: u32 = 0b001;
    /// Load word, sign-extended.
    pub const LW: u32 = 0b010;
    /// Load doubleword.
    pub const LD: u32 = 0b011;
    /// Load byte, zero-extended.
    pub const LBU: u32 = 0b100;
    /// Load halfword, zero-extended.
    pub const LHU: u32 = 0b101;
    /// Load word, zero-extended.
    pub const LWU: u32 = 0b110;
}

/// Store widths (`OP_STORE`).
pub mod store {
    /// Store byte.
    pub const SB: u32 = 0b000;
    /// Store halfword.
    pub const SH: u32 = 0b001;
    /// Store word.
    pub const SW: u32 = 0b010;
    /// Store doubleword.
    pub const SD: u32 = 0b011;
}

/// ALU operations (`OP_IMM`, `OP_REG` and their 32-bit forms).
pub mod alu {
    /// ADD / SUB / ADDI.
    pub const ADD_SUB: u32 = 0b000;
    /// Shift left logical.
    pub const SLL: u32 = 0b001;
    /// Set less than (signed).
    pub const SLT: u32 = 0b010;
    /// Set less than (unsigned).
    pub const SLTU: u32 = 0b011;
    /// Exclusive or.
    pub const XOR: u32 = 0b100;
    /// Shift right, logical or arithmetic by `funct7`.
    pub const SRL_SRA: u32 = 0b101;
    /// Inclusive or.
    pub const OR: u32 = 0b110;
    /// And.
    pub const AND: u32 = 0b111;
}

/// Multiply/divide operations (`OP_REG` with `funct7 == MULDIV`).
pub mod muldiv {
    /// Low half of the product.
    pub const MUL: u32 = 0b000;
    /// High half, signed x signed.
    pub const MULH: u32 = 0b001;
    /// High half, signed x unsigned.
    pub const MULHSU: u32 = 0b010;
    /// High half, unsigned x unsigned.
    pub const MULHU: u32 = 0b011;
    /// Signed division.
    pub const DIV: u32 = 0b100;
    /// Unsigned division.
    pub const DIVU: u32 = 0b101;
    /// Signed remainder.
    pub const REM: u32 = 0b110;
    /// Unsigned remainder.
    pub const REMU: u32 = 0b111;
}

/// `FENCE` (`OP_MISC_MEM`).
pub const FENCE: u32 = 0b000;

/// `funct7` selectors.
pub mod funct7 {
    /// Base encoding (ADD, SRL, ...).
    pub const BASE: u32 = 0b000_0000;
    /// Alternate encoding (SUB, SRA).
    pub const ALT: u32 = 0b010_0000;
    /// M extension.
    pub const MULDIV: u32 = 0b000_0001;
}
