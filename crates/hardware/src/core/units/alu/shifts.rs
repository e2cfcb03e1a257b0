//! ALU shift operations.
//!
//! Shift amounts are the low 6 bits of operand B for 64-bit shifts and the
//! low 5 bits for `W` shifts; the remaining bits are ignored. This is what
//! makes `SRAI`, whose immediate carries the arithmetic selector in bit 10,
//! execute correctly with the raw immediate as operand B.

/// Shift direction and kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShiftOp {
    /// Shift left logical.
    Sll,
    /// Shift right logical.
    Srl,
    /// Shift right arithmetic.
    Sra,
}

/// Shift-amount mask for 64-bit shifts.
const SHAMT_MASK: u64 = 0x3F;

/// Shift-amount mask for 32-bit shifts.
const SHAMT_MASK_WORD: u32 = 0x1F;

/// Executes a 64-bit shift.
pub const fn execute(op: ShiftOp, a: u64, b: u64) -> u64 {
    let shamt = (b & SHAMT_MASK) as u32;
    match op {
        ShiftOp::Sll => a << shamt,
        ShiftOp::Srl => a >> shamt,
        ShiftOp::Sra => ((a as i64) >> shamt) as u64,
    }
}

/// Executes a 32-bit shift; the caller sign-extends the result.
pub const fn execute_word(op: ShiftOp, a: u32, b: u32) -> u32 {
    let shamt = b & SHAMT_MASK_WORD;
    match op {
        ShiftOp::Sll => a << shamt,
        ShiftOp::Srl => a >> shamt,
        ShiftOp::Sra => ((a as i32) >> shamt) as u32,
    }
}
