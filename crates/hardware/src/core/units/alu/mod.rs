//! Arithmetic Logic Unit (ALU).
//!
//! This module implements the integer ALU used in the Execute stage for
//! RV64I and the M extension. Operations are grouped by category:
//! - [`logic`]:  And, Or, Xor, Slt, Sltu
//! - [`shifts`]: Sll, Srl, Sra
//! - [`muldiv`]: Mul, Mulh, Mulhsu, Mulhu, Div, Divu, Rem, Remu
//!
//! Add, Sub and `PassB` are handled inline. `W` (32-bit word) variants operate
//! on the low 32 bits of each operand and sign-extend the result.

/// Bitwise logical and comparison operations.
pub mod logic;

/// Multiply and divide operations (M extension).
pub mod muldiv;

/// Shift operations.
pub mod shifts;

use self::logic::LogicOp;
use self::muldiv::MulDivOp;
use self::shifts::ShiftOp;
use crate::core::pipeline::signals::AluOp;

/// Integer ALU.
#[derive(Debug)]
pub struct Alu;

impl Alu {
    /// Executes an integer ALU operation.
    ///
    /// # Arguments
    ///
    /// * `op`   - The concrete operation from ALU control
    /// * `a`    - First operand
    /// * `b`    - Second operand (also the shift amount)
    /// * `word` - Perform the 32-bit `W` variant
    ///
    /// # Examples
    ///
    /// ```
    /// use rvpipe_core::core::units::alu::Alu;
    /// use rvpipe_core::core::pipeline::signals::AluOp;
    ///
    /// assert_eq!(Alu::execute(AluOp::Add, 5, 10, false), 15);
    /// // ADDW wraps at 32 bits and sign-extends.
    /// assert_eq!(Alu::execute(AluOp::Add, 0x7FFF_FFFF, 1, true), 0xFFFF_FFFF_8000_0000);
    /// assert_eq!(Alu::execute(AluOp::Slt, -5_i64 as u64, 10, false), 1);
    /// assert_eq!(Alu::execute(AluOp::Divu, 100, 0, false), u64::MAX);
    /// ```
    pub fn execute(op: AluOp, a: u64, b: u64, word: bool) -> u64 {
        if word {
            return Self::execute_word(op, a, b);
        }
        match op {
            AluOp::Add => a.wrapping_add(b),
            AluOp::Sub => a.wrapping_sub(b),
            AluOp::PassB => b,
            AluOp::Sll => shifts::execute(ShiftOp::Sll, a, b),
            AluOp::Srl => shifts::execute(ShiftOp::Srl, a, b),
            AluOp::Sra => shifts::execute(ShiftOp::Sra, a, b),
            AluOp::And => logic::execute(LogicOp::And, a, b),
            AluOp::Or => logic::execute(LogicOp::Or, a, b),
            AluOp::Xor => logic::execute(LogicOp::Xor, a, b),
            AluOp::Slt => logic::execute(LogicOp::Slt, a, b),
            AluOp::Sltu => logic::execute(LogicOp::Sltu, a, b),
            AluOp::Mul => muldiv::execute(MulDivOp::Mul, a, b),
            AluOp::Mulh => muldiv::execute(MulDivOp::Mulh, a, b),
            AluOp::Mulhsu => muldiv::execute(MulDivOp::Mulhsu, a, b),
            AluOp::Mulhu => muldiv::execute(MulDivOp::Mulhu, a, b),
            AluOp::Div => muldiv::execute(MulDivOp::Div, a, b),
            AluOp::Divu => muldiv::execute(MulDivOp::Divu, a, b),
            AluOp::Rem => muldiv::execute(MulDivOp::Rem, a, b),
            AluOp::Remu => muldiv::execute(MulDivOp::Remu, a, b),
        }
    }

    fn execute_word(op: AluOp, a: u64, b: u64) -> u64 {
        let (a32, b32) = (a as u32, b as u32);
        let result = match op {
            AluOp::Add => a32.wrapping_add(b32),
            AluOp::Sub => a32.wrapping_sub(b32),
            AluOp::Sll => shifts::execute_word(ShiftOp::Sll, a32, b32),
            AluOp::Srl => shifts::execute_word(ShiftOp::Srl, a32, b32),
            AluOp::Sra => shifts::execute_word(ShiftOp::Sra, a32, b32),
            AluOp::Mul => muldiv::execute_word(MulDivOp::Mul, a32, b32),
            AluOp::Mulh => muldiv::execute_word(MulDivOp::Mulh, a32, b32),
            AluOp::Mulhsu => muldiv::execute_word(MulDivOp::Mulhsu, a32, b32),
            AluOp::Mulhu => muldiv::execute_word(MulDivOp::Mulhu, a32, b32),
            AluOp::Div => muldiv::execute_word(MulDivOp::Div, a32, b32),
            AluOp::Divu => muldiv::execute_word(MulDivOp::Divu, a32, b32),
            AluOp::Rem => muldiv::execute_word(MulDivOp::Rem, a32, b32),
            AluOp::Remu => muldiv::execute_word(MulDivOp::Remu, a32, b32),
            // No `W` encoding exists for these; the low word of the 64-bit
            // result is sign-extended.
            AluOp::PassB
            | AluOp::And
            | AluOp::Or
            | AluOp::Xor
            | AluOp::Slt
            | AluOp::Sltu => Self::execute(op, a, b, false) as u32,
        };
        sign_extend_word(result)
    }
}

/// Sign-extends a 32-bit result to 64 bits.
#[inline(always)]
pub const fn sign_extend_word(v: u32) -> u64 {
    v as i32 as i64 as u64
}
