//! M-extension multiply and divide.
//!
//! Division never traps. Division by zero returns all ones for the quotient
//! and the dividend for the remainder; signed overflow (`MIN / -1`) returns
//! `MIN` and a zero remainder.

/// M-extension operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MulDivOp {
    /// Low bits of the product.
    Mul,
    /// High bits, signed x signed.
    Mulh,
    /// High bits, signed x unsigned.
    Mulhsu,
    /// High bits, unsigned x unsigned.
    Mulhu,
    /// Signed quotient.
    Div,
    /// Unsigned quotient.
    Divu,
    /// Signed remainder.
    Rem,
    /// Unsigned remainder.
    Remu,
}

/// Executes a 64-bit multiply or divide.
pub fn execute(op: MulDivOp, a: u64, b: u64) -> u64 {
    let (sa, sb) = (a as i64, b as i64);
    match op {
        MulDivOp::Mul => a.wrapping_mul(b),
        MulDivOp::Mulh => ((i128::from(sa) * i128::from(sb)) >> 64) as u64,
        MulDivOp::Mulhsu => ((i128::from(sa) * i128::from(b)) >> 64) as u64,
        MulDivOp::Mulhu => ((u128::from(a) * u128::from(b)) >> 64) as u64,
        MulDivOp::Div => {
            if b == 0 {
                u64::MAX
            } else {
                sa.wrapping_div(sb) as u64
            }
        }
        MulDivOp::Divu => a.checked_div(b).unwrap_or(u64::MAX),
        MulDivOp::Rem => {
            if b == 0 {
                a
            } else {
                sa.wrapping_rem(sb) as u64
            }
        }
        MulDivOp::Remu => a.checked_rem(b).unwrap_or(a),
    }
}

/// Executes a 32-bit multiply or divide; the caller sign-extends the result.
///
/// RV64M has no `W` form of the high multiplies; here they return the high
/// half of the 64-bit product.
pub fn execute_word(op: MulDivOp, a: u32, b: u32) -> u32 {
    let (sa, sb) = (a as i32, b as i32);
    match op {
        MulDivOp::Mul => a.wrapping_mul(b),
        MulDivOp::Mulh => ((i64::from(sa) * i64::from(sb)) >> 32) as u32,
        MulDivOp::Mulhsu => ((i64::from(sa) * i64::from(b)) >> 32) as u32,
        MulDivOp::Mulhu => ((u64::from(a) * u64::from(b)) >> 32) as u32,
        MulDivOp::Div => {
            if b == 0 {
                u32::MAX
            } else {
                sa.wrapping_div(sb) as u32
            }
        }
        MulDivOp::Divu => a.checked_div(b).unwrap_or(u32::MAX),
        MulDivOp::Rem => {
            if b == 0 {
                a
            } else {
                sa.wrapping_rem(sb) as u32
            }
        }
        MulDivOp::Remu => a.checked_rem(b).unwrap_or(a),
    }
}
