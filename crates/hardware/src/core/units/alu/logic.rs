//! ALU logical and comparison operations.

/// Bitwise and set-less-than operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogicOp {
    /// Bitwise AND.
    And,
    /// Bitwise OR.
    Or,
    /// Bitwise XOR.
    Xor,
    /// Set less than (signed).
    Slt,
    /// Set less than unsigned.
    Sltu,
}

/// Executes a bitwise or set-less-than operation. Comparisons yield 0 or 1.
pub const fn execute(op: LogicOp, a: u64, b: u64) -> u64 {
    match op {
        LogicOp::And => a & b,
        LogicOp::Or => a | b,
        LogicOp::Xor => a ^ b,
        LogicOp::Slt => ((a as i64) < (b as i64)) as u64,
        LogicOp::Sltu => (a < b) as u64,
    }
}
