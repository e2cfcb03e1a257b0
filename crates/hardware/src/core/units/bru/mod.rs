//! Branch resolution unit (BRU).
//!
//! Two pure functions used by the execute stage:
//! 1. **Jump detection:** whether a control-flow instruction redirects the PC.
//! 2. **Jump-target generation:** where it redirects to.
//!
//! The pipeline predicts not-taken; the result computed here is carried to the
//! memory stage, which is where a redirect takes effect.

use crate::core::pipeline::signals::JumpOp;
use crate::isa::funct::branch;

/// Branch resolution unit.
#[derive(Debug)]
pub struct Bru;

impl Bru {
    /// Jump detection.
    ///
    /// `a` and `b` are the forwarded `rs1`/`rs2` values. Unconditional jumps
    /// are always taken; non-jumps never are.
    pub const fn is_taken(op: JumpOp, funct3: u32, a: u64, b: u64) -> bool {
        match op {
            JumpOp::None => false,
            JumpOp::Jal | JumpOp::Jalr => true,
            JumpOp::Branch => match funct3 {
                branch::BEQ => a == b,
                branch::BNE => a != b,
                branch::BLT => (a as i64) < (b as i64),
                branch::BGE => (a as i64) >= (b as i64),
                branch::BLTU => a < b,
                branch::BGEU => a >= b,
                _ => false,
            },
        }
    }

    /// Jump-target generation.
    ///
    /// `JALR` jumps to `(rs1 + imm)` with bit 0 cleared; branches and `JAL`
    /// are PC-relative.
    pub const fn target(op: JumpOp, pc: u64, rs1: u64, imm: i64) -> u64 {
        match op {
            JumpOp::Jalr => rs1.wrapping_add(imm as u64) & !1,
            _ => pc.wrapping_add(imm as u64),
        }
    }
}
