//! ALU control.
//!
//! Resolves the opcode-level ALU operation class chosen by the control
//! decoder into a concrete [`AluOp`], using `funct3`, `funct7` and the word
//! flag. Returns `None` for encodings that are not valid instructions, which
//! decode turns into an illegal-instruction trap.

use crate::core::pipeline::signals::{AluOp, AluOpClass};
use crate::isa::funct::{alu, funct7 as f7, muldiv};

/// `funct7` with bit 0 dropped: RV64 immediate shifts use it for `shamt[5]`.
const SHIFT_FUNCT6_MASK: u32 = 0x7E;

/// ALU control unit.
#[derive(Debug)]
pub struct AluControl;

impl AluControl {
    /// Resolves the concrete ALU operation.
    ///
    /// # Examples
    ///
    /// ```
    /// use rvpipe_core::core::units::alu_control::AluControl;
    /// use rvpipe_core::core::pipeline::signals::{AluOp, AluOpClass};
    ///
    /// assert_eq!(AluControl::resolve(AluOpClass::Reg, 0b000, 0b010_0000, false), Some(AluOp::Sub));
    /// assert_eq!(AluControl::resolve(AluOpClass::Reg, 0b001, 0b000_0001, true), None); // no MULHW
    /// ```
    pub const fn resolve(class: AluOpClass, funct3: u32, funct7: u32, word: bool) -> Option<AluOp> {
        match class {
            AluOpClass::Add => Some(AluOp::Add),
            AluOpClass::Branch => Some(AluOp::Sub),
            AluOpClass::Lui => Some(AluOp::PassB),
            AluOpClass::Imm => Self::resolve_imm(funct3, funct7, word),
            AluOpClass::Reg => Self::resolve_reg(funct3, funct7, word),
        }
    }

    const fn resolve_imm(funct3: u32, funct7: u32, word: bool) -> Option<AluOp> {
        // For 64-bit shifts the low funct7 bit belongs to the shift amount.
        let shift_sel = if word { funct7 } else { funct7 & SHIFT_FUNCT6_MASK };
        let op = match funct3 {
            alu::ADD_SUB => AluOp::Add,
            alu::SLL if shift_sel == f7::BASE => AluOp::Sll,
            alu::SRL_SRA if shift_sel == f7::BASE => AluOp::Srl,
            alu::SRL_SRA if shift_sel == f7::ALT => AluOp::Sra,
            alu::SLT if !word => AluOp::Slt,
            alu::SLTU if !word => AluOp::Sltu,
            alu::XOR if !word => AluOp::Xor,
            alu::OR if !word => AluOp::Or,
            alu::AND if !word => AluOp::And,
            _ => return None,
        };
        Some(op)
    }

    const fn resolve_reg(funct3: u32, funct7: u32, word: bool) -> Option<AluOp> {
        let op = match (funct7, funct3) {
            (f7::BASE, alu::ADD_SUB) => AluOp::Add,
            (f7::ALT, alu::ADD_SUB) => AluOp::Sub,
            (f7::BASE, alu::SLL) => AluOp::Sll,
            (f7::BASE, alu::SRL_SRA) => AluOp::Srl,
            (f7::ALT, alu::SRL_SRA) => AluOp::Sra,
            (f7::BASE, alu::SLT) if !word => AluOp::Slt,
            (f7::BASE, alu::SLTU) if !word => AluOp::Sltu,
            (f7::BASE, alu::XOR) if !word => AluOp::Xor,
            (f7::BASE, alu::OR) if !word => AluOp::Or,
            (f7::BASE, alu::AND) if !word => AluOp::And,
            (f7::MULDIV, muldiv::MUL) => AluOp::Mul,
            (f7::MULDIV, muldiv::MULH) if !word => AluOp::Mulh,
            (f7::MULDIV, muldiv::MULHSU) if !word => AluOp::Mulhsu,
            (f7::MULDIV, muldiv::MULHU) if !word => AluOp::Mulhu,
            (f7::MULDIV, muldiv::DIV) => AluOp::Div,
            (f7::MULDIV, muldiv::DIVU) => AluOp::Divu,
            (f7::MULDIV, muldiv::REM) => AluOp::Rem,
            (f7::MULDIV, muldiv::REMU) => AluOp::Remu,
            _ => return None,
        };
        Some(op)
    }
}
