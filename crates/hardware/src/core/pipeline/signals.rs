//! Pipeline control signals and the control decoder.
//!
//! This module defines the control bundle decode attaches to every instruction.
//! It covers:
//! 1. **Operation Classification:** The ALU operation class handed to ALU control,
//!    and the concrete ALU operation it resolves to.
//! 2. **Operand Selection:** Sources for ALU inputs (registers, PC, zero, immediate).
//! 3. **Memory and Writeback:** Memory-operation class and writeback source.
//! 4. **Control Flow:** Jump-operation class and halt requests.
//!
//! The bundle is produced once in decode and threaded unmodified to writeback.

use crate::common::exit::ExitReason;
use crate::isa::opcodes;

/// Concrete ALU operations, as resolved by ALU control.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AluOp {
    /// Integer addition.
    #[default]
    Add,
    /// Integer subtraction.
    Sub,
    /// Shift left logical.
    Sll,
    /// Set less than (signed).
    Slt,
    /// Set less than unsigned.
    Sltu,
    /// Bitwise XOR.
    Xor,
    /// Shift right logical.
    Srl,
    /// Shift right arithmetic.
    Sra,
    /// Bitwise OR.
    Or,
    /// Bitwise AND.
    And,
    /// Pass operand B through (`LUI`).
    PassB,
    /// Multiply, low bits.
    Mul,
    /// Multiply high, signed x signed.
    Mulh,
    /// Multiply high, signed x unsigned.
    Mulhsu,
    /// Multiply high, unsigned x unsigned.
    Mulhu,
    /// Signed division.
    Div,
    /// Unsigned division.
    Divu,
    /// Signed remainder.
    Rem,
    /// Unsigned remainder.
    Remu,
}

/// ALU operation class chosen by the control decoder from the opcode alone.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AluOpClass {
    /// Address or PC-relative addition (loads, stores, `AUIPC`, jumps).
    #[default]
    Add,
    /// Branch comparison; the ALU result is unused.
    Branch,
    /// Register-register operation selected by `funct3`/`funct7`.
    Reg,
    /// Register-immediate operation selected by `funct3` (and `funct7` for shifts).
    Imm,
    /// Load upper immediate.
    Lui,
}

/// Source for ALU operand A.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OpASrc {
    /// Use `rs1` register value.
    #[default]
    Reg1,
    /// Use the instruction's program counter.
    Pc,
    /// Use zero.
    Zero,
}

/// Source for ALU operand B.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OpBSrc {
    /// Use `rs2` register value.
    #[default]
    Reg2,
    /// Use sign-extended immediate value.
    Imm,
}

/// Memory-operation class.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MemOp {
    /// No memory access.
    #[default]
    None,
    /// Load.
    Read,
    /// Store.
    Write,
}

/// Writeback source selector.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WbSrc {
    /// ALU result.
    #[default]
    Alu,
    /// Loaded data.
    Mem,
    /// Return address (`pc + 4`) for `JAL`/`JALR`.
    PcPlus4,
}

/// Jump-operation class consumed by jump detection and target generation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum JumpOp {
    /// Not a control-flow instruction.
    #[default]
    None,
    /// Conditional branch; taken when the `funct3` condition holds.
    Branch,
    /// PC-relative unconditional jump.
    Jal,
    /// Register-indirect unconditional jump.
    Jalr,
}

/// Control signals for one instruction.
///
/// The default value is the bundle of a bubble: no register write, no memory
/// access, no jump.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ControlSignals {
    /// ALU operation class.
    pub alu_op: AluOpClass,
    /// Source selection for ALU operand A.
    pub op1_src: OpASrc,
    /// Source selection for ALU operand B.
    pub op2_src: OpBSrc,
    /// Memory-operation class.
    pub mem_op: MemOp,
    /// Writeback source.
    pub wb_src: WbSrc,
    /// Jump-operation class.
    pub jump_op: JumpOp,
    /// Enable write to the destination register.
    pub reg_write: bool,
    /// Operate on the low 32 bits and sign-extend (`W` instructions).
    pub word: bool,
    /// The instruction reads `rs1`.
    pub uses_rs1: bool,
    /// The instruction reads `rs2`.
    pub uses_rs2: bool,
    /// Stop simulation when this instruction reaches writeback.
    pub halt: Option<ExitReason>,
}

/// Control decoder: maps a major opcode to its control bundle.
///
/// Returns `None` for opcodes the core does not implement. `OP_SYSTEM` yields
/// an inert bundle; decode inspects the full encoding to tell `ECALL` from
/// `EBREAK` and sets `halt`.
///
/// # Examples
///
/// ```
/// use rvpipe_core::core::pipeline::signals::{control_for, MemOp, WbSrc};
/// use rvpipe_core::isa::opcodes::OP_LOAD;
///
/// let ctrl = control_for(OP_LOAD).unwrap();
/// assert_eq!(ctrl.mem_op, MemOp::Read);
/// assert_eq!(ctrl.wb_src, WbSrc::Mem);
/// assert!(ctrl.reg_write);
/// assert!(control_for(0).is_none());
/// ```
pub const fn control_for(opcode: u32) -> Option<ControlSignals> {
    let base = ControlSignals {
        alu_op: AluOpClass::Add,
        op1_src: OpASrc::Reg1,
        op2_src: OpBSrc::Imm,
        mem_op: MemOp::None,
        wb_src: WbSrc::Alu,
        jump_op: JumpOp::None,
        reg_write: false,
        word: false,
        uses_rs1: false,
        uses_rs2: false,
        halt: None,
    };

    let ctrl = match opcode {
        opcodes::OP_LUI => ControlSignals {
            alu_op: AluOpClass::Lui,
            op1_src: OpASrc::Zero,
            reg_write: true,
            ..base
        },
        opcodes::OP_AUIPC => ControlSignals {
            op1_src: OpASrc::Pc,
            reg_write: true,
            ..base
        },
        opcodes::OP_JAL => ControlSignals {
            op1_src: OpASrc::Pc,
            wb_src: WbSrc::PcPlus4,
            jump_op: JumpOp::Jal,
            reg_write: true,
            ..base
        },
        opcodes::OP_JALR => ControlSignals {
            wb_src: WbSrc::PcPlus4,
            jump_op: JumpOp::Jalr,
            reg_write: true,
            uses_rs1: true,
            ..base
        },
        opcodes::OP_BRANCH => ControlSignals {
            alu_op: AluOpClass::Branch,
            op2_src: OpBSrc::Reg2,
            jump_op: JumpOp::Branch,
            uses_rs1: true,
            uses_rs2: true,
            ..base
        },
        opcodes::OP_LOAD => ControlSignals {
            mem_op: MemOp::Read,
            wb_src: WbSrc::Mem,
            reg_write: true,
            uses_rs1: true,
            ..base
        },
        opcodes::OP_STORE => ControlSignals {
            mem_op: MemOp::Write,
            uses_rs1: true,
            uses_rs2: true,
            ..base
        },
        opcodes::OP_IMM | opcodes::OP_IMM_32 => ControlSignals {
            alu_op: AluOpClass::Imm,
            reg_write: true,
            word: opcode == opcodes::OP_IMM_32,
            uses_rs1: true,
            ..base
        },
        opcodes::OP_REG | opcodes::OP_REG_32 => ControlSignals {
            alu_op: AluOpClass::Reg,
            op2_src: OpBSrc::Reg2,
            reg_write: true,
            word: opcode == opcodes::OP_REG_32,
            uses_rs1: true,
            uses_rs2: true,
            ..base
        },
        opcodes::OP_MISC_MEM | opcodes::OP_SYSTEM => base,
        _ => return None,
    };
    Some(ctrl)
}
