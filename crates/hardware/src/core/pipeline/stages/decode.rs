//! Instruction Decode (ID) Stage.
//!
//! Decodes the instruction in IF/ID into an ID/EX entry:
//! 1. **Control:** The control decoder selects the bundle from the opcode.
//! 2. **Legality:** `funct3`/`funct7` combinations are checked against the
//!    implemented subset; anything else becomes an illegal-instruction trap.
//! 3. **Operands:** Both source registers are read through the register
//!    file's read ports, which see this cycle's writeback.

use crate::common::error::Trap;
use crate::common::exit::ExitReason;
use crate::core::arch::gpr::{Gpr, RegWrite};
use crate::core::pipeline::latches::{IdExEntry, IfIdEntry, PipelineSlot};
use crate::core::pipeline::signals::{ControlSignals, control_for};
use crate::core::units::alu_control::AluControl;
use crate::core::units::lsu::Lsu;
use crate::isa::decode::{Decoded, decode};
use crate::isa::funct::{self, branch};
use crate::isa::opcodes;

/// What decode produces this cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecodeOutput {
    /// Slot to drive into ID/EX.
    pub slot: PipelineSlot<IdExEntry>,
    /// Non-zero source registers the instruction reads, for hazard detection.
    pub sources: [Option<usize>; 2],
}

/// Executes the instruction decode stage.
///
/// `wb` is the write presented on the register file's write port this cycle.
pub fn decode_stage(if_id: &PipelineSlot<IfIdEntry>, regs: &Gpr, wb: Option<RegWrite>) -> DecodeOutput {
    let Some(entry) = if_id.get() else {
        return DecodeOutput {
            slot: PipelineSlot::bubble(),
            sources: [None; 2],
        };
    };

    if let Some(trap) = entry.trap {
        return trapped(entry.pc, entry.inst, trap);
    }

    let d = decode(entry.inst);
    let Some(ctrl) = control(&d) else {
        return trapped(entry.pc, entry.inst, Trap::IllegalInstruction(entry.inst));
    };

    let rs1 = if ctrl.uses_rs1 { d.rs1 } else { 0 };
    let rs2 = if ctrl.uses_rs2 { d.rs2 } else { 0 };

    DecodeOutput {
        slot: PipelineSlot::new(IdExEntry {
            pc: entry.pc,
            inst: entry.inst,
            rs1,
            rs2,
            rd: if ctrl.reg_write { d.rd } else { 0 },
            imm: d.imm,
            rv1: regs.read_port(rs1, wb),
            rv2: regs.read_port(rs2, wb),
            funct3: d.funct3,
            funct7: d.funct7,
            ctrl,
            trap: None,
        }),
        sources: [(rs1 != 0).then_some(rs1), (rs2 != 0).then_some(rs2)],
    }
}

/// Control bundle for a legal instruction, `None` for an illegal one.
fn control(d: &Decoded) -> Option<ControlSignals> {
    let mut ctrl = control_for(d.opcode)?;

    let legal = match d.opcode {
        opcodes::OP_BRANCH => matches!(
            d.funct3,
            branch::BEQ | branch::BNE | branch::BLT | branch::BGE | branch::BLTU | branch::BGEU
        ),
        opcodes::OP_LOAD => Lsu::load_width(d.funct3).is_some(),
        opcodes::OP_STORE => Lsu::store_width(d.funct3).is_some(),
        opcodes::OP_JALR => d.funct3 == 0,
        opcodes::OP_MISC_MEM => d.funct3 == funct::FENCE,
        opcodes::OP_SYSTEM => {
            ctrl.halt = match d.raw {
                opcodes::ECALL => Some(ExitReason::Ecall),
                opcodes::EBREAK => Some(ExitReason::Ebreak),
                _ => None,
            };
            ctrl.halt.is_some()
        }
        _ => true,
    };

    let resolved = AluControl::resolve(ctrl.alu_op, d.funct3, d.funct7, ctrl.word).is_some();
    (legal && resolved).then_some(ctrl)
}

fn trapped(pc: u64, inst: u32, trap: Trap) -> DecodeOutput {
    DecodeOutput {
        slot: PipelineSlot::new(IdExEntry {
            pc,
            inst,
            trap: Some(trap),
            ..IdExEntry::default()
        }),
        sources: [None; 2],
    }
}
