//! Execute (EX) Stage.
//!
//! Selects forwarded operands, runs the ALU and resolves control flow. The
//! jump decision is only recorded here; it takes effect when the instruction
//! reaches the memory stage.

use crate::common::error::Trap;
use crate::core::pipeline::forwarding::{ForwardDecision, ForwardSelect};
use crate::core::pipeline::latches::{ExMemEntry, IdExEntry, PipelineSlot};
use crate::core::pipeline::signals::{OpASrc, OpBSrc};
use crate::core::units::alu::Alu;
use crate::core::units::alu_control::AluControl;
use crate::core::units::bru::Bru;

/// Source operand values for `e` after forwarding, before the operand muxes.
pub const fn forwarded_operands(
    e: &IdExEntry,
    fwd: ForwardDecision,
    ex_mem_value: u64,
    mem_wb_value: u64,
) -> (u64, u64) {
    const fn pick(sel: ForwardSelect, reg: u64, ex_mem: u64, mem_wb: u64) -> u64 {
        match sel {
            ForwardSelect::None => reg,
            ForwardSelect::ExMem => ex_mem,
            ForwardSelect::MemWb => mem_wb,
        }
    }
    (
        pick(fwd.a, e.rv1, ex_mem_value, mem_wb_value),
        pick(fwd.b, e.rv2, ex_mem_value, mem_wb_value),
    )
}

/// Executes the execute stage.
///
/// `ex_mem_value` and `mem_wb_value` are the values forwarded from the
/// pre-tick EX/MEM and MEM/WB registers; they are only used where `fwd`
/// selects them.
pub fn execute_stage(
    id_ex: &PipelineSlot<IdExEntry>,
    fwd: ForwardDecision,
    ex_mem_value: u64,
    mem_wb_value: u64,
) -> PipelineSlot<ExMemEntry> {
    let Some(e) = id_ex.get() else {
        return PipelineSlot::bubble();
    };

    let passthrough = ExMemEntry {
        pc: e.pc,
        inst: e.inst,
        ctrl: e.ctrl,
        trap: e.trap,
        ..ExMemEntry::default()
    };
    if e.trap.is_some() {
        return PipelineSlot::new(passthrough);
    }

    let (a, b) = forwarded_operands(e, fwd, ex_mem_value, mem_wb_value);

    let op_a = match e.ctrl.op1_src {
        OpASrc::Reg1 => a,
        OpASrc::Pc => e.pc,
        OpASrc::Zero => 0,
    };
    let op_b = match e.ctrl.op2_src {
        OpBSrc::Reg2 => b,
        OpBSrc::Imm => e.imm as u64,
    };

    let Some(op) = AluControl::resolve(e.ctrl.alu_op, e.funct3, e.funct7, e.ctrl.word) else {
        return PipelineSlot::new(ExMemEntry {
            trap: Some(Trap::IllegalInstruction(e.inst)),
            ..passthrough
        });
    };

    PipelineSlot::new(ExMemEntry {
        rd: e.rd,
        alu: Alu::execute(op, op_a, op_b, e.ctrl.word),
        store_data: b,
        funct3: e.funct3,
        taken: Bru::is_taken(e.ctrl.jump_op, e.funct3, a, b),
        target: Bru::target(e.ctrl.jump_op, e.pc, a, e.imm),
        ..passthrough
    })
}
