//! Operand forwarding unit.
//!
//! Resolves read-after-write hazards between the instruction in execute and
//! the two older instructions still in flight:
//! 1. **EX/MEM:** one instruction older; its ALU result (or return address)
//!    is forwarded and has priority.
//! 2. **MEM/WB:** two instructions older; its final writeback value is
//!    forwarded when EX/MEM does not match.
//!
//! `x0` is never forwarded. A producer only counts when its slot is valid,
//! it writes a register and it carries no trap.

use crate::core::pipeline::latches::{ExMemEntry, IdExEntry, MemWbEntry, PipelineSlot};

/// Source selected for one ALU operand.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ForwardSelect {
    /// Value read in decode.
    #[default]
    None,
    /// Result held in EX/MEM.
    ExMem,
    /// Result held in MEM/WB.
    MemWb,
}

/// Forwarding selects for both source operands of the instruction in execute.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ForwardDecision {
    /// Select for `rs1`.
    pub a: ForwardSelect,
    /// Select for `rs2`.
    pub b: ForwardSelect,
}

/// Forwarding unit.
#[derive(Debug)]
pub struct ForwardingUnit;

impl ForwardingUnit {
    /// Select for a single source register.
    ///
    /// `ex_mem_rd`/`mem_wb_rd` are the destinations of producers that will
    /// write a register, or `None`.
    pub fn select(rs: usize, ex_mem_rd: Option<usize>, mem_wb_rd: Option<usize>) -> ForwardSelect {
        if rs == 0 {
            ForwardSelect::None
        } else if ex_mem_rd == Some(rs) {
            ForwardSelect::ExMem
        } else if mem_wb_rd == Some(rs) {
            ForwardSelect::MemWb
        } else {
            ForwardSelect::None
        }
    }

    /// Selects for the instruction in ID/EX against the pre-tick EX/MEM and
    /// MEM/WB registers.
    pub fn resolve(
        id_ex: &PipelineSlot<IdExEntry>,
        ex_mem: &PipelineSlot<ExMemEntry>,
        mem_wb: &PipelineSlot<MemWbEntry>,
    ) -> ForwardDecision {
        let Some(entry) = id_ex.get() else {
            return ForwardDecision::default();
        };

        let ex_mem_rd = ex_mem
            .get()
            .filter(|e| e.ctrl.reg_write && e.trap.is_none())
            .map(|e| e.rd);
        let mem_wb_rd = mem_wb
            .get()
            .filter(|e| e.ctrl.reg_write && e.trap.is_none())
            .map(|e| e.rd);

        ForwardDecision {
            a: if entry.ctrl.uses_rs1 {
                Self::select(entry.rs1, ex_mem_rd, mem_wb_rd)
            } else {
                ForwardSelect::None
            },
            b: if entry.ctrl.uses_rs2 {
                Self::select(entry.rs2, ex_mem_rd, mem_wb_rd)
            } else {
                ForwardSelect::None
            },
        }
    }
}
