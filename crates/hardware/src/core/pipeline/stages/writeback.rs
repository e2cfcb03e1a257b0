//! Writeback (WB) Stage.
//!
//! Consumes the MEM/WB slot. A valid, trap-free instruction retires and
//! presents its result on the register file's write port; a halting
//! instruction stops the core; a trap becomes fatal here and only here.

use crate::common::error::Trap;
use crate::common::exit::ExitReason;
use crate::core::arch::gpr::RegWrite;
use crate::core::pipeline::latches::{MemWbEntry, PipelineSlot};

/// Outcome of the writeback stage for one cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Writeback {
    /// MEM/WB held a bubble.
    Bubble,
    /// An instruction retired, optionally writing a register.
    Retire(Option<RegWrite>),
    /// A halting instruction retired.
    Halt(ExitReason),
    /// A trap-carrying instruction reached writeback.
    Trap {
        /// Address of the instruction.
        pc: u64,
        /// The trap it carries.
        trap: Trap,
    },
}

impl Writeback {
    /// The register write presented this cycle, if any.
    pub const fn reg_write(&self) -> Option<RegWrite> {
        match self {
            Self::Retire(w) => *w,
            _ => None,
        }
    }
}

/// Executes the writeback stage.
pub fn writeback_stage(mem_wb: &PipelineSlot<MemWbEntry>) -> Writeback {
    let Some(e) = mem_wb.get() else {
        return Writeback::Bubble;
    };
    if let Some(trap) = e.trap {
        return Writeback::Trap { pc: e.pc, trap };
    }
    if let Some(reason) = e.ctrl.halt {
        return Writeback::Halt(reason);
    }
    let write = (e.ctrl.reg_write && e.rd != 0).then(|| RegWrite {
        rd: e.rd,
        value: e.result(),
    });
    Writeback::Retire(write)
}
