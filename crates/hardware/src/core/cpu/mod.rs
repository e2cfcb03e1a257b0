//! CPU Core Definition and Initialization.
//!
//! This module defines the central `Cpu` structure, the explicit simulation
//! state of the pipeline orchestrator. It holds:
//! 1. **Architectural State:** The program counter and the register file.
//! 2. **Pipeline State:** The four stage registers between the five stages.
//! 3. **Bookkeeping:** Statistics, tracing and the halt latch.
//!
//! Memory is not owned here; each tick borrows the two ports.

/// The two-phase tick.
pub mod execution;

use crate::common::exit::ExitReason;
use crate::config::Config;
use crate::core::arch::gpr::Gpr;
use crate::core::pipeline::latches::{ExMemEntry, IdExEntry, IfIdEntry, MemWbEntry, StageRegister};
use crate::stats::SimStats;

pub use self::execution::TickOutcome;

/// Pipeline orchestrator state.
///
/// Every stage register starts as a bubble and the PC at
/// `general.start_pc`; nothing else carries over between cycles.
#[derive(Debug)]
pub struct Cpu {
    /// Program counter of the next fetch.
    pub pc: u64,
    /// Integer register file.
    pub regs: Gpr,

    /// IF/ID stage register.
    pub if_id: StageRegister<IfIdEntry>,
    /// ID/EX stage register.
    pub id_ex: StageRegister<IdExEntry>,
    /// EX/MEM stage register.
    pub ex_mem: StageRegister<ExMemEntry>,
    /// MEM/WB stage register.
    pub mem_wb: StageRegister<MemWbEntry>,

    /// Performance statistics.
    pub stats: SimStats,
    /// Emit per-stage trace events.
    pub trace: bool,
    /// Set once a halting instruction has retired.
    pub halted: Option<ExitReason>,
}

impl Cpu {
    /// Creates a CPU in its reset state.
    pub fn new(config: &Config) -> Self {
        Self {
            pc: config.general.start_pc,
            regs: Gpr::new(),
            if_id: StageRegister::new(),
            id_ex: StageRegister::new(),
            ex_mem: StageRegister::new(),
            mem_wb: StageRegister::new(),
            stats: SimStats::default(),
            trace: config.general.trace_instructions || cfg!(feature = "always-trace"),
            halted: None,
        }
    }

    /// Whether every stage register holds a bubble.
    pub fn is_drained(&self) -> bool {
        use crate::core::pipeline::traits::PipelineLatch;

        self.if_id.is_bubble()
            && self.id_ex.is_bubble()
            && self.ex_mem.is_bubble()
            && self.mem_wb.is_bubble()
    }
}
