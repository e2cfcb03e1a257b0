//! Simulation statistics collection and reporting.
//!
//! This module tracks performance metrics for the pipeline model. It provides:
//! 1. **Cycle and CPI:** Total cycles, retired instructions and cycles per instruction.
//! 2. **Instruction mix:** Retired counts by category (ALU, load, store, jump, system).
//! 3. **Hazards:** Stall cycles by cause, control flushes and forwarding activity.

use std::fmt;

use serde::Serialize;

use crate::core::pipeline::signals::{ControlSignals, JumpOp, MemOp};

/// Simulation statistics.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SimStats {
    /// Total cycles elapsed.
    pub cycles: u64,
    /// Number of instructions retired by writeback.
    pub instructions_retired: u64,

    /// Retired loads.
    pub inst_load: u64,
    /// Retired stores.
    pub inst_store: u64,
    /// Retired branches and jumps.
    pub inst_branch: u64,
    /// Retired ALU instructions.
    pub inst_alu: u64,
    /// Retired system instructions (`ECALL`, `EBREAK`, `FENCE`).
    pub inst_system: u64,

    /// Cycles decode was held by a load-use hazard.
    pub stalls_data: u64,
    /// Cycles the pipeline was held by the data port.
    pub stalls_mem: u64,
    /// Cycles fetch produced no instruction.
    pub stalls_fetch: u64,
    /// Taken jumps that squashed younger instructions.
    pub flushes_control: u64,

    /// Operands forwarded from EX/MEM.
    pub forwards_ex_mem: u64,
    /// Operands forwarded from MEM/WB.
    pub forwards_mem_wb: u64,
}

impl SimStats {
    /// Cycles per retired instruction, 0.0 before anything retires.
    pub fn cpi(&self) -> f64 {
        if self.instructions_retired == 0 {
            0.0
        } else {
            self.cycles as f64 / self.instructions_retired as f64
        }
    }

    /// Records one retired instruction in the mix counters.
    pub fn record_retire(&mut self, ctrl: &ControlSignals) {
        self.instructions_retired += 1;
        if ctrl.halt.is_some() {
            self.inst_system += 1;
        } else if ctrl.jump_op != JumpOp::None {
            self.inst_branch += 1;
        } else {
            match ctrl.mem_op {
                MemOp::Read => self.inst_load += 1,
                MemOp::Write => self.inst_store += 1,
                MemOp::None if ctrl.reg_write => self.inst_alu += 1,
                MemOp::None => self.inst_system += 1,
            }
        }
    }

    /// Serializes the counters, plus CPI, as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Propagates any `serde_json` serialization failure.
    pub fn to_json(&self) -> serde_json::Result<String> {
        #[derive(Serialize)]
        struct Report<'a> {
            #[serde(flatten)]
            stats: &'a SimStats,
            cpi: f64,
        }

        serde_json::to_string_pretty(&Report {
            stats: self,
            cpi: self.cpi(),
        })
    }
}

impl fmt::Display for SimStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cyc = self.cycles.max(1) as f64;
        let pct = |n: u64| (n as f64 / cyc) * 100.0;

        writeln!(f, "==========================================================")?;
        writeln!(f, "PIPELINE SIMULATION STATISTICS")?;
        writeln!(f, "==========================================================")?;
        writeln!(f, "sim_cycles               {}", self.cycles)?;
        writeln!(f, "sim_insts                {}", self.instructions_retired)?;
        writeln!(f, "sim_cpi                  {:.4}", self.cpi())?;
        writeln!(f, "----------------------------------------------------------")?;
        writeln!(f, "HAZARDS")?;
        writeln!(f, "  stalls.data            {} ({:.2}%)", self.stalls_data, pct(self.stalls_data))?;
        writeln!(f, "  stalls.memory          {} ({:.2}%)", self.stalls_mem, pct(self.stalls_mem))?;
        writeln!(f, "  stalls.fetch           {} ({:.2}%)", self.stalls_fetch, pct(self.stalls_fetch))?;
        writeln!(f, "  flushes.control        {}", self.flushes_control)?;
        writeln!(f, "  forwards.ex_mem        {}", self.forwards_ex_mem)?;
        writeln!(f, "  forwards.mem_wb        {}", self.forwards_mem_wb)?;
        writeln!(f, "----------------------------------------------------------")?;
        writeln!(f, "INSTRUCTION MIX")?;
        writeln!(f, "  op.alu                 {}", self.inst_alu)?;
        writeln!(f, "  op.load                {}", self.inst_load)?;
        writeln!(f, "  op.store               {}", self.inst_store)?;
        writeln!(f, "  op.branch              {}", self.inst_branch)?;
        write!(f, "  op.system              {}", self.inst_system)
    }
}
