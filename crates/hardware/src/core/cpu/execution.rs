//! Main Execution Loop.
//!
//! One call to [`Cpu::tick`] is one clock cycle, split in two phases:
//! 1. **Evaluate:** Every stage reads only the pre-tick stage registers and
//!    this cycle's port responses. Writeback runs first so that its register
//!    write is visible to decode; the ports are each evaluated exactly once.
//! 2. **Commit:** The hazard decision is applied, the register file and all
//!    stage registers latch, the PC updates and both ports clock.
//!
//! A halt or trap reaching writeback ends the cycle before any younger stage
//! evaluates, so no younger instruction has a side effect.

use tracing::{trace, warn};

use super::Cpu;
use crate::common::constants::INSTRUCTION_BYTES;
use crate::common::error::{PortKind, SimError, SimResult};
use crate::common::exit::ExitReason;
use crate::core::pipeline::forwarding::{ForwardDecision, ForwardSelect, ForwardingUnit};
use crate::core::pipeline::hazards::{HazardDecision, HazardInputs, HazardUnit};
use crate::core::pipeline::latches::{IdExEntry, PipelineSlot};
use crate::core::pipeline::signals::{ControlSignals, MemOp};
use crate::core::pipeline::stages::{
    Writeback, decode_stage, execute_stage, fetch_request, fetch_stage, forwarded_operands,
    memory_request, memory_stage, writeback_stage,
};
use crate::soc::traits::{DataPort, InstructionPort};

/// What happened in one cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickOutcome {
    /// 0-based index of the cycle.
    pub cycle: u64,
    /// An instruction performed writeback.
    pub retired: bool,
    /// The retiring instruction halted the core.
    pub halted: Option<ExitReason>,
    /// Fetch-word address the instruction port has not delivered yet.
    pub imem_pending: Option<u64>,
    /// Address of the data access still pending.
    pub dmem_pending: Option<u64>,
}

impl Cpu {
    /// Advances the pipeline by one clock cycle.
    ///
    /// A CPU that has halted does nothing and reports the halt again.
    ///
    /// # Errors
    ///
    /// - [`SimError::Trap`] when a trap-carrying instruction reaches writeback.
    /// - [`SimError::Protocol`] when a port response breaks the handshake.
    /// - [`SimError::HazardConflict`] for an incompatible stall/flush request.
    pub fn tick(
        &mut self,
        imem: &mut dyn InstructionPort,
        dmem: &mut dyn DataPort,
    ) -> SimResult<TickOutcome> {
        let cycle = self.stats.cycles;
        if let Some(reason) = self.halted {
            return Ok(TickOutcome {
                cycle,
                halted: Some(reason),
                ..TickOutcome::default()
            });
        }

        // Writeback.
        let wb = writeback_stage(self.mem_wb.current());
        match wb {
            Writeback::Trap { pc, trap } => {
                warn!(cycle, pc, %trap, "trap reached writeback");
                return Err(SimError::Trap { pc, trap });
            }
            Writeback::Halt(reason) => {
                self.stats.record_retire(&self.mem_wb.current().payload.ctrl);
                self.stats.cycles += 1;
                self.halted = Some(reason);
                if self.trace {
                    trace!(cycle, pc = self.mem_wb.current().payload.pc, %reason, "WB halt");
                }
                return Ok(TickOutcome {
                    cycle,
                    retired: true,
                    halted: Some(reason),
                    ..TickOutcome::default()
                });
            }
            Writeback::Bubble | Writeback::Retire(_) => {}
        }
        let reg_write = wb.reg_write();
        let retiring = self
            .mem_wb
            .current()
            .get()
            .map(|e| e.ctrl)
            .filter(|_| matches!(wb, Writeback::Retire(_)));

        // Memory.
        let dreq = memory_request(self.ex_mem.current());
        let dresp = dmem.evaluate(dreq);
        let mem = memory_stage(self.ex_mem.current(), dreq, &dresp)
            .inspect_err(|e| warn!(cycle, error = %e, "data port"))?;

        // Execute, with operands forwarded from the pre-tick EX/MEM and MEM/WB.
        let fwd = ForwardingUnit::resolve(
            self.id_ex.current(),
            self.ex_mem.current(),
            self.mem_wb.current(),
        );
        let ex_mem_value = self.ex_mem.current().payload.forward_value();
        let mem_wb_value = self.mem_wb.current().payload.result();
        let executed = execute_stage(self.id_ex.current(), fwd, ex_mem_value, mem_wb_value);

        // Decode.
        let decoded = decode_stage(self.if_id.current(), &self.regs, reg_write);

        // Fetch.
        let freq = fetch_request(self.pc);
        let fresp = imem.evaluate(freq);
        if fresp.fault && !fresp.good {
            let e = SimError::Protocol {
                port: PortKind::Instruction,
                reason: "fault without good".to_owned(),
            };
            warn!(cycle, error = %e, "instruction port");
            return Err(e);
        }
        let fetched = fetch_stage(self.pc, &fresp);

        // Hazards.
        let ex_load_rd = self
            .id_ex
            .current()
            .get()
            .filter(|e| e.trap.is_none() && e.ctrl.mem_op == MemOp::Read && e.rd != 0)
            .map(|e| e.rd);
        let hz = HazardUnit::evaluate(&HazardInputs {
            ex_load_rd,
            decode_sources: decoded.sources,
            dmem_wait: mem.wait,
            fetch_good: fetched.good,
            taken: mem.taken,
            target: mem.target,
        });
        hz.validate()
            .inspect_err(|e| warn!(cycle, error = %e, "hazard unit"))?;

        if self.trace {
            trace!(cycle, pc = self.pc, good = fetched.good, inst = fetched.slot.payload.inst, "IF");
            trace!(cycle, pc = ?self.if_id.current().get().map(|e| e.pc), "ID");
            trace!(cycle, pc = ?self.id_ex.current().get().map(|e| e.pc), fwd = ?fwd, "EX");
            trace!(cycle, pc = ?self.ex_mem.current().get().map(|e| e.pc), wait = mem.wait, "MEM");
            trace!(cycle, pc = ?self.mem_wb.current().get().map(|e| e.pc), write = ?reg_write, "WB");
        }

        // Commit.
        self.regs.commit(reg_write);
        self.if_id.drive(fetched.slot, hz.if_id.enable(), hz.if_id.flush);
        if hz.id_ex.stall {
            // The producers feeding a held instruction can retire before it
            // executes, so it keeps the operands forwarded this cycle.
            let held = self.id_ex.current().get().map_or_else(PipelineSlot::bubble, |e| {
                let (rv1, rv2) = forwarded_operands(e, fwd, ex_mem_value, mem_wb_value);
                PipelineSlot::new(IdExEntry { rv1, rv2, ..*e })
            });
            self.id_ex.drive(held, true, hz.id_ex.flush);
        } else {
            self.id_ex.drive(decoded.slot, true, hz.id_ex.flush);
        }
        self.ex_mem.drive(executed, hz.ex_mem.enable(), hz.ex_mem.flush);
        self.mem_wb.drive(mem.slot, hz.mem_wb.enable(), hz.mem_wb.flush);
        self.if_id.clock();
        self.id_ex.clock();
        self.ex_mem.clock();
        self.mem_wb.clock();

        if let Some(target) = hz.redirect {
            self.pc = target;
        } else if !hz.pc_stall {
            self.pc = self.pc.wrapping_add(INSTRUCTION_BYTES);
        }

        imem.clock();
        dmem.clock();

        self.record(&hz, fwd, retiring.as_ref());

        Ok(TickOutcome {
            cycle,
            retired: retiring.is_some(),
            halted: None,
            imem_pending: freq.filter(|_| !fetched.good).map(|r| r.addr),
            dmem_pending: dreq.filter(|_| mem.wait).map(|r| r.addr),
        })
    }

    fn record(&mut self, hz: &HazardDecision, fwd: ForwardDecision, retired: Option<&ControlSignals>) {
        let stats = &mut self.stats;
        stats.cycles += 1;
        if let Some(ctrl) = retired {
            stats.record_retire(ctrl);
        }
        if hz.load_use && !hz.dmem_wait {
            stats.stalls_data += 1;
        }
        if hz.dmem_wait {
            stats.stalls_mem += 1;
        }
        if !hz.fetch_good && hz.redirect.is_none() {
            stats.stalls_fetch += 1;
        }
        if hz.redirect.is_some() {
            stats.flushes_control += 1;
        }
        if hz.ex_mem.enable() {
            for sel in [fwd.a, fwd.b] {
                match sel {
                    ForwardSelect::ExMem => stats.forwards_ex_mem += 1,
                    ForwardSelect::MemWb => stats.forwards_mem_wb += 1,
                    ForwardSelect::None => {}
                }
            }
        }
    }
}
