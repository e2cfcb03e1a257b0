//! Hazard unit.
//!
//! Turns this cycle's hazard signals into a stall/flush pair for every stage
//! boundary and a program-counter decision:
//! 1. **Load-use:** the load in ID/EX writes a register the instruction in
//!    decode reads. Decode holds one cycle and a bubble enters execute; the
//!    value then arrives through MEM/WB forwarding.
//! 2. **Data-memory wait:** the access in EX/MEM has not completed. Everything
//!    upstream of writeback holds and a bubble enters MEM/WB.
//! 3. **Fetch wait:** the instruction port produced nothing usable. The PC
//!    holds and fetch drives a bubble into IF/ID.
//! 4. **Control:** the jump in EX/MEM was taken. The three younger slots are
//!    squashed and the PC is redirected.
//!
//! Flush dominates stall on each boundary. The only boundary where both can
//! be asked for with contradictory intent is EX/MEM (an instruction both
//! waiting on memory and redirecting); [`HazardDecision::validate`] rejects it.

use std::fmt;

use tracing::debug;

use crate::common::error::{SimError, SimResult};

/// A clocked boundary of the pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Boundary {
    /// The program counter.
    Pc,
    /// Fetch to decode.
    IfId,
    /// Decode to execute.
    IdEx,
    /// Execute to memory.
    ExMem,
    /// Memory to writeback.
    MemWb,
}

impl fmt::Display for Boundary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Pc => "PC",
            Self::IfId => "IF/ID",
            Self::IdEx => "ID/EX",
            Self::ExMem => "EX/MEM",
            Self::MemWb => "MEM/WB",
        };
        f.write_str(name)
    }
}

/// Stall and flush requests for one stage register.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StageControl {
    /// Hold the current value.
    pub stall: bool,
    /// Replace the next value with a bubble.
    pub flush: bool,
}

impl StageControl {
    /// Load enable presented to the stage register.
    pub const fn enable(self) -> bool {
        !self.stall
    }
}

/// Hazard signals sampled from the pre-tick state and this cycle's port
/// responses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HazardInputs {
    /// Destination of a valid, trap-free load in ID/EX (`None` if `rd == 0`).
    pub ex_load_rd: Option<usize>,
    /// Registers the instruction in decode actually reads.
    pub decode_sources: [Option<usize>; 2],
    /// The access in EX/MEM is still pending.
    pub dmem_wait: bool,
    /// Fetch produced a usable slot this cycle.
    pub fetch_good: bool,
    /// Jump in EX/MEM was taken.
    pub taken: bool,
    /// Target of the taken jump.
    pub target: u64,
}

/// Per-cycle output of the hazard unit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HazardDecision {
    /// The PC holds its value.
    pub pc_stall: bool,
    /// New PC when a jump was taken.
    pub redirect: Option<u64>,
    /// IF/ID request.
    pub if_id: StageControl,
    /// ID/EX request.
    pub id_ex: StageControl,
    /// EX/MEM request.
    pub ex_mem: StageControl,
    /// MEM/WB request.
    pub mem_wb: StageControl,
    /// A load-use stall was inserted.
    pub load_use: bool,
    /// The data port held the pipeline.
    pub dmem_wait: bool,
    /// Fetch produced a usable slot.
    pub fetch_good: bool,
}

impl HazardDecision {
    /// Rejects requests the stage registers cannot honor together.
    ///
    /// # Errors
    ///
    /// [`SimError::HazardConflict`] when EX/MEM is asked to hold and squash
    /// in the same cycle.
    pub fn validate(&self) -> SimResult<()> {
        if self.ex_mem.stall && self.ex_mem.flush {
            return Err(SimError::HazardConflict {
                boundary: Boundary::ExMem,
                reason: "data-memory wait and taken jump in the same slot",
            });
        }
        Ok(())
    }

    /// Request for `boundary`; the PC never flushes.
    pub const fn control(&self, boundary: Boundary) -> StageControl {
        match boundary {
            Boundary::Pc => StageControl {
                stall: self.pc_stall,
                flush: false,
            },
            Boundary::IfId => self.if_id,
            Boundary::IdEx => self.id_ex,
            Boundary::ExMem => self.ex_mem,
            Boundary::MemWb => self.mem_wb,
        }
    }
}

/// Hazard unit.
#[derive(Debug)]
pub struct HazardUnit;

impl HazardUnit {
    /// `true` when the load in execute feeds the instruction in decode.
    pub fn load_use(ex_load_rd: Option<usize>, decode_sources: [Option<usize>; 2]) -> bool {
        ex_load_rd.is_some_and(|rd| rd != 0 && decode_sources.contains(&Some(rd)))
    }

    /// Computes the stall/flush table for this cycle.
    pub fn evaluate(inputs: &HazardInputs) -> HazardDecision {
        let load_use = Self::load_use(inputs.ex_load_rd, inputs.decode_sources);
        let wait = inputs.dmem_wait;
        let taken = inputs.taken;

        let decision = HazardDecision {
            pc_stall: load_use || wait || !inputs.fetch_good,
            redirect: taken.then_some(inputs.target),
            if_id: StageControl {
                stall: load_use || wait,
                flush: taken,
            },
            id_ex: StageControl {
                stall: wait,
                flush: taken || (load_use && !wait),
            },
            ex_mem: StageControl {
                stall: wait,
                flush: taken,
            },
            mem_wb: StageControl {
                stall: false,
                flush: wait,
            },
            load_use,
            dmem_wait: wait,
            fetch_good: inputs.fetch_good,
        };

        if load_use || wait || taken || !inputs.fetch_good {
            debug!(
                load_use,
                dmem_wait = wait,
                fetch_good = inputs.fetch_good,
                redirect = ?decision.redirect,
                "hazard"
            );
        }
        decision
    }
}
