//! Instruction Fetch (IF) Stage.
//!
//! The instruction port returns 64-bit fetch words. The fetch request is the
//! PC rounded down to its fetch word; bit 2 of the PC selects which of the two
//! packed instructions is used.

use crate::common::constants::{
    FETCH_HALF_SELECT, FETCH_HALF_SHIFT, FETCH_WORD_MASK, INSTRUCTION_BYTES,
};
use crate::common::error::Trap;
use crate::core::pipeline::latches::{IfIdEntry, PipelineSlot};
use crate::soc::traits::{FetchRequest, FetchResponse};

/// What fetch produces this cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FetchOutput {
    /// Slot to drive into IF/ID. A bubble when `good` is false.
    pub slot: PipelineSlot<IfIdEntry>,
    /// The slot holds the instruction at `pc` (or a fetch trap for it).
    pub good: bool,
}

/// Fetch request for `pc`, or `None` when `pc` is misaligned.
pub const fn fetch_request(pc: u64) -> Option<FetchRequest> {
    if pc % INSTRUCTION_BYTES != 0 {
        return None;
    }
    Some(FetchRequest {
        addr: pc & FETCH_WORD_MASK,
    })
}

/// Executes the instruction fetch stage.
///
/// A response for any address other than this cycle's fetch word is stale
/// (the PC moved while the port was busy) and is ignored. A misaligned PC or
/// a faulting fetch word produce a trap-carrying slot instead of an
/// instruction.
pub fn fetch_stage(pc: u64, resp: &FetchResponse) -> FetchOutput {
    let Some(req) = fetch_request(pc) else {
        return trap_slot(pc, Trap::InstructionAddressMisaligned(pc));
    };

    if !resp.good || resp.addr != req.addr {
        return FetchOutput {
            slot: PipelineSlot::bubble(),
            good: false,
        };
    }

    if resp.fault {
        return trap_slot(pc, Trap::InstructionAccessFault(pc));
    }

    let word = if pc & FETCH_HALF_SELECT != 0 {
        resp.word >> FETCH_HALF_SHIFT
    } else {
        resp.word
    };

    FetchOutput {
        slot: PipelineSlot::new(IfIdEntry {
            pc,
            inst: word as u32,
            trap: None,
        }),
        good: true,
    }
}

const fn trap_slot(pc: u64, trap: Trap) -> FetchOutput {
    FetchOutput {
        slot: PipelineSlot::new(IfIdEntry {
            pc,
            inst: 0,
            trap: Some(trap),
        }),
        good: true,
    }
}
