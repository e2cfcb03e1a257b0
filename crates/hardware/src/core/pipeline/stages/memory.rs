//! Memory Access (MEM) Stage.
//!
//! Presents the load or store in EX/MEM to the data port and checks the
//! response against the request. A pending access makes the stage wait; the
//! hazard unit holds everything behind it.

use crate::common::error::{PortKind, SimError, SimResult, Trap};
use crate::core::pipeline::latches::{ExMemEntry, MemWbEntry, PipelineSlot};
use crate::core::pipeline::signals::MemOp;
use crate::core::units::lsu::Lsu;
use crate::soc::traits::{DataOp, DataRequest, DataResponse};

/// What the memory stage produces this cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MemoryOutput {
    /// Slot to drive into MEM/WB.
    pub slot: PipelineSlot<MemWbEntry>,
    /// The data access is still pending.
    pub wait: bool,
    /// The instruction in EX/MEM redirects the PC.
    pub taken: bool,
    /// Redirect target.
    pub target: u64,
}

/// Data request for the instruction in EX/MEM, if it accesses memory.
///
/// Trap-carrying slots never reach the port.
pub fn memory_request(ex_mem: &PipelineSlot<ExMemEntry>) -> Option<DataRequest> {
    let e = ex_mem.get().filter(|e| e.trap.is_none())?;
    let (op, width) = match e.ctrl.mem_op {
        MemOp::None => return None,
        MemOp::Read => (DataOp::Read, Lsu::load_width(e.funct3)?),
        MemOp::Write => (DataOp::Write, Lsu::store_width(e.funct3)?),
    };
    Some(DataRequest {
        addr: e.alu,
        op,
        width,
        data: e.store_data & width.mask(),
    })
}

/// Executes the memory access stage.
///
/// `req` must be the request [`memory_request`] produced for `ex_mem` and
/// `resp` the port's answer to it.
///
/// # Errors
///
/// [`SimError::Protocol`] if the port reports completion for a request that
/// was not presented, completes a different address, or faults without
/// completing.
pub fn memory_stage(
    ex_mem: &PipelineSlot<ExMemEntry>,
    req: Option<DataRequest>,
    resp: &DataResponse,
) -> SimResult<MemoryOutput> {
    check_response(req, resp)?;

    let Some(e) = ex_mem.get() else {
        return Ok(MemoryOutput {
            slot: PipelineSlot::bubble(),
            wait: false,
            taken: false,
            target: 0,
        });
    };

    let wait = req.is_some() && !resp.good;
    let mut out = MemWbEntry {
        pc: e.pc,
        inst: e.inst,
        rd: e.rd,
        alu: e.alu,
        load_data: 0,
        ctrl: e.ctrl,
        trap: e.trap,
    };

    if let Some(r) = req.filter(|_| resp.good) {
        if resp.fault {
            out.trap = Some(match r.op {
                DataOp::Read => Trap::LoadAccessFault(r.addr),
                DataOp::Write => Trap::StoreAccessFault(r.addr),
            });
        } else if r.op == DataOp::Read {
            out.load_data = Lsu::extend_load(e.funct3, resp.data);
        }
    }

    let taken = e.taken && e.trap.is_none();
    Ok(MemoryOutput {
        slot: if wait {
            PipelineSlot::bubble()
        } else {
            PipelineSlot::new(out)
        },
        wait,
        taken,
        target: e.target,
    })
}

fn check_response(req: Option<DataRequest>, resp: &DataResponse) -> SimResult<()> {
    let violation = |reason: String| {
        Err(SimError::Protocol {
            port: PortKind::Data,
            reason,
        })
    };
    if resp.fault && !resp.good {
        return violation("fault without good".to_owned());
    }
    match req {
        None if resp.good => violation(format!("good for {:#x} with no request", resp.addr)),
        Some(r) if resp.good && resp.addr != r.addr => violation(format!(
            "completed {:#x} while {:#x} was requested",
            resp.addr, r.addr
        )),
        _ => Ok(()),
    }
}
