//! Latency models and handshake ports.
//!
//! This module provides:
//! 1. **MemoryController:** how many cycles an access to an address takes.
//! 2. **SimpleController:** a fixed latency for every access.
//! 3. **LatencyInstructionMemory / LatencyDataMemory:** ports that speak the
//!    ready/valid/good handshake over shared RAM, timed by a controller.
//!
//! Timing: with latency 0 a request completes (`good`) in the cycle it is
//! presented. With latency N the port accepts the request (`ready` drops on
//! the following cycles) and reports `good` exactly once, N cycles later.

use tracing::trace;

use super::SharedMemory;
use crate::common::constants::FETCH_WORD_BYTES;
use crate::soc::traits::{
    DataOp, DataPort, DataRequest, DataResponse, FetchRequest, FetchResponse, InstructionPort,
};

/// Reports the access latency, in cycles, of an address.
pub trait MemoryController {
    /// Cycles between acceptance and completion of an access to `addr`.
    fn access_latency(&mut self, addr: u64) -> u64;
}

/// Fixed-latency memory controller; every access takes the same number of cycles.
#[derive(Clone, Copy, Debug)]
pub struct SimpleController {
    latency: u64,
}

impl SimpleController {
    /// Creates a simple controller with the given fixed latency in cycles.
    pub const fn new(latency: u64) -> Self {
        Self { latency }
    }
}

impl MemoryController for SimpleController {
    fn access_latency(&mut self, _addr: u64) -> u64 {
        self.latency
    }
}

/// Handshake phase of one port.
#[derive(Clone, Copy, Debug)]
enum Phase<R> {
    Idle,
    Busy { req: R, remaining: u64 },
}

/// Port-independent handshake sequencing.
///
/// `evaluate` only computes this cycle's outcome and the phase to enter at
/// the next `clock`; the phase itself changes only in `clock`.
#[derive(Debug)]
struct Handshake<R> {
    phase: Phase<R>,
    next: Option<Phase<R>>,
}

/// Outcome of one handshake evaluation.
struct Step<R> {
    ready: bool,
    completed: Option<R>,
}

impl<R: Copy> Handshake<R> {
    const fn new() -> Self {
        Self {
            phase: Phase::Idle,
            next: None,
        }
    }

    fn evaluate(&mut self, req: Option<R>, latency: impl FnOnce(&R) -> u64) -> Step<R> {
        self.next = None;
        match self.phase {
            Phase::Idle => match req {
                None => Step {
                    ready: true,
                    completed: None,
                },
                Some(r) => {
                    let cycles = latency(&r);
                    if cycles == 0 {
                        Step {
                            ready: true,
                            completed: Some(r),
                        }
                    } else {
                        self.next = Some(Phase::Busy {
                            req: r,
                            remaining: cycles - 1,
                        });
                        Step {
                            ready: true,
                            completed: None,
                        }
                    }
                }
            },
            Phase::Busy { req, remaining: 0 } => {
                self.next = Some(Phase::Idle);
                Step {
                    ready: false,
                    completed: Some(req),
                }
            }
            Phase::Busy { .. } => Step {
                ready: false,
                completed: None,
            },
        }
    }

    fn clock(&mut self) {
        self.phase = match self.next.take() {
            Some(phase) => phase,
            None => match self.phase {
                Phase::Busy { req, remaining } if remaining > 0 => Phase::Busy {
                    req,
                    remaining: remaining - 1,
                },
                phase => phase,
            },
        };
    }
}

/// Instruction port with controller-defined latency over shared RAM.
pub struct LatencyInstructionMemory {
    mem: SharedMemory,
    controller: Box<dyn MemoryController>,
    handshake: Handshake<FetchRequest>,
}

impl LatencyInstructionMemory {
    /// Creates a port reading `mem` with the given latency model.
    pub fn new(mem: SharedMemory, controller: Box<dyn MemoryController>) -> Self {
        Self {
            mem,
            controller,
            handshake: Handshake::new(),
        }
    }

    /// Creates a port with a fixed latency.
    pub fn with_latency(mem: SharedMemory, latency: u64) -> Self {
        Self::new(mem, Box::new(SimpleController::new(latency)))
    }
}

impl std::fmt::Debug for LatencyInstructionMemory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LatencyInstructionMemory")
            .field("handshake", &self.handshake)
            .finish_non_exhaustive()
    }
}

impl InstructionPort for LatencyInstructionMemory {
    fn evaluate(&mut self, req: Option<FetchRequest>) -> FetchResponse {
        let controller = &mut self.controller;
        let step = self
            .handshake
            .evaluate(req, |r| controller.access_latency(r.addr));
        let Some(done) = step.completed else {
            return FetchResponse {
                ready: step.ready,
                ..FetchResponse::default()
            };
        };
        let word = self.mem.borrow().read(done.addr, FETCH_WORD_BYTES);
        trace!(addr = done.addr, ok = word.is_some(), "imem complete");
        FetchResponse {
            ready: step.ready,
            good: true,
            fault: word.is_none(),
            addr: done.addr,
            word: word.unwrap_or(0),
        }
    }

    fn clock(&mut self) {
        self.handshake.clock();
    }
}

/// Data port with controller-defined latency over shared RAM.
pub struct LatencyDataMemory {
    mem: SharedMemory,
    controller: Box<dyn MemoryController>,
    handshake: Handshake<DataRequest>,
    pending_store: Option<DataRequest>,
}

impl LatencyDataMemory {
    /// Creates a port accessing `mem` with the given latency model.
    pub fn new(mem: SharedMemory, controller: Box<dyn MemoryController>) -> Self {
        Self {
            mem,
            controller,
            handshake: Handshake::new(),
            pending_store: None,
        }
    }

    /// Creates a port with a fixed latency.
    pub fn with_latency(mem: SharedMemory, latency: u64) -> Self {
        Self::new(mem, Box::new(SimpleController::new(latency)))
    }
}

impl std::fmt::Debug for LatencyDataMemory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LatencyDataMemory")
            .field("handshake", &self.handshake)
            .field("pending_store", &self.pending_store)
            .finish_non_exhaustive()
    }
}

impl DataPort for LatencyDataMemory {
    fn evaluate(&mut self, req: Option<DataRequest>) -> DataResponse {
        self.pending_store = None;
        let controller = &mut self.controller;
        let step = self
            .handshake
            .evaluate(req, |r| controller.access_latency(r.addr));
        let Some(done) = step.completed else {
            return DataResponse {
                ready: step.ready,
                ..DataResponse::default()
            };
        };

        let bytes = done.width.bytes();
        let in_range = self.mem.borrow().contains(done.addr, bytes);
        let data = match done.op {
            DataOp::Read => self.mem.borrow().read(done.addr, bytes).unwrap_or(0),
            DataOp::Write => {
                if in_range {
                    self.pending_store = Some(done);
                }
                0
            }
        };
        trace!(addr = done.addr, op = ?done.op, ok = in_range, "dmem complete");
        DataResponse {
            ready: step.ready,
            good: true,
            fault: !in_range,
            addr: done.addr,
            data,
        }
    }

    fn clock(&mut self) {
        if let Some(store) = self.pending_store.take() {
            let width = store.width;
            let written = self
                .mem
                .borrow_mut()
                .write(store.addr, width.bytes(), store.data & width.mask());
            // Only in-range stores are ever staged.
            debug_assert!(written.is_some(), "staged store at {:#x} out of range", store.addr);
        }
        self.handshake.clock();
    }
}
