//! Instruction pipeline implementation.
//!
//! This module contains the five-stage in-order pipeline. It includes:
//! 1. **Latches:** Stage registers and the per-boundary payloads they carry.
//! 2. **Forwarding:** Operand bypass from the EX/MEM and MEM/WB boundaries.
//! 3. **Hazards:** Load-use stalls, memory back-pressure and control-flow flushes.
//! 4. **Signals:** The control bundle decode attaches to every instruction.
//! 5. **Stages:** Fetch, Decode, Execute, Memory and Writeback as pure
//!    combinational functions of the current stage-register contents.
//! 6. **Traits:** The latch interface shared by every stage register.

/// Operand forwarding unit.
pub mod forwarding;

/// Hazard unit: stall, flush and redirect decisions.
pub mod hazards;

/// Stage registers and inter-stage payloads (IF/ID, ID/EX, EX/MEM, MEM/WB).
pub mod latches;

/// Control signals generated during instruction decode.
pub mod signals;

/// Pipeline stage implementations (fetch, decode, execute, memory, writeback).
pub mod stages;

/// Stage register interface.
pub mod traits;
