//! Pipeline stage implementations.
//!
//! Each stage is a pure combinational function of the pre-tick stage
//! registers and this cycle's port responses. None of them mutate state; the
//! orchestrator in [`crate::core::cpu`] drives their outputs into the stage
//! registers once hazards are known.
//! 1. **Fetch:** Builds the fetch request and selects the instruction half.
//! 2. **Decode:** Decodes control signals, checks legality and reads operands.
//! 3. **Execute:** Forwards operands, runs the ALU and resolves jumps.
//! 4. **Memory:** Presents loads and stores to the data port.
//! 5. **Writeback:** Selects the result and retires, halts or traps.

/// Instruction decode stage implementation.
pub mod decode;

/// Instruction execute stage implementation.
pub mod execute;

/// Instruction fetch stage implementation.
pub mod fetch;

/// Memory access stage implementation.
pub mod memory;

/// Writeback stage implementation.
pub mod writeback;

pub use decode::{DecodeOutput, decode_stage};
pub use execute::{execute_stage, forwarded_operands};
pub use fetch::{FetchOutput, fetch_request, fetch_stage};
pub use memory::{MemoryOutput, memory_request, memory_stage};
pub use writeback::{Writeback, writeback_stage};
