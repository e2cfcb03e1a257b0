//! Common types and constants shared by every part of the pipeline model.
//!
//! 1. **Constants:** Instruction and fetch-word geometry, register count.
//! 2. **Error Handling:** Architectural traps carried in pipeline slots and the
//!    simulator-level `SimError` surfaced to callers.
//! 3. **Exit Reasons:** Why a program stopped when it halted cleanly.

/// Common constants used throughout the simulator.
pub mod constants;

/// Error types and trap definitions.
pub mod error;

/// Clean program termination reasons.
pub mod exit;

pub use error::{PortKind, SimError, SimResult, Trap};
pub use exit::ExitReason;
