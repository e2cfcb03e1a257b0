//! Architectural state.
//!
//! The only architectural state besides the program counter is the integer
//! register file; the program counter lives in the orchestrator.

/// General-Purpose Register file implementation.
pub mod gpr;
