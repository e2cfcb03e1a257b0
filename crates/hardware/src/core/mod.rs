//! Core processor implementation.
//!
//! This module contains the 5-stage in-order pipeline, the functional units
//! it drives, the architectural register file, and the orchestrator that
//! composes them into one clocked CPU.

/// Architectural state (general-purpose register file).
pub mod arch;

/// CPU orchestrator: simulation state and the two-phase tick.
pub mod cpu;

/// Instruction pipeline (stages, stage registers, forwarding, hazards, signals).
pub mod pipeline;

/// Functional units (ALU, ALU control, branch unit, load/store helpers).
pub mod units;

pub use self::cpu::Cpu;
