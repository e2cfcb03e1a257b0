//! Functional units driven by the execute and memory stages.
//!
//! Every unit here is a pure combinational function of its inputs: the
//! pipeline owns all state.

/// Arithmetic Logic Unit for integer operations.
pub mod alu;

/// ALU control: resolves an ALU operation class to a concrete operation.
pub mod alu_control;

/// Branch resolution: jump detection and jump-target generation.
pub mod bru;

/// Load/store width selection and load extension.
pub mod lsu;
