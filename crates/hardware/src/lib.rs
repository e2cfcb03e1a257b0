//! Cycle-accurate 5-stage RV64 pipeline simulator library.
//!
//! This crate models an in-order RV64IM core at the level of its pipeline
//! control logic:
//! 1. **Core:** Five stages (fetch, decode, execute, memory, writeback) separated by
//!    clocked stage registers with stall and flush.
//! 2. **Hazards:** Three-way operand forwarding, load-use stalls, memory back-pressure
//!    and branch/jump flush with PC redirect.
//! 3. **Memory:** Instruction and data ports speaking a ready/valid/good handshake,
//!    with fixed-latency implementations over shared RAM.
//! 4. **ISA:** Field decode and immediate generation for RV64I and the M extension.
//! 5. **Simulation:** Loader, configuration, watchdog and statistics collection.
//!
//! # Examples
//!
//! ```
//! use rvpipe_core::{Config, Simulator};
//!
//! let mut sim = Simulator::new(&Config::default()).unwrap();
//! sim.load_program(&[
//!     0x0050_0093, // addi x1, x0, 5
//!     0x00A0_8113, // addi x2, x1, 10
//!     0x0020_3023, // sd   x2, 0(x0)
//! ])
//! .unwrap();
//!
//! assert_eq!(sim.run_until_retired(3).unwrap(), 6);
//! assert_eq!(sim.memory().read_u64(0), Some(15));
//! ```

/// Common types and constants (traps, errors, exit reasons).
pub mod common;
/// Simulator configuration (defaults and JSON-deserializable structures).
pub mod config;
/// CPU core (pipeline, functional units, register file, orchestrator).
pub mod core;
/// Instruction set (field extraction, opcodes, immediate generation).
pub mod isa;
/// Simulator driver and program loader.
pub mod sim;
/// Memory ports and RAM.
pub mod soc;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or `Config::from_json`.
pub use crate::config::Config;
/// Pipeline state and the two-phase tick.
pub use crate::core::Cpu;
/// Top-level simulator owning the CPU and its memory ports.
pub use crate::sim::Simulator;
