//! Simulation driver and program loading.
//!
//! 1. **Simulator:** Owns the CPU and its memory ports, runs the clock and the
//!    handshake watchdog.
//! 2. **Loader:** Places instruction lists, flat binaries and ELF64 images
//!    into simulated RAM.

/// Program image loading.
pub mod loader;

/// Top-level simulator.
pub mod simulator;

pub use simulator::Simulator;
