//! Memory system seen by the core.
//!
//! The core talks to memory through two independent ports, one for
//! instruction fetch and one for data, each speaking a ready/valid/good
//! handshake. This module defines:
//! 1. **Port contracts:** `InstructionPort` and `DataPort` with their
//!    request/response types.
//! 2. **RAM:** a little-endian byte store shared by both ports.
//! 3. **Controllers:** fixed-latency port implementations over that RAM.

/// RAM and latency-model port implementations.
pub mod memory;

/// Port traits and handshake request/response types.
pub mod traits;

pub use memory::{Memory, SharedMemory};
pub use traits::{DataPort, InstructionPort};
