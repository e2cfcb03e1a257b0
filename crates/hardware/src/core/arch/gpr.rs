//! RISC-V General-Purpose Register File.
//!
//! This module implements the integer register file seen by the pipeline:
//! 1. **Storage:** 32 integer registers (`x0`-`x31`), `x0` hardwired to zero.
//! 2. **Read Ports:** Two combinational read ports used by decode. A read
//!    observes a write presented on the write port in the same cycle, as a
//!    register file written in the first half-cycle and read in the second.
//! 3. **Write Port:** One synchronous write port, owned by writeback, gated by
//!    write-enable and a non-zero destination and committed at the tick.

use crate::common::constants::REG_COUNT;

/// A request on the register file's single write port.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RegWrite {
    /// Destination register.
    pub rd: usize,
    /// Value to write.
    pub value: u64,
}

/// General-Purpose Register file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Gpr {
    regs: [u64; REG_COUNT],
}

impl Gpr {
    /// Creates a register file with every register zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a register's committed value. `x0` always reads 0.
    pub fn read(&self, idx: usize) -> u64 {
        if idx == 0 { 0 } else { self.regs[idx] }
    }

    /// Writes a register immediately, bypassing the pipeline's write port.
    ///
    /// Used to set up initial state. Writes to `x0` are ignored.
    pub fn write(&mut self, idx: usize, val: u64) {
        if idx != 0 {
            self.regs[idx] = val;
        }
    }

    /// Combinational read port.
    ///
    /// Returns the value being written this cycle if `pending` targets `idx`,
    /// otherwise the committed value.
    pub fn read_port(&self, idx: usize, pending: Option<RegWrite>) -> u64 {
        match pending {
            Some(w) if idx != 0 && w.rd == idx => w.value,
            _ => self.read(idx),
        }
    }

    /// Commits the write port at the tick boundary.
    pub fn commit(&mut self, port: Option<RegWrite>) {
        if let Some(w) = port {
            self.write(w.rd, w.value);
        }
    }

    /// Copy of all 32 registers, `x0` included.
    pub const fn snapshot(&self) -> [u64; REG_COUNT] {
        self.regs
    }
}
