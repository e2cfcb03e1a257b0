//! Main memory.
//!
//! This module implements the RAM both ports read and write:
//! 1. **Memory:** a flat little-endian byte store mapped at address 0.
//! 2. **Controller:** latency models and the handshake ports built on them.
//!
//! Accesses outside the store return `None` and surface as access faults.

/// Latency models and handshake port implementations.
pub mod controller;

use std::cell::RefCell;
use std::rc::Rc;

use crate::common::error::{SimError, SimResult};

/// RAM shared by the instruction and data ports.
pub type SharedMemory = Rc<RefCell<Memory>>;

/// Flat byte-addressed RAM starting at address 0.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Memory {
    bytes: Vec<u8>,
}

impl Memory {
    /// Creates a zero-filled memory of `size` bytes.
    pub fn new(size: usize) -> Self {
        Self {
            bytes: vec![0; size],
        }
    }

    /// Wraps a memory for sharing between ports.
    pub fn shared(size: usize) -> SharedMemory {
        Rc::new(RefCell::new(Self::new(size)))
    }

    /// Size in bytes.
    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    fn range(&self, addr: u64, len: u64) -> Option<std::ops::Range<usize>> {
        let end = addr.checked_add(len)?;
        if end > self.bytes.len() as u64 {
            return None;
        }
        Some(addr as usize..end as usize)
    }

    /// Whether every byte of `[addr, addr + len)` lies inside memory.
    pub fn contains(&self, addr: u64, len: u64) -> bool {
        self.range(addr, len).is_some()
    }

    /// Reads `len` (1..=8) bytes little-endian, zero-extended.
    pub fn read(&self, addr: u64, len: u64) -> Option<u64> {
        let range = self.range(addr, len)?;
        let value = self.bytes[range]
            .iter()
            .rev()
            .fold(0_u64, |acc, b| (acc << 8) | u64::from(*b));
        Some(value)
    }

    /// Writes the low `len` (1..=8) bytes of `value` little-endian.
    ///
    /// Returns `None`, leaving memory untouched, if any byte is out of range.
    pub fn write(&mut self, addr: u64, len: u64, value: u64) -> Option<()> {
        let range = self.range(addr, len)?;
        for (i, byte) in self.bytes[range].iter_mut().enumerate() {
            *byte = (value >> (8 * i)) as u8;
        }
        Some(())
    }

    /// Reads a 32-bit word.
    pub fn read_u32(&self, addr: u64) -> Option<u32> {
        self.read(addr, 4).map(|v| v as u32)
    }

    /// Reads a 64-bit doubleword.
    pub fn read_u64(&self, addr: u64) -> Option<u64> {
        self.read(addr, 8)
    }

    /// Copies an image into memory at `addr`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Load`] if the image does not fit.
    pub fn load(&mut self, addr: u64, data: &[u8]) -> SimResult<()> {
        let range = self.range(addr, data.len() as u64).ok_or_else(|| {
            SimError::Load(format!(
                "{} bytes at {addr:#x} exceed memory size {:#x}",
                data.len(),
                self.bytes.len()
            ))
        })?;
        self.bytes[range].copy_from_slice(data);
        Ok(())
    }
}
