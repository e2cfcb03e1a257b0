//! Program Loader.
//!
//! This module places program images into simulated memory. It supports:
//! 1. **Instruction lists:** 32-bit words written little-endian from an address.
//! 2. **Flat binaries:** Raw bytes copied verbatim.
//! 3. **ELF64 executables:** Every loadable segment copied to its virtual
//!    address, the zero-initialized tail (`.bss`) cleared, and the entry
//!    point returned.

use std::path::Path;

use object::{Object, ObjectSegment};
use tracing::debug;

use crate::common::constants::INSTRUCTION_BYTES;
use crate::common::error::{SimError, SimResult};
use crate::soc::memory::Memory;

/// ELF identification bytes.
const ELF_MAGIC: [u8; 4] = [0x7F, b'E', b'L', b'F'];

/// Writes `program` as consecutive little-endian instruction words at `addr`.
///
/// # Errors
///
/// [`SimError::Load`] if the program does not fit in memory.
pub fn load_words(mem: &mut Memory, addr: u64, program: &[u32]) -> SimResult<()> {
    let bytes: Vec<u8> = program.iter().flat_map(|w| w.to_le_bytes()).collect();
    mem.load(addr, &bytes)?;
    debug!(addr, words = program.len(), end = addr + program.len() as u64 * INSTRUCTION_BYTES, "program loaded");
    Ok(())
}

/// Loads an ELF64 image and returns its entry point.
///
/// # Errors
///
/// [`SimError::Load`] if the image cannot be parsed or a segment lies outside
/// memory.
pub fn load_elf(mem: &mut Memory, image: &[u8]) -> SimResult<u64> {
    let file = object::File::parse(image).map_err(|e| SimError::Load(format!("bad ELF: {e}")))?;
    if !file.is_64() {
        return Err(SimError::Load("only ELF64 images are supported".to_owned()));
    }

    for segment in file.segments() {
        let size = segment.size();
        if size == 0 {
            continue;
        }
        let addr = segment.address();
        let data = segment
            .data()
            .map_err(|e| SimError::Load(format!("segment at {addr:#x}: {e}")))?;
        mem.load(addr, data)?;

        let bss = size.saturating_sub(data.len() as u64);
        if bss > 0 {
            mem.load(addr + data.len() as u64, &vec![0; bss as usize])?;
        }
        debug!(addr, filesz = data.len(), memsz = size, "segment loaded");
    }

    Ok(file.entry())
}

/// Whether `image` starts with the ELF magic.
pub fn is_elf(image: &[u8]) -> bool {
    image.starts_with(&ELF_MAGIC)
}

/// Reads a program image from disk.
///
/// # Errors
///
/// [`SimError::Io`] if the file cannot be read.
pub fn read_image(path: impl AsRef<Path>) -> SimResult<Vec<u8>> {
    Ok(std::fs::read(path)?)
}
