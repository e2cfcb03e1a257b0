//! Global constants.
//!
//! Instruction geometry, the packed fetch-word layout and register-file size.

/// Size of one instruction in bytes.
pub const INSTRUCTION_BYTES: u64 = 4;

/// Size of one instruction-memory fetch word in bytes.
///
/// Every fetch returns 64 bits holding two consecutive instructions.
pub const FETCH_WORD_BYTES: u64 = 8;

/// Mask that aligns a byte address down to its fetch word.
pub const FETCH_WORD_MASK: u64 = !(FETCH_WORD_BYTES - 1);

/// Program-counter bit selecting the upper instruction of a fetch word.
pub const FETCH_HALF_SELECT: u64 = 0x4;

/// Shift applied to a fetch word to reach its upper instruction.
pub const FETCH_HALF_SHIFT: u32 = 32;

/// Number of integer registers.
pub const REG_COUNT: usize = 32;

/// `ADDI x0, x0, 0`.
pub const NOP: u32 = 0x0000_0013;
