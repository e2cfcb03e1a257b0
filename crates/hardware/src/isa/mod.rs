//! Instruction Set Architecture (ISA) definitions.
//!
//! The core executes the RV64I base integer set plus the M extension.
//!
//! * `instruction`: field extraction on raw 32-bit encodings.
//! * `opcodes`: major opcodes and the fixed `ECALL`/`EBREAK` encodings.
//! * `funct`: `funct3`/`funct7` codes grouped by instruction class.
//! * `decode`: the immediate generator and whole-instruction field decode.

/// Field decode and immediate generation.
pub mod decode;

/// Minor opcode (`funct3` / `funct7`) constants.
pub mod funct;

/// Instruction field extraction utilities.
pub mod instruction;

/// Major opcode constants.
pub mod opcodes;
