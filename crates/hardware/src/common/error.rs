//! Trap and simulator error definitions.
//!
//! This module defines the two layers of failure the simulator reports:
//! 1. **Trap:** An architectural exception attached to an instruction. It rides
//!    the pipeline inside the instruction's slot and only becomes fatal when
//!    that slot reaches writeback, so traps on squashed wrong-path
//!    instructions vanish with the flush.
//! 2. **SimError:** A condition that stops simulation: a trap that retired,
//!    a memory port that broke the handshake contract, or an internally
//!    inconsistent hazard request.

use std::fmt;

use thiserror::Error;

use super::exit::ExitReason;
use crate::core::pipeline::hazards::Boundary;

/// Architectural exceptions raised by an instruction.
///
/// The simulator has no trap handler; a trap that reaches writeback halts
/// simulation through [`SimError::Trap`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Trap {
    /// Instruction address misaligned exception.
    ///
    /// The program counter is not a multiple of the instruction width.
    /// The associated value is the misaligned address.
    InstructionAddressMisaligned(u64),

    /// Instruction access fault exception.
    ///
    /// The instruction port reported a fault for the fetch word.
    /// The associated value is the faulting address.
    InstructionAccessFault(u64),

    /// Illegal instruction exception.
    ///
    /// The encoding is invalid or not implemented, including the all-zero word.
    /// The associated value is the instruction encoding.
    IllegalInstruction(u32),

    /// Load access fault exception.
    ///
    /// The associated value is the faulting address.
    LoadAccessFault(u64),

    /// Store access fault exception.
    ///
    /// The associated value is the faulting address.
    StoreAccessFault(u64),
}

impl fmt::Display for Trap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InstructionAddressMisaligned(addr) => {
                write!(f, "InstructionAddressMisaligned({addr:#x})")
            }
            Self::InstructionAccessFault(addr) => write!(f, "InstructionAccessFault({addr:#x})"),
            Self::IllegalInstruction(inst) => write!(f, "IllegalInstruction({inst:#010x})"),
            Self::LoadAccessFault(addr) => write!(f, "LoadAccessFault({addr:#x})"),
            Self::StoreAccessFault(addr) => write!(f, "StoreAccessFault({addr:#x})"),
        }
    }
}

impl std::error::Error for Trap {}

/// Identifies one of the two memory ports.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PortKind {
    /// Instruction fetch port.
    Instruction,
    /// Data load/store port.
    Data,
}

impl fmt::Display for PortKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Instruction => write!(f, "imem"),
            Self::Data => write!(f, "dmem"),
        }
    }
}

/// Errors that stop simulation.
#[derive(Debug, Error)]
pub enum SimError {
    /// An instruction carrying a trap reached writeback.
    #[error("{trap} at pc {pc:#x}")]
    Trap {
        /// Address of the trapping instruction.
        pc: u64,
        /// The exception it raised.
        trap: Trap,
    },

    /// A port accepted a request and never reported completion.
    #[error("{port} handshake stuck at {addr:#x} for {cycles} cycles")]
    StuckHandshake {
        /// The port that stopped responding.
        port: PortKind,
        /// Address of the pending access.
        addr: u64,
        /// Consecutive cycles the access has been pending.
        cycles: u64,
    },

    /// Stall and flush were requested together with incompatible meaning.
    #[error("conflicting hazard request on {boundary}: {reason}")]
    HazardConflict {
        /// The stage boundary that received both requests.
        boundary: Boundary,
        /// What the two requests were.
        reason: &'static str,
    },

    /// A port produced a response it could not legally produce.
    #[error("{port} protocol violation: {reason}")]
    Protocol {
        /// The misbehaving port.
        port: PortKind,
        /// Description of the violation.
        reason: String,
    },

    /// The configuration was malformed or out of range.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The program image could not be loaded.
    #[error("load error: {0}")]
    Load(String),

    /// Reading a program image from disk failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// `run` exhausted its cycle budget before the program halted.
    #[error("cycle limit of {cycles} reached")]
    CycleLimit {
        /// The configured budget.
        cycles: u64,
    },

    /// The program halted before the requested number of retirements.
    #[error("program exited via {reason} after {retired} instructions")]
    EarlyExit {
        /// How the program halted.
        reason: ExitReason,
        /// Instructions retired when it halted.
        retired: u64,
    },
}

/// Result alias used across the simulator.
pub type SimResult<T> = Result<T, SimError>;
