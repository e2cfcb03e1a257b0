//! Program exit reasons.

use std::fmt;

use serde::Serialize;

/// Why the simulated program stopped.
///
/// Produced when a halting instruction performs writeback; everything older
/// has already retired and nothing younger has touched architectural state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum ExitReason {
    /// `ECALL` reached writeback.
    Ecall,
    /// `EBREAK` reached writeback.
    Ebreak,
}

impl fmt::Display for ExitReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ecall => write!(f, "ecall"),
            Self::Ebreak => write!(f, "ebreak"),
        }
    }
}
