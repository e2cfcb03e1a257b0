//! Configuration for the pipeline simulator.
//!
//! This module defines the configuration structures used to parameterize a run:
//! 1. **Defaults:** Baseline constants (reset PC, RAM size, port latencies, watchdog).
//! 2. **Structures:** `general` (reset state, tracing, cycle budget) and `memory`
//!    (RAM size, per-port latency, handshake timeout).
//!
//! Configuration is supplied as JSON via [`Config::from_json`], or use
//! `Config::default()` for a zero-latency 64 KiB machine starting at address 0.

use serde::Deserialize;

use crate::common::constants::FETCH_WORD_BYTES;
use crate::common::error::{SimError, SimResult};

/// Default configuration constants for the simulator.
mod defaults {
    /// Reset program counter.
    pub const START_PC: u64 = 0;

    /// Cycle budget for `Simulator::run`.
    ///
    /// Guards against programs that never execute `ECALL`.
    pub const MAX_CYCLES: u64 = 1_000_000;

    /// Size of the unified RAM backing both ports (64 KiB).
    pub const RAM_SIZE: usize = 64 * 1024;

    /// Instruction-port latency in cycles (0 answers in the request cycle).
    pub const IMEM_LATENCY: u64 = 0;

    /// Data-port latency in cycles (0 answers in the request cycle).
    pub const DMEM_LATENCY: u64 = 0;

    /// Cycles a port may hold an accepted request without reporting `good`.
    pub const HANDSHAKE_TIMEOUT: u64 = 1024;
}

/// Root configuration structure.
///
/// # Examples
///
/// ```
/// use rvpipe_core::config::Config;
///
/// let json = r#"{
///     "general": {
///         "trace_instructions": true,
///         "max_cycles": 5000
///     },
///     "memory": {
///         "dmem_latency": 3
///     }
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert!(config.general.trace_instructions);
/// assert_eq!(config.general.max_cycles, 5000);
/// assert_eq!(config.memory.dmem_latency, 3);
/// assert_eq!(config.memory.imem_latency, 0);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// General simulation settings
    #[serde(default)]
    pub general: GeneralConfig,
    /// Memory and handshake configuration
    #[serde(default)]
    pub memory: MemoryConfig,
}

impl Config {
    /// Parses and validates a JSON configuration document.
    ///
    /// Missing sections and fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Config`] if the document is not valid JSON for this
    /// schema or if a value is out of range.
    pub fn from_json(json: &str) -> SimResult<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| SimError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks value ranges the type system cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Config`] naming the first offending field.
    pub fn validate(&self) -> SimResult<()> {
        if self.general.start_pc % 4 != 0 {
            return Err(SimError::Config(format!(
                "general.start_pc {:#x} is not instruction aligned",
                self.general.start_pc
            )));
        }
        if self.memory.ram_size == 0 || self.memory.ram_size as u64 % FETCH_WORD_BYTES != 0 {
            return Err(SimError::Config(format!(
                "memory.ram_size {} must be a non-zero multiple of {FETCH_WORD_BYTES}",
                self.memory.ram_size
            )));
        }
        if self.memory.handshake_timeout == 0 {
            return Err(SimError::Config(
                "memory.handshake_timeout must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// General simulation settings.
///
/// Reset state, tracing and the cycle budget for `run`.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneralConfig {
    /// Initial PC value
    #[serde(default = "GeneralConfig::default_start_pc")]
    pub start_pc: u64,

    /// Emit a `trace` event for every stage every cycle
    #[serde(default)]
    pub trace_instructions: bool,

    /// Upper bound on cycles simulated by `Simulator::run`
    #[serde(default = "GeneralConfig::default_max_cycles")]
    pub max_cycles: u64,
}

impl GeneralConfig {
    fn default_start_pc() -> u64 {
        defaults::START_PC
    }

    fn default_max_cycles() -> u64 {
        defaults::MAX_CYCLES
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            start_pc: defaults::START_PC,
            trace_instructions: false,
            max_cycles: defaults::MAX_CYCLES,
        }
    }
}

/// Main memory and port timing configuration.
///
/// Both ports share one RAM starting at address 0. Each port answers after its
/// own fixed latency; see `soc::memory::controller`.
#[derive(Debug, Clone, Deserialize)]
pub struct MemoryConfig {
    /// RAM size in bytes
    #[serde(default = "MemoryConfig::default_ram_size")]
    pub ram_size: usize,

    /// Instruction-port latency in cycles
    #[serde(default = "MemoryConfig::default_imem_latency")]
    pub imem_latency: u64,

    /// Data-port latency in cycles
    #[serde(default = "MemoryConfig::default_dmem_latency")]
    pub dmem_latency: u64,

    /// Watchdog limit on consecutive pending cycles for one access
    #[serde(default = "MemoryConfig::default_handshake_timeout")]
    pub handshake_timeout: u64,
}

impl MemoryConfig {
    fn default_ram_size() -> usize {
        defaults::RAM_SIZE
    }

    fn default_imem_latency() -> u64 {
        defaults::IMEM_LATENCY
    }

    fn default_dmem_latency() -> u64 {
        defaults::DMEM_LATENCY
    }

    fn default_handshake_timeout() -> u64 {
        defaults::HANDSHAKE_TIMEOUT
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            ram_size: defaults::RAM_SIZE,
            imem_latency: defaults::IMEM_LATENCY,
            dmem_latency: defaults::DMEM_LATENCY,
            handshake_timeout: defaults::HANDSHAKE_TIMEOUT,
        }
    }
}
