//! Simulator: owns the CPU, both memory ports and the RAM behind them.
//!
//! The CPU only borrows its ports for the duration of a tick, so the
//! simulator keeps them side by side and hands them in on every cycle. It
//! also runs the handshake watchdog, which the hazard unit cannot: a port
//! that is merely slow and one that will never answer look identical from
//! inside a single cycle.

use std::cell::{Ref, RefMut};
use std::fmt;
use std::path::Path;

use tracing::{debug, info, warn};

use super::loader;
use crate::common::error::{PortKind, SimError, SimResult};
use crate::common::exit::ExitReason;
use crate::config::Config;
use crate::core::Cpu;
use crate::core::cpu::TickOutcome;
use crate::soc::memory::controller::{LatencyDataMemory, LatencyInstructionMemory};
use crate::soc::memory::{Memory, SharedMemory};
use crate::soc::traits::{DataPort, InstructionPort};
use crate::stats::SimStats;

/// Consecutive-pending-cycle counter for one port.
#[derive(Clone, Copy, Debug, Default)]
struct PendingCounter {
    addr: Option<u64>,
    cycles: u64,
}

impl PendingCounter {
    /// Updates the counter with this cycle's pending address and reports the
    /// access if it has waited longer than `timeout` cycles.
    fn observe(&mut self, port: PortKind, pending: Option<u64>, timeout: u64) -> SimResult<()> {
        match pending {
            Some(addr) if self.addr == Some(addr) => self.cycles += 1,
            Some(addr) => {
                self.addr = Some(addr);
                self.cycles = 1;
            }
            None => {
                self.addr = None;
                self.cycles = 0;
            }
        }
        match self.addr {
            Some(addr) if self.cycles > timeout => Err(SimError::StuckHandshake {
                port,
                addr,
                cycles: self.cycles,
            }),
            _ => Ok(()),
        }
    }
}

/// Top-level simulator.
pub struct Simulator {
    /// Pipeline state.
    pub cpu: Cpu,
    imem: Box<dyn InstructionPort>,
    dmem: Box<dyn DataPort>,
    memory: SharedMemory,
    config: Config,
    imem_watch: PendingCounter,
    dmem_watch: PendingCounter,
}

impl fmt::Debug for Simulator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Simulator")
            .field("cpu", &self.cpu)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Simulator {
    /// Creates a simulator with fixed-latency ports over a fresh RAM.
    ///
    /// # Errors
    ///
    /// [`SimError::Config`] if `config` fails validation.
    pub fn new(config: &Config) -> SimResult<Self> {
        config.validate()?;
        let memory = Memory::shared(config.memory.ram_size);
        let imem = LatencyInstructionMemory::with_latency(memory.clone(), config.memory.imem_latency);
        let dmem = LatencyDataMemory::with_latency(memory.clone(), config.memory.dmem_latency);
        Self::with_ports(config, memory, Box::new(imem), Box::new(dmem))
    }

    /// Creates a simulator around caller-supplied ports.
    ///
    /// `memory` is the RAM the loaders write into; the ports may or may not
    /// read from it.
    ///
    /// # Errors
    ///
    /// [`SimError::Config`] if `config` fails validation.
    pub fn with_ports(
        config: &Config,
        memory: SharedMemory,
        imem: Box<dyn InstructionPort>,
        dmem: Box<dyn DataPort>,
    ) -> SimResult<Self> {
        config.validate()?;
        debug!(
            ram_size = memory.borrow().size(),
            start_pc = config.general.start_pc,
            "simulator created"
        );
        Ok(Self {
            cpu: Cpu::new(config),
            imem,
            dmem,
            memory,
            config: config.clone(),
            imem_watch: PendingCounter::default(),
            dmem_watch: PendingCounter::default(),
        })
    }

    /// The active configuration.
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Shared view of RAM.
    pub fn memory(&self) -> Ref<'_, Memory> {
        self.memory.borrow()
    }

    /// Mutable view of RAM.
    pub fn memory_mut(&self) -> RefMut<'_, Memory> {
        self.memory.borrow_mut()
    }

    /// Performance counters so far.
    pub const fn stats(&self) -> &SimStats {
        &self.cpu.stats
    }

    /// Writes `program` at the reset PC.
    ///
    /// # Errors
    ///
    /// [`SimError::Load`] if the program does not fit.
    pub fn load_program(&mut self, program: &[u32]) -> SimResult<()> {
        let addr = self.config.general.start_pc;
        loader::load_words(&mut self.memory.borrow_mut(), addr, program)
    }

    /// Copies raw bytes into RAM at `addr`.
    ///
    /// # Errors
    ///
    /// [`SimError::Load`] if the image does not fit.
    pub fn load_binary(&mut self, addr: u64, image: &[u8]) -> SimResult<()> {
        self.memory.borrow_mut().load(addr, image)
    }

    /// Loads an ELF64 image and moves the PC to its entry point.
    ///
    /// # Errors
    ///
    /// [`SimError::Load`] if the image is malformed, does not fit, or has a
    /// misaligned entry point.
    pub fn load_elf(&mut self, image: &[u8]) -> SimResult<u64> {
        let entry = loader::load_elf(&mut self.memory.borrow_mut(), image)?;
        if entry % 4 != 0 {
            return Err(SimError::Load(format!("entry point {entry:#x} is misaligned")));
        }
        self.cpu.pc = entry;
        info!(entry, "ELF loaded");
        Ok(entry)
    }

    /// Loads a file: ELF64 images by segment, anything else as a flat binary
    /// at the reset PC.
    ///
    /// # Errors
    ///
    /// [`SimError::Io`] if the file cannot be read, otherwise as
    /// [`load_elf`](Self::load_elf) / [`load_binary`](Self::load_binary).
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> SimResult<()> {
        let image = loader::read_image(path)?;
        if loader::is_elf(&image) {
            let _ = self.load_elf(&image)?;
            Ok(())
        } else {
            let addr = self.config.general.start_pc;
            self.load_binary(addr, &image)
        }
    }

    /// Advances one clock cycle and runs the watchdog.
    ///
    /// # Errors
    ///
    /// Anything [`Cpu::tick`] reports, plus [`SimError::StuckHandshake`]
    /// when a port has been pending longer than `memory.handshake_timeout`.
    pub fn tick(&mut self) -> SimResult<TickOutcome> {
        let outcome = self.cpu.tick(self.imem.as_mut(), self.dmem.as_mut())?;
        let timeout = self.config.memory.handshake_timeout;
        self.imem_watch
            .observe(PortKind::Instruction, outcome.imem_pending, timeout)
            .and_then(|()| {
                self.dmem_watch
                    .observe(PortKind::Data, outcome.dmem_pending, timeout)
            })
            .inspect_err(|e| warn!(error = %e, "watchdog"))?;
        Ok(outcome)
    }

    /// Runs until the program halts.
    ///
    /// # Errors
    ///
    /// [`SimError::CycleLimit`] after `general.max_cycles` cycles, or any
    /// error from [`tick`](Self::tick).
    pub fn run(&mut self) -> SimResult<ExitReason> {
        let limit = self.config.general.max_cycles;
        loop {
            if self.cpu.stats.cycles >= limit {
                return Err(SimError::CycleLimit { cycles: limit });
            }
            if let Some(reason) = self.tick()?.halted {
                info!(%reason, cycles = self.cpu.stats.cycles, retired = self.cpu.stats.instructions_retired, "halted");
                return Ok(reason);
            }
        }
    }

    /// Runs until `n` more instructions have retired and returns the 0-based
    /// index of the cycle in which the last of them performed writeback.
    ///
    /// # Errors
    ///
    /// [`SimError::Config`] if `n` is 0, [`SimError::EarlyExit`] if the
    /// program halts first, [`SimError::CycleLimit`] after
    /// `general.max_cycles` cycles, or any error from [`tick`](Self::tick).
    pub fn run_until_retired(&mut self, n: u64) -> SimResult<u64> {
        if n == 0 {
            return Err(SimError::Config("retirement target must be at least 1".to_owned()));
        }
        let limit = self.config.general.max_cycles;
        let mut retired = 0;
        loop {
            if self.cpu.stats.cycles >= limit {
                return Err(SimError::CycleLimit { cycles: limit });
            }
            let outcome = self.tick()?;
            if outcome.retired {
                retired += 1;
                if retired == n {
                    return Ok(outcome.cycle);
                }
            }
            if let Some(reason) = outcome.halted {
                return Err(SimError::EarlyExit {
                    reason,
                    retired: self.cpu.stats.instructions_retired,
                });
            }
        }
    }
}
