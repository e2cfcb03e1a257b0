use rvpipe_core::Simulator;
use rvpipe_core::common::exit::ExitReason;
use rvpipe_core::common::SimResult;
use rvpipe_core::config::Config;
use rvpipe_core::core::Cpu;
use rvpipe_core::core::cpu::TickOutcome;
use rvpipe_core::stats::SimStats;
use tracing_subscriber::EnvFilter;

/// Installs a test-writer subscriber once per process; `RUST_LOG` selects levels.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[derive(Debug)]
pub struct TestContext {
    pub sim: Simulator,
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        init_tracing();
        let sim = Simulator::new(&config).unwrap();
        Self { sim }
    }

    /// Sets both port latencies.
    pub fn with_latency(imem: u64, dmem: u64) -> Self {
        let mut config = Config::default();
        config.memory.imem_latency = imem;
        config.memory.dmem_latency = dmem;
        Self::with_config(config)
    }

    /// Convenience accessor for the CPU.
    pub fn cpu(&self) -> &Cpu {
        &self.sim.cpu
    }

    /// Load a sequence of 32-bit instructions at the reset PC.
    pub fn load_program(mut self, instructions: &[u32]) -> Self {
        self.sim.load_program(instructions).unwrap();
        self
    }

    /// Set a general-purpose register value.
    pub fn set_reg(&mut self, reg: usize, val: u64) {
        self.sim.cpu.regs.write(reg, val);
    }

    /// Read a general-purpose register value.
    pub fn get_reg(&self, reg: usize) -> u64 {
        self.sim.cpu.regs.read(reg)
    }

    pub fn mem_u64(&self, addr: u64) -> u64 {
        self.sim.memory().read_u64(addr).unwrap()
    }

    pub fn write_u64(&mut self, addr: u64, val: u64) {
        self.sim.memory_mut().write(addr, 8, val).unwrap();
    }

    pub fn tick(&mut self) -> SimResult<TickOutcome> {
        self.sim.tick()
    }

    /// Ticks `cycles` times, stopping early on halt or error.
    pub fn run(&mut self, cycles: u64) -> SimResult<Option<ExitReason>> {
        for _ in 0..cycles {
            if let Some(reason) = self.sim.tick()?.halted {
                return Ok(Some(reason));
            }
        }
        Ok(None)
    }

    pub fn run_to_halt(&mut self) -> SimResult<ExitReason> {
        self.sim.run()
    }

    pub fn stats(&self) -> &SimStats {
        self.sim.stats()
    }
}
