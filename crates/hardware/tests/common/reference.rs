//! One-instruction-at-a-time reference model.
//!
//! Executes each instruction to completion before starting the next, using
//! the crate's decoder and functional units directly. There is no pipeline,
//! so there are no hazards: whatever it computes is sequential semantics.

use rvpipe_core::common::Trap;
use rvpipe_core::common::constants::INSTRUCTION_BYTES;
use rvpipe_core::common::exit::ExitReason;
use rvpipe_core::core::arch::gpr::Gpr;
use rvpipe_core::core::pipeline::latches::{IfIdEntry, PipelineSlot};
use rvpipe_core::core::pipeline::signals::{MemOp, OpASrc, OpBSrc, WbSrc};
use rvpipe_core::core::pipeline::stages::decode_stage;
use rvpipe_core::core::units::alu::Alu;
use rvpipe_core::core::units::alu_control::AluControl;
use rvpipe_core::core::units::bru::Bru;
use rvpipe_core::core::units::lsu::Lsu;
use rvpipe_core::soc::memory::Memory;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    Retired,
    Halted(ExitReason),
    Trapped(Trap),
}

#[derive(Clone, Debug)]
pub struct Reference {
    pub pc: u64,
    pub regs: Gpr,
    pub mem: Memory,
    pub retired: u64,
}

impl Reference {
    pub fn new(mem_size: usize) -> Self {
        Self {
            pc: 0,
            regs: Gpr::new(),
            mem: Memory::new(mem_size),
            retired: 0,
        }
    }

    pub fn load_program(&mut self, program: &[u32]) {
        let bytes: Vec<u8> = program.iter().flat_map(|w| w.to_le_bytes()).collect();
        self.mem.load(0, &bytes).unwrap();
    }

    pub fn step(&mut self) -> Step {
        let pc = self.pc;
        if pc % INSTRUCTION_BYTES != 0 {
            return Step::Trapped(Trap::InstructionAddressMisaligned(pc));
        }
        let Some(inst) = self.mem.read_u32(pc) else {
            return Step::Trapped(Trap::InstructionAccessFault(pc));
        };

        let slot = PipelineSlot::new(IfIdEntry {
            pc,
            inst,
            trap: None,
        });
        let e = decode_stage(&slot, &self.regs, None).slot.payload;
        if let Some(trap) = e.trap {
            return Step::Trapped(trap);
        }
        self.retired += 1;
        if let Some(reason) = e.ctrl.halt {
            return Step::Halted(reason);
        }

        let a = match e.ctrl.op1_src {
            OpASrc::Reg1 => e.rv1,
            OpASrc::Pc => pc,
            OpASrc::Zero => 0,
        };
        let b = match e.ctrl.op2_src {
            OpBSrc::Reg2 => e.rv2,
            OpBSrc::Imm => e.imm as u64,
        };
        let op = AluControl::resolve(e.ctrl.alu_op, e.funct3, e.funct7, e.ctrl.word).unwrap();
        let alu = Alu::execute(op, a, b, e.ctrl.word);

        let mut loaded = 0;
        match e.ctrl.mem_op {
            MemOp::None => {}
            MemOp::Read => {
                let width = Lsu::load_width(e.funct3).unwrap();
                let Some(raw) = self.mem.read(alu, width.bytes()) else {
                    self.retired -= 1;
                    return Step::Trapped(Trap::LoadAccessFault(alu));
                };
                loaded = Lsu::extend_load(e.funct3, raw);
            }
            MemOp::Write => {
                let width = Lsu::store_width(e.funct3).unwrap();
                if self.mem.write(alu, width.bytes(), e.rv2 & width.mask()).is_none() {
                    self.retired -= 1;
                    return Step::Trapped(Trap::StoreAccessFault(alu));
                }
            }
        }

        if e.ctrl.reg_write {
            let value = match e.ctrl.wb_src {
                WbSrc::Alu => alu,
                WbSrc::Mem => loaded,
                WbSrc::PcPlus4 => pc + INSTRUCTION_BYTES,
            };
            self.regs.write(e.rd, value);
        }

        self.pc = if Bru::is_taken(e.ctrl.jump_op, e.funct3, e.rv1, e.rv2) {
            Bru::target(e.ctrl.jump_op, pc, e.rv1, e.imm)
        } else {
            pc + INSTRUCTION_BYTES
        };
        Step::Retired
    }

    /// Steps until halt or trap, at most `max_steps` instructions.
    pub fn run(&mut self, max_steps: u64) -> Step {
        for _ in 0..max_steps {
            match self.step() {
                Step::Retired => {}
                other => return other,
            }
        }
        panic!("reference model did not halt within {max_steps} steps");
    }
}
