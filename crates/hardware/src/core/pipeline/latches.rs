//! Stage registers and inter-stage payloads.
//!
//! This module defines what sits between two pipeline stages:
//! 1. **PipelineSlot:** a payload plus a validity flag. An invalid slot is a
//!    bubble: it never writes a register or touches memory.
//! 2. **StageRegister:** the clocked register holding one slot. It is driven
//!    during the combinational phase and only changes at `clock`.
//! 3. **Payloads:** the typed bundle for each boundary (IF/ID, ID/EX, EX/MEM,
//!    MEM/WB). Traps ride in the payload so that they are raised only if the
//!    instruction survives to writeback.

use crate::common::constants::INSTRUCTION_BYTES;
use crate::common::error::Trap;
use crate::core::pipeline::signals::{ControlSignals, WbSrc};
use crate::core::pipeline::traits::{PipelineLatch, StagePayload};

/// A stage-register value: payload plus validity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PipelineSlot<T> {
    /// `false` for a bubble.
    pub valid: bool,
    /// Payload; `T::default()` for a bubble.
    pub payload: T,
}

impl<T: Default> PipelineSlot<T> {
    /// A bubble (`valid == false`, default payload, pc 0).
    pub fn bubble() -> Self {
        Self {
            valid: false,
            payload: T::default(),
        }
    }

    /// A slot holding a real instruction.
    pub const fn new(payload: T) -> Self {
        Self {
            valid: true,
            payload,
        }
    }

    /// The payload if this slot holds a real instruction.
    pub const fn get(&self) -> Option<&T> {
        if self.valid { Some(&self.payload) } else { None }
    }
}

/// A clocked stage register.
///
/// Each cycle the producing stage calls [`drive`](Self::drive) with the next
/// slot, a load enable and a flush; [`clock`](Self::clock) then makes the
/// result visible. Until `clock` the old value stays observable, so every
/// consumer in the same cycle sees a consistent pre-tick state.
///
/// Next value: bubble if `flush`, else `next` if `enable`, else the current
/// value. Flush dominates: a held slot that is also flushed becomes a bubble.
#[derive(Clone, Debug, Default)]
pub struct StageRegister<T> {
    current: PipelineSlot<T>,
    staged: Option<PipelineSlot<T>>,
}

impl<T: StagePayload> StageRegister<T> {
    /// Creates a register holding a bubble.
    pub fn new() -> Self {
        Self {
            current: PipelineSlot::bubble(),
            staged: None,
        }
    }

    /// The value visible this cycle.
    pub const fn current(&self) -> &PipelineSlot<T> {
        &self.current
    }

    /// Stages the value to latch at the next `clock`.
    pub fn drive(&mut self, next: PipelineSlot<T>, enable: bool, flush: bool) {
        self.staged = Some(if flush {
            PipelineSlot::bubble()
        } else if enable {
            next
        } else {
            self.current
        });
    }

    /// Latches the staged value. A register not driven this cycle holds.
    pub fn clock(&mut self) {
        if let Some(next) = self.staged.take() {
            self.current = next;
        }
    }

    /// Overwrites the visible value directly, outside the clocked update.
    pub fn force(&mut self, slot: PipelineSlot<T>) {
        self.staged = None;
        self.current = slot;
    }
}

impl<T: StagePayload> PipelineLatch for StageRegister<T> {
    fn flush(&mut self) {
        self.force(PipelineSlot::bubble());
    }

    fn is_bubble(&self) -> bool {
        !self.current.valid
    }

    fn has_trap(&self) -> bool {
        self.current.valid && self.current.payload.trap().is_some()
    }

    fn pc(&self) -> Option<u64> {
        self.current.get().map(StagePayload::pc)
    }
}

/// Entry in the IF/ID latch (Fetch to Decode).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IfIdEntry {
    /// Program counter of the instruction.
    pub pc: u64,
    /// 32-bit instruction encoding.
    pub inst: u32,
    /// Trap raised during fetch.
    pub trap: Option<Trap>,
}

/// Entry in the ID/EX latch (Decode to Execute).
///
/// `rv1`/`rv2` are the register values read in decode; execute replaces them
/// with forwarded values when a younger producer is still in flight.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IdExEntry {
    /// Program counter of the instruction.
    pub pc: u64,
    /// 32-bit instruction encoding.
    pub inst: u32,
    /// First source register index.
    pub rs1: usize,
    /// Second source register index.
    pub rs2: usize,
    /// Destination register index.
    pub rd: usize,
    /// Sign-extended immediate.
    pub imm: i64,
    /// Value read from `rs1`.
    pub rv1: u64,
    /// Value read from `rs2`.
    pub rv2: u64,
    /// Function code 3.
    pub funct3: u32,
    /// Function code 7.
    pub funct7: u32,
    /// Control signals for downstream stages.
    pub ctrl: ControlSignals,
    /// Trap raised during fetch or decode.
    pub trap: Option<Trap>,
}

/// Entry in the EX/MEM latch (Execute to Memory).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExMemEntry {
    /// Program counter of the instruction.
    pub pc: u64,
    /// 32-bit instruction encoding.
    pub inst: u32,
    /// Destination register index.
    pub rd: usize,
    /// ALU result; the effective address for loads and stores.
    pub alu: u64,
    /// Forwarded `rs2` value for stores.
    pub store_data: u64,
    /// Function code 3 (load/store width).
    pub funct3: u32,
    /// Jump detection result.
    pub taken: bool,
    /// Jump target.
    pub target: u64,
    /// Control signals for downstream stages.
    pub ctrl: ControlSignals,
    /// Trap raised so far.
    pub trap: Option<Trap>,
}

impl ExMemEntry {
    /// Value forwarded from this boundary to execute.
    ///
    /// Loads never reach this path: the hazard unit stalls their consumers
    /// until the loaded value sits in MEM/WB.
    pub const fn forward_value(&self) -> u64 {
        match self.ctrl.wb_src {
            WbSrc::PcPlus4 => self.pc.wrapping_add(INSTRUCTION_BYTES),
            WbSrc::Alu | WbSrc::Mem => self.alu,
        }
    }
}

/// Entry in the MEM/WB latch (Memory to Writeback).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MemWbEntry {
    /// Program counter of the instruction.
    pub pc: u64,
    /// 32-bit instruction encoding.
    pub inst: u32,
    /// Destination register index.
    pub rd: usize,
    /// ALU result.
    pub alu: u64,
    /// Extended load data.
    pub load_data: u64,
    /// Control signals for writeback.
    pub ctrl: ControlSignals,
    /// Trap raised so far.
    pub trap: Option<Trap>,
}

impl MemWbEntry {
    /// The value writeback commits, selected by `wb_src`.
    pub const fn result(&self) -> u64 {
        match self.ctrl.wb_src {
            WbSrc::Alu => self.alu,
            WbSrc::Mem => self.load_data,
            WbSrc::PcPlus4 => self.pc.wrapping_add(INSTRUCTION_BYTES),
        }
    }
}

macro_rules! impl_stage_payload {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl StagePayload for $ty {
                fn pc(&self) -> u64 {
                    self.pc
                }

                fn trap(&self) -> Option<Trap> {
                    self.trap
                }
            }
        )+
    };
}

impl_stage_payload!(IfIdEntry, IdExEntry, ExMemEntry, MemWbEntry);
