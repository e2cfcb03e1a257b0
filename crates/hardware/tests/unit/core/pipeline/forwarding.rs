//! Forwarding Unit Tests.
//!
//! Verifies the three-way select: EX/MEM wins over MEM/WB, `x0` is never
//! forwarded, and producers without write intent are ignored.

use proptest::prelude::*;
use rstest::rstest;
use rvpipe_core::common::Trap;
use rvpipe_core::core::pipeline::forwarding::{ForwardDecision, ForwardSelect, ForwardingUnit};
use rvpipe_core::core::pipeline::latches::{ExMemEntry, IdExEntry, MemWbEntry, PipelineSlot};
use rvpipe_core::core::pipeline::signals::{ControlSignals, control_for};
use rvpipe_core::isa::opcodes;

fn consumer(rs1: usize, rs2: usize) -> PipelineSlot<IdExEntry> {
    PipelineSlot::new(IdExEntry {
        rs1,
        rs2,
        ctrl: control_for(opcodes::OP_REG).unwrap(),
        ..IdExEntry::default()
    })
}

fn writer() -> ControlSignals {
    control_for(opcodes::OP_IMM).unwrap()
}

fn ex_mem(rd: usize, ctrl: ControlSignals) -> PipelineSlot<ExMemEntry> {
    PipelineSlot::new(ExMemEntry {
        rd,
        ctrl,
        ..ExMemEntry::default()
    })
}

fn mem_wb(rd: usize, ctrl: ControlSignals) -> PipelineSlot<MemWbEntry> {
    PipelineSlot::new(MemWbEntry {
        rd,
        ctrl,
        ..MemWbEntry::default()
    })
}

#[rstest]
#[case::ex_mem_only(3, Some(3), None, ForwardSelect::ExMem)]
#[case::mem_wb_only(3, None, Some(3), ForwardSelect::MemWb)]
#[case::both_prefers_ex_mem(3, Some(3), Some(3), ForwardSelect::ExMem)]
#[case::no_match(3, Some(4), Some(5), ForwardSelect::None)]
#[case::x0(0, Some(0), Some(0), ForwardSelect::None)]
fn select_rules(
    #[case] rs: usize,
    #[case] ex_mem_rd: Option<usize>,
    #[case] mem_wb_rd: Option<usize>,
    #[case] expected: ForwardSelect,
) {
    assert_eq!(ForwardingUnit::select(rs, ex_mem_rd, mem_wb_rd), expected);
}

#[test]
fn resolves_each_operand_independently() {
    let fwd = ForwardingUnit::resolve(&consumer(1, 2), &ex_mem(1, writer()), &mem_wb(2, writer()));
    assert_eq!(
        fwd,
        ForwardDecision {
            a: ForwardSelect::ExMem,
            b: ForwardSelect::MemWb,
        }
    );
}

#[test]
fn producer_without_write_intent_is_ignored() {
    let store = control_for(opcodes::OP_STORE).unwrap();
    let fwd = ForwardingUnit::resolve(&consumer(1, 1), &ex_mem(1, store), &mem_wb(1, writer()));
    assert_eq!(fwd.a, ForwardSelect::MemWb);
}

#[test]
fn bubble_and_trapped_producers_are_ignored() {
    let bubble = PipelineSlot::<ExMemEntry>::bubble();
    let trapped = PipelineSlot::new(MemWbEntry {
        rd: 1,
        ctrl: writer(),
        trap: Some(Trap::IllegalInstruction(0)),
        ..MemWbEntry::default()
    });
    let fwd = ForwardingUnit::resolve(&consumer(1, 1), &bubble, &trapped);
    assert_eq!(fwd, ForwardDecision::default());
}

#[test]
fn unused_operand_is_not_forwarded() {
    // An I-type consumer never reads rs2, whatever bits 24:20 hold.
    let addi = PipelineSlot::new(IdExEntry {
        rs1: 0,
        rs2: 7,
        ctrl: writer(),
        ..IdExEntry::default()
    });
    let fwd = ForwardingUnit::resolve(&addi, &ex_mem(7, writer()), &PipelineSlot::bubble());
    assert_eq!(fwd.b, ForwardSelect::None);
}

proptest! {
    #[test]
    fn ex_mem_always_wins_on_double_match(rs in 1usize..32) {
        prop_assert_eq!(ForwardingUnit::select(rs, Some(rs), Some(rs)), ForwardSelect::ExMem);
    }

    #[test]
    fn never_selects_a_non_matching_producer(
        rs in 0usize..32,
        ex in proptest::option::of(0usize..32),
        wb in proptest::option::of(0usize..32),
    ) {
        match ForwardingUnit::select(rs, ex, wb) {
            ForwardSelect::ExMem => prop_assert!(rs != 0 && ex == Some(rs)),
            ForwardSelect::MemWb => prop_assert!(rs != 0 && wb == Some(rs) && ex != Some(rs)),
            ForwardSelect::None => prop_assert!(rs == 0 || (ex != Some(rs) && wb != Some(rs))),
        }
    }
}
