//! Precise Trap Tests.
//!
//! A trap travels with its instruction and is raised only at writeback:
//! everything older has retired, nothing younger has touched registers or
//! memory, and a trap on a squashed wrong-path slot never fires.

use pretty_assertions::assert_eq;
use rvpipe_core::common::exit::ExitReason;
use rvpipe_core::common::{SimError, Trap};

use crate::common::builder::instruction::InstructionBuilder;
use crate::common::harness::TestContext;

const ILLEGAL: u32 = 0xFFFF_FFFF;

fn expect_trap(tc: &mut TestContext) -> (u64, Trap) {
    match tc.run_to_halt() {
        Err(SimError::Trap { pc, trap }) => (pc, trap),
        other => panic!("expected a trap, got {other:?}"),
    }
}

#[test]
fn zero_word_is_illegal() {
    let mut tc = TestContext::new().load_program(&[InstructionBuilder::new().addi(1, 0, 1).build()]);
    assert_eq!(expect_trap(&mut tc), (4, Trap::IllegalInstruction(0)));
    assert_eq!(tc.get_reg(1), 1, "older instruction must retire");
    assert_eq!(tc.stats().instructions_retired, 1);
}

#[test]
fn younger_store_has_no_effect() {
    let mut tc = TestContext::new().load_program(&[
        InstructionBuilder::new().addi(1, 0, 5).build(),
        ILLEGAL,
        InstructionBuilder::new().sd(0, 1, 0x100).build(),
        InstructionBuilder::new().addi(2, 0, 9).build(),
    ]);
    assert_eq!(expect_trap(&mut tc), (4, Trap::IllegalInstruction(ILLEGAL)));
    assert_eq!(tc.mem_u64(0x100), 0);
    assert_eq!(tc.get_reg(2), 0);
}

#[test]
fn wrong_path_trap_is_squashed() {
    let mut tc = TestContext::new().load_program(&[
        InstructionBuilder::new().jal(0, 12).build(),
        ILLEGAL,
        0,
        InstructionBuilder::new().addi(1, 0, 3).build(),
        InstructionBuilder::new().ecall().build(),
    ]);
    assert_eq!(tc.run_to_halt().unwrap(), ExitReason::Ecall);
    assert_eq!(tc.get_reg(1), 3);
}

#[test]
fn misaligned_jump_target_traps_at_target() {
    let mut tc = TestContext::new().load_program(&[
        InstructionBuilder::new().addi(2, 0, 6).build(),
        InstructionBuilder::new().jalr(1, 2, 0).build(),
        InstructionBuilder::new().ecall().build(),
    ]);
    assert_eq!(expect_trap(&mut tc), (6, Trap::InstructionAddressMisaligned(6)));
    assert_eq!(tc.get_reg(1), 8, "the jump itself retires");
}

#[test]
fn fetch_beyond_memory_faults() {
    let mut tc = TestContext::new().load_program(&[InstructionBuilder::new().jal(0, 0x10000).build()]);
    assert_eq!(
        expect_trap(&mut tc),
        (0x10000, Trap::InstructionAccessFault(0x10000))
    );
}

#[test]
fn load_beyond_memory_faults() {
    let mut tc = TestContext::new().load_program(&[
        InstructionBuilder::new().lui(2, 0x10).build(),
        InstructionBuilder::new().ld(3, 2, 0).build(),
        InstructionBuilder::new().addi(4, 3, 1).build(),
        InstructionBuilder::new().ecall().build(),
    ]);
    assert_eq!(expect_trap(&mut tc), (4, Trap::LoadAccessFault(0x10000)));
    assert_eq!(tc.get_reg(3), 0);
    assert_eq!(tc.get_reg(4), 0);
}

#[test]
fn store_beyond_memory_faults() {
    let mut tc = TestContext::new().load_program(&[
        InstructionBuilder::new().lui(2, 0x10).build(),
        InstructionBuilder::new().sd(2, 2, -8).build(),
        InstructionBuilder::new().sd(2, 0, 0).build(),
        InstructionBuilder::new().ecall().build(),
    ]);
    assert_eq!(expect_trap(&mut tc), (8, Trap::StoreAccessFault(0x10000)));
    assert_eq!(tc.mem_u64(0xFFF8), 0x10000, "the older in-range store lands");
}

#[test]
fn faulting_slow_load_traps_after_latency() {
    let mut tc = TestContext::with_latency(0, 3).load_program(&[
        InstructionBuilder::new().lui(2, 0x10).build(),
        InstructionBuilder::new().ld(3, 2, 0).build(),
        InstructionBuilder::new().ecall().build(),
    ]);
    assert_eq!(expect_trap(&mut tc), (4, Trap::LoadAccessFault(0x10000)));
    assert_eq!(tc.stats().stalls_mem, 3);
}

#[test]
fn ebreak_halts() {
    let mut tc = TestContext::new().load_program(&[
        InstructionBuilder::new().addi(1, 0, 1).build(),
        InstructionBuilder::new().ebreak().build(),
        InstructionBuilder::new().addi(1, 0, 2).build(),
    ]);
    assert_eq!(tc.run_to_halt().unwrap(), ExitReason::Ebreak);
    assert_eq!(tc.get_reg(1), 1);
    assert_eq!(tc.stats().instructions_retired, 2);
    assert_eq!(tc.stats().inst_system, 1);
}

#[test]
fn halted_core_stays_halted() {
    let mut tc = TestContext::new().load_program(&[InstructionBuilder::new().ecall().build()]);
    assert_eq!(tc.run_to_halt().unwrap(), ExitReason::Ecall);
    let cycles = tc.stats().cycles;
    let outcome = tc.tick().unwrap();
    assert_eq!(outcome.halted, Some(ExitReason::Ecall));
    assert!(!outcome.retired);
    assert_eq!(tc.stats().cycles, cycles);
}
