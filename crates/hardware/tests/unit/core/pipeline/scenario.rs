//! Reference Scenario.
//!
//! `ADDI x1,x0,5; ADDI x2,x1,10; SD x2,0(x0)` on zero-latency memory: the
//! first result reaches writeback after the 4-cycle fill, the other two
//! follow one per cycle with both dependencies forwarded from EX/MEM.

use pretty_assertions::assert_eq;

use crate::common::builder::instruction::InstructionBuilder;
use crate::common::harness::TestContext;

fn program() -> Vec<u32> {
    vec![
        InstructionBuilder::new().addi(1, 0, 5).build(),
        InstructionBuilder::new().addi(2, 1, 10).build(),
        InstructionBuilder::new().sd(0, 2, 0).build(),
    ]
}

#[test]
fn encodings_match_hand_assembly() {
    assert_eq!(program(), vec![0x0050_0093, 0x00A0_8113, 0x0020_3023]);
}

#[test]
fn third_retirement_happens_in_cycle_six() {
    let mut tc = TestContext::new().load_program(&program());

    assert_eq!(tc.sim.run_until_retired(3).unwrap(), 6);
    assert_eq!(tc.get_reg(1), 5);
    assert_eq!(tc.get_reg(2), 15);
    assert_eq!(tc.mem_u64(0), 15);

    let stats = tc.stats();
    assert_eq!(stats.cycles, 7);
    assert_eq!(stats.instructions_retired, 3);
    assert_eq!(stats.stalls_data, 0);
    assert_eq!(stats.stalls_mem, 0);
    assert_eq!(stats.stalls_fetch, 0);
    assert_eq!(stats.forwards_ex_mem, 2);
    assert_eq!(stats.forwards_mem_wb, 0);
}

#[test]
fn x1_is_written_by_the_end_of_cycle_four() {
    let mut tc = TestContext::new().load_program(&program());

    for cycle in 0..4 {
        let outcome = tc.tick().unwrap();
        assert_eq!(outcome.cycle, cycle);
        assert!(!outcome.retired);
        assert_eq!(tc.get_reg(1), 0);
    }
    let outcome = tc.tick().unwrap();
    assert!(outcome.retired);
    assert_eq!(tc.get_reg(1), 5);
}

#[test]
fn retirements_are_one_per_cycle_after_fill() {
    let mut tc = TestContext::new().load_program(&program());
    let first = tc.sim.run_until_retired(1).unwrap();
    let second = tc.sim.run_until_retired(1).unwrap();
    let third = tc.sim.run_until_retired(1).unwrap();
    assert_eq!((first, second, third), (4, 5, 6));
}
