//! Control Hazard Tests: Flushing on Taken Branches and Jumps.
//!
//! Jumps resolve in the memory stage. A taken jump squashes the three
//! younger slots (IF/ID, ID/EX, EX/MEM inputs) and fetch resumes at the
//! target in the next cycle.

use rvpipe_core::core::pipeline::hazards::{HazardInputs, HazardUnit, StageControl};

use crate::common::builder::instruction::InstructionBuilder;
use crate::common::harness::TestContext;

#[test]
fn taken_flushes_three_boundaries_and_redirects() {
    let d = HazardUnit::evaluate(&HazardInputs {
        taken: true,
        target: 0x40,
        fetch_good: true,
        ..HazardInputs::default()
    });
    assert_eq!(d.redirect, Some(0x40));
    assert!(d.if_id.flush && d.id_ex.flush && d.ex_mem.flush);
    assert_eq!(d.mem_wb, StageControl::default());
    assert!(d.validate().is_ok());
}

#[test]
fn taken_squashes_a_held_load_use_slot() {
    let d = HazardUnit::evaluate(&HazardInputs {
        ex_load_rd: Some(4),
        decode_sources: [Some(4), None],
        taken: true,
        target: 0x40,
        fetch_good: true,
        ..HazardInputs::default()
    });
    assert!(d.if_id.stall && d.if_id.flush, "flush must dominate the load-use hold");
    assert_eq!(d.redirect, Some(0x40));
}

#[test]
fn taken_branch_skips_wrong_path() {
    //   0: x1 = 10
    //   4: BEQ x1, x1, +12   (taken → 16)
    //   8: SD x1, 0x100(x0)  (wrong path, in execute when the branch resolves)
    //  12: x4 = 77           (wrong path)
    //  16: x5 = 42
    //  20: ECALL
    let mut tc = TestContext::new().load_program(&[
        InstructionBuilder::new().addi(1, 0, 10).build(),
        InstructionBuilder::new().beq(1, 1, 12).build(),
        InstructionBuilder::new().sd(0, 1, 0x100).build(),
        InstructionBuilder::new().addi(4, 0, 77).build(),
        InstructionBuilder::new().addi(5, 0, 42).build(),
        InstructionBuilder::new().ecall().build(),
    ]);

    // Two retire on schedule, the third pays the three-cycle redirect.
    assert_eq!(tc.sim.run_until_retired(3).unwrap(), 9);
    assert_eq!(tc.get_reg(5), 42);
    assert_eq!(tc.get_reg(4), 0, "x4 must not be written on the wrong path");
    assert_eq!(tc.mem_u64(0x100), 0, "wrong-path store must not reach memory");
    assert_eq!(tc.stats().flushes_control, 1);
}

#[test]
fn not_taken_branch_costs_nothing() {
    let mut tc = TestContext::new().load_program(&[
        InstructionBuilder::new().addi(1, 0, 1).build(),
        InstructionBuilder::new().beq(1, 0, 12).build(),
        InstructionBuilder::new().addi(2, 0, 2).build(),
        InstructionBuilder::new().ecall().build(),
    ]);
    assert_eq!(tc.sim.run_until_retired(3).unwrap(), 6);
    assert_eq!(tc.get_reg(2), 2);
    assert_eq!(tc.stats().flushes_control, 0);
}

#[test]
fn jal_links_and_jumps() {
    let mut tc = TestContext::new().load_program(&[
        InstructionBuilder::new().jal(1, 8).build(),
        InstructionBuilder::new().addi(3, 0, 99).build(),
        InstructionBuilder::new().ecall().build(),
    ]);
    tc.run_to_halt().unwrap();
    assert_eq!(tc.get_reg(1), 4);
    assert_eq!(tc.get_reg(3), 0);
}

#[test]
fn jalr_uses_forwarded_base_and_clears_bit_zero() {
    let mut tc = TestContext::new().load_program(&[
        InstructionBuilder::new().addi(2, 0, 17).build(),
        InstructionBuilder::new().jalr(1, 2, -1).build(),
        InstructionBuilder::new().addi(3, 0, 99).build(),
        InstructionBuilder::new().addi(3, 0, 98).build(),
        InstructionBuilder::new().ecall().build(),
    ]);
    tc.run_to_halt().unwrap();
    assert_eq!(tc.get_reg(1), 8);
    assert_eq!(tc.get_reg(3), 0);
}

#[test]
fn link_register_is_forwarded() {
    // JAL's rd carries pc + 4, not the ALU sum, through EX/MEM.
    let mut tc = TestContext::new().load_program(&[
        InstructionBuilder::new().jal(1, 4).build(),
        InstructionBuilder::new().add(2, 1, 0).build(),
        InstructionBuilder::new().ecall().build(),
    ]);
    tc.run_to_halt().unwrap();
    assert_eq!(tc.get_reg(2), 4);
}

#[test]
fn backward_loop_runs_to_completion() {
    //   0: x1 = 5
    //   4: x2 += 3
    //   8: x1 -= 1
    //  12: BNE x1, x0, -8
    //  16: ECALL
    let mut tc = TestContext::new().load_program(&[
        InstructionBuilder::new().addi(1, 0, 5).build(),
        InstructionBuilder::new().addi(2, 2, 3).build(),
        InstructionBuilder::new().addi(1, 1, -1).build(),
        InstructionBuilder::new().bne(1, 0, -8).build(),
        InstructionBuilder::new().ecall().build(),
    ]);
    tc.run_to_halt().unwrap();
    assert_eq!(tc.get_reg(2), 15);
    assert_eq!(tc.get_reg(1), 0);
    assert_eq!(tc.stats().flushes_control, 4);
}
