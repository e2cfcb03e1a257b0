//! ALU Control Tests.

use rstest::rstest;
use rvpipe_core::core::pipeline::signals::{AluOp, AluOpClass};
use rvpipe_core::core::units::alu_control::AluControl;

#[rstest]
#[case::load_store_address(AluOpClass::Add, 0b011, 0, false, Some(AluOp::Add))]
#[case::branch_compare(AluOpClass::Branch, 0b000, 0, false, Some(AluOp::Sub))]
#[case::lui(AluOpClass::Lui, 0, 0, false, Some(AluOp::PassB))]
#[case::addi(AluOpClass::Imm, 0b000, 0x55, false, Some(AluOp::Add))]
#[case::slli_shamt_bit5(AluOpClass::Imm, 0b001, 0b000_0001, false, Some(AluOp::Sll))]
#[case::srai(AluOpClass::Imm, 0b101, 0b010_0000, false, Some(AluOp::Sra))]
#[case::srai_shamt_bit5(AluOpClass::Imm, 0b101, 0b010_0001, false, Some(AluOp::Sra))]
#[case::slliw_shamt_bit5_illegal(AluOpClass::Imm, 0b001, 0b000_0001, true, None)]
#[case::addiw(AluOpClass::Imm, 0b000, 0, true, Some(AluOp::Add))]
#[case::xoriw_illegal(AluOpClass::Imm, 0b100, 0, true, None)]
#[case::sub(AluOpClass::Reg, 0b000, 0b010_0000, false, Some(AluOp::Sub))]
#[case::sltu(AluOpClass::Reg, 0b011, 0, false, Some(AluOp::Sltu))]
#[case::mulhsu(AluOpClass::Reg, 0b010, 0b000_0001, false, Some(AluOp::Mulhsu))]
#[case::remu(AluOpClass::Reg, 0b111, 0b000_0001, false, Some(AluOp::Remu))]
#[case::mulhw_illegal(AluOpClass::Reg, 0b001, 0b000_0001, true, None)]
#[case::divuw(AluOpClass::Reg, 0b101, 0b000_0001, true, Some(AluOp::Divu))]
#[case::andw_illegal(AluOpClass::Reg, 0b111, 0, true, None)]
#[case::bad_funct7(AluOpClass::Reg, 0b000, 0b111_1111, false, None)]
fn resolve(
    #[case] class: AluOpClass,
    #[case] funct3: u32,
    #[case] funct7: u32,
    #[case] word: bool,
    #[case] expected: Option<AluOp>,
) {
    assert_eq!(AluControl::resolve(class, funct3, funct7, word), expected);
}
