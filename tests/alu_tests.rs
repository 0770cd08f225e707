//! Unit tests for ALU operations.

use rv_pipesim::core::pipeline::signals::{AluMode, AluOp};
use rv_pipesim::core::units::alu::Alu;

/// Tests 32-bit wraparound addition in Add mode.
#[test]
fn test_alu_add_mode() {
    assert_eq!(Alu::execute(10, 20, AluMode::Add).result, 30);
    assert_eq!(Alu::execute(0xFFFF_FFFF, 1, AluMode::Add).result, 0);
    assert_eq!(Alu::execute(0x7FFF_FFFF, 1, AluMode::Add).result, 0x8000_0000);
}

/// Tests the equality comparison used by branches.
#[test]
fn test_alu_compare_mode() {
    assert!(Alu::execute(7, 7, AluMode::Compare).is_equal);
    assert!(!Alu::execute(7, 8, AluMode::Compare).is_equal);
    assert_eq!(Alu::execute(7, 7, AluMode::Compare).result, 0);
}

/// Tests subtraction, including borrow past zero.
#[test]
fn test_alu_sub() {
    assert_eq!(Alu::compute(AluOp::Sub, 30, 10), 20);
    assert_eq!(Alu::compute(AluOp::Sub, 0, 1), 0xFFFF_FFFF);
}

/// Tests signed and unsigned set-less-than.
#[test]
fn test_alu_slt_sltu() {
    assert_eq!(Alu::compute(AluOp::Slt, -1i32 as u32, 1), 1);
    assert_eq!(Alu::compute(AluOp::Sltu, -1i32 as u32, 1), 0);
    assert_eq!(Alu::compute(AluOp::Slt, 5, 5), 0);
}

/// Tests shifts mask the amount to five bits.
#[test]
fn test_alu_shifts() {
    assert_eq!(Alu::compute(AluOp::Sll, 1, 4), 16);
    assert_eq!(Alu::compute(AluOp::Sll, 1, 33), 2);
    assert_eq!(Alu::compute(AluOp::Srl, 0x8000_0000, 31), 1);
    assert_eq!(Alu::compute(AluOp::Sra, 0x8000_0000, 31), 0xFFFF_FFFF);
}

/// Tests the bitwise operations.
#[test]
fn test_alu_logic() {
    assert_eq!(Alu::compute(AluOp::And, 0b1100, 0b1010), 0b1000);
    assert_eq!(Alu::compute(AluOp::Or, 0b1100, 0b1010), 0b1110);
    assert_eq!(Alu::compute(AluOp::Xor, 0b1100, 0b1010), 0b0110);
}

/// Tests operation selection from opcode, funct3 and funct7.
#[test]
fn test_alu_op_select() {
    const OP_REG: u32 = 0x33;
    const OP_IMM: u32 = 0x13;
    const OP_LOAD: u32 = 0x03;

    assert_eq!(AluOp::select(OP_REG, 0b000, 0x00), AluOp::Add);
    assert_eq!(AluOp::select(OP_REG, 0b000, 0x20), AluOp::Sub);
    assert_eq!(AluOp::select(OP_REG, 0b101, 0x20), AluOp::Sra);
    assert_eq!(AluOp::select(OP_REG, 0b101, 0x00), AluOp::Srl);
    assert_eq!(AluOp::select(OP_REG, 0b111, 0x00), AluOp::And);
    // addi with a negative immediate still adds.
    assert_eq!(AluOp::select(OP_IMM, 0b000, 0x7f), AluOp::Add);
    assert_eq!(AluOp::select(OP_IMM, 0b101, 0x20), AluOp::Sra);
    assert_eq!(AluOp::select(OP_LOAD, 0b010, 0x00), AluOp::Add);
}
