//! Tests for the branch resolution unit.

use rv_pipesim::core::units::bru::{branch_taken, BranchUnit, Resolution};

const OP_BRANCH: u32 = 0x63;
const OP_JAL: u32 = 0x6F;
const OP_JALR: u32 = 0x67;
const OP_IMM: u32 = 0x13;

/// Tests beq outcome and both next-fetch addresses.
#[test]
fn test_beq_resolution() {
    assert_eq!(
        BranchUnit::resolve(OP_BRANCH, 0b000, 0x10, 8, 3, 3),
        Some(Resolution {
            taken: true,
            target: 0x18
        })
    );
    assert_eq!(
        BranchUnit::resolve(OP_BRANCH, 0b000, 0x10, 8, 3, 4),
        Some(Resolution {
            taken: false,
            target: 0x14
        })
    );
}

/// Tests backward branch targets.
#[test]
fn test_backward_branch() {
    let res = BranchUnit::resolve(OP_BRANCH, 0b001, 0x20, -16, 1, 0).unwrap();
    assert!(res.taken);
    assert_eq!(res.target, 0x10);
}

/// Tests the signed and unsigned conditions.
#[test]
fn test_branch_conditions() {
    let neg = -1i32 as u32;
    assert!(branch_taken(0b100, neg, 1)); // blt
    assert!(!branch_taken(0b110, neg, 1)); // bltu
    assert!(branch_taken(0b101, 1, neg)); // bge
    assert!(branch_taken(0b111, neg, 1)); // bgeu
    assert!(!branch_taken(0b010, 0, 0));
}

/// Tests jumps are always taken and jalr clears bit 0.
#[test]
fn test_jumps() {
    let j = BranchUnit::resolve(OP_JAL, 0, 0x100, -0x20, 0, 0).unwrap();
    assert_eq!(j, Resolution { taken: true, target: 0xE0 });

    let r = BranchUnit::resolve(OP_JALR, 0, 0x100, 3, 0x40, 0).unwrap();
    assert_eq!(r, Resolution { taken: true, target: 0x42 });
}

/// Tests other opcodes are not resolved.
#[test]
fn test_non_control_flow() {
    assert_eq!(BranchUnit::resolve(OP_IMM, 0, 0, 4, 0, 0), None);
}
