//! Branch Resolution Unit.
//!
//! Resolves control-flow instructions in Decode. `jal` and `jalr` are
//! always taken; conditional branches compare their two operands using the
//! condition encoded in funct3. The instruction fetched behind any of them
//! is squashed whatever the outcome, so the unit only has to name the
//! address Fetch continues from.

use crate::isa::{funct3, opcodes};

/// Bit mask to clear bit 0, forcing JALR target addresses to be even.
const JALR_ALIGNMENT_MASK: u32 = !1;

/// Outcome of a resolved control-flow instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Resolution {
    /// Whether the branch or jump is taken.
    pub taken: bool,
    /// Address Fetch continues from: the target if taken, else `pc + 4`.
    pub target: u32,
}

/// Condition test for a conditional branch.
///
/// Unrecognised funct3 encodings never branch.
pub fn branch_taken(f3: u32, rv1: u32, rv2: u32) -> bool {
    match f3 {
        funct3::BEQ => rv1 == rv2,
        funct3::BNE => rv1 != rv2,
        funct3::BLT => (rv1 as i32) < (rv2 as i32),
        funct3::BGE => (rv1 as i32) >= (rv2 as i32),
        funct3::BLTU => rv1 < rv2,
        funct3::BGEU => rv1 >= rv2,
        _ => false,
    }
}

/// Stateless branch resolution unit.
pub struct BranchUnit;

impl BranchUnit {
    /// Resolves the instruction at `pc`.
    ///
    /// Returns `None` for opcodes that are not control flow.
    pub fn resolve(
        opcode: u32,
        f3: u32,
        pc: u32,
        imm: i32,
        rv1: u32,
        rv2: u32,
    ) -> Option<Resolution> {
        let fallthrough = pc.wrapping_add(4);
        match opcode {
            opcodes::OP_JAL => Some(Resolution {
                taken: true,
                target: pc.wrapping_add(imm as u32),
            }),
            opcodes::OP_JALR => Some(Resolution {
                taken: true,
                target: rv1.wrapping_add(imm as u32) & JALR_ALIGNMENT_MASK,
            }),
            opcodes::OP_BRANCH => {
                let taken = branch_taken(f3, rv1, rv2);
                Some(Resolution {
                    taken,
                    target: if taken {
                        pc.wrapping_add(imm as u32)
                    } else {
                        fallthrough
                    },
                })
            }
            _ => None,
        }
    }
}
