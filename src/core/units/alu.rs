//! Arithmetic Logic Unit (ALU).
//!
//! This module implements the integer ALU used in the Execute stage.
//! It handles the RV32I arithmetic, logical, shift and set-less-than
//! operations on 32-bit operands, plus the equality comparison used by
//! branches. All arithmetic wraps; nothing here can fault.

use crate::core::pipeline::signals::{AluMode, AluOp};

/// Bit mask for the shift amount (5 bits: 0-31).
const SHAMT_MASK: u32 = 0x1f;

/// Output of one ALU evaluation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AluOutput {
    /// Computed value. Unused for `AluMode::Compare`.
    pub result: u32,
    /// Operands were equal. Only meaningful for `AluMode::Compare`.
    pub is_equal: bool,
}

/// Arithmetic Logic Unit (ALU) for integer operations.
pub struct Alu;

impl Alu {
    /// Evaluates the ALU family selected by the opcode.
    ///
    /// `Add` adds the operands with 32-bit wraparound; `Compare` reports
    /// operand equality and leaves `result` at zero.
    pub fn execute(a: u32, b: u32, mode: AluMode) -> AluOutput {
        match mode {
            AluMode::Add => AluOutput {
                result: a.wrapping_add(b),
                is_equal: false,
            },
            AluMode::Compare => AluOutput {
                result: 0,
                is_equal: a == b,
            },
        }
    }

    /// Computes a concrete integer operation.
    ///
    /// `b` doubles as the shift amount; only its low five bits are used.
    pub fn compute(op: AluOp, a: u32, b: u32) -> u32 {
        let shamt = b & SHAMT_MASK;
        match op {
            AluOp::Add => a.wrapping_add(b),
            AluOp::Sub => a.wrapping_sub(b),
            AluOp::Sll => a.wrapping_shl(shamt),
            AluOp::Slt => ((a as i32) < (b as i32)) as u32,
            AluOp::Sltu => (a < b) as u32,
            AluOp::Xor => a ^ b,
            AluOp::Srl => a.wrapping_shr(shamt),
            AluOp::Sra => ((a as i32) >> shamt) as u32,
            AluOp::Or => a | b,
            AluOp::And => a & b,
        }
    }
}
