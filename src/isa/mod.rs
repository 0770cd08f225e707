//! Instruction Set Architecture definitions.
//!
//! Covers the RV32I subset the pipeline models: register-register and
//! register-immediate arithmetic, loads, stores, conditional branches,
//! `jal`, `jalr`, `lui` and `auipc`.

/// Instruction decoder and the opcode to control-signal table.
pub mod decoder;

/// funct3 field values.
pub mod funct3;

/// funct7 field values.
pub mod funct7;

/// Instruction bit-field extraction.
pub mod instruction;

/// Major opcodes.
pub mod opcodes;

pub use decoder::{reads_rs1, reads_rs2, Decoder};
pub use instruction::{Decoded, InstructionBits};
