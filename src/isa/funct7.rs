//! RISC-V funct7 field values (bits 31-25).

/// Default encoding (ADD, SRL, and the other base operations).
pub const DEFAULT: u32 = 0b0000000;

/// Alternate encoding: SUB for ADD_SUB, SRA/SRAI for SRL_SRA.
pub const ALT: u32 = 0b0100000;
