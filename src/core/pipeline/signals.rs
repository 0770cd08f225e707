//! Pipeline control signals and operation types.
//!
//! This module defines the control signals that flow through the pipeline
//! alongside each instruction: register and memory enables, ALU operand
//! sources, and the ALU family. Control signals depend only on the opcode;
//! the concrete ALU operation and memory width are refined from funct3/funct7
//! in the stage that uses them.

use crate::isa::{funct3, funct7, opcodes};

/// ALU family selected by the opcode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AluMode {
    /// Arithmetic: addition for address/immediate forms, refined by funct3/funct7
    /// for register and immediate arithmetic.
    #[default]
    Add,
    /// Equality/ordering comparison of the two operands (branches).
    Compare,
}

/// Concrete integer ALU operation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AluOp {
    /// Integer addition.
    #[default]
    Add,
    /// Integer subtraction.
    Sub,
    /// Shift left logical.
    Sll,
    /// Set less than (signed).
    Slt,
    /// Set less than unsigned.
    Sltu,
    /// Bitwise XOR.
    Xor,
    /// Shift right logical.
    Srl,
    /// Shift right arithmetic.
    Sra,
    /// Bitwise OR.
    Or,
    /// Bitwise AND.
    And,
}

impl AluOp {
    /// Selects the concrete operation for an `AluMode::Add` instruction.
    ///
    /// Register and immediate arithmetic are refined by funct3, with the
    /// funct7 alternate bit choosing `sub` (register form only) and `sra`.
    /// Every other opcode adds.
    pub fn select(opcode: u32, f3: u32, f7: u32) -> AluOp {
        let alt = f7 & funct7::ALT != 0;
        let reg = opcode == opcodes::OP_REG;
        if !reg && opcode != opcodes::OP_IMM {
            return AluOp::Add;
        }
        match f3 {
            funct3::ADD_SUB if reg && alt => AluOp::Sub,
            funct3::ADD_SUB => AluOp::Add,
            funct3::SLL => AluOp::Sll,
            funct3::SLT => AluOp::Slt,
            funct3::SLTU => AluOp::Sltu,
            funct3::XOR => AluOp::Xor,
            funct3::SRL_SRA if alt => AluOp::Sra,
            funct3::SRL_SRA => AluOp::Srl,
            funct3::OR => AluOp::Or,
            _ => AluOp::And,
        }
    }
}

/// Memory access width for load and store operations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MemWidth {
    /// No memory operation.
    #[default]
    Nop,
    /// 8-bit byte access.
    Byte,
    /// 16-bit half-word access.
    Half,
    /// 32-bit word access.
    Word,
}

impl MemWidth {
    /// Access size in bytes. `Nop` is treated as a word.
    pub fn bytes(self) -> u32 {
        match self {
            MemWidth::Byte => 1,
            MemWidth::Half => 2,
            MemWidth::Word | MemWidth::Nop => 4,
        }
    }

    /// Width and signedness of a load from its funct3.
    ///
    /// Unsupported encodings fall back to a signed word load.
    pub fn for_load(f3: u32) -> (MemWidth, bool) {
        match f3 {
            funct3::LB => (MemWidth::Byte, true),
            funct3::LH => (MemWidth::Half, true),
            funct3::LBU => (MemWidth::Byte, false),
            funct3::LHU => (MemWidth::Half, false),
            _ => (MemWidth::Word, true),
        }
    }

    /// Width of a store from its funct3.
    pub fn for_store(f3: u32) -> MemWidth {
        match f3 {
            funct3::SB => MemWidth::Byte,
            funct3::SH => MemWidth::Half,
            _ => MemWidth::Word,
        }
    }
}

/// Source for ALU operand A.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OpASrc {
    /// Use rs1 register value.
    #[default]
    Reg1,
    /// Use program counter value (AUIPC, JAL).
    Pc,
    /// Use zero (LUI).
    Zero,
}

/// Control signals for pipeline stage execution.
///
/// Exactly one tuple exists per recognised opcode. [`ControlSignals::NOP`]
/// is the tuple for every other opcode and for bubbles: it enables nothing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ControlSignals {
    /// Enable write to the destination register.
    pub reg_write: bool,
    /// Enable memory read operation (load).
    pub mem_read: bool,
    /// Enable memory write operation (store).
    pub mem_write: bool,
    /// ALU operand B is the immediate rather than rs2.
    pub alu_src_imm: bool,
    /// ALU family.
    pub alu_mode: AluMode,
    /// Writeback value is the loaded data rather than the ALU result.
    pub mem_to_reg: bool,
    /// Branch or jump resolved by the branch resolution unit in Decode.
    pub control_flow: bool,
    /// Source selection for ALU operand A.
    pub a_src: OpASrc,
}

impl ControlSignals {
    /// Signals that disable every side effect.
    pub const NOP: ControlSignals = ControlSignals {
        reg_write: false,
        mem_read: false,
        mem_write: false,
        alu_src_imm: false,
        alu_mode: AluMode::Add,
        mem_to_reg: false,
        control_flow: false,
        a_src: OpASrc::Reg1,
    };
}
