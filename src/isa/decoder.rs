//! RISC-V Instruction Decoder.
//!
//! Splits a 32-bit instruction word into its fields, sign-extends the
//! immediate for the opcode's format (I, S, B, U, J), and looks the control
//! signals up in a static per-opcode table. Opcodes missing from the table
//! decode to [`ControlSignals::NOP`]; that is the defined behaviour for
//! unsupported instructions, not a fault.

use crate::core::pipeline::signals::{AluMode, ControlSignals, OpASrc};
use crate::isa::instruction::{Decoded, InstructionBits};
use crate::isa::opcodes;

/// Mask selecting the U-type immediate (bits 31-12).
const U_IMM_MASK: u32 = 0xFFFF_F000;

/// Opcode to control-signal table.
static CONTROL_TABLE: [(u32, ControlSignals); 9] = [
    (
        opcodes::OP_REG,
        ControlSignals {
            reg_write: true,
            ..ControlSignals::NOP
        },
    ),
    (
        opcodes::OP_LOAD,
        ControlSignals {
            reg_write: true,
            mem_read: true,
            alu_src_imm: true,
            mem_to_reg: true,
            ..ControlSignals::NOP
        },
    ),
    (
        opcodes::OP_IMM,
        ControlSignals {
            reg_write: true,
            alu_src_imm: true,
            ..ControlSignals::NOP
        },
    ),
    (
        opcodes::OP_STORE,
        ControlSignals {
            mem_write: true,
            alu_src_imm: true,
            ..ControlSignals::NOP
        },
    ),
    (
        opcodes::OP_BRANCH,
        ControlSignals {
            alu_mode: AluMode::Compare,
            control_flow: true,
            ..ControlSignals::NOP
        },
    ),
    (
        opcodes::OP_LUI,
        ControlSignals {
            reg_write: true,
            alu_src_imm: true,
            a_src: OpASrc::Zero,
            ..ControlSignals::NOP
        },
    ),
    (
        opcodes::OP_AUIPC,
        ControlSignals {
            reg_write: true,
            alu_src_imm: true,
            a_src: OpASrc::Pc,
            ..ControlSignals::NOP
        },
    ),
    (
        opcodes::OP_JALR,
        ControlSignals {
            reg_write: true,
            alu_src_imm: true,
            control_flow: true,
            ..ControlSignals::NOP
        },
    ),
    (
        opcodes::OP_JAL,
        ControlSignals {
            reg_write: true,
            alu_src_imm: true,
            control_flow: true,
            a_src: OpASrc::Pc,
            ..ControlSignals::NOP
        },
    ),
];

/// Whether an instruction with this opcode consumes rs1.
///
/// Everything except `lui`, `auipc` and `jal` does.
pub fn reads_rs1(opcode: u32) -> bool {
    !matches!(
        opcode,
        opcodes::OP_LUI | opcodes::OP_AUIPC | opcodes::OP_JAL
    )
}

/// Whether an instruction with this opcode consumes rs2.
///
/// Only register-register arithmetic, branches and stores do.
pub fn reads_rs2(opcode: u32) -> bool {
    matches!(
        opcode,
        opcodes::OP_REG | opcodes::OP_BRANCH | opcodes::OP_STORE
    )
}

/// Instruction decoder.
///
/// `auipc` support is a capability flag: when disabled, `auipc` decodes
/// like any other unsupported opcode.
#[derive(Clone, Copy, Debug)]
pub struct Decoder {
    auipc: bool,
}

impl Decoder {
    /// Creates a decoder, optionally recognising `auipc`.
    pub fn new(auipc: bool) -> Self {
        Self { auipc }
    }

    /// Whether `auipc` is recognised.
    pub fn supports_auipc(&self) -> bool {
        self.auipc
    }

    /// Looks up the control signals for an opcode.
    pub fn control(&self, opcode: u32) -> ControlSignals {
        if opcode == opcodes::OP_AUIPC && !self.auipc {
            return ControlSignals::NOP;
        }
        CONTROL_TABLE
            .iter()
            .find(|(op, _)| *op == opcode)
            .map_or(ControlSignals::NOP, |(_, ctrl)| *ctrl)
    }

    /// Decodes a raw instruction word.
    pub fn decode(&self, inst: u32) -> Decoded {
        let opcode = inst.opcode();
        Decoded {
            raw: inst,
            opcode,
            rd: inst.rd(),
            rs1: inst.rs1(),
            rs2: inst.rs2(),
            funct3: inst.funct3(),
            funct7: inst.funct7(),
            imm: immediate(inst, opcode),
            ctrl: self.control(opcode),
        }
    }
}

/// Extracts the sign-extended immediate for the opcode's encoding format.
pub fn immediate(inst: u32, opcode: u32) -> i32 {
    match opcode {
        opcodes::OP_IMM | opcodes::OP_LOAD | opcodes::OP_JALR => i_imm(inst),
        opcodes::OP_STORE => s_imm(inst),
        opcodes::OP_BRANCH => b_imm(inst),
        opcodes::OP_JAL => j_imm(inst),
        opcodes::OP_LUI | opcodes::OP_AUIPC => (inst & U_IMM_MASK) as i32,
        _ => 0,
    }
}

/// I-type: `imm[11:0]` in bits 31:20.
fn i_imm(inst: u32) -> i32 {
    (inst as i32) >> 20
}

/// S-type: `imm[11:5]` in bits 31:25, `imm[4:0]` in bits 11:7.
fn s_imm(inst: u32) -> i32 {
    (((inst as i32) >> 25) << 5) | ((inst >> 7) & 0x1F) as i32
}

/// B-type: `imm[12|10:5]` in bits 31:25, `imm[4:1|11]` in bits 11:7.
fn b_imm(inst: u32) -> i32 {
    (((inst as i32) >> 31) << 12)
        | (((inst >> 7) & 0x1) << 11) as i32
        | (((inst >> 25) & 0x3F) << 5) as i32
        | (((inst >> 8) & 0xF) << 1) as i32
}

/// J-type: `imm[20|10:1|11|19:12]` in bits 31:12.
fn j_imm(inst: u32) -> i32 {
    (((inst as i32) >> 31) << 20)
        | (inst & 0x000F_F000) as i32
        | (((inst >> 20) & 0x1) << 11) as i32
        | (((inst >> 21) & 0x3FF) << 1) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn immediates_per_format() {
        // addi x1, x0, -1
        assert_eq!(immediate(0xfff0_0093, opcodes::OP_IMM), -1);
        // sw x2, 12(x1)
        assert_eq!(immediate(0x0020_a623, opcodes::OP_STORE), 12);
        // beq x1, x2, 8
        assert_eq!(immediate(0x0020_8463, opcodes::OP_BRANCH), 8);
        // beq x0, x0, -4
        assert_eq!(immediate(0xfe00_0ee3, opcodes::OP_BRANCH), -4);
        // jal x0, -8
        assert_eq!(immediate(0xff9f_f06f, opcodes::OP_JAL), -8);
        // lui x5, 0x12345
        assert_eq!(immediate(0x1234_52b7, opcodes::OP_LUI), 0x1234_5000);
    }

    #[test]
    fn unknown_opcode_is_nop() {
        let d = Decoder::new(true).decode(0xffff_ffff);
        assert_eq!(d.ctrl, ControlSignals::NOP);
        assert_eq!(d.imm, 0);
    }

    #[test]
    fn auipc_follows_capability_flag() {
        // auipc x3, 0x1
        let word = 0x0000_1197;
        assert!(Decoder::new(true).decode(word).ctrl.reg_write);
        assert_eq!(Decoder::new(false).decode(word).ctrl, ControlSignals::NOP);
    }
}
