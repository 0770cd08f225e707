//! Decoder tests: field extraction, immediates and control signals.

mod support;

use rv_pipesim::core::pipeline::signals::{AluMode, ControlSignals, OpASrc};
use rv_pipesim::isa::{reads_rs1, reads_rs2, Decoder};
use support::*;

/// Tests decoding of `addi x1, x0, 5`.
#[test]
fn test_decode_addi() {
    let d = Decoder::new(true).decode(0x0050_0093);
    assert_eq!(d.opcode, OP_IMM);
    assert_eq!(d.rd, 1);
    assert_eq!(d.rs1, 0);
    assert_eq!(d.imm, 5);
    assert!(d.ctrl.reg_write);
    assert!(d.ctrl.alu_src_imm);
    assert!(!d.ctrl.mem_read);
}

/// Tests store immediates split across two fields.
#[test]
fn test_decode_store() {
    let d = Decoder::new(true).decode(sw(2, 1, -12));
    assert_eq!(d.rs1, 1);
    assert_eq!(d.rs2, 2);
    assert_eq!(d.imm, -12);
    assert!(d.ctrl.mem_write);
    assert!(!d.ctrl.reg_write);
}

/// Tests load control signals select memory data for writeback.
#[test]
fn test_decode_load() {
    let d = Decoder::new(true).decode(lw(5, 2, 16));
    assert!(d.ctrl.mem_read && d.ctrl.mem_to_reg && d.ctrl.reg_write);
    assert_eq!(d.imm, 16);
}

/// Tests branch and jump immediates, including negative offsets.
#[test]
fn test_decode_control_flow() {
    let dec = Decoder::new(true);

    let b = dec.decode(beq(1, 2, -16));
    assert_eq!(b.imm, -16);
    assert_eq!(b.ctrl.alu_mode, AluMode::Compare);
    assert!(b.ctrl.control_flow);
    assert!(!b.ctrl.reg_write);

    let j = dec.decode(jal(1, 2048));
    assert_eq!(j.imm, 2048);
    assert_eq!(j.rd, 1);
    assert_eq!(j.ctrl.a_src, OpASrc::Pc);

    assert_eq!(dec.decode(0xff9f_f06f).imm, -8);
    assert_eq!(dec.decode(jalr(0, 5, -4)).imm, -4);
}

/// Tests U-type immediates for lui and auipc.
#[test]
fn test_decode_upper_immediates() {
    let dec = Decoder::new(true);
    let l = dec.decode(0x1234_52b7);
    assert_eq!(l.rd, 5);
    assert_eq!(l.imm as u32, 0x1234_5000);
    assert_eq!(l.ctrl.a_src, OpASrc::Zero);

    let a = dec.decode(auipc(3, 0xfffff));
    assert_eq!(a.imm as u32, 0xffff_f000);
    assert_eq!(a.ctrl.a_src, OpASrc::Pc);
}

/// Tests that unsupported opcodes decode to no-effect signals.
#[test]
fn test_decode_unknown_opcode() {
    let dec = Decoder::new(true);
    for word in [0x0000_0000, 0xffff_ffff, 0x0000_000b, 0x0000_0073] {
        assert_eq!(dec.decode(word).ctrl, ControlSignals::NOP);
    }
}

/// Tests auipc is a capability of the decoder.
#[test]
fn test_decode_auipc_capability() {
    let word = auipc(4, 1);
    assert!(Decoder::new(true).decode(word).ctrl.reg_write);
    assert_eq!(Decoder::new(false).decode(word).ctrl, ControlSignals::NOP);
    assert!(!Decoder::new(false).supports_auipc());
}

/// Tests which opcodes consume rs1 and rs2.
#[test]
fn test_source_register_usage() {
    for op in [OP_LUI, OP_AUIPC, OP_JAL] {
        assert!(!reads_rs1(op));
    }
    for op in [OP_REG, OP_IMM, OP_LOAD, OP_STORE, OP_BRANCH, OP_JALR] {
        assert!(reads_rs1(op));
    }
    for op in [OP_REG, OP_BRANCH, OP_STORE] {
        assert!(reads_rs2(op));
    }
    for op in [OP_IMM, OP_LOAD, OP_JALR, OP_LUI, OP_JAL] {
        assert!(!reads_rs2(op));
    }
}
