//! Instruction Decode (ID) Stage.
//!
//! This module implements the second stage of the pipeline. It performs the following:
//! 1. **Hazard Check**: Asks the hazard unit whether the waiting instruction must stall.
//! 2. **Decoding**: Splits the instruction into fields and looks up its control signals.
//! 3. **Branch Resolution**: Resolves branches and jumps, naming the address
//!    Fetch continues from and squashing the instruction fetched behind them.
//!
//! A stall or a squashed fetch both become a bubble in ID/EX.

use log::{debug, trace};

use super::execute::OperandSources;
use super::StageContext;
use crate::common::Result;
use crate::core::pipeline::hazards::{HazardUnit, Stall};
use crate::core::pipeline::latches::{IdEx, Latches};
use crate::core::pipeline::traits::PipelineLatch;
use crate::core::units::bru::BranchUnit;
use crate::isa::{opcodes, Decoder};
use crate::stats::SimStats;

/// Result of one Decode evaluation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DecodeOutcome {
    /// Next ID/EX latch.
    pub id_ex: IdEx,
    /// Decode is stalled; Fetch must hold IF/ID.
    pub stall: Option<Stall>,
    /// A control-flow instruction resolved; Fetch squashes and continues here.
    pub redirect: Option<u32>,
}

/// Executes the decode stage.
pub fn decode_stage(
    latches: &Latches,
    sources: &OperandSources<'_>,
    hazard_unit: &HazardUnit,
    decoder: &Decoder,
    stats: &mut SimStats,
    ctx: &StageContext,
) -> Result<DecodeOutcome> {
    let if_id = &latches.if_id;

    if !if_id.is_valid() {
        return Ok(DecodeOutcome::default());
    }
    if if_id.is_bubble() {
        if ctx.trace {
            trace!("ID  pc={:#x} (flushed)", if_id.pc);
        }
        return Ok(DecodeOutcome {
            id_ex: IdEx::bubble(),
            ..DecodeOutcome::default()
        });
    }

    if let Some(stall) = hazard_unit.detect(latches) {
        stats.stalls_data += 1;
        if ctx.trace {
            trace!("ID  pc={:#x} stalled on x{}", if_id.pc, stall.reg);
        }
        return Ok(DecodeOutcome {
            id_ex: IdEx::bubble(),
            stall: Some(stall),
            redirect: None,
        });
    }

    let d = decoder.decode(if_id.inst);
    if ctx.trace {
        trace!(
            "ID  pc={:#x} inst={:#010x} op={:#04x} rd=x{} rs1=x{} rs2=x{} imm={}",
            if_id.pc,
            d.raw,
            d.opcode,
            d.rd,
            d.rs1,
            d.rs2,
            d.imm
        );
    }

    let mut redirect = None;
    if d.ctrl.control_flow {
        let rv1 = if d.opcode == opcodes::OP_JAL {
            0
        } else {
            sources.read(d.rs1, if_id.pc, stats, ctx)?
        };
        let rv2 = if d.opcode == opcodes::OP_BRANCH {
            sources.read(d.rs2, if_id.pc, stats, ctx)?
        } else {
            0
        };

        if let Some(res) = BranchUnit::resolve(d.opcode, d.funct3, if_id.pc, d.imm, rv1, rv2) {
            if res.taken {
                stats.branches_taken += 1;
            } else {
                stats.branches_not_taken += 1;
            }
            stats.control_flushes += 1;
            debug!(
                "branch: pc={:#x} taken={} next={:#x}",
                if_id.pc, res.taken, res.target
            );
            redirect = Some(res.target);
        }
    }

    Ok(DecodeOutcome {
        id_ex: IdEx {
            pc: if_id.pc,
            inst: d.raw,
            opcode: d.opcode,
            funct3: d.funct3,
            funct7: d.funct7,
            rs1: d.rs1,
            rs2: d.rs2,
            rd: d.rd,
            imm: d.imm,
            ctrl: d.ctrl,
            valid: true,
            bubble: false,
        },
        stall: None,
        redirect,
    })
}
