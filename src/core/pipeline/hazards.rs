//! Data Hazard Detection.
//!
//! This module decides, once per cycle, whether the instruction waiting in
//! IF/ID may be decoded or must stall behind an in-flight producer. The rules
//! differ by pipeline mode:
//!
//! - **Forwarding**: only a load in Execute whose result the next instruction
//!   reads forces a stall. Branches and `jalr` resolve in Decode and so also
//!   wait for producers the bypass network cannot reach in time.
//! - **No forwarding**: any producer in Execute or Memory whose destination is
//!   read stalls Decode until the value is committed.

use log::debug;

use crate::config::PipelineMode;
use crate::core::pipeline::latches::{ExMem, IdEx, IfId, Latches};
use crate::core::pipeline::traits::PipelineLatch;
use crate::isa::{opcodes, reads_rs1, reads_rs2, InstructionBits};

/// Why Decode was held this cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StallReason {
    /// A load in Execute produces a register the next instruction reads.
    LoadUse,
    /// A branch or `jalr` in Decode needs a value not yet forwardable to Decode.
    BranchOperand,
    /// A producer in Execute or Memory has not committed (no bypass paths).
    RawNoForward,
}

/// A stall decision: the reason and the register waited on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Stall {
    /// Why the stall was raised.
    pub reason: StallReason,
    /// Source register whose producer is still in flight.
    pub reg: usize,
}

/// Whether the instruction in `if_id` consumes register `reg`.
///
/// x0 is never a dependency.
pub fn reads_register(if_id: &IfId, reg: usize) -> bool {
    let inst = if_id.inst;
    let op = inst.opcode();
    reg != 0 && ((reads_rs1(op) && reg == inst.rs1()) || (reads_rs2(op) && reg == inst.rs2()))
}

/// Checks if a pipeline stall is needed due to a load-use data hazard.
///
/// Returns the loaded register when the instruction in ID/EX is a load and
/// the instruction in IF/ID reads its destination.
pub fn need_stall_load_use(id_ex: &IdEx, if_id: &IfId) -> Option<usize> {
    if !id_ex.ctrl.mem_read {
        return None;
    }
    id_ex.destination().filter(|&rd| reads_register(if_id, rd))
}

fn need_stall_branch_operand(id_ex: &IdEx, ex_mem: &ExMem, if_id: &IfId) -> Option<usize> {
    let op = if_id.inst.opcode();
    if op != opcodes::OP_BRANCH && op != opcodes::OP_JALR {
        return None;
    }
    let in_execute = id_ex.destination().filter(|&rd| reads_register(if_id, rd));
    let load_in_memory = if ex_mem.ctrl.mem_read {
        ex_mem.destination().filter(|&rd| reads_register(if_id, rd))
    } else {
        None
    };
    in_execute.or(load_in_memory)
}

fn need_stall_raw(id_ex: &IdEx, ex_mem: &ExMem, if_id: &IfId) -> Option<usize> {
    id_ex
        .destination()
        .filter(|&rd| reads_register(if_id, rd))
        .or_else(|| ex_mem.destination().filter(|&rd| reads_register(if_id, rd)))
}

/// Hazard detection unit.
#[derive(Clone, Copy, Debug)]
pub struct HazardUnit {
    mode: PipelineMode,
}

impl HazardUnit {
    /// Creates a hazard unit applying the rules of `mode`.
    pub fn new(mode: PipelineMode) -> Self {
        Self { mode }
    }

    /// Mode whose stall rules this unit applies.
    pub fn mode(&self) -> PipelineMode {
        self.mode
    }

    /// Inspects the pre-update latches and returns the stall Decode must take, if any.
    ///
    /// Only a real instruction waiting in IF/ID can stall.
    pub fn detect(&self, latches: &Latches) -> Option<Stall> {
        let if_id = &latches.if_id;
        if !if_id.is_occupied() {
            return None;
        }

        let stall = match self.mode {
            PipelineMode::Forwarding => need_stall_load_use(&latches.id_ex, if_id)
                .map(|reg| Stall {
                    reason: StallReason::LoadUse,
                    reg,
                })
                .or_else(|| {
                    need_stall_branch_operand(&latches.id_ex, &latches.ex_mem, if_id).map(|reg| {
                        Stall {
                            reason: StallReason::BranchOperand,
                            reg,
                        }
                    })
                }),
            PipelineMode::NoForwarding => {
                need_stall_raw(&latches.id_ex, &latches.ex_mem, if_id).map(|reg| Stall {
                    reason: StallReason::RawNoForward,
                    reg,
                })
            }
        };

        if let Some(s) = stall {
            debug!(
                "hazard: pc={:#x} waits on x{} ({:?})",
                if_id.pc, s.reg, s.reason
            );
        }
        stall
    }
}
