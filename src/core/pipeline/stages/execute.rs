//! Execute (EX) Stage.
//!
//! This module implements the execution stage of the pipeline. It is responsible for:
//! - Resolving operand values, through the forwarding unit when bypass paths
//!   exist or straight from the register file when they do not.
//! - Selecting ALU operands from the control signals and running the ALU.
//! - Producing the link address for `jal`/`jalr`.
//! - Passing the resolved rs2 value along as store data.

use log::{debug, trace};

use super::StageContext;
use crate::common::{RegisterFile, Result, SimError};
use crate::config::PipelineMode;
use crate::core::pipeline::forwarding::{forward_operand, ForwardSource, Forwarded};
use crate::core::pipeline::latches::{ExMem, IdEx, MemWb};
use crate::core::pipeline::signals::{AluMode, AluOp, OpASrc};
use crate::core::pipeline::traits::PipelineLatch;
use crate::core::units::alu::Alu;
use crate::isa::{reads_rs1, reads_rs2};
use crate::stats::SimStats;

/// Register inputs visible to Execute this cycle.
pub struct OperandSources<'a> {
    /// EX/MEM latch at the start of the cycle.
    pub ex_mem: &'a ExMem,
    /// MEM/WB latch at the start of the cycle.
    pub mem_wb: &'a MemWb,
    /// Register file after this cycle's writeback.
    pub regs: &'a RegisterFile,
    /// Whether bypass paths exist.
    pub mode: PipelineMode,
}

impl OperandSources<'_> {
    fn lookup(&self, reg: usize, pc: u32, ctx: &StageContext) -> Result<Forwarded> {
        if self.mode == PipelineMode::NoForwarding {
            return Ok(Forwarded {
                value: self.regs.read(reg),
                source: ForwardSource::RegFile,
            });
        }
        forward_operand(reg, self.ex_mem, self.mem_wb, self.regs).map_err(|e| {
            SimError::UnresolvedHazard {
                cycle: ctx.cycle,
                pc,
                reg: e.reg,
            }
        })
    }

    /// Resolves `reg` for the instruction at `pc`, counting a bypass hit.
    pub fn read(
        &self,
        reg: usize,
        pc: u32,
        stats: &mut SimStats,
        ctx: &StageContext,
    ) -> Result<u32> {
        let fwd = self.lookup(reg, pc, ctx)?;
        if fwd.source != ForwardSource::RegFile {
            stats.forwarded_operands += 1;
            debug!(
                "forward: pc={:#x} x{} = {:#x} from {:?}",
                pc, reg, fwd.value, fwd.source
            );
        }
        Ok(fwd.value)
    }

    /// Resolves `reg` without touching the statistics.
    pub fn peek(&self, reg: usize, pc: u32, ctx: &StageContext) -> Result<u32> {
        Ok(self.lookup(reg, pc, ctx)?.value)
    }
}

/// Executes the execute stage and returns the next EX/MEM latch.
pub fn execute_stage(
    id_ex: &IdEx,
    sources: &OperandSources<'_>,
    stats: &mut SimStats,
    ctx: &StageContext,
) -> Result<ExMem> {
    if !id_ex.is_valid() {
        return Ok(ExMem::default());
    }
    if id_ex.is_bubble() {
        return Ok(ExMem::bubble());
    }

    // Control-flow operands were already counted when Decode resolved them.
    let mut operand = |reg: usize| {
        if id_ex.ctrl.control_flow {
            sources.peek(reg, id_ex.pc, ctx)
        } else {
            sources.read(reg, id_ex.pc, stats, ctx)
        }
    };
    let rv1 = if reads_rs1(id_ex.opcode) {
        operand(id_ex.rs1)?
    } else {
        0
    };
    let rv2 = if reads_rs2(id_ex.opcode) {
        operand(id_ex.rs2)?
    } else {
        0
    };

    let ctrl = id_ex.ctrl;
    let op_a = match ctrl.a_src {
        OpASrc::Reg1 => rv1,
        OpASrc::Pc => id_ex.pc,
        OpASrc::Zero => 0,
    };
    let op_b = if ctrl.alu_src_imm {
        id_ex.imm as u32
    } else {
        rv2
    };

    let (alu, is_equal) = match ctrl.alu_mode {
        AluMode::Compare => {
            let out = Alu::execute(op_a, op_b, AluMode::Compare);
            (out.result, out.is_equal)
        }
        AluMode::Add if ctrl.control_flow => (id_ex.pc.wrapping_add(4), false),
        AluMode::Add => {
            let op = AluOp::select(id_ex.opcode, id_ex.funct3, id_ex.funct7);
            (Alu::compute(op, op_a, op_b), false)
        }
    };

    if ctx.trace {
        trace!(
            "EX  pc={:#x} a={:#x} b={:#x} -> {:#x}",
            id_ex.pc,
            op_a,
            op_b,
            alu
        );
    }

    Ok(ExMem {
        pc: id_ex.pc,
        inst: id_ex.inst,
        opcode: id_ex.opcode,
        funct3: id_ex.funct3,
        rd: id_ex.rd,
        alu,
        store_data: rv2,
        is_equal,
        ctrl,
        valid: true,
        bubble: false,
    })
}
