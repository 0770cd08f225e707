//! Writeback (WB) Stage.
//!
//! The final stage of the pipeline. It commits the result of the instruction
//! in the MEM/WB latch to the register file. Empty latches and bubbles retire
//! nothing, and writes to x0 are dropped.

use log::trace;

use super::StageContext;
use crate::common::RegisterFile;
use crate::core::pipeline::latches::MemWb;
use crate::core::pipeline::traits::PipelineLatch;
use crate::stats::SimStats;

/// Executes the writeback stage.
pub fn wb_stage(
    mem_wb: &MemWb,
    regs: &mut RegisterFile,
    stats: &mut SimStats,
    ctx: &StageContext,
) {
    if !mem_wb.is_occupied() {
        return;
    }
    stats.instructions_retired += 1;

    match mem_wb.destination() {
        Some(rd) => {
            let val = mem_wb.result();
            if ctx.trace {
                trace!("WB  pc={:#x} x{} <= {:#x}", mem_wb.pc, rd, val);
            }
            regs.write(rd, val);
        }
        None => {
            if ctx.trace {
                trace!("WB  pc={:#x}", mem_wb.pc);
            }
        }
    }
}
