//! Memory Access (MEM) Stage.
//!
//! Performs the load or store named by the EX/MEM latch against data
//! memory, using the width in funct3 and the forwarded store data. An access
//! outside the array or off its natural alignment stops the simulation.

use log::trace;

use super::StageContext;
use crate::common::{AccessType, DataMemory, MemFault, Result, SimError};
use crate::core::pipeline::latches::{ExMem, MemWb};
use crate::core::pipeline::signals::MemWidth;
use crate::core::pipeline::traits::PipelineLatch;
use crate::stats::SimStats;

fn fault(fault: MemFault, ex: &ExMem, access: AccessType, ctx: &StageContext) -> SimError {
    match fault {
        MemFault::OutOfBounds => SimError::MemoryOutOfBounds {
            cycle: ctx.cycle,
            pc: ex.pc,
            addr: ex.alu,
            access,
        },
        MemFault::Misaligned => SimError::MisalignedAccess {
            cycle: ctx.cycle,
            pc: ex.pc,
            addr: ex.alu,
            access,
        },
    }
}

/// Executes the memory stage and returns the next MEM/WB latch.
pub fn mem_stage(
    ex_mem: &ExMem,
    memory: &mut DataMemory,
    stats: &mut SimStats,
    ctx: &StageContext,
) -> Result<MemWb> {
    if !ex_mem.is_valid() {
        return Ok(MemWb::default());
    }
    if ex_mem.is_bubble() {
        return Ok(MemWb::bubble());
    }

    let mut load_data = 0;
    if ex_mem.ctrl.mem_read {
        let (width, signed) = MemWidth::for_load(ex_mem.funct3);
        load_data = memory
            .load(ex_mem.alu, width, signed)
            .map_err(|f| fault(f, ex_mem, AccessType::Read, ctx))?;
        stats.loads += 1;
        if ctx.trace {
            trace!(
                "MEM pc={:#x} load [{:#x}] -> {:#x}",
                ex_mem.pc,
                ex_mem.alu,
                load_data
            );
        }
    } else if ex_mem.ctrl.mem_write {
        let width = MemWidth::for_store(ex_mem.funct3);
        memory
            .store(ex_mem.alu, width, ex_mem.store_data)
            .map_err(|f| fault(f, ex_mem, AccessType::Write, ctx))?;
        stats.stores += 1;
        if ctx.trace {
            trace!(
                "MEM pc={:#x} store [{:#x}] <= {:#x}",
                ex_mem.pc,
                ex_mem.alu,
                ex_mem.store_data
            );
        }
    } else if ctx.trace {
        trace!("MEM pc={:#x}", ex_mem.pc);
    }

    Ok(MemWb {
        pc: ex_mem.pc,
        inst: ex_mem.inst,
        rd: ex_mem.rd,
        alu: ex_mem.alu,
        load_data,
        ctrl: ex_mem.ctrl,
        valid: true,
        bubble: false,
    })
}
