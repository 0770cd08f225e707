//! Operand Forwarding.
//!
//! Selects the freshest value of a source register. Priority is strict:
//! the EX/MEM latch's ALU result, then the MEM/WB latch's selected result,
//! then the register file. A load still sitting in EX/MEM has no value yet;
//! asking for its destination is reported instead of answered with a stale
//! register.

use crate::common::RegisterFile;
use crate::core::pipeline::latches::{ExMem, MemWb};
use crate::core::pipeline::traits::PipelineLatch;

/// Where a forwarded operand came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ForwardSource {
    /// The EX/MEM latch (one instruction ahead).
    ExMem,
    /// The MEM/WB latch (two instructions ahead).
    MemWb,
    /// The register file.
    RegFile,
}

/// A resolved operand value and its source.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Forwarded {
    /// Operand value.
    pub value: u32,
    /// Where the value was taken from.
    pub source: ForwardSource,
}

/// The requested register is the destination of a load still in EX/MEM.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadInFlight {
    /// Register whose value is not yet available.
    pub reg: usize,
}

/// Resolves register `reg` against the downstream latches and the register file.
pub fn forward_operand(
    reg: usize,
    ex_mem: &ExMem,
    mem_wb: &MemWb,
    regs: &RegisterFile,
) -> Result<Forwarded, LoadInFlight> {
    if reg == 0 {
        return Ok(Forwarded {
            value: 0,
            source: ForwardSource::RegFile,
        });
    }

    if ex_mem.destination() == Some(reg) {
        if ex_mem.ctrl.mem_read {
            return Err(LoadInFlight { reg });
        }
        return Ok(Forwarded {
            value: ex_mem.alu,
            source: ForwardSource::ExMem,
        });
    }

    if mem_wb.destination() == Some(reg) {
        return Ok(Forwarded {
            value: mem_wb.result(),
            source: ForwardSource::MemWb,
        });
    }

    Ok(Forwarded {
        value: regs.read(reg),
        source: ForwardSource::RegFile,
    })
}
