//! Instruction Fetch (IF) Stage.
//!
//! Reads the word at the program counter from instruction memory into the
//! IF/ID latch. Word `i` of the program lives at address `4 * i`.
//!
//! - On a redirect from Decode, the word fetched this cycle is on the wrong
//!   path: it enters IF/ID as a bubble and the PC moves to the resolved
//!   address. A redirect overrides a stall.
//! - On a stall, IF/ID and the PC are held.
//! - Past the end of the program, IF/ID is left empty and the PC does not
//!   advance, so the pipeline drains.
//! - A PC that is not a multiple of four faults with
//!   [`SimError::MisalignedFetch`].

use log::trace;

use super::{DecodeOutcome, StageContext};
use crate::common::{Result, SimError};
use crate::core::pipeline::latches::IfId;

fn read_word(program: &[u32], pc: u32, ctx: &StageContext) -> Result<Option<u32>> {
    if pc % 4 != 0 {
        return Err(SimError::MisalignedFetch {
            cycle: ctx.cycle,
            pc,
        });
    }
    Ok(program.get((pc / 4) as usize).copied())
}

/// Executes the fetch stage and returns the next IF/ID latch and PC.
pub fn fetch_stage(
    if_id: &IfId,
    pc: u32,
    program: &[u32],
    decode: &DecodeOutcome,
    ctx: &StageContext,
) -> Result<(IfId, u32)> {
    if let Some(target) = decode.redirect {
        let squashed = match read_word(program, pc, ctx)? {
            Some(inst) => IfId {
                pc,
                inst,
                valid: true,
                bubble: true,
            },
            None => IfId::default(),
        };
        if ctx.trace {
            trace!("IF  pc={:#x} squashed, redirect to {:#x}", pc, target);
        }
        return Ok((squashed, target));
    }

    if decode.stall.is_some() {
        if ctx.trace {
            trace!("IF  pc={:#x} held", if_id.pc);
        }
        return Ok((*if_id, pc));
    }

    match read_word(program, pc, ctx)? {
        Some(inst) => {
            if ctx.trace {
                trace!("IF  pc={:#x} inst={:#010x}", pc, inst);
            }
            Ok((
                IfId {
                    pc,
                    inst,
                    valid: true,
                    bubble: false,
                },
                pc.wrapping_add(4),
            ))
        }
        None => Ok((IfId::default(), pc)),
    }
}
