//! Pipeline Engine.
//!
//! The [`Cpu`] owns the architectural state (register file and data memory),
//! the four inter-stage latches and the explicit [`EngineState`]. One call to
//! [`Cpu::tick`] simulates one clock cycle:
//!
//! 1. Record stage occupancy from the latches as they stand.
//! 2. Snapshot the latches. Every stage reads only this snapshot.
//! 3. Evaluate Writeback, Memory, Execute, Decode, Fetch in that order, each
//!    producing the next value of its output latch.
//! 4. Install the new latches and PC wholesale.
//!
//! Steps 2 and 3 are [`Cpu::step`], which maps the current latches and
//! [`EngineState`] to their next values without installing them.
//!
//! Writeback runs first, so the register file a later stage reads already
//! holds the value committed this cycle.

use log::trace;

use crate::common::{DataMemory, RegisterFile, Result};
use crate::config::{Config, PipelineMode};
use crate::core::pipeline::hazards::HazardUnit;
use crate::core::pipeline::latches::Latches;
use crate::core::pipeline::stages::{self, execute::OperandSources, StageContext};
use crate::isa::Decoder;
use crate::sim::occupancy::{OccupancyRecorder, OccupancyTable};
use crate::stats::SimStats;

/// Engine state threaded from one cycle to the next.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EngineState {
    /// Address of the next instruction to fetch.
    pub pc: u32,
    /// Number of completed cycles.
    pub cycle: u64,
}

/// Five-stage in-order pipeline.
pub struct Cpu {
    pub regs: RegisterFile,
    pub memory: DataMemory,
    pub stats: SimStats,
    pub trace: bool,

    program: Vec<u32>,
    latches: Latches,
    state: EngineState,
    mode: PipelineMode,
    decoder: Decoder,
    hazard_unit: HazardUnit,
    occupancy: OccupancyRecorder,
}

impl Cpu {
    pub fn new(program: Vec<u32>, config: &Config) -> Self {
        let mode = config.pipeline.mode;
        Self {
            regs: RegisterFile::new(),
            memory: DataMemory::new(config.memory.data_words),
            stats: SimStats::default(),
            trace: config.general.trace_instructions || cfg!(feature = "always-trace"),
            occupancy: OccupancyRecorder::new(program.len()),
            program,
            latches: Latches::default(),
            state: EngineState::default(),
            mode,
            decoder: Decoder::new(config.pipeline.auipc_enabled()),
            hazard_unit: HazardUnit::new(mode),
        }
    }

    /// Advances the pipeline by one clock cycle.
    ///
    /// A memory fault, or an operand requested behind an in-flight load, is
    /// returned with the cycle and PC of the offending instruction. The run
    /// cannot be resumed after an error.
    pub fn tick(&mut self) -> Result<()> {
        self.occupancy.record(&self.latches, self.state.pc);

        let cur = self.latches;
        let state = self.state;
        let (latches, state) = self.step(&cur, &state)?;

        self.latches = latches;
        self.state = state;
        self.stats.cycles = state.cycle;
        Ok(())
    }

    /// Evaluates one cycle from `cur` and `state` and returns the next latches and state.
    ///
    /// Only the register file, data memory and statistics are updated in
    /// place. The engine's own latches, state and occupancy table are left
    /// untouched.
    pub fn step(&mut self, cur: &Latches, state: &EngineState) -> Result<(Latches, EngineState)> {
        let ctx = StageContext {
            cycle: state.cycle + 1,
            trace: self.trace,
        };
        if self.trace {
            trace!("---- cycle {} pc={:#x} ----", ctx.cycle, state.pc);
        }

        stages::wb_stage(&cur.mem_wb, &mut self.regs, &mut self.stats, &ctx);
        let mem_wb = stages::mem_stage(&cur.ex_mem, &mut self.memory, &mut self.stats, &ctx)?;

        let sources = OperandSources {
            ex_mem: &cur.ex_mem,
            mem_wb: &cur.mem_wb,
            regs: &self.regs,
            mode: self.mode,
        };
        let ex_mem = stages::execute_stage(&cur.id_ex, &sources, &mut self.stats, &ctx)?;
        let decoded = stages::decode_stage(
            cur,
            &sources,
            &self.hazard_unit,
            &self.decoder,
            &mut self.stats,
            &ctx,
        )?;
        let (if_id, pc) =
            stages::fetch_stage(&cur.if_id, state.pc, &self.program, &decoded, &ctx)?;

        let next = Latches {
            if_id,
            id_ex: decoded.id_ex,
            ex_mem,
            mem_wb,
        };
        Ok((
            next,
            EngineState {
                pc,
                cycle: ctx.cycle,
            },
        ))
    }

    /// `true` once every latch is empty and the PC is past the program.
    pub fn is_drained(&self) -> bool {
        self.latches.is_empty() && (self.state.pc / 4) as usize >= self.program.len()
    }

    /// Runs up to `cycles` cycles, stopping early once the pipeline drains.
    ///
    /// Returns the occupancy table, one column per simulated cycle.
    pub fn simulate(&mut self, cycles: u64) -> Result<OccupancyTable> {
        for _ in 0..cycles {
            self.tick()?;
            if self.is_drained() {
                break;
            }
        }
        Ok(self.occupancy.table().clone())
    }

    pub fn latches(&self) -> &Latches {
        &self.latches
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn mode(&self) -> PipelineMode {
        self.mode
    }

    pub fn occupancy(&self) -> &OccupancyTable {
        self.occupancy.table()
    }

    pub fn program(&self) -> &[u32] {
        &self.program
    }

    /// Dumps the pipeline and register state to stdout.
    pub fn dump_state(&self) {
        println!(
            "cycle={} pc={:#x} mode={:?}",
            self.state.cycle, self.state.pc, self.mode
        );
        println!("IF/ID  {:?}", self.latches.if_id);
        println!("ID/EX  {:?}", self.latches.id_ex);
        println!("EX/MEM {:?}", self.latches.ex_mem);
        println!("MEM/WB {:?}", self.latches.mem_wb);
        self.regs.dump();
    }
}
