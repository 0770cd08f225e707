//! RISC-V 5-Stage Pipeline Simulator Library.
//!
//! This crate models the cycle-by-cycle behaviour of a 5-stage in-order
//! RV32I pipeline in two configurations: with full operand forwarding, and
//! without forwarding where every RAW dependency stalls until commit.
//!
//! # Architecture
//!
//! * **Core**: Fetch, Decode, Execute, Memory, Writeback over single-entry latches.
//! * **Hazards**: load-use and branch-operand stalls, bypass from EX/MEM and MEM/WB.
//! * **Control flow**: branches and jumps resolve in Decode; the next fetch is squashed.
//!
//! # Modules
//!
//! * `common`: Register file, data memory, and error handling.
//! * `config`: Configuration loading and parsing.
//! * `core`: Pipeline engine, stages, and functional units.
//! * `isa`: Instruction Set Architecture definitions and decoder.
//! * `sim`: Program loader and stage-occupancy recording.
//! * `stats`: Performance statistics collection.

/// Shared types, error handling, register file and data memory.
pub mod common;

/// Configuration system for pipeline mode, memory size and tracing.
///
/// Loads and parses TOML configuration files; every field has a default.
pub mod config;

/// CPU core implementation including pipeline stages and execution units.
pub mod core;

/// Instruction Set Architecture definitions and decoder.
pub mod isa;

/// Program listing loader and stage-occupancy table.
pub mod sim;

/// Performance statistics collection and reporting.
///
/// Tracks cycle counts, retirement, stalls, flushes and forwarding activity.
pub mod stats;

pub use crate::common::{Result, SimError};
pub use crate::config::{Config, PipelineMode};
pub use crate::core::Cpu;
pub use crate::sim::OccupancyTable;

/// Simulates `program` for up to `cycles` cycles and returns its occupancy table.
pub fn simulate(program: Vec<u32>, config: &Config, cycles: u64) -> Result<OccupancyTable> {
    Cpu::new(program, config).simulate(cycles)
}
