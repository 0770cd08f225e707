//! CPU core: the pipeline engine, its stages and functional units.

/// Pipeline engine.
pub mod cpu;

/// Latches, control signals, hazard and forwarding units, stages.
pub mod pipeline;

/// Functional units (ALU, branch resolution).
pub mod units;

pub use cpu::{Cpu, EngineState};
