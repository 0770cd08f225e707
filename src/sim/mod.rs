//! Simulation harness: program loading and stage-occupancy recording.

/// Program listing loader.
pub mod loader;

/// Stage-occupancy table recording and rendering.
pub mod occupancy;

pub use loader::{load_program, parse_listing, Program};
pub use occupancy::{render, OccupancyRecorder, OccupancyTable, Stage, StageCell};
