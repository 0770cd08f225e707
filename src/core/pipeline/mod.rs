//! Instruction pipeline implementation.
//!
//! This module contains the five pipeline stages (fetch, decode, execute,
//! memory, writeback), the single-entry latches between them, the hazard
//! detection and forwarding units, and control signals.

/// Operand forwarding from the EX/MEM and MEM/WB latches.
pub mod forwarding;

/// Pipeline hazard detection.
pub mod hazards;

/// Inter-stage pipeline latches (IF/ID, ID/EX, EX/MEM, MEM/WB).
pub mod latches;

/// Control signals generated during instruction decode.
pub mod signals;

/// Pipeline stage implementations (fetch, decode, execute, memory, writeback).
pub mod stages;

/// Traits for pipeline latches.
pub mod traits;

pub use latches::{ExMem, IdEx, IfId, Latches, MemWb};
pub use traits::PipelineLatch;
