//! Common utilities and types used throughout the pipeline simulator.
//!
//! This module provides the architectural state shared by the pipeline
//! stages (register file and data memory), memory access classification,
//! and the simulator error type.

/// Memory access type definitions.
pub mod data;

/// Error types for load-time and simulation-time failures.
pub mod error;

/// Word-organised data memory.
pub mod memory;

/// Register file implementation.
pub mod reg;

pub use data::AccessType;
pub use error::{Result, SimError};
pub use memory::{DataMemory, MemFault};
pub use reg::RegisterFile;
