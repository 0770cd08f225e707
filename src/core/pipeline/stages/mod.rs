//! Pipeline stage implementations.
//!
//! Contains the five stages of the instruction pipeline:
//! - Fetch: Reads the next instruction word, or squashes it on a redirect
//! - Decode: Decodes instructions, applies stalls and resolves control flow
//! - Execute: Resolves operands and performs ALU operations
//! - Memory: Handles load/store operations
//! - Writeback: Commits results to the register file
//!
//! Every stage reads the latches captured at the start of the cycle and
//! returns the next value of its output latch; none of them mutates a latch
//! in place.

/// Instruction decode stage implementation.
pub mod decode;

/// Instruction execute stage implementation.
pub mod execute;

/// Instruction fetch stage implementation.
pub mod fetch;

/// Memory access stage implementation.
pub mod memory;

/// Writeback stage implementation.
pub mod writeback;

pub use decode::{decode_stage, DecodeOutcome};
pub use execute::execute_stage;
pub use fetch::fetch_stage;
pub use memory::mem_stage;
pub use writeback::wb_stage;

/// Per-cycle information shared by every stage.
#[derive(Clone, Copy, Debug)]
pub struct StageContext {
    /// One-based number of the cycle being simulated.
    pub cycle: u64,
    /// Emit per-stage trace records.
    pub trace: bool,
}
