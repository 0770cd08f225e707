//! Simulator error definitions.
//!
//! Load-time failures (unreadable files, malformed listings, bad
//! configuration) and the fatal simulation-time faults share one error
//! enum. Simulation faults carry the cycle and program counter at which
//! they were raised.
//!
//! Unknown opcodes and fetches past the end of instruction memory are not
//! errors: the former decode to a no-effect instruction, the latter let the
//! pipeline drain. A fetch from an address that is not a multiple of four
//! is fatal.

use std::path::PathBuf;

use super::data::AccessType;

/// Errors raised while loading a program or running the pipeline.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    /// An input file is missing or unreadable.
    #[error("could not read '{}': {source}", .path.display())]
    Io {
        /// Path that failed to open.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A listing line does not have a parseable `address:hex` encoding.
    #[error("line {line}: malformed instruction encoding '{text}'")]
    MalformedEncoding {
        /// One-based line number in the listing.
        line: usize,
        /// The offending line.
        text: String,
    },

    /// The configuration document failed to parse.
    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// A load or store addressed a word outside the data memory.
    #[error("cycle {cycle}: {access} at pc {pc:#x} outside data memory (address {addr:#x})")]
    MemoryOutOfBounds {
        /// Cycle in which the Memory stage raised the fault.
        cycle: u64,
        /// Program counter of the faulting instruction.
        pc: u32,
        /// Effective address.
        addr: u32,
        /// Load or store.
        access: AccessType,
    },

    /// A load or store address is not aligned to its access width.
    #[error("cycle {cycle}: misaligned {access} at pc {pc:#x} (address {addr:#x})")]
    MisalignedAccess {
        /// Cycle in which the Memory stage raised the fault.
        cycle: u64,
        /// Program counter of the faulting instruction.
        pc: u32,
        /// Effective address.
        addr: u32,
        /// Load or store.
        access: AccessType,
    },

    /// Fetch was asked for an instruction at an address that is not word aligned.
    #[error("cycle {cycle}: misaligned instruction fetch at pc {pc:#x}")]
    MisalignedFetch {
        /// Cycle in which Fetch raised the fault.
        cycle: u64,
        /// The misaligned program counter.
        pc: u32,
    },

    /// An operand was requested while its producer was a load still in flight.
    ///
    /// The hazard unit stalls every such case before it reaches Execute, so
    /// this only surfaces if that invariant is broken.
    #[error("cycle {cycle}: x{reg} for pc {pc:#x} is still in flight behind a load")]
    UnresolvedHazard {
        /// Cycle in which the operand was requested.
        cycle: u64,
        /// Program counter of the consuming instruction.
        pc: u32,
        /// Source register index.
        reg: usize,
    },
}

impl SimError {
    /// Returns the cycle at which a simulation fault occurred.
    ///
    /// Load-time errors have no cycle and return `None`.
    pub fn cycle(&self) -> Option<u64> {
        match self {
            SimError::MemoryOutOfBounds { cycle, .. }
            | SimError::MisalignedAccess { cycle, .. }
            | SimError::MisalignedFetch { cycle, .. }
            | SimError::UnresolvedHazard { cycle, .. } => Some(*cycle),
            _ => None,
        }
    }
}

/// Result alias used across the simulator.
pub type Result<T> = std::result::Result<T, SimError>;
