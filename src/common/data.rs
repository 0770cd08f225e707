//! Memory Access Types.
//!
//! This module defines the classification of data memory accesses. The
//! Memory stage tags every fault with the access that caused it so that a
//! fatal error can report whether a load or a store went wrong.

use std::fmt;

use serde::Serialize;

/// Type of data memory access operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum AccessType {
    /// Data read access.
    ///
    /// Used when loading data from memory into registers.
    Read,

    /// Data write access.
    ///
    /// Used when storing data from registers to memory.
    Write,
}

impl fmt::Display for AccessType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessType::Read => write!(f, "load"),
            AccessType::Write => write!(f, "store"),
        }
    }
}
