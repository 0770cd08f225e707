//! RISC-V General-Purpose Register File.
//!
//! This module implements the register file containing 32 registers
//! (x0-x31). It enforces the architectural invariant that register x0 is
//! always hardwired to zero.

/// Number of architectural integer registers.
pub const NUM_REGS: usize = 32;

/// General-Purpose Register file.
///
/// Register x0 is hardwired to zero and cannot be modified. Only the
/// Writeback stage writes through this type.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegisterFile {
    regs: [u32; NUM_REGS],
}

impl RegisterFile {
    /// Creates a register file with all registers initialized to zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a register value.
    ///
    /// Register x0 always returns 0 regardless of storage.
    pub fn read(&self, idx: usize) -> u32 {
        if idx == 0 {
            0
        } else {
            self.regs[idx]
        }
    }

    /// Writes a value to a register.
    ///
    /// Writes to register x0 are silently ignored.
    pub fn write(&mut self, idx: usize, val: u32) {
        if idx != 0 {
            self.regs[idx] = val;
        }
    }

    /// Returns a copy of all 32 register values.
    pub fn snapshot(&self) -> [u32; NUM_REGS] {
        self.regs
    }

    /// Dumps the contents of all registers to stdout, four per line.
    pub fn dump(&self) {
        for i in (0..NUM_REGS).step_by(4) {
            println!(
                "x{:<2}={:#010x} x{:<2}={:#010x} x{:<2}={:#010x} x{:<2}={:#010x}",
                i,
                self.regs[i],
                i + 1,
                self.regs[i + 1],
                i + 2,
                self.regs[i + 2],
                i + 3,
                self.regs[i + 3]
            );
        }
    }
}
