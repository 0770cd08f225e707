//! Data memory.
//!
//! A flat array of 32-bit words. Byte address `a` lives in word `a / 4` at
//! byte lane `a % 4` (little-endian). Any access whose word index falls
//! outside the array is a fault; the Memory stage turns faults into fatal
//! simulation errors.

use crate::core::pipeline::signals::MemWidth;

/// Reason a data memory access was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MemFault {
    /// The word index is past the end of the array.
    OutOfBounds,
    /// The address is not a multiple of the access width.
    Misaligned,
}

/// Word-addressable data memory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DataMemory {
    words: Vec<u32>,
}

impl DataMemory {
    /// Creates a zero-filled memory of `words` 32-bit words.
    pub fn new(words: usize) -> Self {
        Self {
            words: vec![0; words],
        }
    }

    /// Number of words in the memory.
    pub fn len_words(&self) -> usize {
        self.words.len()
    }

    /// Reads the raw word at `index`, if it exists.
    pub fn word(&self, index: usize) -> Option<u32> {
        self.words.get(index).copied()
    }

    /// Overwrites the raw word at `index`.
    ///
    /// Used to seed memory before a run. Returns `false` if `index` is out of range.
    pub fn set_word(&mut self, index: usize, value: u32) -> bool {
        match self.words.get_mut(index) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    fn locate(&self, addr: u32, width: MemWidth) -> Result<(usize, u32), MemFault> {
        if addr % width.bytes() != 0 {
            return Err(MemFault::Misaligned);
        }
        let index = (addr / 4) as usize;
        if index >= self.words.len() {
            return Err(MemFault::OutOfBounds);
        }
        Ok((index, (addr % 4) * 8))
    }

    /// Loads `width` bytes from `addr`, sign- or zero-extending to 32 bits.
    pub fn load(&self, addr: u32, width: MemWidth, signed: bool) -> Result<u32, MemFault> {
        let (index, shift) = self.locate(addr, width)?;
        let raw = self.words[index] >> shift;
        Ok(match (width, signed) {
            (MemWidth::Byte, true) => raw as u8 as i8 as i32 as u32,
            (MemWidth::Byte, false) => raw & 0xff,
            (MemWidth::Half, true) => raw as u16 as i16 as i32 as u32,
            (MemWidth::Half, false) => raw & 0xffff,
            _ => raw,
        })
    }

    /// Stores the low `width` bytes of `value` at `addr`.
    pub fn store(&mut self, addr: u32, width: MemWidth, value: u32) -> Result<(), MemFault> {
        let (index, shift) = self.locate(addr, width)?;
        let mask = match width {
            MemWidth::Byte => 0xff,
            MemWidth::Half => 0xffff,
            _ => u32::MAX,
        };
        let slot = &mut self.words[index];
        *slot = (*slot & !(mask << shift)) | ((value & mask) << shift);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_lanes_are_little_endian() {
        let mut mem = DataMemory::new(4);
        mem.store(4, MemWidth::Word, 0x8899_aabb).unwrap();
        assert_eq!(mem.load(4, MemWidth::Byte, false).unwrap(), 0xbb);
        assert_eq!(mem.load(7, MemWidth::Byte, false).unwrap(), 0x88);
        assert_eq!(mem.load(7, MemWidth::Byte, true).unwrap(), 0xffff_ff88);
        assert_eq!(mem.load(6, MemWidth::Half, false).unwrap(), 0x8899);

        mem.store(5, MemWidth::Byte, 0x11).unwrap();
        assert_eq!(mem.word(1), Some(0x8899_11bb));
    }

    #[test]
    fn faults_on_bounds_and_alignment() {
        let mut mem = DataMemory::new(2);
        assert_eq!(mem.load(8, MemWidth::Word, true), Err(MemFault::OutOfBounds));
        assert_eq!(mem.store(2, MemWidth::Word, 1), Err(MemFault::Misaligned));
        assert_eq!(mem.load(3, MemWidth::Half, true), Err(MemFault::Misaligned));
        assert!(mem.store(7, MemWidth::Byte, 1).is_ok());
    }
}
