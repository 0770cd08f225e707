//! Integration tests for common utilities module.

use rv_pipesim::common::*;
use rv_pipesim::core::pipeline::signals::MemWidth;

/// Tests register x0 ignores writes.
#[test]
fn test_register_x0_hardwired() {
    let mut regs = RegisterFile::new();
    regs.write(0, 0xFFFF_FFFF);
    assert_eq!(regs.read(0), 0);
    regs.write(31, 7);
    assert_eq!(regs.read(31), 7);
    assert_eq!(regs.snapshot()[0], 0);
}

/// Tests access type display names.
#[test]
fn test_access_type_display() {
    assert_eq!(AccessType::Read.to_string(), "load");
    assert_eq!(AccessType::Write.to_string(), "store");
    assert_ne!(AccessType::Read, AccessType::Write);
}

/// Tests sub-word stores merge into the containing word.
#[test]
fn test_memory_subword_store() {
    let mut mem = DataMemory::new(4);
    mem.store(0, MemWidth::Word, 0x1122_3344).unwrap();
    mem.store(2, MemWidth::Half, 0xAABB).unwrap();
    assert_eq!(mem.word(0), Some(0xAABB_3344));
    assert_eq!(mem.load(2, MemWidth::Half, true).unwrap(), 0xFFFF_AABB);
    assert_eq!(mem.load(2, MemWidth::Half, false).unwrap(), 0x0000_AABB);
}

/// Tests the last word is addressable and the next one is not.
#[test]
fn test_memory_bounds() {
    let mut mem = DataMemory::new(1024);
    assert!(mem.store(4092, MemWidth::Word, 1).is_ok());
    assert_eq!(mem.store(4096, MemWidth::Word, 1), Err(MemFault::OutOfBounds));
    assert!(!mem.set_word(1024, 1));
    assert_eq!(mem.len_words(), 1024);
}

/// Tests simulation errors carry their cycle.
#[test]
fn test_error_cycle() {
    let err = SimError::MemoryOutOfBounds {
        cycle: 9,
        pc: 0x10,
        addr: 0x2000,
        access: AccessType::Read,
    };
    assert_eq!(err.cycle(), Some(9));
    assert!(err.to_string().contains("cycle 9"));
    assert!(err.to_string().contains("load"));

    let err = SimError::MalformedEncoding {
        line: 3,
        text: "x".into(),
    };
    assert_eq!(err.cycle(), None);
}
