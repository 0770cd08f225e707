//! Tests for the program listing loader.

use std::io::Write;

use rv_pipesim::common::SimError;
use rv_pipesim::sim::loader::{load_program, parse_listing};
use tempfile::NamedTempFile;

/// Tests parsing of well-formed lines and assembly labels.
#[test]
fn test_parse_listing() {
    let text = "0:00500093 addi x1, x0, 5\n4:00108113   addi x2, x1, 1\n";
    let program = parse_listing(text).unwrap();
    assert_eq!(program.words, vec![0x0050_0093, 0x0010_8113]);
    assert_eq!(program.listing, vec!["addi x1, x0, 5", "addi x2, x1, 1"]);
}

/// Tests the address field is ignored and line order defines layout.
#[test]
fn test_address_is_informational() {
    let program = parse_listing("100:00000013 nop\n0:0x00500093 addi x1, x0, 5\n").unwrap();
    assert_eq!(program.words, vec![0x13, 0x0050_0093]);
}

/// Tests blank lines are skipped and a line may omit the assembly text.
#[test]
fn test_blank_lines_and_bare_words() {
    let program = parse_listing("\n0:00000013\n\n4:00000013 nop\n").unwrap();
    assert_eq!(program.len(), 2);
    assert_eq!(program.listing[0], "");
}

/// Tests a bad hex field reports its line number.
#[test]
fn test_malformed_hex() {
    let err = parse_listing("0:00500093 addi x1, x0, 5\n4:zz108113 bad\n").unwrap_err();
    match err {
        SimError::MalformedEncoding { line, text } => {
            assert_eq!(line, 2);
            assert_eq!(text, "4:zz108113 bad");
        }
        other => panic!("unexpected error: {other}"),
    }
}

/// Tests a line without the `address:hex` shape is rejected.
#[test]
fn test_missing_separator() {
    assert!(matches!(
        parse_listing("00500093 addi x1, x0, 5"),
        Err(SimError::MalformedEncoding { line: 1, .. })
    ));
    assert!(matches!(
        parse_listing("0: addi"),
        Err(SimError::MalformedEncoding { line: 1, .. })
    ));
}

/// Tests loading a listing from disk.
#[test]
fn test_load_program_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "0:00500093 addi x1, x0, 5").unwrap();
    writeln!(file, "4:fe000ee3 beq x0, x0, -4").unwrap();

    let program = load_program(file.path()).unwrap();
    assert_eq!(program.words, vec![0x0050_0093, 0xfe00_0ee3]);
    assert_eq!(program.listing[1], "beq x0, x0, -4");
}

/// Tests a missing file is a load error naming the path.
#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.txt");
    match load_program(&path) {
        Err(SimError::Io { path: p, .. }) => assert_eq!(p, path),
        other => panic!("unexpected result: {other:?}"),
    }
}
