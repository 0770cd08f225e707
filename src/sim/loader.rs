//! Program Listing Loader.
//!
//! Parses the textual program listing into instruction memory. Each line
//! has the form `<address>:<hex word> <assembly text>`. The address is
//! informational only: line order defines the layout, so word `i` sits at
//! address `4 * i`. Blank lines are skipped.

use std::fs;
use std::path::Path;

use log::info;

use crate::common::{Result, SimError};

/// A loaded program: instruction words and their assembly text.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Program {
    /// Instruction memory, one word per listing line.
    pub words: Vec<u32>,
    /// Assembly text for each word, used to label the occupancy diagram.
    pub listing: Vec<String>,
}

impl Program {
    /// Number of instructions.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// `true` if the listing had no instructions.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

fn parse_line(number: usize, line: &str) -> Result<(u32, String)> {
    let malformed = || SimError::MalformedEncoding {
        line: number,
        text: line.to_string(),
    };

    let (_, rest) = line.split_once(':').ok_or_else(malformed)?;
    let (hex, asm) = rest.split_once(' ').unwrap_or((rest, ""));
    let hex = hex.trim();
    let digits = hex
        .strip_prefix("0x")
        .or_else(|| hex.strip_prefix("0X"))
        .unwrap_or(hex);
    let word = u32::from_str_radix(digits, 16).map_err(|_| malformed())?;

    Ok((word, asm.trim().to_string()))
}

/// Parses a listing held in memory.
pub fn parse_listing(text: &str) -> Result<Program> {
    let mut program = Program::default();
    for (idx, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let (word, asm) = parse_line(idx + 1, line)?;
        program.words.push(word);
        program.listing.push(asm);
    }
    Ok(program)
}

/// Reads and parses a listing file.
pub fn load_program(path: &Path) -> Result<Program> {
    let text = fs::read_to_string(path).map_err(|source| SimError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let program = parse_listing(&text)?;
    info!(
        "[Loader] {} instructions from {}",
        program.len(),
        path.display()
    );
    Ok(program)
}
