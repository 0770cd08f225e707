//! Stage-Occupancy Table.
//!
//! Records, at the start of every simulated cycle, which pipeline stage each
//! instruction occupies. The table is indexed `[instruction][cycle]`. A cell
//! is empty when the instruction is not in the pipeline (or its slot is a
//! bubble), names the stage it holds, or is a repeat marker when it holds
//! the same stage it held the cycle before.
//!
//! The text rendering is one line per instruction:
//! `<asm>;<cell>;<cell>...` with `-` for a repeat and a space for empty.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::core::pipeline::latches::Latches;
use crate::core::pipeline::traits::PipelineLatch;

/// Number of pipeline stages.
pub const NUM_STAGES: usize = 5;

/// A pipeline stage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Stage {
    Fetch,
    Decode,
    Execute,
    Memory,
    Writeback,
}

impl Stage {
    /// All stages in pipeline order.
    pub const ALL: [Stage; NUM_STAGES] = [
        Stage::Fetch,
        Stage::Decode,
        Stage::Execute,
        Stage::Memory,
        Stage::Writeback,
    ];

    /// Short stage name used in diagrams.
    pub fn label(self) -> &'static str {
        match self {
            Stage::Fetch => "IF",
            Stage::Decode => "ID",
            Stage::Execute => "EX",
            Stage::Memory => "MEM",
            Stage::Writeback => "WB",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One cell of the occupancy table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StageCell {
    /// Not in the pipeline this cycle.
    #[default]
    Empty,
    /// Entered this stage this cycle.
    Stage(Stage),
    /// Still in the stage it held last cycle.
    Repeat,
}

impl StageCell {
    /// Text used by [`render`].
    pub fn symbol(self) -> &'static str {
        match self {
            StageCell::Empty => " ",
            StageCell::Stage(s) => s.label(),
            StageCell::Repeat => "-",
        }
    }
}

impl Serialize for StageCell {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.symbol())
    }
}

/// Per-instruction, per-cycle stage occupancy.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct OccupancyTable {
    rows: Vec<Vec<StageCell>>,
    cycles: usize,
}

impl OccupancyTable {
    /// Creates an empty table for `instructions` rows.
    pub fn new(instructions: usize) -> Self {
        Self {
            rows: vec![Vec::new(); instructions],
            cycles: 0,
        }
    }

    /// Number of recorded cycles (columns).
    pub fn cycles(&self) -> usize {
        self.cycles
    }

    /// Row for instruction `index`.
    pub fn row(&self, index: usize) -> Option<&[StageCell]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    /// All rows.
    pub fn rows(&self) -> &[Vec<StageCell>] {
        &self.rows
    }

    /// Cell for instruction `index` at zero-based `cycle`.
    pub fn cell(&self, index: usize, cycle: usize) -> StageCell {
        self.rows
            .get(index)
            .and_then(|r| r.get(cycle))
            .copied()
            .unwrap_or_default()
    }

    fn push_column(&mut self, column: &[StageCell]) {
        for (row, cell) in self.rows.iter_mut().zip(column) {
            row.push(*cell);
        }
        self.cycles += 1;
    }
}

/// Builds an [`OccupancyTable`] one cycle at a time.
#[derive(Clone, Debug, Default)]
pub struct OccupancyRecorder {
    table: OccupancyTable,
    last: [Option<usize>; NUM_STAGES],
}

impl OccupancyRecorder {
    /// Creates a recorder for a program of `instructions` words.
    pub fn new(instructions: usize) -> Self {
        Self {
            table: OccupancyTable::new(instructions),
            last: [None; NUM_STAGES],
        }
    }

    /// Records one column from the latches and PC at the start of a cycle.
    ///
    /// Fetch holds the instruction at the PC. Every later stage holds the
    /// instruction in its input latch, unless that latch is empty or a
    /// bubble. When one instruction shows up in two stages, the later stage
    /// wins.
    pub fn record(&mut self, latches: &Latches, pc: u32) {
        let len = self.table.rows.len();
        let index = |pc: u32| -> Option<usize> {
            let i = (pc / 4) as usize;
            (i < len).then_some(i)
        };
        let occupant = |occupied: bool, pc: u32| if occupied { index(pc) } else { None };

        let current: [Option<usize>; NUM_STAGES] = [
            index(pc),
            occupant(latches.if_id.is_occupied(), latches.if_id.pc),
            occupant(latches.id_ex.is_occupied(), latches.id_ex.pc),
            occupant(latches.ex_mem.is_occupied(), latches.ex_mem.pc),
            occupant(latches.mem_wb.is_occupied(), latches.mem_wb.pc),
        ];

        let mut column = vec![StageCell::Empty; len];
        for (slot, stage) in Stage::ALL.iter().enumerate() {
            if let Some(i) = current[slot] {
                column[i] = if self.last[slot] == Some(i) {
                    StageCell::Repeat
                } else {
                    StageCell::Stage(*stage)
                };
            }
        }

        self.last = current;
        self.table.push_column(&column);
    }

    /// Table recorded so far.
    pub fn table(&self) -> &OccupancyTable {
        &self.table
    }

    /// Consumes the recorder, returning its table.
    pub fn into_table(self) -> OccupancyTable {
        self.table
    }
}

/// Renders the table as semicolon-separated text, one line per instruction.
///
/// `listing` supplies the assembly label for each row; missing labels render empty.
/// Rows shorter than `columns` are padded with empty cells, so a run that
/// drained early still spans the requested number of cycles.
pub fn render(table: &OccupancyTable, listing: &[String], columns: usize) -> String {
    let mut out = String::new();
    for (i, row) in table.rows().iter().enumerate() {
        out.push_str(listing.get(i).map(String::as_str).unwrap_or(""));
        for cell in row {
            out.push(';');
            out.push_str(cell.symbol());
        }
        for _ in row.len()..columns {
            out.push(';');
            out.push_str(StageCell::Empty.symbol());
        }
        out.push('\n');
    }
    out
}
