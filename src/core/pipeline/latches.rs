//! Pipeline latch structures for inter-stage communication.
//!
//! Each inter-stage boundary holds at most one instruction. A latch is
//! `Copy`: the engine snapshots all four at the start of a cycle, every stage
//! reads only that snapshot, and the next value of each latch is built fresh
//! and installed wholesale once all stages have run.
//!
//! A latch with `valid == false` holds nothing. A latch with
//! `valid && bubble` is an inserted stall or flush slot; it flows through
//! the remaining stages without any architectural effect.

use crate::core::pipeline::signals::ControlSignals;
use crate::core::pipeline::traits::PipelineLatch;

/// IF/ID pipeline latch (Fetch to Decode stage).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IfId {
    /// Program counter of the fetched instruction.
    pub pc: u32,
    /// 32-bit instruction encoding.
    pub inst: u32,
    /// An instruction (or bubble) occupies this latch.
    pub valid: bool,
    /// The fetched instruction was squashed by a control-flow redirect.
    pub bubble: bool,
}

/// ID/EX pipeline latch (Decode to Execute stage).
///
/// Operand values are not captured here: Execute resolves them from the
/// register file or the downstream latches when the instruction arrives.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IdEx {
    /// Program counter of the instruction.
    pub pc: u32,
    /// 32-bit instruction encoding.
    pub inst: u32,
    /// Major opcode.
    pub opcode: u32,
    /// funct3 field, used to refine the ALU operation and memory width.
    pub funct3: u32,
    /// funct7 field, used to refine the ALU operation.
    pub funct7: u32,
    /// First source register index (rs1).
    pub rs1: usize,
    /// Second source register index (rs2).
    pub rs2: usize,
    /// Destination register index (rd).
    pub rd: usize,
    /// Sign-extended immediate value.
    pub imm: i32,
    /// Control signals for downstream pipeline stages.
    pub ctrl: ControlSignals,
    /// An instruction (or bubble) occupies this latch.
    pub valid: bool,
    /// This slot is a stall or flush bubble.
    pub bubble: bool,
}

/// EX/MEM pipeline latch (Execute to Memory stage).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExMem {
    /// Program counter of the instruction.
    pub pc: u32,
    /// 32-bit instruction encoding.
    pub inst: u32,
    /// Major opcode.
    pub opcode: u32,
    /// funct3 field, selects the memory access width.
    pub funct3: u32,
    /// Destination register index (rd).
    pub rd: usize,
    /// ALU result, effective address for memory operations, or link address for jumps.
    pub alu: u32,
    /// Forwarded rs2 value to be written by a store.
    pub store_data: u32,
    /// Comparison outcome for `AluMode::Compare`.
    pub is_equal: bool,
    /// Control signals for downstream pipeline stages.
    pub ctrl: ControlSignals,
    /// An instruction (or bubble) occupies this latch.
    pub valid: bool,
    /// This slot is a stall or flush bubble.
    pub bubble: bool,
}

/// MEM/WB pipeline latch (Memory to Writeback stage).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MemWb {
    /// Program counter of the instruction.
    pub pc: u32,
    /// 32-bit instruction encoding.
    pub inst: u32,
    /// Destination register index (rd).
    pub rd: usize,
    /// ALU computation result (for non-load instructions).
    pub alu: u32,
    /// Data loaded from memory (for load instructions).
    pub load_data: u32,
    /// Control signals for the writeback stage.
    pub ctrl: ControlSignals,
    /// An instruction (or bubble) occupies this latch.
    pub valid: bool,
    /// This slot is a stall or flush bubble.
    pub bubble: bool,
}

impl MemWb {
    /// Value this instruction commits: loaded data if `mem_to_reg`, else the ALU result.
    pub fn result(&self) -> u32 {
        if self.ctrl.mem_to_reg {
            self.load_data
        } else {
            self.alu
        }
    }
}

/// The four inter-stage latches, captured together as one cycle's state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Latches {
    /// Fetch to Decode.
    pub if_id: IfId,
    /// Decode to Execute.
    pub id_ex: IdEx,
    /// Execute to Memory.
    pub ex_mem: ExMem,
    /// Memory to Writeback.
    pub mem_wb: MemWb,
}

impl Latches {
    /// `true` when no latch holds an instruction or bubble.
    pub fn is_empty(&self) -> bool {
        !(self.if_id.is_valid()
            || self.id_ex.is_valid()
            || self.ex_mem.is_valid()
            || self.mem_wb.is_valid())
    }
}

fn written_register(occupied: bool, ctrl: &ControlSignals, rd: usize) -> Option<usize> {
    (occupied && ctrl.reg_write && rd != 0).then_some(rd)
}

impl PipelineLatch for IfId {
    fn bubble() -> Self {
        Self {
            valid: true,
            bubble: true,
            ..Self::default()
        }
    }

    fn is_valid(&self) -> bool {
        self.valid
    }

    fn is_bubble(&self) -> bool {
        self.bubble
    }

    fn pc(&self) -> u32 {
        self.pc
    }
}

impl PipelineLatch for IdEx {
    fn bubble() -> Self {
        Self {
            valid: true,
            bubble: true,
            ..Self::default()
        }
    }

    fn is_valid(&self) -> bool {
        self.valid
    }

    fn is_bubble(&self) -> bool {
        self.bubble
    }

    fn pc(&self) -> u32 {
        self.pc
    }

    fn destination(&self) -> Option<usize> {
        written_register(self.is_occupied(), &self.ctrl, self.rd)
    }
}

impl PipelineLatch for ExMem {
    fn bubble() -> Self {
        Self {
            valid: true,
            bubble: true,
            ..Self::default()
        }
    }

    fn is_valid(&self) -> bool {
        self.valid
    }

    fn is_bubble(&self) -> bool {
        self.bubble
    }

    fn pc(&self) -> u32 {
        self.pc
    }

    fn destination(&self) -> Option<usize> {
        written_register(self.is_occupied(), &self.ctrl, self.rd)
    }
}

impl PipelineLatch for MemWb {
    fn bubble() -> Self {
        Self {
            valid: true,
            bubble: true,
            ..Self::default()
        }
    }

    fn is_valid(&self) -> bool {
        self.valid
    }

    fn is_bubble(&self) -> bool {
        self.bubble
    }

    fn pc(&self) -> u32 {
        self.pc
    }

    fn destination(&self) -> Option<usize> {
        written_register(self.is_occupied(), &self.ctrl, self.rd)
    }
}
