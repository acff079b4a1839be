//! Pipeline latch structures for inter-stage communication.
//!
//! Pipeline latches store instruction state as it flows through the five
//! pipeline stages. Each latch holds at most one occupant; an empty latch is
//! a bubble. The CPU keeps the current set of latches and every tick builds
//! a fresh set for the next cycle, which replaces the current set once all
//! five stages have been evaluated.

use crate::core::pipeline::signals::ControlSignals;
use crate::core::pipeline::traits::PipelineLatch;
use crate::isa::Instruction;

/// An instruction in flight together with its stage-local working values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LatchEntry {
    /// Program counter of the instruction.
    pub pc: i32,
    /// The decoded instruction.
    pub inst: Instruction,
    /// Control signals for downstream pipeline stages.
    pub ctrl: ControlSignals,
    /// Value materialized for rs1.
    pub rs1_value: i32,
    /// Value materialized for rs2.
    pub rs2_value: i32,
    /// Computed value, staged for writeback or forwarding.
    pub result: i32,
    /// Effective address for memory operations.
    pub mem_address: i32,
    /// Execute cycles left before a multi-cycle operation produces its result.
    pub cycles_remaining: u8,
    /// The slot was discarded by a control transfer. It reaches Execute with
    /// a zero result and goes no further.
    pub squashed: bool,
}

impl LatchEntry {
    /// Creates a fresh entry for an instruction fetched at `pc`.
    pub fn new(pc: i32, inst: Instruction) -> Self {
        Self {
            pc,
            inst,
            ctrl: ControlSignals::for_opcode(inst.opcode),
            ..Default::default()
        }
    }

    /// The empty occupant left behind when the slot at `pc` is discarded.
    pub fn squashed(pc: i32) -> Self {
        Self {
            pc,
            inst: Instruction::nop(),
            squashed: true,
            ..Default::default()
        }
    }
}

/// A single stage latch. `None` is a bubble.
///
/// A flushed latch keeps a squashed occupant rather than becoming a bubble.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StageLatch {
    pub entry: Option<LatchEntry>,
}

impl StageLatch {
    /// A latch holding `entry`.
    pub fn occupied(entry: LatchEntry) -> Self {
        Self { entry: Some(entry) }
    }

    /// An empty latch.
    pub fn bubble() -> Self {
        Self { entry: None }
    }
}

impl PipelineLatch for StageLatch {
    fn flush(&mut self) {
        if let Some(entry) = self.entry {
            self.entry = Some(LatchEntry::squashed(entry.pc));
        }
    }

    fn is_empty(&self) -> bool {
        self.entry.is_none()
    }
}

/// The four inter-stage latches.
///
/// Fetch has no input latch of its own: it reads the program store at the
/// program counter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Latches {
    /// IF/ID: the instruction Decode works on.
    pub if_id: StageLatch,
    /// ID/EX: the instruction Execute works on.
    pub id_ex: StageLatch,
    /// EX/MEM: the instruction Memory works on.
    pub ex_mem: StageLatch,
    /// MEM/WB: the instruction Writeback retires.
    pub mem_wb: StageLatch,
}

impl Latches {
    /// Returns `true` if no instruction is in flight.
    pub fn is_drained(&self) -> bool {
        self.if_id.is_empty()
            && self.id_ex.is_empty()
            && self.ex_mem.is_empty()
            && self.mem_wb.is_empty()
    }
}
