//! Simulation context.
//!
//! Cross-stage and cross-cycle state that is not part of any latch: the
//! clock, the retirement counter, the halt flag, the sticky stall flags set by
//! jumps and load-use hazards, and the branch-resolution carry state used by
//! BZ and BNZ. Also defines the per-cycle signals and the cycle view that
//! records what each stage held.

use crate::common::constants::NUM_STAGES;
use crate::core::pipeline::latches::LatchEntry;

/// Initial value of the delayed branch-condition snapshot.
pub const INITIAL_BRANCH_SNAPSHOT: i32 = 1;

/// Three-valued branch-pending indicator.
///
/// Decode arms it when it accepts a BZ or BNZ. A Writeback bubble observed
/// while armed resolves it and releases the Decode stall. A branch decoded
/// while resolved returns it to idle instead of re-arming.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BranchState {
    #[default]
    Idle,
    Armed,
    Resolved,
}

/// Sticky stall flags, set by one stage and released by a later one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StallState {
    /// Decode is held by a load-use hazard or an unresolved jump. Memory or
    /// Writeback clears it before Decode runs again.
    pub decode: bool,
    /// Fetch must not introduce instructions.
    pub fetch: bool,
}

/// Cross-cycle simulation state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimContext {
    /// Cycles elapsed.
    pub clock: u64,
    /// Logical instructions executed: retirements plus control-flow corrections.
    pub ins_completed: i64,
    /// Set once a HALT retires, or when a fault stops the simulation.
    pub halted: bool,
    pub branch: BranchState,
    /// Delayed condition consumed by BZ/BNZ.
    pub branch_snapshot: i32,
    /// Remaining pipeline warm-up cycles after reset.
    pub warmup: usize,
    pub stalls: StallState,
}

impl Default for SimContext {
    fn default() -> Self {
        Self {
            clock: 0,
            ins_completed: 0,
            halted: false,
            branch: BranchState::Idle,
            branch_snapshot: INITIAL_BRANCH_SNAPSHOT,
            warmup: NUM_STAGES - 1,
            stalls: StallState::default(),
        }
    }
}

impl SimContext {
    /// Returns `true` while the stage at `depth` (0 = Fetch) has not yet
    /// received its first instruction since reset.
    pub fn is_warming(&self, depth: usize) -> bool {
        depth > 0 && depth + self.warmup >= NUM_STAGES
    }
}

/// Signals raised during one tick and consumed by earlier stages of the same tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CycleSignals {
    /// A taken jump or branch discarded the Decode occupant.
    pub flush: bool,
    /// Execute holds a multi-cycle operation that has not produced its result.
    pub execute_busy: bool,
    /// Decode kept its occupant for another cycle.
    pub decode_held: bool,
}

/// Pipeline stage identifiers, in pipeline order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    Fetch,
    Decode,
    Execute,
    Memory,
    Writeback,
}

impl Stage {
    pub const ALL: [Stage; NUM_STAGES] = [
        Stage::Fetch,
        Stage::Decode,
        Stage::Execute,
        Stage::Memory,
        Stage::Writeback,
    ];

    /// Name used in trace output.
    pub fn name(self) -> &'static str {
        match self {
            Stage::Fetch => "Fetch",
            Stage::Decode => "Decode/RF",
            Stage::Execute => "Execute",
            Stage::Memory => "Memory",
            Stage::Writeback => "Writeback",
        }
    }

    /// Position in the pipeline, 0 for Fetch.
    pub fn depth(self) -> usize {
        self as usize
    }
}

/// What one stage did during the last tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StageView {
    /// The occupant the stage worked on, with the values it produced.
    pub entry: Option<LatchEntry>,
    /// The stage could not pass its occupant on this cycle.
    pub stalled: bool,
    /// The stage had not yet received an instruction since reset.
    pub warming: bool,
}

/// Per-stage record of the last tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CycleView {
    pub stages: [StageView; NUM_STAGES],
}

impl CycleView {
    pub fn stage(&self, stage: Stage) -> &StageView {
        &self.stages[stage.depth()]
    }

    pub fn stage_mut(&mut self, stage: Stage) -> &mut StageView {
        &mut self.stages[stage.depth()]
    }
}
