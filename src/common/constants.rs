//! Architectural constants.

/// Number of general-purpose registers (R0-R15).
pub const NUM_REGS: usize = 16;

/// Address of the first instruction in the program store.
pub const CODE_BASE: i32 = 4000;

/// Distance in address units between consecutive instructions.
pub const INST_WIDTH: i32 = 4;

/// Default capacity of data memory, in words.
pub const DATA_MEMORY_WORDS: usize = 4000;

/// Default number of memory words shown in the final state dump.
pub const MEMORY_DUMP_WORDS: usize = 100;

/// Number of pipeline stages.
pub const NUM_STAGES: usize = 5;
