//! Pipeline stage implementations.
//!
//! Contains the five stages of the instruction pipeline:
//! - Fetch: Reads the program store at the program counter
//! - Decode: Reads operands, detects load-use and structural hazards
//! - Execute: Performs ALU operations and resolves jumps and branches
//! - Memory: Handles load/store operations
//! - Writeback: Commits results, retires instructions and detects HALT
//!
//! Every stage reads the current latches and writes the latches of the next
//! cycle. The CPU calls them in reverse pipeline order so that forwarding
//! publications and stall releases made by later stages are visible to
//! earlier stages within the same cycle.

/// Instruction decode stage implementation.
pub mod decode;

/// Instruction execute stage implementation.
pub mod execute;

/// Instruction fetch stage implementation.
pub mod fetch;

/// Memory access stage implementation.
pub mod memory;

/// Writeback stage implementation.
pub mod writeback;

pub use decode::decode_stage;
pub use execute::execute_stage;
pub use fetch::fetch_stage;
pub use memory::mem_stage;
pub use writeback::wb_stage;
