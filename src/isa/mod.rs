//! Instruction set definitions.
//!
//! This module defines the closed opcode set understood by the pipeline, the
//! decoded instruction record that flows through the stage latches, and the
//! program store that Fetch indexes by program counter.

/// Decoded instruction record.
pub mod instruction;

/// Closed opcode enumeration and mnemonic parsing.
pub mod opcodes;

/// Indexed instruction store.
pub mod program;

pub use instruction::Instruction;
pub use opcodes::Opcode;
pub use program::Program;
