//! Functional units used by the Execute stage.

/// Integer ALU.
pub mod alu;
