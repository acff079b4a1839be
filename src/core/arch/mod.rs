//! Architectural state.
//!
//! This module contains the programmer-visible state of the processor: the
//! general-purpose register file with its pending-write table, the
//! forwarding table consulted for in-flight values, and data memory.

/// Word-addressed data memory.
pub mod data_memory;

/// Forwarding table holding the latest value produced for each register.
pub mod forwarding;

/// General-Purpose Register file implementation.
pub mod gpr;

pub use data_memory::DataMemory;
pub use forwarding::ForwardingTable;
pub use gpr::RegisterFile;
