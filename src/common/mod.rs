//! Common utilities and types used throughout the pipeline simulator.
//!
//! This module provides the architectural constants and error types that are
//! shared across the ISA, core and simulation layers.

/// Common constants used throughout the simulator.
pub mod constants;

/// Error types for initialization, loading and runtime faults.
pub mod error;

pub use constants::{
    CODE_BASE, DATA_MEMORY_WORDS, INST_WIDTH, MEMORY_DUMP_WORDS, NUM_REGS, NUM_STAGES,
};
pub use error::{AccessFault, ConfigError, InitError, LoadError, SimError};
