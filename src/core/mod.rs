//! CPU core implementation.
//!
//! The core owns the architectural state, the pipeline latches and the
//! simulation context, and advances all five stages once per clock.

/// Architectural state: registers, forwarding table, data memory.
pub mod arch;

/// Simulation context, cycle signals and the per-cycle stage view.
pub mod context;

/// The CPU: construction, the cycle driver and the run loop.
pub mod cpu;

/// Pipeline latches, hazards, control signals and stage procedures.
pub mod pipeline;

/// Execution units.
pub mod units;

pub use cpu::{Cpu, RunSummary, TraceMode};
