//! Simulation harness support.
//!
//! Program loading from the textual assembly format and the human-readable
//! per-cycle listing and final state dump.

/// Program text loader.
pub mod loader;

/// Per-cycle stage listing and final state dump.
pub mod trace;
