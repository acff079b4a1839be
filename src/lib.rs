//! Five-Stage Pipeline Simulator Library.
//!
//! This crate implements a cycle-accurate simulator for a small 32-bit
//! load/store ISA running on a classic 5-stage in-order
//! pipeline with operand forwarding, load-use interlocks, a multi-cycle
//! multiplier, and flush-based control transfers.
//!
//! # Architecture
//!
//! * **Core**: Fetch, Decode/RF, Execute, Memory, Writeback, evaluated in
//!   reverse order every clock so that results published by the later stages
//!   are visible to the earlier stages of the same cycle.
//! * **State**: 16 general-purpose registers with a pending-write table, a
//!   forwarding table, and a word-addressed data memory.
//! * **Programs**: a textual assembly format loaded into an indexed
//!   instruction store based at address 4000.
//!
//! # Modules
//!
//! * `common`: Shared constants and error types.
//! * `config`: Configuration loading and parsing.
//! * `core`: CPU core implementation.
//! * `isa`: Instruction set definitions and the program store.
//! * `sim`: Program loader and trace output.
//! * `stats`: Performance statistics collection.

/// Shared constants and error types.
///
/// Provides the architectural constants (register count, code base, memory
/// capacity) and the error enums used throughout the simulator.
pub mod common;

/// Configuration system for memory and pipeline settings.
///
/// Loads and parses TOML configuration files to customize simulator behavior.
pub mod config;

/// CPU core implementation including pipeline stages and execution units.
///
/// Implements the 5-stage in-order pipeline, architectural state, and the
/// per-cycle simulation context.
pub mod core;

/// Instruction set definitions.
///
/// Defines the closed opcode set, the decoded instruction record, and the
/// program store that Fetch reads from.
pub mod isa;

/// Program loading and human-readable trace output.
pub mod sim;

/// Performance statistics collection and reporting.
///
/// Tracks cycle counts, instruction mix, stall breakdown and control-flow
/// events during simulation.
pub mod stats;
