//! Error definitions.
//!
//! This module defines the error handling for the simulator. It provides:
//! 1. **Runtime Faults:** Out-of-range accesses raised while ticking the pipeline.
//! 2. **Load Errors:** Failures while reading or parsing program text.
//! 3. **Initialization Errors:** Failures while constructing a simulator.

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// The architectural resource an out-of-range access targeted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessFault {
    /// Register index outside R0-R15.
    Register(usize),
    /// Data memory word address outside the configured capacity.
    DataMemory(i32),
    /// Fetch address below the code base or not instruction aligned.
    InstructionFetch(i32),
}

impl fmt::Display for AccessFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessFault::Register(idx) => write!(f, "register R{}", idx),
            AccessFault::DataMemory(addr) => write!(f, "data memory address {}", addr),
            AccessFault::InstructionFetch(pc) => write!(f, "instruction fetch at pc {}", pc),
        }
    }
}

/// Faults raised while the pipeline is running.
///
/// A fault stops the simulation deterministically: the CPU is marked halted
/// and further runs advance no cycles.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SimError {
    /// An index or address fell outside the resource it addresses.
    #[error("out-of-range access: {0}")]
    OutOfRangeAccess(AccessFault),
}

/// Failures while reading or parsing a program file.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The program file could not be read.
    #[error("could not read program '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A line named an opcode outside the instruction set.
    #[error("line {line}: unknown opcode '{mnemonic}'")]
    UnknownOpcode { line: usize, mnemonic: String },

    /// A line had the wrong operand shape.
    #[error("line {line}: {reason}")]
    Malformed { line: usize, reason: String },
}

/// Failures while reading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("could not read config '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The configuration file is not valid TOML for this simulator.
    #[error("could not parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Failures while constructing a simulator.
#[derive(Debug, Error)]
pub enum InitError {
    /// The program contains no instructions.
    #[error("program is empty")]
    EmptyProgram,

    /// A configuration value is outside its legal range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
