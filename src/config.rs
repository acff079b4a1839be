use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::common::constants::{CODE_BASE, DATA_MEMORY_WORDS, INST_WIDTH, MEMORY_DUMP_WORDS};
use crate::common::error::{ConfigError, InitError};

const DEFAULT_MAX_CYCLES: u64 = 1000;
const DEFAULT_MULTIPLY_CYCLES: u8 = 2;

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub memory: MemoryConfig,
    #[serde(default)]
    pub pipeline: PipelineConfig,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct GeneralConfig {
    /// Print the per-cycle stage listing unless the command line says otherwise.
    #[serde(default)]
    pub trace_instructions: bool,
    /// Cycle budget used when the command line gives none.
    #[serde(default = "default_max_cycles")]
    pub max_cycles: u64,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            trace_instructions: false,
            max_cycles: default_max_cycles(),
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct MemoryConfig {
    /// Data memory capacity in words.
    #[serde(default = "default_data_words")]
    pub data_words: usize,
    /// Number of memory words shown in the final dump.
    #[serde(default = "default_dump_words")]
    pub dump_words: usize,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            data_words: default_data_words(),
            dump_words: default_dump_words(),
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct PipelineConfig {
    /// Code base address and reset program counter.
    #[serde(default = "default_start_pc")]
    pub start_pc: i32,
    /// Cycles a MUL occupies the Execute stage.
    #[serde(default = "default_multiply_cycles")]
    pub multiply_cycles: u8,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            start_pc: default_start_pc(),
            multiply_cycles: default_multiply_cycles(),
        }
    }
}

impl Config {
    /// Reads and parses a TOML configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parses a TOML configuration string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Rejects values the pipeline cannot run with.
    pub fn validate(&self) -> Result<(), InitError> {
        if self.memory.data_words == 0 {
            return Err(InitError::InvalidConfig(
                "memory.data_words must be at least 1".into(),
            ));
        }
        if self.pipeline.multiply_cycles == 0 {
            return Err(InitError::InvalidConfig(
                "pipeline.multiply_cycles must be at least 1".into(),
            ));
        }
        if self.pipeline.start_pc < 0 || self.pipeline.start_pc % INST_WIDTH != 0 {
            return Err(InitError::InvalidConfig(format!(
                "pipeline.start_pc {} must be non-negative and a multiple of {}",
                self.pipeline.start_pc, INST_WIDTH
            )));
        }
        Ok(())
    }
}

fn default_max_cycles() -> u64 {
    DEFAULT_MAX_CYCLES
}

fn default_data_words() -> usize {
    DATA_MEMORY_WORDS
}

fn default_dump_words() -> usize {
    MEMORY_DUMP_WORDS
}

fn default_start_pc() -> i32 {
    CODE_BASE
}

fn default_multiply_cycles() -> u8 {
    DEFAULT_MULTIPLY_CYCLES
}
