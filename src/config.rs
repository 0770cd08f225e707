use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::common::{Result, SimError};

const DEFAULT_MAX_CYCLES: u64 = 100;
const DEFAULT_DATA_WORDS: usize = 1024;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub pipeline: PipelineConfig,
    #[serde(default)]
    pub memory: MemoryConfig,
}

impl Config {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Reads and parses a TOML configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| SimError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Default configuration with the given hazard policy.
    pub fn for_mode(mode: PipelineMode) -> Self {
        Self {
            pipeline: PipelineConfig {
                mode,
                ..PipelineConfig::default()
            },
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeneralConfig {
    #[serde(default)]
    pub trace_instructions: bool,
}

/// Hazard resolution policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub enum PipelineMode {
    /// EX/MEM and MEM/WB bypass paths; only load-use stalls.
    #[default]
    Forwarding,
    /// No bypass paths; consumers wait for the producer to commit.
    NoForwarding,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PipelineConfig {
    #[serde(default)]
    pub mode: PipelineMode,

    /// Decode `auipc`. Unset means the mode's default.
    #[serde(default)]
    pub auipc: Option<bool>,

    #[serde(default = "default_max_cycles")]
    pub max_cycles: u64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            mode: PipelineMode::default(),
            auipc: None,
            max_cycles: DEFAULT_MAX_CYCLES,
        }
    }
}

impl PipelineConfig {
    /// `auipc` is on by default with forwarding and off without it.
    pub fn auipc_enabled(&self) -> bool {
        self.auipc
            .unwrap_or(self.mode == PipelineMode::Forwarding)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MemoryConfig {
    #[serde(default = "default_data_words")]
    pub data_words: usize,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            data_words: DEFAULT_DATA_WORDS,
        }
    }
}

fn default_max_cycles() -> u64 {
    DEFAULT_MAX_CYCLES
}

fn default_data_words() -> usize {
    DEFAULT_DATA_WORDS
}
