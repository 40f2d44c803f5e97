use serde::{Deserialize, Serialize};
use std::{fs::File, io::BufReader, path::Path};
use thiserror::Error;

/// Resource limits for one top-level tokenization.
///
/// Tokenization itself never fails; when a limit is hit, the remaining
/// sub-range is emitted as a single plain span instead of being delegated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Delegation depth (multipart-within-multipart nesting) before the
    /// engine stops recursing and fails closed.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// Total bytes handed to delegates per top-level invocation.
    #[serde(default = "default_byte_budget")]
    pub byte_budget: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            byte_budget: default_byte_budget(),
        }
    }
}

fn default_max_depth() -> usize {
    16
}

fn default_byte_budget() -> usize {
    16 * 1024 * 1024
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),
}

impl EngineConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }
}
