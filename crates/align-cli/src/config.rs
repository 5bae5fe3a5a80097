//! Runner configuration loaded from a YAML file.

use align_core::{AdjustError, Result};
use align_pme::PmeConfig;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Config {
    #[serde(default)]
    pub(crate) log: LogConfig,
    pub(crate) pme: PmeConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct LogConfig {
    /// Default log level, overridable through `RUST_LOG`.
    #[serde(default = "default_level")]
    pub(crate) level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}

pub(crate) fn load(path: &Path) -> Result<Config> {
    let raw = std::fs::read_to_string(path)?;
    serde_yaml::from_str(&raw).map_err(|e| AdjustError::Config {
        message: e.to_string(),
    })
}
