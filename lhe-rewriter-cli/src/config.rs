//! Configuration loading and parsing

use anyhow::{Context, Result};
use lhe_rewriter::{OutputNaming, RewriterConfig};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Application configuration (loaded from an optional TOML file)
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub markers: RewriterConfig,
    #[serde(default)]
    pub output: OutputNaming,
}

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: AppConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    config
        .markers
        .validate()
        .with_context(|| format!("Invalid markers in config file: {:?}", path))?;

    Ok(config)
}
