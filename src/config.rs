//! Configuration management for LedgerChain

use crate::error::ChainError;
use serde::Deserialize;
use std::fs;

#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub files: FilesConfig,
}

#[derive(Debug, Deserialize)]
pub struct FilesConfig {
    #[serde(default = "default_source")]
    pub source: String,
    #[serde(default = "default_target")]
    pub target: String,
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            source: default_source(),
            target: default_target(),
        }
    }
}

fn default_source() -> String {
    "ledger.txt".to_string()
}

fn default_target() -> String {
    "ledger.out".to_string()
}

pub fn load_config() -> Result<Config, ChainError> {
    let config_str = fs::read_to_string("config.toml").unwrap_or_default();
    let config: Config = if config_str.is_empty() {
        // Provide sane defaults when config.toml is absent
        Config {
            files: FilesConfig::default(),
        }
    } else {
        toml::from_str(&config_str)?
    };

    // Validate critical values
    if config.files.source.is_empty() {
        return Err(ChainError::ConfigError(
            "files.source must be set in config.toml".to_string(),
        ));
    }

    if config.files.target.is_empty() {
        return Err(ChainError::ConfigError(
            "files.target must be set in config.toml".to_string(),
        ));
    }

    Ok(config)
}
