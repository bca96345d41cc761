//! Core configuration types.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use super::defaults::default_numeric;
use super::links::UplinkBlock;
use super::services::ServicesConfig;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Link configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Our own server identity.
    pub server: ServerConfig,
    /// The uplink we connect to.
    pub uplink: UplinkBlock,
    #[serde(default)]
    pub services: ServicesConfig,
    #[serde(default)]
    pub network: NetworkConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

/// Server identity configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Server name (e.g., "services.example.net").
    pub name: String,
    /// Server description shown in SERVER.
    pub description: String,
    /// Server token placed in NICK introductions.
    #[serde(default = "default_numeric")]
    pub numeric: String,
}

/// Network-wide settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NetworkConfig {
    /// Top-level domains a `*` global message is fanned out to (".org", ".net").
    #[serde(default)]
    pub tlds: Vec<String>,
}
