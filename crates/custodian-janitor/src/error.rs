//! Error types for sweep operations

use thiserror::Error;

/// Errors that can occur when configuring or starting the sweep worker
#[derive(Error, Debug)]
pub enum JanitorError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Failed to read a configuration file
    #[error("Config file error: {0}")]
    ConfigFile(#[from] std::io::Error),

    /// Failed to parse a configuration file
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),
}
