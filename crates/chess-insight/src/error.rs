//! Error types for analysis and configuration loading.

use chess_rules::PositionError;
use thiserror::Error;

/// Errors that abort an analysis. No partial result is ever returned.
#[derive(Error, Debug, PartialEq)]
pub enum AnalysisError {
    /// The notation could not be parsed or describes an illegal position.
    #[error("Invalid position: {0}")]
    InvalidPosition(#[from] PositionError),
    /// A programming defect, such as a weight table missing a criterion.
    #[error("Internal invariant violated: {0}")]
    InternalInvariant(String),
}

/// Errors that can occur when loading or validating an evaluation config.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse the configuration file as valid TOML.
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    /// A value parsed but is out of range.
    #[error("Invalid config value: {0}")]
    InvalidValue(String),
}
