//! Error types for tweetswarm-core
//!
//! A render pass itself never fails. Errors come from the edges:
//! - Dataset ingestion
//! - Configuration loading
//! - Scene export

use std::path::PathBuf;
use thiserror::Error;
use tweetswarm_io::IngestionError;

/// Main error type for tweetswarm operations
#[derive(Error, Debug)]
pub enum SwarmError {
    /// Dataset ingestion errors; the current dataset is left untouched
    #[error("Failed to load dataset: {0}")]
    Ingestion(#[from] IngestionError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Export errors
    #[error("Export failed: {0}")]
    Export(#[from] ExportError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors related to configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("Cannot read config file {path}: {message}")]
    Read { path: PathBuf, message: String },

    /// TOML parse error
    #[error("TOML parse error: {0}")]
    Parse(String),

    /// A value is outside its allowed range
    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

/// Errors related to export
#[derive(Error, Debug)]
pub enum ExportError {
    /// Unknown export format name
    #[error("Unsupported export format: {0}")]
    UnsupportedFormat(String),

    /// Serialization failed
    #[error("Serialization failed: {0}")]
    Serialize(String),

    /// Output could not be written
    #[error("Cannot write {path}: {message}")]
    Write { path: PathBuf, message: String },
}

/// Result type alias for tweetswarm operations
pub type SwarmResult<T> = Result<T, SwarmError>;

/// Result type alias for config operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Result type alias for export operations
pub type ExportResult<T> = Result<T, ExportError>;

/// Validation utilities
pub mod validation {
    use super::*;

    /// Validate that a value is finite and strictly positive
    pub fn validate_positive(field: &str, value: f64) -> ConfigResult<()> {
        if !value.is_finite() || value <= 0.0 {
            return Err(ConfigError::InvalidValue {
                field: field.to_string(),
                message: format!("must be a positive number, got {}", value),
            });
        }
        Ok(())
    }

    /// Validate that a value is finite and not negative
    pub fn validate_non_negative(field: &str, value: f64) -> ConfigResult<()> {
        if !value.is_finite() || value < 0.0 {
            return Err(ConfigError::InvalidValue {
                field: field.to_string(),
                message: format!("must be zero or positive, got {}", value),
            });
        }
        Ok(())
    }

    /// Validate that a value lies in [0, 1]
    pub fn validate_unit_interval(field: &str, value: f64) -> ConfigResult<()> {
        if !(0.0..=1.0).contains(&value) {
            return Err(ConfigError::InvalidValue {
                field: field.to_string(),
                message: format!("must be within [0, 1], got {}", value),
            });
        }
        Ok(())
    }
}
