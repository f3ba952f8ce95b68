//! CLI error types.

use pricer_core::types::ParameterDomainError;
use pricer_pricing::mc::{EstimationError, SampleCountError};
use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced by `mcgbm` commands.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid option parameters: {0}")]
    Parameters(#[from] ParameterDomainError),

    #[error("Invalid sample request: {0}")]
    SampleCount(#[from] SampleCountError),

    #[error("Estimation failed: {0}")]
    Estimation(#[from] EstimationError),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Validation failed: relative error {rel_error_pct:.4}% exceeds {threshold_pct}%")]
    ValidationFailed { rel_error_pct: f64, threshold_pct: f64 },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;
