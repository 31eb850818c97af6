//! CLI error types.

use std::path::PathBuf;

use thiserror::Error;
use vantage_core::RiskError;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid date format.
    #[error("Invalid date format: {0}. Use YYYY-MM-DD.")]
    InvalidDate(String),

    /// Weights could not be parsed.
    #[error("Invalid weights '{0}'. Use 0.6,0.4 or AAA=0.6,BBB=0.4.")]
    InvalidWeights(String),

    /// Stress scenario could not be parsed.
    #[error("Invalid scenario '{0}'. Use comma-separated returns in ticker order, e.g. -0.2,-0.05.")]
    InvalidScenario(String),

    /// Price file is malformed.
    #[error("Invalid price file {}: {reason}", path.display())]
    PriceFile {
        /// Path of the price file.
        path: PathBuf,
        /// What is wrong with it.
        reason: String,
    },

    /// Refusing to replace an existing file.
    #[error("{} already exists (use --force to overwrite)", .0.display())]
    FileExists(PathBuf),

    /// CSV reading or writing failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Risk calculation error.
    #[error(transparent)]
    Risk(#[from] RiskError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
