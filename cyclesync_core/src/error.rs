//! Error types for the cyclesync_core library.

use chrono::NaiveDate;
use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for cyclesync_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Catalog validation error
    #[error("Catalog validation error: {0}")]
    CatalogValidation(String),

    /// Cycle start date is not before the end date
    #[error("Invalid range: start {start} must be before end {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    /// A future date was given where a past/present date is required
    #[error("Invalid date: {0} is in the future")]
    InvalidDate(NaiveDate),

    /// Key-value store read/write failure
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}
