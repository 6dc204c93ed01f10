//! Error types for sweeplab
//!
//! Backend failures are carried as opaque strings: the library never
//! rewrites or classifies them (see [`crate::dashboard::FailureKind`] for the
//! display-side classification).

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// sweeplab error types
#[derive(Error, Debug)]
pub enum Error {
    /// Sweep bounds rejected before generation (`min >= max` or out of domain)
    #[error("Invalid range for {parameter}: {reason}")]
    InvalidRange {
        /// Parameter name (e.g. "temperature")
        parameter: String,
        /// Why the range was rejected
        reason: String,
    },

    /// Invalid caller input (blank prompt, out-of-domain token budget, ...)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Experiment id not known to the store/backend
    #[error("Experiment not found: {0}")]
    NotFound(String),

    /// Backend reported a failure; the message is passed through unmodified
    #[error("{0}")]
    Backend(String),

    /// Configuration error (bad URL, bad timeout)
    #[error("Configuration error: {0}")]
    Config(String),

    /// HTTP transport error
    #[cfg(feature = "client")]
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV serialization error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Build an [`Error::InvalidRange`] for the named parameter.
    pub fn invalid_range(parameter: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidRange {
            parameter: parameter.into(),
            reason: reason.into(),
        }
    }
}
