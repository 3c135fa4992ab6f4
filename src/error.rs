//! Error taxonomy for split-tests
//!
//! Every error is fatal: the run aborts before any bucket is printed. Files
//! without historical timing are not errors, they are logged by the
//! aggregator and filled with the mean.

use thiserror::Error;

/// Errors that abort a split or update run
#[derive(Error, Debug)]
pub enum SplitError {
    /// Invalid flags, environment, bias declaration or config file
    #[error("{0}")]
    Configuration(String),

    /// A timing source could not be read or parsed
    #[error("{0}")]
    SourceUnavailable(String),

    /// The merged timing report could not be written
    #[error("failed to write timing report: {0}")]
    Report(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SplitError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::SourceUnavailable(msg.into())
    }

    /// True for errors the user can fix by changing flags or environment
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }
}

/// Result type for split-tests operations
pub type Result<T> = std::result::Result<T, SplitError>;
