use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Main application error type that encompasses all possible failure modes
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("validation timed out after {timeout:?}: {file}")]
    Timeout { file: PathBuf, timeout: Duration },

    #[error("validation engine error: {output}")]
    ProcessError { output: String },

    #[error("no <{tag}> element found in engine output")]
    MalformedOutput { tag: String },

    #[error("malformed validation report: {details}")]
    MalformedReport { details: String },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("concurrent operation error: {details}")]
    Concurrency { details: String },
}

impl ValidationError {
    /// Check whether this error is the engine exceeding its wall-clock budget.
    ///
    /// The job layer maps timeouts to a status distinct from every other
    /// failure, so this is the one kind callers branch on.
    pub fn is_timeout(&self) -> bool {
        matches!(self, ValidationError::Timeout { .. })
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, ValidationError>;
