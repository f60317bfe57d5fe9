//! Check error types

use oozie_client::ClientError;
use thiserror::Error;

/// Errors that abort a check run
#[derive(Debug, Error)]
pub enum CheckError {
    /// Oozie query failed
    #[error(transparent)]
    Client(#[from] ClientError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for check operations
pub type CheckResult<T> = Result<T, CheckError>;
