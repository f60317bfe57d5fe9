//! Client error types

use thiserror::Error;

/// Errors raised while querying the Oozie jobs API
#[derive(Debug, Error)]
pub enum ClientError {
    /// Job type outside `wf`, `coordinator`, `bundle`
    #[error("unknown jobtype: {0}")]
    InvalidJobType(String),

    /// Network or HTTP-layer failure
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx response from the service
    #[error("API error: {status} - {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body
        message: String,
    },

    /// Body was not the JSON shape the jobs endpoint returns
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// Coordinator frequency missing, unparseable or not positive
    #[error("invalid frequency {value:?} for coordinator {coordinator}")]
    InvalidFrequency {
        /// Coordinator name as reported by the service
        coordinator: String,
        /// Raw frequency value
        value: String,
    },
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::MalformedResponse(err.to_string())
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
