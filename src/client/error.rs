//! Typed errors for backend calls.
//!
//! Every service call returns one of these instead of logging and
//! swallowing; how a failure is presented is the caller's decision.

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out after {0}s")]
    Timeout(u64),

    #[error("Not found: {0}")]
    NotFound(String),

    /// Any other 4xx — the request was understood and rejected.
    #[error("Request rejected ({status}): {message}")]
    Validation { status: u16, message: String },

    #[error("Server error ({status}): {body}")]
    Server { status: u16, body: String },

    #[error("Malformed response: {0}")]
    Decode(String),

    #[error("Operation cancelled")]
    Cancelled,

    #[error("Case is not persisted yet; save it before attaching evidence")]
    UnsavedCase,

    #[error("Failed to read file: {0}")]
    File(#[from] std::io::Error),
}

impl ApiError {
    /// Map a transport-level reqwest failure, discriminating timeout
    /// and connection loss from other I/O.
    pub(crate) fn from_reqwest(err: reqwest::Error, timeout_secs: u64) -> Self {
        if err.is_timeout() {
            ApiError::Timeout(timeout_secs)
        } else if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound(_))
    }
}
