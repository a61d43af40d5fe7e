//! Error type for document service requests.

use thiserror::Error;

/// Errors surfaced by [`DocumentApi`](super::DocumentApi) calls.
///
/// Kept `Clone` so request outcomes can travel through the UI event
/// channel and be compared in tests.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Network unreachable, connection reset, timeout, etc.
    #[error("request failed: {0}")]
    Transport(String),

    /// The service answered with a non-2xx status.
    #[error("server returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body was not the expected JSON shape.
    #[error("failed to decode response: {0}")]
    Decode(String),

    /// The file selected for upload could not be read.
    #[error("cannot read {path}: {message}")]
    File { path: String, message: String },

    /// The configured base URL cannot address the service.
    #[error("invalid base URL '{url}': {message}")]
    InvalidBaseUrl { url: String, message: String },
}

impl ApiError {
    /// Whether the service itself reported the failure (non-2xx status).
    pub fn is_status(&self) -> bool {
        matches!(self, Self::Status { .. })
    }

    /// HTTP status code, when the service answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            Self::Decode(e.to_string())
        } else {
            Self::Transport(e.to_string())
        }
    }
}

/// Result alias for document service calls.
pub type Result<T> = std::result::Result<T, ApiError>;
