//! Error Types

use thiserror::Error;

/// Failures talking to the remote API
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// Connection refused, DNS failure, CORS rejection...
    #[error("Network error: {0}")]
    Transport(String),

    #[error("Request timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u32 },

    /// 401 from the server. The session has already been cleared.
    #[error("Session expired, please log in again")]
    Unauthorized,

    #[error("Request failed (HTTP {status}): {message}")]
    Status { status: u16, message: String },

    #[error("Unexpected response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Message suitable for an inline banner: the server's own text when it
    /// sent one, a generic line otherwise
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Status { message, .. } if !message.trim().is_empty() => message.clone(),
            ApiError::Status { .. } => fallback.to_string(),
            other => other.to_string(),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}

/// Failures reaching browser storage
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    #[error("Web storage API is unavailable")]
    Unavailable,

    #[error("Web storage error: {0}")]
    Js(String),

    #[error("Failed to serialize stored value: {0}")]
    Serialize(String),
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::Serialize(err.to_string())
    }
}
