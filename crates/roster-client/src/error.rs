//! Client error types.

use http::header::InvalidHeaderValue;
use http::StatusCode;
use thiserror::Error;

use crate::storage::StorageError;

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Message shown to the user on any login failure. The underlying cause is
/// logged, never returned.
pub const LOGIN_FAILED_MESSAGE: &str = "Login failed. Please check your credentials.";

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("{}", LOGIN_FAILED_MESSAGE)]
    Authentication,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("request failed with status {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("credential storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("invalid authorization header: {0}")]
    InvalidHeader(#[from] InvalidHeaderValue),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl ClientError {
    /// Status code of the failed response, when the server answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            ClientError::Http(e) => e.status(),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(StatusCode::UNAUTHORIZED)
    }
}
