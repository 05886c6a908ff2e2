//! Client error types

use shared::ValidationError;
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed before a response arrived
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with an error body
    #[error("{message}")]
    Api {
        status: u16,
        code: Option<String>,
        message: String,
        details: Option<String>,
    },

    /// Authentication required or session rejected
    #[error("Authentication required: {0}")]
    Unauthorized(String),

    /// Permission denied
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Input rejected before the request was sent
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Missing or malformed configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Sign-in rejected
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// File stored but its gallery row was never written
    #[error("Image stored at '{path}' but its gallery entry could not be saved: {reason}")]
    OrphanedUpload { path: String, reason: String },

    /// Request abandoned because its owner was torn down
    #[error("Request cancelled")]
    Cancelled,

    /// Anything else
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ClientError {
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound(resource.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// True for the partial gallery upload state
    pub fn is_orphaned_upload(&self) -> bool {
        matches!(self, Self::OrphanedUpload { .. })
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
