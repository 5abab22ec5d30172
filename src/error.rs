//! Error types for the git sync client.
//!
//! The client defines no domain taxonomy of its own: backend failures arrive
//! as [`ApiError`] carrying whatever status, code and message the server sent.

use thiserror::Error;

/// Main error type for the git sync client.
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP transport error (connection, timeout, client construction)
    #[error("HTTP error: {0}")]
    Http(String),

    /// The backend answered with a non-2xx status or a failed envelope
    #[error(transparent)]
    Api(#[from] ApiError),

    /// JSON serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A successful envelope without a `data` payload
    #[error("Missing data in response")]
    MissingData,
}

/// Error reported by the git sync backend.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("[{status}] {code}: {message}")]
pub struct ApiError {
    /// HTTP status code of the response
    pub status: u16,
    /// Backend error code, or `UNKNOWN_ERROR` when none was sent
    pub code: String,
    /// Human readable message
    pub message: String,
}

impl ApiError {
    /// Create a new API error.
    pub fn new(status: u16, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status,
            code: code.into(),
            message: message.into(),
        }
    }

    /// 4xx responses.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status)
    }

    /// 5xx responses.
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.status)
    }

    /// Branch, application or profile was not found (404).
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status == 404
    }

    /// The backend refused because of a conflicting state, e.g. merge conflicts (409).
    #[must_use]
    pub fn is_conflict(&self) -> bool {
        self.status == 409
    }
}
