//! Error types for the Roster directory.

use thiserror::Error;

use crate::types::EmployeeId;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for Roster.
#[derive(Error, Debug)]
pub enum Error {
    /// A required field was missing or empty.
    #[error("{message}")]
    Validation {
        /// Human-readable description of the failed check.
        message: String,
    },

    /// Another employee already uses this email.
    #[error("Email already exists: {email}")]
    Conflict {
        /// The conflicting email address.
        email: String,
    },

    /// No employee with the given id exists.
    #[error("Employee not found: {id}")]
    NotFound {
        /// The requested identifier.
        id: EmployeeId,
    },

    /// The request could not be interpreted (bad id, malformed body).
    #[error("Invalid request: {message}")]
    InvalidRequest {
        /// Description of what was wrong.
        message: String,
    },

    /// The backing store failed.
    #[error("Store error: {message}")]
    Store {
        /// Error message from the store.
        message: String,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal error (unexpected state).
    #[error("Internal error: {message}")]
    Internal {
        /// Error message.
        message: String,
    },
}

impl Error {
    /// Returns `true` if the caller caused this error and may correct it.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::Validation { .. }
                | Self::Conflict { .. }
                | Self::NotFound { .. }
                | Self::InvalidRequest { .. }
        )
    }

    /// Returns `true` if this error originates on the server side.
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        !self.is_client_error()
    }

    /// Creates a validation error with the given message.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Creates an invalid-request error with the given message.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    /// Creates a store error with the given message.
    #[must_use]
    pub fn store(message: impl Into<String>) -> Self {
        Self::Store {
            message: message.into(),
        }
    }

    /// Creates an internal error with the given message.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}
