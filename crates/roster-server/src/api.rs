//! Wire types for the employee API and the mapping from [`roster_core::Error`]
//! to HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use roster_core::Error;

/// Message returned after a successful delete.
pub const DELETED_MESSAGE: &str = "Employee deleted successfully";

/// Error body: `{"error": {"message", "type", "code"}}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error details.
    pub error: ErrorDetail,
}

/// Error details.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Human-readable message.
    pub message: String,
    /// Error class (`invalid_request_error`, `conflict_error`, ...).
    #[serde(rename = "type")]
    pub error_type: String,
    /// Machine-readable code, if any.
    pub code: Option<String>,
}

impl ErrorResponse {
    /// Creates an error body.
    pub fn new(message: impl Into<String>, error_type: impl Into<String>) -> Self {
        Self {
            error: ErrorDetail {
                message: message.into(),
                error_type: error_type.into(),
                code: None,
            },
        }
    }

    /// Attaches a machine-readable code.
    #[must_use]
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.error.code = Some(code.into());
        self
    }
}

/// Builds a JSON error response.
pub fn error_response(status: StatusCode, body: ErrorResponse) -> Response {
    (status, Json(body)).into_response()
}

/// Body returned by `DELETE /api/employees/:id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteResponse {
    /// Confirmation text.
    pub message: String,
}

impl Default for DeleteResponse {
    fn default() -> Self {
        Self {
            message: DELETED_MESSAGE.to_string(),
        }
    }
}

/// Body returned by `GET /api/status`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerStatus {
    /// Always `"running"`.
    pub status: String,
    /// Seconds since the server started.
    pub uptime_seconds: u64,
    /// Number of employees, or `None` if the store could not be queried.
    pub employee_count: Option<u64>,
}

/// A failed API operation.
///
/// Client errors are reported as-is. Anything else is logged and replaced by
/// a generic message naming the failed action, so store details never reach
/// the client.
#[derive(Debug)]
pub struct ApiError {
    action: &'static str,
    error: Error,
}

impl ApiError {
    /// Wraps `error` raised while performing `action` (e.g. `"create employee"`).
    pub fn new(action: &'static str, error: Error) -> Self {
        Self { action, error }
    }

    /// Returns a closure suitable for `map_err`.
    pub fn during(action: &'static str) -> impl Fn(Error) -> Self {
        move |error| Self::new(action, error)
    }

    /// HTTP status for this error.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match &self.error {
            Error::Validation { .. } | Error::InvalidRequest { .. } => StatusCode::BAD_REQUEST,
            Error::Conflict { .. } => StatusCode::CONFLICT,
            Error::NotFound { .. } => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// JSON body for this error.
    #[must_use]
    pub fn body(&self) -> ErrorResponse {
        match &self.error {
            Error::Validation { message } => {
                ErrorResponse::new(message.clone(), "invalid_request_error")
                    .with_code("validation_failed")
            },
            Error::InvalidRequest { message } => {
                ErrorResponse::new(message.clone(), "invalid_request_error")
                    .with_code("malformed_request")
            },
            Error::Conflict { .. } => {
                ErrorResponse::new("Email already exists", "conflict_error")
                    .with_code("email_taken")
            },
            Error::NotFound { .. } => {
                ErrorResponse::new("Employee not found", "not_found_error")
                    .with_code("employee_not_found")
            },
            _ => ErrorResponse::new(format!("Failed to {}", self.action), "server_error"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(action = self.action, error = %self.error, "Request failed");
        } else {
            tracing::debug!(action = self.action, error = %self.error, status = %status, "Request rejected");
        }
        error_response(status, self.body())
    }
}
