//! Error types for the gateway.
//!
//! Every failure that can reach an HTTP caller is an [`ApiError`]. The variant decides the
//! status code and the `detail` message rendered in the response body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use log::error;
use serde_json::json;
use thiserror::Error;

/// Result type alias for gateway operations.
pub type Result<T> = std::result::Result<T, ApiError>;

/// Errors surfaced to callers of the proxy endpoints.
///
/// Status codes are stored as raw `u16` values so upstream codes can be relayed verbatim.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The OAuth token endpoint answered with something other than 200.
    #[error("Failed to fetch access token")]
    Authentication { status: u16 },

    /// The upstream API answered with a business error.
    #[error("{message}")]
    Upstream { status: u16, message: String },

    /// Connection error, timeout, or any other failure before a response arrived.
    #[error("Request failed: {0}")]
    Transport(String),

    /// The upstream answered but the payload could not be understood.
    #[error("Invalid upstream response: {0}")]
    InvalidResponse(String),
}

impl ApiError {
    /// The HTTP status code returned to the caller for this error.
    pub fn status_code(&self) -> StatusCode {
        let code = match self {
            ApiError::Authentication { status } | ApiError::Upstream { status, .. } => *status,
            ApiError::Transport(_) => 500,
            ApiError::InvalidResponse(_) => 502,
        };
        StatusCode::from_u16(code).unwrap_or(StatusCode::BAD_GATEWAY)
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::InvalidResponse(err.to_string())
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::InvalidResponse(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!("Responding with {}: {}", status, self);
        }
        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}

/// Errors raised by the CSV export.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Unexpected search payload: {0}")]
    Payload(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
