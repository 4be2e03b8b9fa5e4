use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;

use crate::error::{Error, Result as StoreResult};

const INTERNAL_MESSAGE: &str = "Internal server error";

/// Plain `{"status": ...}` acknowledgement body.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

impl StatusResponse {
    #[must_use]
    pub fn new(status: &'static str) -> Json<Self> {
        Json(Self { status })
    }
}

/// API error that converts to a proper HTTP response
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub kind: &'static str,
    pub message: String,
}

impl ApiError {
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            kind: "invalid_input",
            message: message.into(),
        }
    }

    #[must_use]
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            kind: "unauthenticated",
            message: message.into(),
        }
    }

    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            kind: "not_found",
            message: message.into(),
        }
    }

    #[must_use]
    pub fn conflict(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::CONFLICT,
            kind: "already_exists",
            message: message.into(),
        }
    }

    /// 500 with a generic message. Details belong in the log, not the body.
    #[must_use]
    pub fn internal() -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            kind: "internal",
            message: INTERNAL_MESSAGE.to_string(),
        }
    }
}

impl ApiError {
    /// Logs the error against `operation` and hands it back. Fields recorded
    /// on the request span (request id, caller) ride along.
    #[must_use]
    pub fn logged(self, operation: &'static str) -> Self {
        if self.status.is_server_error() {
            tracing::error!(operation, status = self.status.as_u16(), "Request failed");
        } else {
            tracing::warn!(
                operation,
                status = self.status.as_u16(),
                error = self.kind,
                detail = %self.message,
                "Request rejected"
            );
        }
        self
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match err {
            Error::InvalidInput(message) => ApiError::bad_request(message),
            Error::Unauthenticated => ApiError::unauthorized("Invalid credentials"),
            Error::AlreadyExists => ApiError::conflict("Username already exists"),
            Error::NotFound => ApiError::not_found("Not found"),
            Error::Database(_) | Error::Io(_) | Error::Config(_) | Error::Hashing(_) => {
                ApiError::internal()
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = json!({ "error": self.kind, "message": self.message });
        (self.status, Json(body)).into_response()
    }
}

/// Extension trait for converting store results to API errors, logging
/// internal failures with the operation that produced them.
pub trait StoreResultExt<T> {
    fn api_err(self, operation: &'static str) -> Result<T, ApiError>;
}

impl<T> StoreResultExt<T> for StoreResult<T> {
    fn api_err(self, operation: &'static str) -> Result<T, ApiError> {
        self.map_err(|e| {
            if e.is_internal() {
                tracing::error!(operation, error = %e, "Request failed");
            } else {
                tracing::warn!(operation, error = %e, "Request rejected");
            }
            ApiError::from(e)
        })
    }
}
