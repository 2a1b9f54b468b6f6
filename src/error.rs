//! Gateway error types with HTTP status code mapping.
//!
//! [`GatewayError`] is the central error type for the gateway. Each variant
//! maps to a specific HTTP status code and structured JSON error response.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::StudentId;
use crate::summarizer::SummarizerError;

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 2001,
///     "message": "student not found: 7"
///   }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Numeric error code (see code ranges on [`GatewayError`]).
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
}

/// Server-side error enum with HTTP status code mapping.
///
/// # Error Code Ranges
///
/// | Range     | Category        | HTTP Status                |
/// |-----------|-----------------|----------------------------|
/// | 1000–1999 | Validation      | 400 Bad Request            |
/// | 2000–2999 | Not Found       | 404 Not Found              |
/// | 3000–3999 | Server          | 500 / 502                  |
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Student with the given ID was not found.
    #[error("student not found: {0}")]
    StudentNotFound(StudentId),

    /// Request payload or path could not be decoded.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Snapshot read or write failed. A mutation that returns this error
    /// has not been applied.
    #[error("persistence error: {0}")]
    PersistenceError(String),

    /// The summarization collaborator failed, timed out, or returned a
    /// payload without the expected text.
    #[error("summary unavailable: {0}")]
    SummaryUnavailable(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl GatewayError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::InvalidRequest(_) => 1001,
            Self::StudentNotFound(_) => 2001,
            Self::Internal(_) => 3000,
            Self::PersistenceError(_) => 3001,
            Self::SummaryUnavailable(_) => 3002,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::StudentNotFound(_) => StatusCode::NOT_FOUND,
            Self::PersistenceError(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::SummaryUnavailable(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl From<SummarizerError> for GatewayError {
    fn from(err: SummarizerError) -> Self {
        Self::SummaryUnavailable(err.to_string())
    }
}

impl From<JsonRejection> for GatewayError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidRequest(rejection.body_text())
    }
}

impl From<PathRejection> for GatewayError {
    fn from(rejection: PathRejection) -> Self {
        Self::InvalidRequest(rejection.body_text())
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message: self.to_string(),
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_404() {
        let err = GatewayError::StudentNotFound(StudentId::new(7));
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.error_code(), 2001);
        assert_eq!(err.to_string(), "student not found: 7");
    }

    #[test]
    fn persistence_and_summary_are_distinct_server_errors() {
        let persistence = GatewayError::PersistenceError("disk full".to_string());
        let summary = GatewayError::SummaryUnavailable("timeout".to_string());
        assert_eq!(persistence.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(summary.status_code(), StatusCode::BAD_GATEWAY);
        assert_ne!(persistence.error_code(), summary.error_code());
    }

    #[test]
    fn summarizer_error_becomes_summary_unavailable() {
        let err: GatewayError = SummarizerError::InvalidResponse("no text".to_string()).into();
        assert!(matches!(err, GatewayError::SummaryUnavailable(_)));
    }

    #[test]
    fn into_response_sets_status() {
        let response = GatewayError::InvalidRequest("bad".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn error_body_carries_code_and_message_only() {
        let err = GatewayError::StudentNotFound(StudentId::new(3));
        let body = ErrorResponse {
            error: ErrorBody {
                code: err.error_code(),
                message: err.to_string(),
            },
        };
        let Ok(json) = serde_json::to_value(&body) else {
            panic!("error body should serialize");
        };
        assert_eq!(
            json,
            serde_json::json!({"error": {"code": 2001, "message": "student not found: 3"}})
        );
    }
}
