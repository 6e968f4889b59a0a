//! Error type system for EduTrack
//!
//! This module provides the error taxonomy for the service with:
//! - HTTP status code mapping
//! - JSON error responses with trace IDs
//! - Store-fault detail kept out of client-visible messages

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Main error type for the EduTrack service
#[derive(Debug, thiserror::Error)]
pub enum EduError {
    // System-level errors
    #[error("System initialization failed: {0}")]
    Initialization(String),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Blocking task failed: {0}")]
    Task(String),

    // Credential verification (login): no such user or wrong password,
    // deliberately conflated into one message
    #[error("Invalid credentials")]
    InvalidCredentials,

    // Missing, malformed, expired or signature-invalid bearer token
    #[error("Authentication required: {0}")]
    Unauthenticated(String),

    // Valid token, role not in the permitted set for the route
    #[error("Access denied: {0}")]
    Forbidden(String),
}

impl EduError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            // 400 Bad Request
            EduError::InvalidCredentials => StatusCode::BAD_REQUEST,

            // 401 Unauthorized
            EduError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,

            // 403 Forbidden
            EduError::Forbidden(_) => StatusCode::FORBIDDEN,

            // 500 Internal Server Error
            EduError::Initialization(_)
            | EduError::Database(_)
            | EduError::Io(_)
            | EduError::Task(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error type name for API responses
    pub fn error_type(&self) -> &'static str {
        match self {
            EduError::Initialization(_) => "InitializationError",
            EduError::Database(_) => "StoreError",
            EduError::Io(_) => "IoError",
            EduError::Task(_) => "TaskError",
            EduError::InvalidCredentials => "InvalidCredentials",
            EduError::Unauthenticated(_) => "Unauthenticated",
            EduError::Forbidden(_) => "Forbidden",
        }
    }

    /// Client-visible message. Server-side faults collapse to a generic
    /// message; the full detail only reaches the log.
    pub fn public_message(&self) -> String {
        match self {
            EduError::Initialization(_)
            | EduError::Database(_)
            | EduError::Io(_)
            | EduError::Task(_) => "internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

/// Error response structure for API endpoints
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error type identifier
    pub error: String,
    /// Human-readable error message
    pub message: String,
    /// Unique trace ID for this error
    pub trace_id: String,
}

impl ErrorResponse {
    /// Create a new error response with a generated trace ID
    pub fn new(error: String, message: String) -> Self {
        Self {
            error,
            message,
            trace_id: Uuid::new_v4().to_string(),
        }
    }

    /// Create an error response from an EduError
    pub fn from_error(error: &EduError) -> Self {
        Self::new(error.error_type().to_string(), error.public_message())
    }
}

/// Implement IntoResponse for EduError to enable automatic error handling in Axum
impl IntoResponse for EduError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();
        let error_response = ErrorResponse::from_error(&self);

        // Full detail is logged here; the response body carries the public message
        tracing::error!(
            error_type = self.error_type(),
            trace_id = %error_response.trace_id,
            status_code = %status_code,
            "Request failed: {}",
            self
        );

        (status_code, Json(error_response)).into_response()
    }
}

/// Result type alias for operations that can fail with EduError
pub type Result<T> = std::result::Result<T, EduError>;
