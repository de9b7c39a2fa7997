//! Error types for the question-answering service

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::types::response::ErrorBody;

/// Result type alias for service operations
pub type Result<T> = std::result::Result<T, Error>;

/// Service errors
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error (startup only)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Request failed validation before reaching any upstream
    #[error("{0}")]
    Validation(String),

    /// Request body could not be decoded
    #[error("{0}")]
    UnprocessableBody(String),

    /// Nothing relevant was found
    #[error("{0}")]
    NotFound(String),

    /// Vector search service error
    #[error("Vector search error: {0}")]
    VectorDb(String),

    /// Generation service error
    #[error("LLM error: {0}")]
    Llm(String),

    /// Upstream answered with a non-success status
    #[error("{service} returned {status}: {body}")]
    UpstreamStatus {
        service: &'static str,
        status: u16,
        body: String,
    },

    /// HTTP request error
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a not-found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Create a vector db error
    pub fn vector_db(message: impl Into<String>) -> Self {
        Self::VectorDb(message.into())
    }

    /// Create an LLM error
    pub fn llm(message: impl Into<String>) -> Self {
        Self::Llm(message.into())
    }

    /// Create an upstream status error, keeping only a short prefix of the body
    pub fn upstream_status(service: &'static str, status: u16, body: &str) -> Self {
        Self::UpstreamStatus {
            service,
            status,
            body: body.chars().take(300).collect(),
        }
    }

    /// HTTP status this error maps to
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::Validation(_) => StatusCode::BAD_REQUEST,
            Error::UnprocessableBody(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::VectorDb(_) | Error::UpstreamStatus { .. } | Error::Http(_) => {
                StatusCode::BAD_GATEWAY
            }
            Error::Llm(_) => StatusCode::SERVICE_UNAVAILABLE,
            Error::Config(_) | Error::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<axum::extract::rejection::JsonRejection> for Error {
    fn from(rejection: axum::extract::rejection::JsonRejection) -> Self {
        Error::UnprocessableBody(rejection.body_text())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(status = %status, "request failed: {}", self);
        }

        let body = ErrorBody {
            detail: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            Error::validation("Question cannot be empty").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            Error::not_found("No relevant articles found").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(Error::llm("down").status_code(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(
            Error::upstream_status("pinecone", 500, "boom").status_code(),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn test_client_errors_render_bare_message() {
        assert_eq!(
            Error::validation("Question cannot be empty").to_string(),
            "Question cannot be empty"
        );
        assert_eq!(
            Error::not_found("No relevant articles found").to_string(),
            "No relevant articles found"
        );
    }

    #[test]
    fn test_upstream_body_is_clipped() {
        let long = "x".repeat(1000);
        match Error::upstream_status("gemini", 429, &long) {
            Error::UpstreamStatus { body, .. } => assert_eq!(body.len(), 300),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
