// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Unauthorized: {0}")]
    Unauthorized(&'static str),

    #[error("Forbidden: {0}")]
    Forbidden(&'static str),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("OAuth provider error: {0}")]
    OAuth(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// JSON error response body.
#[derive(Serialize)]
struct ErrorResponse {
    success: bool,
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            AppError::Unauthorized(msg) => {
                (StatusCode::UNAUTHORIZED, "unauthorized", Some(msg.to_string()))
            }
            AppError::Forbidden(msg) => {
                (StatusCode::FORBIDDEN, "forbidden", Some(msg.to_string()))
            }
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "bad_request", Some(msg.clone()))
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", Some(msg.clone())),
            AppError::OAuth(msg) => (StatusCode::BAD_GATEWAY, "oauth_error", Some(msg.clone())),
            AppError::Database(msg) => {
                tracing::error!(error = %msg, "Database error");
                // The store error is surfaced to the caller; the frontend
                // shows it verbatim.
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "database_error",
                    Some(msg.clone()),
                )
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", None)
            }
        };

        let body = ErrorResponse {
            success: false,
            error: error.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (
                AppError::Unauthorized("no session"),
                StatusCode::UNAUTHORIZED,
            ),
            (AppError::Forbidden("bad key"), StatusCode::FORBIDDEN),
            (
                AppError::BadRequest("missing field".into()),
                StatusCode::BAD_REQUEST,
            ),
            (
                AppError::NotFound("Record not found".into()),
                StatusCode::NOT_FOUND,
            ),
            (AppError::OAuth("exchange failed".into()), StatusCode::BAD_GATEWAY),
            (
                AppError::Database("no connection".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }

    #[tokio::test]
    async fn test_error_envelope_shape() {
        let response = AppError::Forbidden("Invalid API key").into_response();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "forbidden");
        assert_eq!(body["details"], "Invalid API key");
    }

    #[tokio::test]
    async fn test_internal_error_hides_details() {
        let response = AppError::Internal(anyhow::anyhow!("secret path /etc/thing")).into_response();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(body["error"], "internal_error");
        assert!(body.get("details").is_none());
    }
}
