// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Static API-key middleware.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use subtle::ConstantTimeEq;

use crate::error::AppError;
use crate::AppState;

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Middleware that requires the configured API key in `x-api-key`.
///
/// Missing header and wrong key are distinct failures: 401 for "no
/// credential supplied", 403 for "credential supplied but invalid".
pub async fn require_api_key(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let supplied = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or(AppError::Unauthorized(
            "API key is required in x-api-key header",
        ))?;

    // Constant-time comparison; ct_eq is false on length mismatch.
    let matches: bool = supplied
        .as_bytes()
        .ct_eq(state.config.api_key.as_bytes())
        .into();

    if !matches {
        return Err(AppError::Forbidden("Invalid API key"));
    }

    Ok(next.run(request).await)
}
