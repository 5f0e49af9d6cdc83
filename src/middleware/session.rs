// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session authentication middleware.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;

use crate::error::AppError;
use crate::models::SessionUser;
use crate::session::SESSION_COOKIE;
use crate::AppState;

/// Authenticated user extracted from the session, inserted as a request
/// extension for handlers behind the gate.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user: SessionUser,
    pub session_id: String,
}

/// Middleware that requires a live authenticated session.
pub async fn require_session(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let session_id = jar
        .get(SESSION_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .ok_or(AppError::Unauthorized("User not authenticated"))?;

    let session = state
        .sessions
        .get(&session_id)
        .await?
        .ok_or(AppError::Unauthorized("User not authenticated"))?;

    request.extensions_mut().insert(CurrentUser {
        user: session.user,
        session_id,
    });

    Ok(next.run(request).await)
}
