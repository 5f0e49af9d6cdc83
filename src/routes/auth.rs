// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Google OAuth authentication routes.

use axum::{
    extract::{Query, State},
    response::Redirect,
    routing::get,
    Json, Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::{AppError, Result};
use crate::models::SessionUser;
use crate::session::{generate_session_id, Session, SESSION_COOKIE};
use crate::AppState;

// Type alias for HMAC-SHA256
type HmacSha256 = Hmac<Sha256>;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/google", get(auth_start))
        .route("/auth/google/callback", get(auth_callback))
        .route("/auth/logout", get(logout))
        .route("/auth/user", get(current_user))
}

/// Query parameters for starting the OAuth flow.
#[derive(Deserialize)]
pub struct AuthStartParams {
    /// Frontend URL to redirect back to after OAuth completes.
    /// If not provided, uses the configured frontend URL.
    #[serde(default)]
    redirect_uri: Option<String>,
}

/// Start OAuth flow - redirect to Google authorization.
async fn auth_start(
    State(state): State<Arc<AppState>>,
    Query(params): Query<AuthStartParams>,
    headers: axum::http::HeaderMap,
) -> Result<Redirect> {
    let frontend_url = params
        .redirect_uri
        .unwrap_or_else(|| state.config.frontend_url.clone());

    let oauth_state = sign_state(&frontend_url, state.config.session_secret.as_bytes())?;
    let callback_url = callback_url_from_headers(&headers);

    let auth_url = state.google.authorize_url(&callback_url, &oauth_state);

    tracing::info!(
        frontend_url = %frontend_url,
        "Starting OAuth flow, redirecting to Google"
    );

    Ok(Redirect::temporary(&auth_url))
}

#[derive(Deserialize)]
pub struct CallbackParams {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    state: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// OAuth callback - exchange the code, store the profile in a new
/// session, redirect to the frontend.
///
/// Provider errors and exchange failures redirect to the login-failure
/// path rather than rendering JSON: the browser is mid-flow here.
async fn auth_callback(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    headers: axum::http::HeaderMap,
    Query(params): Query<CallbackParams>,
) -> Result<(CookieJar, Redirect)> {
    // Decode and verify the frontend URL from the state parameter
    let frontend_url = params
        .state
        .as_deref()
        .and_then(|s| verify_and_decode_state(s, state.config.session_secret.as_bytes()))
        .unwrap_or_else(|| {
            tracing::warn!(
                "Invalid or tampered state parameter, falling back to default frontend URL"
            );
            state.config.frontend_url.clone()
        });

    if let Some(error) = params.error {
        tracing::warn!(error = %error, "OAuth error from Google");
        return Ok((jar, login_failure_redirect(&frontend_url, &error)));
    }

    let Some(code) = params.code else {
        tracing::warn!("OAuth callback without authorization code");
        return Ok((jar, login_failure_redirect(&frontend_url, "missing_code")));
    };

    tracing::info!("Exchanging authorization code for tokens");

    let callback_url = callback_url_from_headers(&headers);

    let user = match login_user(&state, &code, &callback_url).await {
        Ok(user) => user,
        Err(e) => {
            tracing::warn!(error = %e, "OAuth login failed");
            return Ok((jar, login_failure_redirect(&frontend_url, "login_failed")));
        }
    };

    let session_id = generate_session_id()?;
    state
        .sessions
        .insert(session_id.clone(), Session::new(user.clone()))
        .await?;

    tracing::info!(
        user_id = %user.id,
        display_name = %user.display_name,
        "OAuth successful, session created"
    );

    let cookie = Cookie::build((SESSION_COOKIE, session_id))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build();

    Ok((jar.add(cookie), Redirect::temporary(&frontend_url)))
}

/// Exchange the code and validate the provider profile.
async fn login_user(
    state: &Arc<AppState>,
    code: &str,
    callback_url: &str,
) -> Result<SessionUser> {
    let tokens = state.google.exchange_code(code, callback_url).await?;
    let profile = state.google.fetch_profile(&tokens.access_token).await?;
    SessionUser::from_profile(profile)
}

#[derive(Serialize)]
pub struct LogoutResponse {
    pub success: bool,
    pub message: String,
}

/// Logout - destroy the session and clear the cookie.
///
/// Succeeds even when no session exists; only a session-store failure
/// surfaces as an error.
async fn logout(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<LogoutResponse>)> {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        state.sessions.remove(cookie.value()).await?;
    }

    let removal = Cookie::build((SESSION_COOKIE, "")).path("/").build();

    Ok((
        jar.remove(removal),
        Json(LogoutResponse {
            success: true,
            message: "Logged out successfully".to_string(),
        }),
    ))
}

/// Current user response.
#[derive(Serialize)]
pub struct UserResponse {
    pub success: bool,
    pub user: UserView,
}

/// Normalized view of the session user.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub id: String,
    pub display_name: String,
    pub email: Option<String>,
    pub photo: Option<String>,
}

/// Get the current authenticated user.
async fn current_user(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> Result<Json<UserResponse>> {
    let session_id = jar
        .get(SESSION_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .ok_or(AppError::Unauthorized("Not authenticated"))?;

    let session = state
        .sessions
        .get(&session_id)
        .await?
        .ok_or(AppError::Unauthorized("Not authenticated"))?;

    let user = session.user;
    Ok(Json(UserResponse {
        success: true,
        user: UserView {
            id: user.id.clone(),
            display_name: user.display_name.clone(),
            email: user.primary_email().map(str::to_string),
            photo: user.primary_photo().map(str::to_string),
        },
    }))
}

/// Callback URL derived from the request Host header.
fn callback_url_from_headers(headers: &axum::http::HeaderMap) -> String {
    let host = headers
        .get(axum::http::header::HOST)
        .and_then(|h| h.to_str().ok())
        .map(|s| s.to_string())
        .unwrap_or_else(|| {
            std::env::var("API_HOST").unwrap_or_else(|_| "localhost:5000".to_string())
        });

    let scheme = if host.contains("localhost") || host.contains("127.0.0.1") {
        "http"
    } else {
        "https"
    };

    format!("{}://{}/auth/google/callback", scheme, host)
}

fn login_failure_redirect(frontend_url: &str, error: &str) -> Redirect {
    let redirect = format!(
        "{}/login?error={}",
        frontend_url,
        urlencoding::encode(error)
    );
    Redirect::temporary(&redirect)
}

/// Sign the frontend URL + current timestamp into an OAuth state value.
fn sign_state(frontend_url: &str, secret: &[u8]) -> Result<String> {
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("System time error: {}", e)))?
        .as_millis();

    // Data payload: "frontend_url|timestamp_hex"
    let payload = format!("{}|{:x}", frontend_url, timestamp);

    let mut mac = HmacSha256::new_from_slice(secret)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("HMAC init failed: {}", e)))?;
    mac.update(payload.as_bytes());
    let signature = mac.finalize().into_bytes();

    // "payload|signature_hex", base64url-encoded for the URL
    let signed = format!("{}|{}", payload, hex::encode(signature));
    Ok(URL_SAFE_NO_PAD.encode(signed.as_bytes()))
}

/// Verify the HMAC signature and decode the frontend URL from the OAuth
/// state parameter.
fn verify_and_decode_state(state: &str, secret: &[u8]) -> Option<String> {
    let bytes = URL_SAFE_NO_PAD.decode(state).ok()?;
    let state_str = String::from_utf8(bytes).ok()?;

    // Format is "frontend_url|timestamp_hex|signature_hex"
    let parts: Vec<&str> = state_str.splitn(3, '|').collect();
    if parts.len() != 3 {
        return None;
    }

    let frontend_url = parts[0];
    let timestamp_hex = parts[1];
    let signature_hex = parts[2];

    let payload = format!("{}|{}", frontend_url, timestamp_hex);

    let mut mac = HmacSha256::new_from_slice(secret).ok()?;
    mac.update(payload.as_bytes());

    let expected_signature = hex::encode(mac.finalize().into_bytes());

    if signature_hex != expected_signature {
        tracing::error!("OAuth state signature mismatch! Potential tampering.");
        return None;
    }

    Some(frontend_url.to_string())
}
