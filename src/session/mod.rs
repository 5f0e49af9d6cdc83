// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Server-side session storage.
//!
//! Sessions are keyed by a random id carried in a cookie. The store is
//! a trait object, with an in-memory map as the single-process default.

pub mod memory;

pub use memory::MemorySessionStore;

use async_trait::async_trait;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::{DateTime, Duration, Utc};
use ring::rand::{SecureRandom, SystemRandom};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::SessionUser;

/// Session cookie name.
pub const SESSION_COOKIE: &str = "wc_session";

/// How long a session lives after login.
pub const SESSION_TTL_HOURS: i64 = 24;

/// One authenticated browser session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub user: SessionUser,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Create a session expiring [`SESSION_TTL_HOURS`] from now.
    pub fn new(user: SessionUser) -> Self {
        let now = Utc::now();
        Self {
            user,
            created_at: now,
            expires_at: now + Duration::hours(SESSION_TTL_HOURS),
        }
    }

    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }
}

/// Pluggable key-value session backend.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Store a session under `id`.
    async fn insert(&self, id: String, session: Session) -> Result<(), AppError>;

    /// Fetch a live session. Expired sessions read as absent.
    async fn get(&self, id: &str) -> Result<Option<Session>, AppError>;

    /// Destroy a session. Removing an unknown id is not an error.
    async fn remove(&self, id: &str) -> Result<(), AppError>;
}

/// Generate a random 32-byte session id, base64url-encoded.
pub fn generate_session_id() -> Result<String, AppError> {
    let rng = SystemRandom::new();
    let mut bytes = [0u8; 32];
    rng.fill(&mut bytes)
        .map_err(|_| AppError::Internal(anyhow::anyhow!("system RNG failure")))?;
    Ok(URL_SAFE_NO_PAD.encode(bytes))
}
