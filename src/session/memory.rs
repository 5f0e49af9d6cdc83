// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory session store.
//!
//! Single-process only; a deployment spanning more than one instance
//! needs an external backend behind the same [`SessionStore`] trait.

use async_trait::async_trait;
use dashmap::DashMap;

use crate::error::AppError;
use crate::session::{Session, SessionStore};

/// DashMap-backed session store. Expired sessions are evicted lazily on
/// lookup.
#[derive(Default)]
pub struct MemorySessionStore {
    sessions: DashMap<String, Session>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn insert(&self, id: String, session: Session) -> Result<(), AppError> {
        self.sessions.insert(id, session);
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<Session>, AppError> {
        let Some(entry) = self.sessions.get(id) else {
            return Ok(None);
        };

        if entry.is_expired() {
            drop(entry);
            self.sessions.remove(id);
            return Ok(None);
        }

        Ok(Some(entry.clone()))
    }

    async fn remove(&self, id: &str) -> Result<(), AppError> {
        self.sessions.remove(id);
        Ok(())
    }
}
