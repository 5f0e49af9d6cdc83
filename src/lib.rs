// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Weather-Covid API: aggregated per-country weather and pandemic stats.
//!
//! This crate provides the backend API for submitting and retrieving
//! per-user observation records, gated behind an API key and a
//! Google-OAuth browser session.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod session;

use std::sync::Arc;

use config::Config;
use db::RecordStore;
use services::GoogleOAuthClient;
use session::SessionStore;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub store: RecordStore,
    pub sessions: Arc<dyn SessionStore>,
    pub google: GoogleOAuthClient,
}
