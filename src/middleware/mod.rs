// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Middleware modules (API key, session authentication, security headers).

pub mod api_key;
pub mod security;
pub mod session;

pub use api_key::require_api_key;
pub use session::{require_session, CurrentUser};
