// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use std::sync::Arc;

use weather_covid_api::config::Config;
use weather_covid_api::db::RecordStore;
use weather_covid_api::models::SessionUser;
use weather_covid_api::routes::create_router;
use weather_covid_api::services::GoogleOAuthClient;
use weather_covid_api::session::{generate_session_id, MemorySessionStore, Session, SessionStore};
use weather_covid_api::AppState;

/// Check if a MongoDB instance is available via environment variable.
#[allow(dead_code)]
pub fn mongo_available() -> bool {
    std::env::var("MONGODB_URI").is_ok()
}

/// Skip test with message if MongoDB is not available.
#[macro_export]
macro_rules! require_mongo {
    () => {
        if !crate::common::mongo_available() {
            eprintln!("⚠️  Skipping: MONGODB_URI not set");
            return;
        }
    };
}

/// Create a test app with offline mock storage.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    create_test_app_with_store(RecordStore::new_mock())
}

/// Create a test app around a specific record store.
#[allow(dead_code)]
pub fn create_test_app_with_store(store: RecordStore) -> (axum::Router, Arc<AppState>) {
    let config = Config::test_default();
    let sessions: Arc<dyn SessionStore> = Arc::new(MemorySessionStore::new());
    let google = GoogleOAuthClient::new(
        config.google_client_id.clone(),
        config.google_client_secret.clone(),
    );

    let state = Arc::new(AppState {
        config,
        store,
        sessions,
        google,
    });

    (create_router(state.clone()), state)
}

/// A session user fixture.
#[allow(dead_code)]
pub fn test_user(id: &str, email: &str) -> SessionUser {
    SessionUser {
        id: id.to_string(),
        display_name: format!("User {}", id),
        emails: vec![email.to_string()],
        photos: vec![format!("https://example.com/{}.jpg", id)],
    }
}

/// Log a user in directly through the session store, returning the
/// session id to put in the cookie.
#[allow(dead_code)]
pub async fn login_session(state: &Arc<AppState>, user: SessionUser) -> String {
    let session_id = generate_session_id().expect("session id");
    state
        .sessions
        .insert(session_id.clone(), Session::new(user))
        .await
        .expect("session insert");
    session_id
}
