// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Weather-Covid API Server
//!
//! Aggregates per-country weather and pandemic statistics submitted by
//! authenticated users, persisted per user in MongoDB.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use weather_covid_api::{
    config::Config,
    db::RecordStore,
    services::GoogleOAuthClient,
    session::{MemorySessionStore, SessionStore},
    AppState,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(port = config.port, "Starting Weather-Covid API");

    // Connect the record store
    let store = RecordStore::connect(&config.mongodb_uri)
        .await
        .expect("Failed to connect to MongoDB");

    // In-memory session store; swap for an external KV backend behind
    // the same trait when running more than one instance.
    let sessions: Arc<dyn SessionStore> = Arc::new(MemorySessionStore::new());

    let google = GoogleOAuthClient::new(
        config.google_client_id.clone(),
        config.google_client_secret.clone(),
    );

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        store,
        sessions,
        google,
    });

    // Build router
    let app = weather_covid_api::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("weather_covid_api=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
