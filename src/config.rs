//! Application configuration loaded from environment variables.
//!
//! Every knob has a development fallback except the Google OAuth
//! credentials, which have no sane default. Fallback secrets log a
//! warning so they never ship to production unnoticed.

use std::env;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// MongoDB connection string (database name taken from the URI path)
    pub mongodb_uri: String,
    /// Secret for session-cookie and OAuth-state signing
    pub session_secret: String,
    /// Google OAuth client ID (public)
    pub google_client_id: String,
    /// Google OAuth client secret
    pub google_client_secret: String,
    /// Static API key required on data routes (x-api-key header)
    pub api_key: String,
    /// Frontend origin for OAuth redirects and CORS
    pub frontend_url: String,
    /// Server port
    pub port: u16,
}

const DEV_SESSION_SECRET: &str = "dev-session-secret-change-this";
const DEV_API_KEY: &str = "dev-api-key-12345";

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Reads a `.env` file first if one is present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let session_secret = env::var("SESSION_SECRET").unwrap_or_else(|_| {
            tracing::warn!("SESSION_SECRET not set, using development fallback");
            DEV_SESSION_SECRET.to_string()
        });
        let api_key = env::var("API_KEY").unwrap_or_else(|_| {
            tracing::warn!("API_KEY not set, using development fallback");
            DEV_API_KEY.to_string()
        });

        Ok(Self {
            mongodb_uri: env::var("MONGODB_URI")
                .unwrap_or_else(|_| "mongodb://localhost:27017/weather-covid-db".to_string()),
            session_secret,
            google_client_id: env::var("GOOGLE_CLIENT_ID")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("GOOGLE_CLIENT_ID"))?,
            google_client_secret: env::var("GOOGLE_CLIENT_SECRET")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("GOOGLE_CLIENT_SECRET"))?,
            api_key,
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "5000".to_string())
                .parse()
                .unwrap_or(5000),
        })
    }

    /// Default config for testing only.
    pub fn test_default() -> Self {
        Self {
            mongodb_uri: "mongodb://localhost:27017/weather-covid-test".to_string(),
            session_secret: "test_session_secret_32_bytes_min!".to_string(),
            google_client_id: "test_client_id".to_string(),
            google_client_secret: "test_client_secret".to_string(),
            api_key: "test-api-key".to_string(),
            frontend_url: "http://localhost:3000".to_string(),
            port: 5000,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}
