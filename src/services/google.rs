// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Google OAuth 2.0 client.
//!
//! Handles:
//! - Authorization URL construction (`profile email` scopes)
//! - Authorization-code exchange at the token endpoint
//! - Userinfo profile fetch

use serde::Deserialize;

use crate::error::AppError;
use crate::models::GoogleProfile;

const AUTHORIZE_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const USERINFO_URL: &str = "https://www.googleapis.com/oauth2/v2/userinfo";

/// OAuth scopes requested at login.
const SCOPES: &str = "profile email";

/// Google OAuth client.
#[derive(Clone)]
pub struct GoogleOAuthClient {
    http: reqwest::Client,
    token_url: String,
    userinfo_url: String,
    client_id: String,
    client_secret: String,
}

impl GoogleOAuthClient {
    /// Create a new client with OAuth credentials.
    pub fn new(client_id: String, client_secret: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            token_url: TOKEN_URL.to_string(),
            userinfo_url: USERINFO_URL.to_string(),
            client_id,
            client_secret,
        }
    }

    /// Build the authorization URL the browser is redirected to.
    pub fn authorize_url(&self, redirect_uri: &str, state: &str) -> String {
        format!(
            "{}?client_id={}&redirect_uri={}&response_type=code&scope={}&state={}",
            AUTHORIZE_URL,
            urlencoding::encode(&self.client_id),
            urlencoding::encode(redirect_uri),
            urlencoding::encode(SCOPES),
            state
        )
    }

    /// Exchange an authorization code for tokens.
    pub async fn exchange_code(
        &self,
        code: &str,
        redirect_uri: &str,
    ) -> Result<GoogleTokens, AppError> {
        let response = self
            .http
            .post(&self.token_url)
            .form(&[
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("code", code),
                ("redirect_uri", redirect_uri),
                ("grant_type", "authorization_code"),
            ])
            .send()
            .await
            .map_err(|e| AppError::OAuth(format!("Token exchange request failed: {}", e)))?;

        self.check_response_json(response).await
    }

    /// Fetch the user's profile with an access token.
    pub async fn fetch_profile(&self, access_token: &str) -> Result<GoogleProfile, AppError> {
        let response = self
            .http
            .get(&self.userinfo_url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AppError::OAuth(format!("Userinfo request failed: {}", e)))?;

        self.check_response_json(response).await
    }

    /// Check response status and parse the JSON body.
    async fn check_response_json<T: for<'de> Deserialize<'de>>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, AppError> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::OAuth(format!("HTTP {}: {}", status, body)));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::OAuth(format!("JSON parse error: {}", e)))
    }
}

/// Token response from Google.
#[derive(Debug, Clone, Deserialize)]
pub struct GoogleTokens {
    pub access_token: String,
    #[serde(default)]
    pub expires_in: Option<i64>,
    #[serde(default)]
    pub id_token: Option<String>,
}
