//! User profile models for the OAuth boundary and session storage.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Raw profile as returned by Google's userinfo endpoint.
///
/// Everything except `id` is optional; the fields are validated into a
/// [`SessionUser`] before anything downstream sees them.
#[derive(Debug, Clone, Deserialize)]
pub struct GoogleProfile {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub picture: Option<String>,
}

/// Authenticated user held in the session store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionUser {
    /// Provider user id (used as record owner key)
    pub id: String,
    /// Display name
    pub display_name: String,
    /// Email addresses, primary first
    pub emails: Vec<String>,
    /// Profile photo URLs, primary first
    pub photos: Vec<String>,
}

impl SessionUser {
    /// Validate a provider profile into a session user.
    ///
    /// The id must be non-empty; the display name falls back to the
    /// email address when the provider omits a name.
    pub fn from_profile(profile: GoogleProfile) -> Result<Self, AppError> {
        if profile.id.is_empty() {
            return Err(AppError::OAuth("provider profile has no user id".to_string()));
        }

        let email = profile.email.filter(|e| !e.is_empty());

        let display_name = match profile.name.filter(|n| !n.is_empty()) {
            Some(name) => name,
            None => email
                .clone()
                .ok_or_else(|| AppError::OAuth("provider profile has no display name".to_string()))?,
        };

        Ok(Self {
            id: profile.id,
            display_name,
            emails: email.into_iter().collect(),
            photos: profile.picture.filter(|p| !p.is_empty()).into_iter().collect(),
        })
    }

    /// First email address, if the provider shared one.
    pub fn primary_email(&self) -> Option<&str> {
        self.emails.first().map(String::as_str)
    }

    /// First profile photo, if the provider shared one.
    pub fn primary_photo(&self) -> Option<&str> {
        self.photos.first().map(String::as_str)
    }
}
