//! Persisted login session and user preferences.

use log::warn;

use crate::{
    error::{AquaError, Result},
    models::{LoginResponse, UserProfile},
    store::KeyValueStore,
};

const TOKEN_KEY: &str = "auth_token";
const PROFILE_KEY: &str = "user_profile";
const LANGUAGE_KEY: &str = "language";

/// Languages the client has translations for.
pub const SUPPORTED_LANGUAGES: &[&str] = &["en", "ar"];
pub const DEFAULT_LANGUAGE: &str = "en";

/// Auth token, user profile, and language preference on the device store.
///
/// Reads never fail: a storage fault is logged and reported as "not set".
pub struct Session<S> {
    store: S,
}

impl<S: KeyValueStore> Session<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Persists a successful login.
    pub async fn save_login(&self, login: &LoginResponse) -> Result<()> {
        self.store.set(TOKEN_KEY, &login.token).await?;
        self.store
            .set(PROFILE_KEY, &serde_json::to_string(&login.user)?)
            .await
    }

    pub async fn token(&self) -> Option<String> {
        self.read(TOKEN_KEY).await.filter(|t| !t.is_empty())
    }

    pub async fn user(&self) -> Option<UserProfile> {
        let raw = self.read(PROFILE_KEY).await?;
        serde_json::from_str(&raw)
            .map_err(|e| warn!("Ignoring unreadable user profile: {e}"))
            .ok()
    }

    /// A session needs both a token and a profile.
    pub async fn is_authenticated(&self) -> bool {
        self.token().await.is_some() && self.user().await.is_some()
    }

    pub async fn language(&self) -> String {
        self.read(LANGUAGE_KEY)
            .await
            .filter(|lang| SUPPORTED_LANGUAGES.contains(&lang.as_str()))
            .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string())
    }

    /// Stores the language preference.
    ///
    /// # Errors
    ///
    /// `InvalidInput` for an unsupported code; store errors are propagated.
    pub async fn set_language(&self, code: &str) -> Result<()> {
        let code = code.trim().to_lowercase();
        if !SUPPORTED_LANGUAGES.contains(&code.as_str()) {
            return Err(AquaError::invalid_input("language").with_reason(format!(
                "Unsupported language '{code}'. Choose one of: {}",
                SUPPORTED_LANGUAGES.join(", ")
            )));
        }
        self.store.set(LANGUAGE_KEY, &code).await
    }

    /// Forgets the token and profile. The language preference is kept.
    pub async fn clear(&self) -> Result<()> {
        let token = self.store.remove(TOKEN_KEY).await;
        let profile = self.store.remove(PROFILE_KEY).await;
        token.and(profile)
    }

    async fn read(&self, key: &str) -> Option<String> {
        match self.store.get(key).await {
            Ok(value) => value,
            Err(e) => {
                warn!("Failed to read '{key}': {e}");
                None
            }
        }
    }
}
