//! Builder for creating and configuring AquaBot instances.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
    time::Duration,
};

use jiff::SignedDuration;

use super::AquaBot;
use crate::{
    api::ApiClient,
    cache::DEFAULT_TTL,
    clock::SystemClock,
    config::ClientConfig,
    error::{AquaError, Result},
    session::Session,
    store::SqliteStore,
};

/// Builder for creating and configuring AquaBot instances.
#[derive(Debug, Clone)]
pub struct AquaBotBuilder {
    database_path: Option<PathBuf>,
    client_config: ClientConfig,
    cache_ttl: SignedDuration,
}

impl AquaBotBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            database_path: None,
            client_config: ClientConfig::default(),
            cache_ttl: DEFAULT_TTL,
        }
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_DATA_HOME/aquabot/aquabot.db` or `~/.local/share/aquabot/aquabot.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Sets the backend base URL.
    pub fn with_api_url<U: Into<String>>(mut self, url: Option<U>) -> Self {
        if let Some(url) = url {
            self.client_config.base_url = url.into();
        }
        self
    }

    /// Sets the timeout for ordinary API calls.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.client_config.request_timeout = timeout;
        self
    }

    /// Sets the abort deadline for image uploads.
    pub fn with_analysis_timeout(mut self, timeout: Duration) -> Self {
        self.client_config.analysis_timeout = timeout;
        self
    }

    /// Sets the plan cache freshness window.
    pub fn with_cache_ttl(mut self, ttl: SignedDuration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    /// Builds the configured client, restoring a stored session if present.
    ///
    /// # Errors
    ///
    /// Returns `AquaError::Configuration` for an invalid API configuration,
    /// `AquaError::FileSystem` or `AquaError::XdgDirectory` if the database
    /// path cannot be prepared, and `AquaError::Storage` if the store cannot
    /// be initialized.
    pub async fn build(self) -> Result<AquaBot<SqliteStore>> {
        let mut client = ApiClient::new(&self.client_config)?;

        let db_path = match self.database_path {
            Some(path) => path,
            None => Self::default_database_path()?,
        };
        let store = SqliteStore::open(&db_path).await?;

        if let Some(token) = Session::new(store.clone()).token().await {
            client.set_token(Some(token));
        }

        Ok(AquaBot::from_parts(store, client, Arc::new(SystemClock)).with_cache_ttl(self.cache_ttl))
    }

    /// Returns the default database path following XDG Base Directory
    /// specification.
    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("aquabot")
            .place_data_file("aquabot.db")
            .map_err(|e| AquaError::XdgDirectory(e.to_string()))
    }
}

impl Default for AquaBotBuilder {
    fn default() -> Self {
        Self::new()
    }
}
