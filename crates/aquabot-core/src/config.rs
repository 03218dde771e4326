//! Client configuration.

use std::time::Duration;

use crate::error::{AquaError, Result};

/// Backend URL used when none is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";
/// Time budget for ordinary API calls.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
/// Time budget for the image analysis upload.
pub const DEFAULT_ANALYSIS_TIMEOUT: Duration = Duration::from_secs(60);

/// Connection settings for [`crate::api::ApiClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the backend, e.g. `https://api.aquabot.app`
    pub base_url: String,
    /// Timeout applied to every request unless overridden
    pub request_timeout: Duration,
    /// Abort deadline for image analysis uploads
    pub analysis_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            analysis_timeout: DEFAULT_ANALYSIS_TIMEOUT,
        }
    }
}

impl ClientConfig {
    /// Checks the URL scheme and that both timeouts are non-zero.
    pub fn validate(&self) -> Result<()> {
        let url = self.base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(AquaError::Configuration {
                message: format!("api url must start with http:// or https://, got '{url}'"),
            });
        }
        if self.request_timeout.is_zero() || self.analysis_timeout.is_zero() {
            return Err(AquaError::Configuration {
                message: "timeouts must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}
