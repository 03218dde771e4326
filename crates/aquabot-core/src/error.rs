//! Error types for the AquaBot client library.

use std::path::PathBuf;

use thiserror::Error;

use crate::api::ApiErrorCode;
use crate::models::ScheduleStatus;

/// Comprehensive error type for all client operations.
#[derive(Error, Debug)]
pub enum AquaError {
    /// Local key-value store errors
    #[error("Storage error: {message}")]
    Storage {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// Key-value store failures not originating from SQLite
    #[error("Storage unavailable: {0}")]
    StoreUnavailable(String),
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
    /// Connectivity failures talking to the backend
    #[error("Network error: {message}")]
    Network {
        message: String,
        #[source]
        source: reqwest::Error,
    },
    /// A request did not complete within its time budget
    #[error("{operation} timed out after {seconds}s")]
    Timeout { operation: String, seconds: u64 },
    /// Non-success HTTP status without a usable envelope
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },
    /// The backend answered with `success: false`
    #[error("{message}")]
    Api {
        code: Option<ApiErrorCode>,
        message: String,
    },
    /// An operation needs a logged-in session
    #[error("Not logged in")]
    Unauthenticated,
    /// Response body did not have the expected shape
    #[error("Unexpected response: {message}")]
    UnexpectedResponse { message: String },
    /// A schedule item cannot move between these statuses
    #[error("Cannot change schedule item from '{from}' to '{to}'")]
    InvalidTransition {
        from: ScheduleStatus,
        to: ScheduleStatus,
    },
    /// No schedule item for the given plan and date
    #[error("No schedule item for plan {plan_id} on {date}")]
    ItemNotFound { plan_id: u64, date: String },
    /// The same user action is already running
    #[error("'{action}' is already in progress")]
    RequestInProgress { action: String },
}

/// Builder for creating storage errors with optional context.
pub struct StorageErrorBuilder {
    message: String,
}

impl StorageErrorBuilder {
    /// Create a new storage error builder with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build the error with the given source.
    pub fn with_source(self, source: rusqlite::Error) -> AquaError {
        AquaError::Storage {
            message: self.message,
            source,
        }
    }
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    /// Create a new invalid input error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> AquaError {
        AquaError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl AquaError {
    /// Creates a builder for storage errors.
    pub fn storage(message: impl Into<String>) -> StorageErrorBuilder {
        StorageErrorBuilder::new(message)
    }

    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Wraps a transport error with the name of the failed operation.
    pub fn network(operation: &str, source: reqwest::Error) -> Self {
        Self::Network {
            message: format!("{operation} failed"),
            source,
        }
    }

    /// Short text suitable for a transient notification.
    ///
    /// Validation and backend errors already carry human-readable text; the
    /// transport variants are collapsed into a generic connectivity message.
    pub fn user_message(&self) -> String {
        match self {
            AquaError::Network { .. } => {
                "Unable to reach the server. Check your connection and try again.".to_string()
            }
            AquaError::Timeout { .. } => "The request took too long. Please try again.".to_string(),
            AquaError::Unauthenticated => "Please log in to continue.".to_string(),
            AquaError::Api { code: Some(code), message } => code
                .user_message()
                .map(String::from)
                .unwrap_or_else(|| message.clone()),
            AquaError::InvalidInput { reason, .. } => reason.clone(),
            other => other.to_string(),
        }
    }

    /// Whether a fresh network fetch may succeed where this one failed.
    pub fn is_transient(&self) -> bool {
        match self {
            AquaError::Network { .. } | AquaError::Timeout { .. } => true,
            AquaError::Http { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

/// Specialized extension trait for storage-related Results.
pub trait DatabaseResultExt<T> {
    /// Map storage errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| AquaError::storage(message).with_source(e))
    }
}

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, AquaError>;
