//! Persistent key-value store abstraction.
//!
//! The device store holds string blobs keyed by name: the auth token, user
//! profile, language preference, chat history, and the irrigation plan cache.
//! There are no transactional guarantees across keys; writing two keys is two
//! separate operations.
//!
//! Two implementations are provided:
//!
//! - [`SqliteStore`]: durable store on a SQLite file, used by the application
//! - [`MemoryStore`]: in-process map for tests and ephemeral sessions

use std::future::Future;

use crate::error::Result;

pub mod memory;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// String key-value storage with asynchronous access.
pub trait KeyValueStore: Send + Sync {
    /// Returns the value under `key`, or `None` when absent.
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<String>>> + Send;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> impl Future<Output = Result<()>> + Send;

    /// Removes `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> impl Future<Output = Result<()>> + Send;
}
