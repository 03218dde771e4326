//! SQLite implementation of [`KeyValueStore`].

use std::path::{Path, PathBuf};

use tokio::{fs, task};

use super::KeyValueStore;
use crate::{
    db::Database,
    error::{AquaError, Result},
};

/// Durable key-value store backed by a SQLite file.
///
/// Each operation opens its own connection on the blocking pool, so the store
/// is cheap to clone and safe to share between tasks.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    db_path: PathBuf,
}

impl SqliteStore {
    /// Opens (and if needed creates) the store at `path`.
    ///
    /// # Errors
    ///
    /// Returns `AquaError::FileSystem` if the parent directory cannot be
    /// created, or `AquaError::Storage` if schema initialization fails.
    pub async fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let db_path = path.as_ref().to_path_buf();

        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .await
                    .map_err(|e| AquaError::FileSystem {
                        path: parent.to_path_buf(),
                        source: e,
                    })?;
            }
        }

        let db_path_clone = db_path.clone();
        run_blocking(move || {
            let _db = Database::new(&db_path_clone)?;
            Ok(())
        })
        .await?;

        Ok(Self { db_path })
    }

    /// Location of the backing database file.
    pub fn path(&self) -> &Path {
        &self.db_path
    }

    /// Lists every key currently stored.
    pub async fn keys(&self) -> Result<Vec<String>> {
        let db_path = self.db_path.clone();
        run_blocking(move || Database::new(&db_path)?.keys()).await
    }
}

impl KeyValueStore for SqliteStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let db_path = self.db_path.clone();
        let key = key.to_string();
        run_blocking(move || Database::new(&db_path)?.get_value(&key)).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let db_path = self.db_path.clone();
        let key = key.to_string();
        let value = value.to_string();
        run_blocking(move || Database::new(&db_path)?.set_value(&key, &value)).await
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let db_path = self.db_path.clone();
        let key = key.to_string();
        run_blocking(move || Database::new(&db_path)?.remove_value(&key).map(|_| ())).await
    }
}

async fn run_blocking<T, F>(f: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    task::spawn_blocking(f)
        .await
        .map_err(|e| AquaError::Configuration {
            message: format!("Task join error: {e}"),
        })?
}
