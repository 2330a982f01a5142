//! # Preferences Registry
//!
//! Hands out one shared [`Preferences`] per store name, backed by files in a
//! data directory. Opening the same name twice returns the cached store.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::info;

use crate::adapters::storage::FileBackend;
use crate::domain::config::PreferencesConfig;
use crate::domain::errors::PreferencesError;
use crate::ports::outbound::PreferenceBackend;
use crate::service::Preferences;

/// Concrete store type handed out by the registry.
pub type FilePreferences = Preferences<FileBackend>;

/// Cache of open stores under one data directory.
pub struct PreferencesRegistry {
    data_dir: PathBuf,
    config: PreferencesConfig,
    /// Async mutex: opening a store awaits the initial load.
    stores: Mutex<HashMap<String, Arc<FilePreferences>>>,
}

impl PreferencesRegistry {
    pub fn new(data_dir: impl Into<PathBuf>, config: PreferencesConfig) -> Self {
        Self {
            data_dir: data_dir.into(),
            config,
            stores: Mutex::new(HashMap::new()),
        }
    }

    /// Directory holding the store files.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Return the store `name`, opening and loading it on first use.
    ///
    /// # Errors
    ///
    /// - `Backend(Locked)`: another process owns the store
    /// - `Backend(Io | Corrupted)`: the store file cannot be read
    pub async fn get_or_open(&self, name: &str) -> Result<Arc<FilePreferences>, PreferencesError> {
        let mut stores = self.stores.lock().await;
        if let Some(store) = stores.get(name) {
            return Ok(Arc::clone(store));
        }

        let dir = self.data_dir.clone();
        let store_name = name.to_string();
        let backend = tokio::task::spawn_blocking(move || FileBackend::open(&dir, &store_name))
            .await
            .map_err(|e| PreferencesError::TaskJoin {
                message: e.to_string(),
            })??;

        let store = Arc::new(Preferences::open(name, backend, self.config.clone()).await?);
        stores.insert(name.to_string(), Arc::clone(&store));
        Ok(store)
    }

    /// Drop the cached handle for `name`.
    ///
    /// Unflushed changes are lost unless another holder of the store flushes.
    pub async fn evict(&self, name: &str) -> Option<Arc<FilePreferences>> {
        self.stores.lock().await.remove(name)
    }

    /// Evict `name` and delete its file.
    ///
    /// # Errors
    ///
    /// Returns `Backend` if the file exists but cannot be removed, or if the
    /// store is not cached and another process owns it.
    pub async fn delete(&self, name: &str) -> Result<(), PreferencesError> {
        let mut stores = self.stores.lock().await;
        let cached = stores.remove(name);
        let dir = self.data_dir.clone();
        let store_name = name.to_string();
        tokio::task::spawn_blocking(move || match cached {
            Some(store) => store.backend().destroy(),
            None => FileBackend::open(&dir, &store_name)?.destroy(),
        })
        .await
        .map_err(|e| PreferencesError::TaskJoin {
            message: e.to_string(),
        })??;
        info!(store = name, "[pr-01] Preferences deleted");
        Ok(())
    }

    /// Names of currently cached stores.
    pub async fn open_stores(&self) -> Vec<String> {
        self.stores.lock().await.keys().cloned().collect()
    }
}
