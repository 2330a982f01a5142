//! # Preferences Service
//!
//! In-memory view over a [`PreferenceBackend`], with explicit flush.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use tokio::sync::{broadcast, Mutex};
use tracing::{debug, info, warn};

use crate::domain::change::PreferenceChange;
use crate::domain::config::PreferencesConfig;
use crate::domain::errors::PreferencesError;
use crate::domain::value::{PrefValue, PreferenceMap};
use crate::ports::inbound::PreferencesApi;
use crate::ports::outbound::PreferenceBackend;

/// A named, persisted key/value store.
///
/// ## Thread Safety
///
/// - The in-memory view is guarded by a `RwLock`; no lock is held across `.await`
/// - Flushes are serialized by an async mutex
/// - Backend I/O runs on the blocking thread pool
pub struct Preferences<B: PreferenceBackend> {
    name: String,
    config: PreferencesConfig,
    backend: Arc<B>,
    entries: RwLock<PreferenceMap>,
    dirty: AtomicBool,
    flush_gate: Mutex<()>,
    changes: broadcast::Sender<PreferenceChange>,
}

impl<B: PreferenceBackend> Preferences<B> {
    /// Load the store from `backend`.
    ///
    /// # Errors
    ///
    /// Returns `Backend` if the persisted document cannot be read.
    pub async fn open(
        name: impl Into<String>,
        backend: B,
        config: PreferencesConfig,
    ) -> Result<Self, PreferencesError> {
        let name = name.into();
        let backend = Arc::new(backend);

        let loader = Arc::clone(&backend);
        let entries = tokio::task::spawn_blocking(move || loader.load())
            .await
            .map_err(|e| PreferencesError::TaskJoin {
                message: e.to_string(),
            })??;

        info!(
            store = %name,
            location = %backend.location(),
            keys = entries.len(),
            "[pr-01] Preferences loaded"
        );

        let (changes, _) = broadcast::channel(config.change_capacity.max(1));

        Ok(Self {
            name,
            config,
            backend,
            entries: RwLock::new(entries),
            dirty: AtomicBool::new(false),
            flush_gate: Mutex::new(()),
            changes,
        })
    }

    /// Store name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the in-memory view has changes not yet flushed.
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    /// Number of keys in the in-memory view.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Receive every subsequent change to this store.
    pub fn subscribe(&self) -> broadcast::Receiver<PreferenceChange> {
        self.changes.subscribe()
    }

    /// The backend this store persists to.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    fn validate(&self, key: &str, value: &PrefValue) -> Result<(), PreferencesError> {
        if key.is_empty() {
            return Err(PreferencesError::EmptyKey);
        }
        if key.len() > self.config.max_key_len {
            return Err(PreferencesError::KeyTooLong {
                len: key.len(),
                max: self.config.max_key_len,
            });
        }
        let size = value.byte_len();
        if size > self.config.max_value_len {
            return Err(PreferencesError::ValueTooLarge {
                key: key.to_string(),
                size,
                max: self.config.max_value_len,
            });
        }
        Ok(())
    }

    fn notify(&self, change: PreferenceChange) {
        // No subscribers is fine.
        let _ = self.changes.send(change);
    }
}

#[async_trait]
impl<B: PreferenceBackend> PreferencesApi for Preferences<B> {
    async fn put(&self, key: &str, value: PrefValue) -> Result<(), PreferencesError> {
        self.validate(key, &value)?;

        self.entries.write().insert(key.to_string(), value);
        self.dirty.store(true, Ordering::SeqCst);

        debug!(store = %self.name, key, "[pr-01] Preference put");
        self.notify(PreferenceChange::Put {
            key: key.to_string(),
        });
        Ok(())
    }

    async fn get(&self, key: &str, default: PrefValue) -> PrefValue {
        self.entries.read().get(key).cloned().unwrap_or(default)
    }

    async fn get_string(&self, key: &str, default: &str) -> String {
        match self.entries.read().get(key) {
            Some(PrefValue::Text(text)) => text.clone(),
            Some(other) => {
                warn!(store = %self.name, key, value = ?other, "[pr-01] Preference is not text, using default");
                default.to_string()
            }
            None => default.to_string(),
        }
    }

    async fn has(&self, key: &str) -> bool {
        self.entries.read().contains_key(key)
    }

    async fn delete(&self, key: &str) -> bool {
        let removed = self.entries.write().remove(key).is_some();
        if removed {
            self.dirty.store(true, Ordering::SeqCst);
            self.notify(PreferenceChange::Deleted {
                key: key.to_string(),
            });
        }
        removed
    }

    async fn clear(&self) {
        let had_entries = {
            let mut entries = self.entries.write();
            let had = !entries.is_empty();
            entries.clear();
            had
        };
        if had_entries {
            self.dirty.store(true, Ordering::SeqCst);
            self.notify(PreferenceChange::Cleared);
        }
    }

    async fn all(&self) -> PreferenceMap {
        self.entries.read().clone()
    }

    async fn flush(&self) -> Result<(), PreferencesError> {
        let _gate = self.flush_gate.lock().await;

        // Clear before snapshotting: a put racing the snapshot re-marks dirty.
        if !self.dirty.swap(false, Ordering::SeqCst) {
            debug!(store = %self.name, "[pr-01] Flush skipped, store is clean");
            return Ok(());
        }
        let snapshot = self.entries.read().clone();
        let keys = snapshot.len();

        let backend = Arc::clone(&self.backend);
        let result = tokio::task::spawn_blocking(move || backend.persist(&snapshot))
            .await
            .map_err(|e| PreferencesError::TaskJoin {
                message: e.to_string(),
            })
            .and_then(|r| r.map_err(PreferencesError::from));

        match result {
            Ok(()) => {
                info!(store = %self.name, keys, "[pr-01] Preferences flushed");
                Ok(())
            }
            Err(e) => {
                self.dirty.store(true, Ordering::SeqCst);
                warn!(store = %self.name, error = %e, "[pr-01] Preferences flush failed");
                Err(e)
            }
        }
    }
}
