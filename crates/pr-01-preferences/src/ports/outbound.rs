//! # Outbound Ports (Driven Ports)
//!
//! Storage required by the preferences service.
//!
//! Production: `FileBackend` (adapters/storage/file.rs)
//! Testing: `InMemoryBackend` (adapters/storage/memory.rs)

use crate::domain::errors::BackendError;
use crate::domain::value::PreferenceMap;

/// Blocking persistence backend for a single named store.
///
/// Called from `tokio::task::spawn_blocking`, hence `'static`.
pub trait PreferenceBackend: Send + Sync + 'static {
    /// Read the persisted store. A store that was never written is empty.
    fn load(&self) -> Result<PreferenceMap, BackendError>;

    /// Replace the persisted store with `entries` atomically.
    fn persist(&self, entries: &PreferenceMap) -> Result<(), BackendError>;

    /// Delete the persisted store.
    fn destroy(&self) -> Result<(), BackendError>;

    /// Human-readable location for log messages.
    fn location(&self) -> String;
}
