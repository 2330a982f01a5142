//! # Inbound Ports (Driving Ports)
//!
//! The primary API for the preferences store.

use async_trait::async_trait;

use crate::domain::errors::PreferencesError;
use crate::domain::value::{PrefValue, PreferenceMap};

/// Asynchronous key/value API over a persisted store.
///
/// Reads and writes act on the in-memory view; only `flush` touches the
/// backend.
#[async_trait]
pub trait PreferencesApi: Send + Sync {
    /// Insert or overwrite `key`.
    ///
    /// ## Errors
    ///
    /// - `EmptyKey` / `KeyTooLong`: key fails validation
    /// - `ValueTooLarge`: value exceeds the configured limit
    async fn put(&self, key: &str, value: PrefValue) -> Result<(), PreferencesError>;

    /// Value under `key`, or `default` if absent.
    async fn get(&self, key: &str, default: PrefValue) -> PrefValue;

    /// Text value under `key`, or `default` if absent or not text.
    async fn get_string(&self, key: &str, default: &str) -> String;

    /// Whether `key` is present.
    async fn has(&self, key: &str) -> bool;

    /// Remove `key`. Returns whether it was present.
    async fn delete(&self, key: &str) -> bool;

    /// Remove every key.
    async fn clear(&self);

    /// Snapshot of every key.
    async fn all(&self) -> PreferenceMap;

    /// Persist the in-memory view to the backend.
    ///
    /// No-op when nothing changed since the last successful flush.
    ///
    /// ## Errors
    ///
    /// - `Backend`: the backend failed; the store remains dirty
    /// - `TaskJoin`: the blocking flush task did not complete
    async fn flush(&self) -> Result<(), PreferencesError>;
}
