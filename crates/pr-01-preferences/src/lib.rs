//! # Preferences Store (pr-01)
//!
//! Durable key/value storage for values that must outlive the process,
//! the persistent sibling of the in-memory data bus.
//!
//! ## Contract
//!
//! - `put` updates the in-memory view only; nothing reaches disk until `flush`.
//! - `get` never fails: a missing key yields the caller's default.
//! - `flush` is fallible; an I/O fault is returned to the caller and the store
//!   stays dirty so a later flush can retry.
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Description |
//! |----|-----------|-------------|
//! | 1 | Non-empty Keys | Keys are non-empty and at most `max_key_len` bytes |
//! | 2 | Bounded Values | Values are at most `max_value_len` bytes |
//! | 3 | Atomic Flush | The store file is replaced via temp file + rename |
//! | 4 | Single Owner | One process at a time holds a store file (`locking` feature) |
//!
//! ## Crate Structure (Hexagonal Architecture)
//!
//! - `domain/` - Values, configuration, errors, change notifications
//! - `ports/` - Port traits (inbound API, outbound backend SPI)
//! - `adapters/` - Memory and file backends, store lock
//! - `service.rs` - `Preferences` service implementing the API
//! - `registry.rs` - One cached store per name under a data directory
//!
//! ## Usage
//!
//! ```ignore
//! use pr_01_preferences::{PreferencesApi, PreferencesRegistry, PreferencesConfig};
//!
//! let registry = PreferencesRegistry::new("./data", PreferencesConfig::default());
//! let prefs = registry.get_or_open("settings").await?;
//!
//! prefs.put("theme", "dark").await?;
//! prefs.flush().await?;
//!
//! let theme = prefs.get_string("theme", "light").await;
//! ```

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod registry;
pub mod service;

// Re-export key types for convenience
pub use adapters::storage::{FileBackend, InMemoryBackend};
pub use domain::change::PreferenceChange;
pub use domain::config::PreferencesConfig;
pub use domain::errors::{BackendError, PreferencesError};
pub use domain::value::{PrefValue, PreferenceMap};
pub use ports::inbound::PreferencesApi;
pub use ports::outbound::PreferenceBackend;
pub use registry::PreferencesRegistry;
pub use service::Preferences;
