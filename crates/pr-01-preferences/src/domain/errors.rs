//! # Domain Errors
//!
//! Error types for the preferences store.
//!
//! ## Design Principles
//!
//! - Validation failures are reported before the in-memory view changes
//! - Backend faults carry a message, never a panic
//! - All errors are returned to the immediate caller

use std::path::PathBuf;
use thiserror::Error;

/// Errors returned by the preferences API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PreferencesError {
    /// Key is empty.
    #[error("Invalid preference key: key must not be empty")]
    EmptyKey,

    /// Key exceeds the configured length limit.
    #[error("Preference key too long: {len} bytes, max {max} bytes")]
    KeyTooLong { len: usize, max: usize },

    /// Value exceeds the configured size limit.
    #[error("Preference value for '{key}' too large: {size} bytes, max {max} bytes")]
    ValueTooLarge { key: String, size: usize, max: usize },

    /// The storage backend failed.
    #[error(transparent)]
    Backend(#[from] BackendError),

    /// A blocking backend task panicked or was cancelled.
    #[error("Background storage task failed: {message}")]
    TaskJoin { message: String },
}

/// Storage backend errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    /// I/O error during read/write.
    #[error("Preferences I/O error: {message}")]
    Io { message: String },

    /// The persisted document could not be parsed.
    #[error("Preferences file corrupted: {message}")]
    Corrupted { message: String },

    /// Another process holds the store.
    #[error("Preferences store already in use ({})", path.display())]
    Locked { path: PathBuf },

    /// The store name is not a plain file name.
    #[error("Invalid preferences store name '{name}'")]
    InvalidName { name: String },
}

impl From<std::io::Error> for BackendError {
    fn from(err: std::io::Error) -> Self {
        BackendError::Io {
            message: err.to_string(),
        }
    }
}
