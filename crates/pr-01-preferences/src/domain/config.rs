//! # Store Configuration

/// Limits and tuning for a preferences store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreferencesConfig {
    /// Maximum key length in bytes (default: 1024).
    pub max_key_len: usize,

    /// Maximum value size in bytes (default: 16 KiB).
    ///
    /// Text lists count the sum of their element lengths.
    pub max_value_len: usize,

    /// Buffered change notifications per subscriber (default: 64).
    pub change_capacity: usize,
}

impl Default for PreferencesConfig {
    fn default() -> Self {
        Self {
            max_key_len: 1024,
            max_value_len: 16 * 1024,
            change_capacity: 64,
        }
    }
}

impl PreferencesConfig {
    /// Create a configuration with default limits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum key length.
    pub fn with_max_key_len(mut self, max_key_len: usize) -> Self {
        self.max_key_len = max_key_len;
        self
    }

    /// Set the maximum value size.
    pub fn with_max_value_len(mut self, max_value_len: usize) -> Self {
        self.max_value_len = max_value_len;
        self
    }
}
