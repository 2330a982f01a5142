//! # Relay Configuration
//!
//! Unified configuration for the handoff channels.
//!
//! All limits have defaults matching the navigation layer and the
//! preferences store, with environment overrides.

use std::path::PathBuf;

use pr_01_preferences::PreferencesConfig;
use pr_02_route_params::DEFAULT_MAX_URL_BYTES;
use relay_telemetry::TelemetryConfig;
use thiserror::Error;
use tracing::{info, warn};

/// Complete relay configuration.
#[derive(Debug, Clone, Default)]
pub struct RelayConfig {
    /// Preferences store configuration.
    pub storage: StorageConfig,
    /// Route parameter configuration.
    pub params: ParamsConfig,
    /// Logging configuration.
    pub telemetry: TelemetryConfig,
}

impl RelayConfig {
    /// Check the configuration before wiring the container.
    ///
    /// # Errors
    ///
    /// - Store name empty or not a plain file name
    /// - URL limit of zero
    pub fn validate(&self) -> Result<(), ConfigError> {
        let name = &self.storage.store_name;
        if name.is_empty() {
            return Err(ConfigError::EmptyStoreName);
        }
        if name.contains(['/', '\\']) || name == "." || name == ".." {
            return Err(ConfigError::InvalidStoreName { name: name.clone() });
        }
        if self.params.max_url_bytes == 0 {
            return Err(ConfigError::ZeroUrlLimit);
        }
        Ok(())
    }
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Store name must not be empty. Set RELAY_STORE_NAME or provide in config.")]
    EmptyStoreName,

    #[error("Store name '{name}' must be a plain file name")]
    InvalidStoreName { name: String },

    #[error("Route URL limit must be greater than zero")]
    ZeroUrlLimit,
}

/// Preferences storage configuration.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Directory holding preference store files.
    pub data_dir: PathBuf,
    /// Store used for persisted handoffs.
    pub store_name: String,
    /// Limits applied by every store.
    pub preferences: PreferencesConfig,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            store_name: "page_relay".to_string(),
            preferences: PreferencesConfig::default(),
        }
    }
}

/// Route parameter configuration.
#[derive(Debug, Clone)]
pub struct ParamsConfig {
    /// Largest URL the navigation layer carries without truncation.
    pub max_url_bytes: usize,
}

impl Default for ParamsConfig {
    fn default() -> Self {
        Self {
            max_url_bytes: DEFAULT_MAX_URL_BYTES,
        }
    }
}

/// Load configuration from the process environment.
pub fn load_config() -> RelayConfig {
    let base = RelayConfig {
        telemetry: TelemetryConfig::from_env(),
        ..RelayConfig::default()
    };
    apply_overrides(base, |name| std::env::var(name).ok())
}

/// Apply `RELAY_*` overrides read through `lookup`.
///
/// Unparseable values are logged and ignored.
pub fn apply_overrides(
    mut config: RelayConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> RelayConfig {
    if let Some(dir) = lookup("RELAY_DATA_DIR") {
        config.storage.data_dir = PathBuf::from(dir);
    }
    if let Some(name) = lookup("RELAY_STORE_NAME") {
        config.storage.store_name = name;
    }
    if let Some(limit) = lookup("RELAY_MAX_URL_BYTES") {
        match limit.parse() {
            Ok(bytes) => {
                config.params.max_url_bytes = bytes;
                info!(bytes, "Loaded route URL limit from environment");
            }
            Err(_) => warn!(value = %limit, "RELAY_MAX_URL_BYTES must be a byte count"),
        }
    }
    config
}
