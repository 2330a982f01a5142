//! # Relay Container
//!
//! Builds the shared handoff infrastructure once and hands it to pages.
//!
//! - Exactly one [`DataBus`](shared_bus::DataBus) per container; every page
//!   receives the same `Arc`
//! - Preferences stores are cached by name in one registry
//! - Route codec and navigator share the configured URL limit

pub mod config;
pub mod relay;

pub use config::{load_config, ConfigError, ParamsConfig, RelayConfig, StorageConfig};
pub use relay::RelayContainer;
