//! # Relay Runtime Library
//!
//! Exposes the runtime's modules for testing. The entry point is the
//! `main.rs` binary.
//!
//! ## Layout
//!
//! - `container/` - configuration and the dependency-injection container
//! - `adapters/` - navigation stand-in
//! - `handoff/` - channel policy and the send/receive facade
//! - `pages` - the profile and detail pages of the demo flow

pub mod adapters;
pub mod container;
pub mod handoff;
pub mod pages;

pub use container::{load_config, ConfigError, RelayConfig, RelayContainer};
pub use handoff::{Channel, ChannelPolicy, Handoff, HandoffError, PayloadProfile};
