//! # Adapters
//!
//! Stand-ins for the platform services the pages talk to.

pub mod navigator;

pub use navigator::{Navigation, Navigator};
