//! # Shared Types Crate
//!
//! This crate contains the values that flow between pages, whichever channel
//! carries them (data bus, preferences, or route parameters).
//!
//! ## Design Principles
//!
//! - **Closed set of shapes**: Everything handed between pages is a [`Payload`]
//!   variant, so readers match on concrete types instead of downcasting.
//! - **Serializable**: Every payload round-trips through JSON, which is how the
//!   string-only channels carry it.

pub mod entities;
pub mod errors;
pub mod payload;

pub use entities::*;
pub use errors::*;
pub use payload::{FromPayload, Payload, PayloadKind};
