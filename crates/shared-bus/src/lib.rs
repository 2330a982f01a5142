//! # Shared Bus - Process-Wide Data Bus
//!
//! A single shared key/value store used to hand values between two pieces of
//! logic that have no direct call path, typically across a page navigation.
//!
//! ## Handoff Pattern
//!
//! ```text
//! ┌──────────────┐                    ┌──────────────┐
//! │ Profile Page │                    │ Detail Page  │
//! │              │    set("userInfo") │              │
//! │              │ ──────┐            │              │
//! └──────────────┘       │            └──────────────┘
//!                        ▼                    ↑
//!                  ┌──────────────┐          │
//!                  │   Data Bus   │          │
//!                  │              │ ─────────┘
//!                  └──────────────┘  get / take("userInfo")
//! ```
//!
//! ## Rules
//!
//! - **Last write wins**: a second `set` on the same key replaces the value.
//! - **Absence is not an error**: reads of unknown keys return `None`.
//! - **Readers clean up**: `take` reads and removes in one step.
//! - **One instance per process**: the composition root owns a `DataBus` and
//!   injects it; [`DataBus::get_instance`] serves code without an injection path.

// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod bus;
pub mod global;
pub mod key;

// Re-export main types
pub use bus::{BusStats, DataBus};
pub use key::BusKey;
pub use shared_types::{Payload, PayloadKind};

/// Key under which the profile page publishes the signed-in user.
pub const USER_INFO: BusKey<shared_types::UserInfo> = BusKey::new("userInfo");
