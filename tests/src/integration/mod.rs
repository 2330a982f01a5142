//! # Integration Tests
//!
//! Cross-crate scenarios wired the way the runtime wires them.

pub mod concurrency;
pub mod flows;
