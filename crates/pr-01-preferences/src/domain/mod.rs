//! # Domain Layer
//!
//! Pure types for the preferences store. No I/O here.

pub mod change;
pub mod config;
pub mod errors;
pub mod value;
