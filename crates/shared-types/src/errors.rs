//! # Error Types
//!
//! Errors raised when converting between [`Payload`](crate::Payload) and
//! concrete Rust types.

use crate::payload::PayloadKind;
use thiserror::Error;

/// A payload did not hold the variant the reader expected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Payload kind mismatch: expected {expected}, found {actual}")]
pub struct PayloadMismatch {
    pub expected: PayloadKind,
    pub actual: PayloadKind,
}
