//! # Domain Entities
//!
//! Structured records that pages hand to each other.

use serde::{Deserialize, Serialize};

/// Profile of the signed-in user, passed from the profile page to detail pages.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct UserInfo {
    /// Display name.
    pub name: String,
    /// Age in years.
    pub age: u32,
}

impl UserInfo {
    pub fn new(name: impl Into<String>, age: u32) -> Self {
        Self {
            name: name.into(),
            age,
        }
    }
}
